use std::path::PathBuf;

use url::Url;

/// Environment variable overriding [`Config::data_dir`]
pub static DATA_DIR_VAR: &str = "TEXTATTACK_DATA_DIR";

/// Environment variable overriding [`Config::remote_url`]
pub static REMOTE_URL_VAR: &str = "TEXTATTACK_REMOTE_URL";

/// Environment variable overriding [`Config::movie_review_path`]
pub static MOVIE_REVIEW_PATH_VAR: &str = "TEXTATTACK_MR_PATH";

/// Where dataset files live locally and where they are fetched from
#[derive(burn::config::Config)]
pub struct Config {
    /// The location of the top-level local data directory
    #[config(default = "\"data\".to_string()")]
    pub data_dir: String,

    /// The root url that dataset paths are resolved against when downloading
    #[config(default = "\"https://textattack.s3.amazonaws.com/\".to_string()")]
    pub remote_url: String,

    /// Path of the Movie Review sentiment file. Relative paths live under `data_dir`; an absolute
    /// path is used as-is.
    #[config(
        default = "\"/p/qdata/jm8wx/research/text_attacks/textattack_data/mr.txt\".to_string()"
    )]
    pub movie_review_path: String,
}

impl Config {
    /// Defaults, overridden by any `TEXTATTACK_*` variables set in the environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults, overridden by whatever `lookup` returns for each `TEXTATTACK_*` variable
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(data_dir) = lookup(DATA_DIR_VAR) {
            config.data_dir = data_dir;
        }

        if let Some(remote_url) = lookup(REMOTE_URL_VAR) {
            config.remote_url = remote_url;
        }

        if let Some(path) = lookup(MOVIE_REVIEW_PATH_VAR) {
            config.movie_review_path = path;
        }

        config
    }

    /// The local path for a dataset file
    pub fn local_path(&self, path: &str) -> PathBuf {
        PathBuf::from(&self.data_dir).join(path)
    }

    /// The remote url for a dataset file
    pub fn remote_url_for(&self, path: &str) -> Result<Url, url::ParseError> {
        let mut root = self.remote_url.clone();
        if !root.ends_with('/') {
            root.push('/');
        }

        Url::parse(&root)?.join(path.trim_start_matches('/'))
    }
}
