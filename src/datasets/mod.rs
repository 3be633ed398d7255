use std::path::{Path, PathBuf};

use async_trait::async_trait;
use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::{
    utils::{
        download::{download_if_needed, DownloadError, Fetch},
        text_file::{load_text_file, ParseError},
    },
    Config,
};

/// The Movie Review sentiment dataset
pub mod movie_review_sentiment;

/// A dataset which can be loaded
#[async_trait]
pub trait LoadableDataset<I>: burn::data::dataset::Dataset<I> {
    /// Load the dataset, starting at line `offset` of its backing file
    async fn load(config: &Config, offset: usize) -> Result<Self, DatasetError>
    where
        Self: std::marker::Sized;
}

/// A labeled text example
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Sample<L> {
    /// The example text
    pub text: String,

    /// The class label of the text
    pub label: L,
}

/// Ensure the dataset file at `path` is present locally, downloading it if needed, then parse its
/// lines after the first `offset`.
pub async fn fetch_and_parse<L, F>(
    fetcher: &F,
    config: &Config,
    path: &str,
    offset: usize,
) -> Result<Vec<Sample<L>>, DatasetError>
where
    L: TryFrom<i64>,
    F: Fetch + ?Sized,
{
    let local = config.local_path(path);
    let remote = config
        .remote_url_for(path)
        .map_err(|source| DatasetError::InvalidUrl {
            url: config.remote_url.clone(),
            source,
        })?;

    download_if_needed(fetcher, &remote, &local).await?;

    load_text_file(&local, offset).await
}

/// Dataset Error
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// The file could not be fetched or stored
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// A line does not hold a valid label and text
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The file is missing after it should have been made present
    #[error("dataset file not found at {}", .0.display())]
    NotFound(PathBuf),

    /// The configured remote url is not a valid url
    #[error("invalid remote url {url}: {source}")]
    InvalidUrl {
        /// The configured remote root
        url: String,
        /// The underlying parse error
        source: url::ParseError,
    },

    /// The file exists but could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// The path being read
        path: PathBuf,
        /// The underlying io error
        source: std::io::Error,
    },
}

impl DatasetError {
    /// Classify an error raised while reading the file at `path`
    pub fn from_io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            DatasetError::NotFound(path.to_path_buf())
        } else {
            DatasetError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}
