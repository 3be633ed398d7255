use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use lazy_static::lazy_static;
use log::{debug, info};
use tokio::{fs, sync::Mutex};
use url::Url;

lazy_static! {
    /// Held across the whole check-fetch-write sequence
    static ref DOWNLOAD_LOCK: Mutex<()> = Mutex::new(());
}

/// Something that can retrieve the raw bytes of a remote file
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetch the full body found at `url`
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, DownloadError>;
}

/// Fetches files over HTTP(S)
#[derive(Clone, Debug, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with a default client
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fetcher around an existing client (to share a pool or set timeouts)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, DownloadError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| DownloadError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| DownloadError::Request {
                url: url.to_string(),
                source,
            })?;

        Ok(bytes.to_vec())
    }
}

/// Ensure a file exists at `dest`, fetching it from `url` if it does not.
///
/// The body is written to a sibling `.part` file first and renamed into place, so `dest` only ever
/// holds a complete download. Returns `true` if a download happened and `false` if the file was
/// already present.
pub async fn download_if_needed<F>(fetcher: &F, url: &Url, dest: &Path) -> Result<bool, DownloadError>
where
    F: Fetch + ?Sized,
{
    let _lock = DOWNLOAD_LOCK.lock().await;

    let present = fs::try_exists(dest)
        .await
        .map_err(|source| DownloadError::Write {
            path: dest.to_path_buf(),
            source,
        })?;

    if present {
        debug!("Found cached file at {}", dest.display());

        return Ok(false);
    }

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| DownloadError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    info!("Downloading {} to {}", url, dest.display());

    let bytes = fetcher.fetch(url).await?;

    let partial = partial_path(dest);
    if let Err(source) = fs::write(&partial, &bytes).await {
        let _ = fs::remove_file(&partial).await;

        return Err(DownloadError::Write {
            path: partial,
            source,
        });
    }

    if let Err(source) = fs::rename(&partial, dest).await {
        let _ = fs::remove_file(&partial).await;

        return Err(DownloadError::Write {
            path: dest.to_path_buf(),
            source,
        });
    }

    debug!("Wrote {} bytes to {}", bytes.len(), dest.display());

    Ok(true)
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = OsString::from(dest.as_os_str());
    name.push(".part");

    PathBuf::from(name)
}

/// Download Error
#[derive(thiserror::Error, Debug)]
pub enum DownloadError {
    /// The request could not be sent or the body could not be read
    #[error("failed to download {url}: {source}")]
    Request {
        /// The requested url
        url: String,
        /// The underlying client error
        source: reqwest::Error,
    },

    /// The remote answered with a non-success status
    #[error("HTTP {status} downloading {url}")]
    Status {
        /// The requested url
        url: String,
        /// The response status code
        status: u16,
    },

    /// The downloaded content could not be written to local storage
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        /// The path being written
        path: PathBuf,
        /// The underlying io error
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;

    struct CountingFetcher {
        calls: AtomicUsize,
        body: Option<&'static str>,
    }

    impl CountingFetcher {
        fn serving(body: &'static str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                body: Some(body),
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                body: None,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Fetch for CountingFetcher {
        async fn fetch(&self, url: &Url) -> Result<Vec<u8>, DownloadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            match self.body {
                Some(body) => Ok(body.as_bytes().to_vec()),
                None => Err(DownloadError::Status {
                    url: url.to_string(),
                    status: 404,
                }),
            }
        }
    }

    fn url() -> Url {
        Url::parse("https://example.com/data/mr.txt").unwrap()
    }

    #[tokio::test]
    async fn test_downloads_missing_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("nested").join("mr.txt");
        let fetcher = CountingFetcher::serving("1 great film\n");

        assert!(download_if_needed(&fetcher, &url(), &dest).await.unwrap());
        assert_eq!(fetcher.calls(), 1);
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "1 great film\n");
        assert!(!partial_path(&dest).exists());

        assert!(!download_if_needed(&fetcher, &url(), &dest).await.unwrap());
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_existing_file_is_not_fetched() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("mr.txt");
        std::fs::write(&dest, "0 local copy\n").unwrap();
        let fetcher = CountingFetcher::serving("1 remote copy\n");

        assert!(!download_if_needed(&fetcher, &url(), &dest).await.unwrap());
        assert_eq!(fetcher.calls(), 0);
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "0 local copy\n");
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("mr.txt");
        let fetcher = CountingFetcher::failing();

        let err = download_if_needed(&fetcher, &url(), &dest)
            .await
            .unwrap_err();

        assert!(matches!(err, DownloadError::Status { status: 404, .. }));
        assert_eq!(fetcher.calls(), 1);
        assert!(!dest.exists());
        assert!(!partial_path(&dest).exists());
    }

    #[tokio::test]
    async fn test_concurrent_callers_fetch_once() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("mr.txt");
        let fetcher = CountingFetcher::serving("1 shared\n");
        let url = url();

        let (a, b) = tokio::join!(
            download_if_needed(&fetcher, &url, &dest),
            download_if_needed(&fetcher, &url, &dest),
        );

        assert_eq!(a.unwrap() as u8 + b.unwrap() as u8, 1);
        assert_eq!(fetcher.calls(), 1);
    }

    /// Turns the destination into a non-empty directory while the body is in flight
    struct DirectoryRacer {
        dest: PathBuf,
    }

    #[async_trait]
    impl Fetch for DirectoryRacer {
        async fn fetch(&self, _url: &Url) -> Result<Vec<u8>, DownloadError> {
            std::fs::create_dir_all(self.dest.join("occupied")).unwrap();

            Ok(b"1 late\n".to_vec())
        }
    }

    #[tokio::test]
    async fn test_failed_rename_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("mr.txt");
        let fetcher = DirectoryRacer { dest: dest.clone() };

        let err = download_if_needed(&fetcher, &url(), &dest)
            .await
            .unwrap_err();

        assert!(matches!(err, DownloadError::Write { ref path, .. } if *path == dest));
        assert!(dest.is_dir());
        assert!(!partial_path(&dest).exists());
    }

    #[tokio::test]
    async fn test_unreadable_destination_is_an_error_not_a_download() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let dest = blocker.join("mr.txt");
        let fetcher = CountingFetcher::serving("1 unused\n");

        let err = download_if_needed(&fetcher, &url(), &dest)
            .await
            .unwrap_err();

        assert!(matches!(err, DownloadError::Write { ref path, .. } if *path == dest));
        assert_eq!(fetcher.calls(), 0);
    }

    #[test]
    fn test_partial_path_appends_suffix() {
        assert_eq!(
            partial_path(Path::new("data/mr.txt")),
            PathBuf::from("data/mr.txt.part")
        );
    }
}
