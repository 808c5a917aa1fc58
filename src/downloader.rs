use std::fs;
use std::io;
use std::thread;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, info};

use crate::error::ChebiError;

/// Pause between consecutive requests; the EBI archive throttles clients
/// that fire downloads back to back.
pub const REQUEST_DELAY: Duration = Duration::from_secs(2);

const REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

/// Transfer collaborator: fetches each URL to its corresponding path.
/// `urls` and `paths` are parallel sequences of equal length.
pub trait Downloader: Send + Sync {
    fn download(&self, urls: &[String], paths: &[Utf8PathBuf]) -> Result<(), ChebiError>;
}

/// Sequential blocking HTTP downloader. Runs one transfer at a time on the
/// calling thread and waits [`REQUEST_DELAY`] between network requests.
pub struct HttpDownloader {
    client: Client,
    delay: Duration,
    verbose: bool,
}

impl HttpDownloader {
    pub fn new(verbose: bool) -> Result<Self, ChebiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("chebi-dm/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| ChebiError::DownloadHttp(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| ChebiError::DownloadHttp(err.to_string()))?;
        Ok(Self {
            client,
            delay: REQUEST_DELAY,
            verbose,
        })
    }

    fn progress(&self, message: String) {
        if self.verbose {
            info!("{message}");
        } else {
            debug!("{message}");
        }
    }

    fn fetch(&self, url: &str, path: &Utf8Path) -> Result<(), ChebiError> {
        let parent = path
            .parent()
            .ok_or_else(|| ChebiError::Filesystem(format!("no parent directory for {path}")))?;
        fs::create_dir_all(parent.as_std_path())
            .map_err(|err| ChebiError::Filesystem(err.to_string()))?;

        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|err| ChebiError::DownloadHttp(err.to_string()))?;
        if !response.status().is_success() {
            return Err(ChebiError::DownloadStatus {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let mut file = tempfile::NamedTempFile::new_in(parent.as_std_path())
            .map_err(|err| ChebiError::Filesystem(err.to_string()))?;
        io::copy(&mut response, &mut file)
            .map_err(|err| ChebiError::DownloadHttp(err.to_string()))?;
        file.persist(path.as_std_path())
            .map_err(|err| ChebiError::Filesystem(err.to_string()))?;
        Ok(())
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, urls: &[String], paths: &[Utf8PathBuf]) -> Result<(), ChebiError> {
        debug_assert_eq!(urls.len(), paths.len());

        let mut fetched_any = false;
        for (url, path) in urls.iter().zip(paths) {
            if path.as_std_path().exists() {
                self.progress(format!("{path} already present, skipping"));
                continue;
            }
            if fetched_any {
                thread::sleep(self.delay);
            }
            self.progress(format!("downloading {url} -> {path}"));
            self.fetch(url, path)?;
            fetched_any = true;
        }
        Ok(())
    }
}
