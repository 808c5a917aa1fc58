use camino::Utf8PathBuf;

/// A resolved download: where a file lands and where it comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadObjective {
    pub path: Utf8PathBuf,
    pub url: String,
}

impl DownloadObjective {
    pub fn new(path: Utf8PathBuf, url: String) -> Self {
        Self { path, url }
    }
}
