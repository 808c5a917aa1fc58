use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ChebiError {
    #[error("unknown ChEBI version {requested}: available versions are {joined}", joined = .available.join(", "))]
    UnknownVersion {
        requested: String,
        available: Vec<String>,
    },

    #[error("unknown data category {requested}: available categories are {joined}", joined = .available.join(", "))]
    UnknownCategory {
        requested: String,
        available: Vec<String>,
    },

    #[error("malformed metadata for ChEBI version {version}: {message}")]
    CatalogMetadata { version: String, message: String },

    #[error("download request failed: {0}")]
    DownloadHttp(String),

    #[error("server returned status {status} for {url}")]
    DownloadStatus { status: u16, url: String },

    #[error("filesystem error: {0}")]
    Filesystem(String),
}
