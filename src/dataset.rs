use std::fs;

use serde::Serialize;

use crate::downloader::{Downloader, HttpDownloader};
use crate::error::ChebiError;
use crate::settings::{DatasetMetadata, DatasetSettings};

/// A built ChEBI dataset: the files resolved by the settings, downloaded
/// into the release directory, plus the configuration that produced them.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    metadata: DatasetMetadata,
    built_at: String,
    tool: String,
}

impl Dataset {
    pub fn metadata(&self) -> &DatasetMetadata {
        &self.metadata
    }

    pub fn built_at(&self) -> &str {
        &self.built_at
    }

    /// Build a dataset with the default HTTP downloader.
    pub fn build(settings: &DatasetSettings) -> Result<Self, ChebiError> {
        let downloader = HttpDownloader::new(settings.is_verbose())?;
        Self::build_with(settings, &downloader)
    }

    /// Build a dataset through the given transfer collaborator.
    pub fn build_with(
        settings: &DatasetSettings,
        downloader: &dyn Downloader,
    ) -> Result<Self, ChebiError> {
        let objectives = settings.download_objectives();
        let mut urls = Vec::with_capacity(objectives.len());
        let mut paths = Vec::with_capacity(objectives.len());
        for objective in objectives {
            urls.push(objective.url);
            paths.push(objective.path);
        }

        downloader.download(&urls, &paths)?;

        let dataset = Dataset {
            metadata: settings.to_metadata(),
            built_at: chrono::Utc::now().to_rfc3339(),
            tool: format!("chebi-dm/{}", env!("CARGO_PKG_VERSION")),
        };
        dataset.write_provenance(settings)?;
        Ok(dataset)
    }

    /// Record what was built next to the downloaded files.
    fn write_provenance(&self, settings: &DatasetSettings) -> Result<(), ChebiError> {
        let directory = settings.version_directory();
        fs::create_dir_all(directory.as_std_path())
            .map_err(|err| ChebiError::Filesystem(err.to_string()))?;
        let payload = serde_json::to_vec_pretty(self)
            .map_err(|err| ChebiError::Filesystem(err.to_string()))?;
        fs::write(directory.join("metadata.json").as_std_path(), payload)
            .map_err(|err| ChebiError::Filesystem(err.to_string()))
    }
}
