use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::catalog::{VersionCatalog, VersionRecord, category};
use crate::error::ChebiError;
use crate::objective::DownloadObjective;

pub const DEFAULT_DOWNLOADS_DIRECTORY: &str = "downloads";

/// Settings for constructing one version of the ChEBI dataset.
///
/// A fluent builder bound to a single release: category inclusions are
/// validated against the release metadata as they are added, and the final
/// selection resolves into [`DownloadObjective`]s for the downloader.
///
/// ```no_run
/// use chebi_dataset_manager::DatasetSettings;
///
/// let settings = DatasetSettings::new("231")?
///     .include_compounds()?
///     .include_names()?
///     .only_three_stars();
/// # Ok::<(), chebi_dataset_manager::ChebiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DatasetSettings {
    record: VersionRecord,
    only_three_stars: bool,
    generate_smiles: bool,
    to_include: Vec<String>,
    verbose: bool,
    downloads_directory: Utf8PathBuf,
}

/// Serializable description of a fully resolved configuration, attached to
/// built datasets as provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub version: String,
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub only_three_stars: bool,
    pub generate_smiles: bool,
    pub to_include: Vec<String>,
}

impl DatasetSettings {
    /// Bind settings to a release, failing immediately for unknown versions.
    pub fn new(version: &str) -> Result<Self, ChebiError> {
        let record = VersionCatalog::load_version(version)?;
        Ok(Self {
            record,
            only_three_stars: false,
            generate_smiles: false,
            to_include: Vec::new(),
            verbose: false,
            downloads_directory: Utf8PathBuf::from(DEFAULT_DOWNLOADS_DIRECTORY),
        })
    }

    /// Include a category by name. The general primitive behind every
    /// `include_*` convenience method; repeated inclusions are ignored and
    /// first-seen order is preserved.
    pub fn include(mut self, name: &str) -> Result<Self, ChebiError> {
        if self.record.category(name).is_none() {
            return Err(ChebiError::UnknownCategory {
                requested: name.to_string(),
                available: self.record.category_names().map(str::to_string).collect(),
            });
        }
        if !self.to_include.iter().any(|included| included == name) {
            self.to_include.push(name.to_string());
        }
        Ok(self)
    }

    pub fn include_compounds(self) -> Result<Self, ChebiError> {
        self.include(category::COMPOUNDS)
    }

    pub fn include_names(self) -> Result<Self, ChebiError> {
        self.include(category::NAMES)
    }

    pub fn include_structures(self) -> Result<Self, ChebiError> {
        self.include(category::STRUCTURES)
    }

    pub fn include_relation(self) -> Result<Self, ChebiError> {
        self.include(category::RELATION)
    }

    pub fn include_reference(self) -> Result<Self, ChebiError> {
        self.include(category::REFERENCE)
    }

    pub fn include_comments(self) -> Result<Self, ChebiError> {
        self.include(category::COMMENTS)
    }

    pub fn include_compound_origins(self) -> Result<Self, ChebiError> {
        self.include(category::COMPOUND_ORIGINS)
    }

    pub fn include_dataset_accession(self) -> Result<Self, ChebiError> {
        self.include(category::DATASET_ACCESSION)
    }

    pub fn include_chemical_data(self) -> Result<Self, ChebiError> {
        self.include(category::CHEMICAL_DATA)
    }

    pub fn include_inchikeys(self) -> Result<Self, ChebiError> {
        self.include(category::INCHIKEYS)
    }

    /// Include every category the release ships, in metadata order.
    pub fn include_all(mut self) -> Self {
        let names: Vec<String> = self.record.category_names().map(str::to_string).collect();
        for name in names {
            if !self.to_include.contains(&name) {
                self.to_include.push(name);
            }
        }
        self
    }

    /// Restrict downloads to the manually curated three-star subset.
    pub fn only_three_stars(mut self) -> Self {
        self.only_three_stars = true;
        self
    }

    /// Generate SMILES strings while building. SMILES are derived from the
    /// InChIKey table, so that category is always pulled in as well.
    pub fn generate_smiles(mut self) -> Result<Self, ChebiError> {
        self.generate_smiles = true;
        self.include(category::INCHIKEYS)
    }

    pub fn set_verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Override the root directory downloads land under. The directory is
    /// created by the downloader, not validated here.
    pub fn downloads_directory(mut self, directory: impl Into<Utf8PathBuf>) -> Self {
        self.downloads_directory = directory.into();
        self
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn version_record(&self) -> &VersionRecord {
        &self.record
    }

    pub fn included(&self) -> &[String] {
        &self.to_include
    }

    /// Directory the resolved files land in: `<downloads>/<version>`.
    pub fn version_directory(&self) -> Utf8PathBuf {
        self.downloads_directory.join(self.record.version())
    }

    /// Resolve the selection into download objectives, one per included
    /// category, in selection order.
    pub fn download_objectives(&self) -> Vec<DownloadObjective> {
        let version_directory = self.version_directory();
        self.to_include
            .iter()
            .map(|name| {
                let urls = self
                    .record
                    .category(name)
                    .expect("included categories are validated against the release");
                let url = if self.only_three_stars {
                    urls.three_stars.as_str()
                } else {
                    urls.all.as_str()
                };
                let file_name = url.rsplit('/').next().unwrap_or(url);
                DownloadObjective::new(version_directory.join(file_name), url.to_string())
            })
            .collect()
    }

    /// Snapshot of the resolved configuration.
    pub fn to_metadata(&self) -> DatasetMetadata {
        DatasetMetadata {
            version: self.record.version().to_string(),
            year: self.record.year(),
            month: self.record.month(),
            day: self.record.day(),
            only_three_stars: self.only_three_stars,
            generate_smiles: self.generate_smiles,
            to_include: self.to_include.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn defaults() {
        let settings = DatasetSettings::new("231").unwrap();
        let metadata = settings.to_metadata();
        assert_eq!(metadata.version, "231");
        assert!(!metadata.only_three_stars);
        assert!(!metadata.generate_smiles);
        assert!(metadata.to_include.is_empty());
        assert!(!settings.is_verbose());
        assert_eq!(settings.version_directory(), "downloads/231");
    }

    #[test]
    fn unknown_version_propagates() {
        let err = DatasetSettings::new("007").unwrap_err();
        assert_matches!(err, ChebiError::UnknownVersion { .. });
    }

    #[test]
    fn unknown_category_payload_excludes_reserved_keys() {
        let settings = DatasetSettings::new("231").unwrap();
        let err = settings.include("proteins").unwrap_err();
        assert_matches!(err, ChebiError::UnknownCategory { requested, available } => {
            assert_eq!(requested, "proteins");
            assert!(available.contains(&"compounds".to_string()));
            for key in crate::catalog::RESERVED_KEYS {
                assert!(!available.contains(&key.to_string()));
            }
        });
    }

    #[test]
    fn inclusion_is_idempotent_and_ordered() {
        let settings = DatasetSettings::new("231")
            .unwrap()
            .include_compounds()
            .unwrap()
            .include_names()
            .unwrap()
            .include_compounds()
            .unwrap();
        assert_eq!(settings.included(), ["compounds", "names"]);
    }

    #[test]
    fn generate_smiles_pulls_in_inchikeys() {
        let settings = DatasetSettings::new("231")
            .unwrap()
            .include_names()
            .unwrap()
            .generate_smiles()
            .unwrap();
        assert_eq!(settings.included(), ["names", "inchikeys"]);
        assert!(settings.to_metadata().generate_smiles);

        // Order of the call relative to other inclusions must not matter.
        let settings = DatasetSettings::new("231")
            .unwrap()
            .generate_smiles()
            .unwrap()
            .include_inchikeys()
            .unwrap();
        assert_eq!(settings.included(), ["inchikeys"]);
    }

    #[test]
    fn include_all_lists_every_category_once() {
        let settings = DatasetSettings::new("231").unwrap().include_all();
        let record_names: Vec<String> = settings
            .version_record()
            .category_names()
            .map(str::to_string)
            .collect();
        assert_eq!(settings.included(), record_names.as_slice());

        let again = settings.clone().include_all();
        assert_eq!(again.included(), record_names.as_slice());
    }

    #[test]
    fn objectives_follow_selection_order() {
        let settings = DatasetSettings::new("231")
            .unwrap()
            .include_names()
            .unwrap()
            .include_compounds()
            .unwrap();
        let objectives = settings.download_objectives();
        assert_eq!(objectives.len(), 2);
        assert!(objectives[0].url.ends_with("names.tsv.gz"));
        assert!(objectives[1].url.ends_with("ChEBI_complete.sdf.gz"));
        assert_eq!(objectives[0].path, "downloads/231/names.tsv.gz");
        assert_eq!(objectives[1].path, "downloads/231/ChEBI_complete.sdf.gz");
    }

    #[test]
    fn three_star_flag_switches_urls() {
        let settings = DatasetSettings::new("231")
            .unwrap()
            .include_compounds()
            .unwrap();
        let full = settings.clone().download_objectives();
        assert!(full[0].url.ends_with("ChEBI_complete.sdf.gz"));

        let curated = settings.only_three_stars().download_objectives();
        assert!(curated[0].url.ends_with("ChEBI_complete_3star.sdf.gz"));
        assert_eq!(curated[0].path, "downloads/231/ChEBI_complete_3star.sdf.gz");
    }

    #[test]
    fn downloads_directory_override() {
        let settings = DatasetSettings::new("231")
            .unwrap()
            .downloads_directory("/tmp/chebi")
            .include_relation()
            .unwrap();
        let objectives = settings.download_objectives();
        assert_eq!(objectives[0].path, "/tmp/chebi/231/relation.tsv");
    }

    #[test]
    fn metadata_round_trips_through_json() {
        let settings = DatasetSettings::new("235")
            .unwrap()
            .include_compounds()
            .unwrap()
            .only_three_stars();
        let metadata = settings.to_metadata();
        let json = serde_json::to_string(&metadata).unwrap();
        let back: DatasetMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back, metadata);
    }
}
