use serde::{Deserialize, Serialize};

use crate::error::ChebiError;

/// Metadata keys that describe the release itself rather than a data
/// category. These never appear in a record's category table.
pub const RESERVED_KEYS: [&str; 4] = ["version", "year", "month", "day"];

/// Well-known category names shared by every ChEBI release.
pub mod category {
    pub const COMPOUNDS: &str = "compounds";
    pub const NAMES: &str = "names";
    pub const STRUCTURES: &str = "structures";
    pub const RELATION: &str = "relation";
    pub const REFERENCE: &str = "reference";
    pub const COMMENTS: &str = "comments";
    pub const COMPOUND_ORIGINS: &str = "compound_origins";
    pub const DATASET_ACCESSION: &str = "dataset_accession";
    pub const CHEMICAL_DATA: &str = "chemical_data";
    pub const INCHIKEYS: &str = "inchikeys";
}

/// Release metadata shipped with the crate, one JSON document per version.
const VERSION_SOURCES: &[(&str, &str)] = &[
    ("231", include_str!("catalog/versions/231.json")),
    ("235", include_str!("catalog/versions/235.json")),
    ("239", include_str!("catalog/versions/239.json")),
];

/// Source URLs for one data category: the full automated set and the
/// manually curated three-star subset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryUrls {
    pub all: String,
    pub three_stars: String,
}

/// Immutable metadata for one ChEBI release: its date and the ordered table
/// of downloadable categories.
#[derive(Debug, Clone)]
pub struct VersionRecord {
    version: String,
    year: u16,
    month: u8,
    day: u8,
    categories: Vec<(String, CategoryUrls)>,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    version: String,
    year: u16,
    month: u8,
    day: u8,
    #[serde(flatten)]
    categories: serde_json::Map<String, serde_json::Value>,
}

impl VersionRecord {
    fn parse(version: &str, source: &str) -> Result<Self, ChebiError> {
        let raw: RawRecord =
            serde_json::from_str(source).map_err(|err| ChebiError::CatalogMetadata {
                version: version.to_string(),
                message: err.to_string(),
            })?;
        if raw.version != version {
            return Err(ChebiError::CatalogMetadata {
                version: version.to_string(),
                message: format!("record declares version {}", raw.version),
            });
        }

        let mut categories = Vec::with_capacity(raw.categories.len());
        for (name, value) in raw.categories {
            if RESERVED_KEYS.contains(&name.as_str()) {
                continue;
            }
            let urls: CategoryUrls =
                serde_json::from_value(value).map_err(|err| ChebiError::CatalogMetadata {
                    version: version.to_string(),
                    message: format!("category {name}: {err}"),
                })?;
            categories.push((name, urls));
        }

        Ok(Self {
            version: raw.version,
            year: raw.year,
            month: raw.month,
            day: raw.day,
            categories,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn category(&self, name: &str) -> Option<&CategoryUrls> {
        self.categories
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, urls)| urls)
    }

    /// Category names in the order the release metadata lists them.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(name, _)| name.as_str())
    }
}

/// Read-only registry of the ChEBI releases this build knows about.
pub struct VersionCatalog;

impl VersionCatalog {
    pub fn available_versions() -> Vec<String> {
        VERSION_SOURCES
            .iter()
            .map(|(version, _)| version.to_string())
            .collect()
    }

    pub fn load_version(version: &str) -> Result<VersionRecord, ChebiError> {
        let Some((_, source)) = VERSION_SOURCES
            .iter()
            .find(|(candidate, _)| *candidate == version)
        else {
            return Err(ChebiError::UnknownVersion {
                requested: version.to_string(),
                available: Self::available_versions(),
            });
        };
        VersionRecord::parse(version, source)
    }
}
