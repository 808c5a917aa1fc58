//! Reproducible builder for versioned releases of the ChEBI ontology
//! distribution.
//!
//! The crate resolves a declarative selection of data categories against a
//! compiled-in version catalog and hands the resulting download objectives
//! to a transfer collaborator:
//!
//! ```no_run
//! use chebi_dataset_manager::{Dataset, DatasetSettings};
//!
//! let settings = DatasetSettings::new("231")?.include_all().set_verbose();
//! let dataset = Dataset::build(&settings)?;
//! # Ok::<(), chebi_dataset_manager::ChebiError>(())
//! ```

pub mod catalog;
pub mod dataset;
pub mod downloader;
pub mod error;
pub mod objective;
pub mod settings;

pub use dataset::Dataset;
pub use error::ChebiError;
pub use settings::DatasetSettings;
