//! Loader configuration.
//!
//! Defines the YAML-serializable settings that control where schema files
//! are searched for and how candidate trees are screened.
//!
//! # Example YAML
//!
//! ```yaml
//! search_path:
//!   - /etc/config-schema
//!   - /usr/share/config-schema
//! formats:
//!   xml: true
//!   yang: true
//! reject_duplicate_siblings: false
//! ```

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use config_schema_discovery::{FormatConfig, split_search_path};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Settings for a [`SchemaLoader`](crate::SchemaLoader).
///
/// Every field has a default, so a partial YAML file is valid.
///
/// # Examples
///
/// ```
/// use config_schema_store::LoaderConfig;
///
/// let config = LoaderConfig::from_search_path("/etc/schema:/opt/schema");
/// assert_eq!(config.search_path.len(), 2);
/// assert!(config.formats.xml && config.formats.yang);
/// assert!(!config.reject_duplicate_siblings);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Directories searched for schema files, in order.
    pub search_path: Vec<PathBuf>,
    /// File formats to load.
    pub formats: FormatConfig,
    /// Treat candidate trees with duplicate sibling names as parse failures.
    pub reject_duplicate_siblings: bool,
}

impl LoaderConfig {
    /// Builds a configuration from a colon-separated directory list.
    pub fn from_search_path(path: &str) -> Self {
        Self {
            search_path: split_search_path(path),
            ..Self::default()
        }
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::StoreError::IoError) if the file cannot
    /// be read, or [`YamlError`](crate::StoreError::YamlError) if parsing
    /// fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }
}
