//! Schema forest loading.
//!
//! [`SchemaLoader`] discovers schema files on the configured search path,
//! parses each one, and merges the results into a single
//! [`SchemaInstance`]. A file that fails to parse is logged, recorded in
//! [`LoadOutcome::failures`], and skipped; it never aborts the load.
//!
//! # Loading patterns
//!
//! ```no_run
//! use config_schema_store::{LoaderConfig, SchemaLoader};
//!
//! // Colon-separated search path, defaults for everything else
//! let schema = config_schema_store::load("/etc/config-schema:/usr/share/config-schema");
//! let node = schema.lookup("/interfaces/eth0/mtu");
//!
//! // Configuration file, with per-file failure reporting
//! let config = LoaderConfig::load("/etc/config-schema/loader.yml").unwrap();
//! let outcome = SchemaLoader::new(config).load();
//! for failure in &outcome.failures {
//!     eprintln!("{}: {}", failure.path.display(), failure.error);
//! }
//! ```

use std::path::{Path, PathBuf};

use config_schema_core::{
    AddOutcome, SchemaBuilder, SchemaInstance, has_duplicate_siblings, validate_tree,
};
use config_schema_discovery::{ParsedSchema, list_schema_files, parse_file};
use tracing::{debug, error, info, warn};

use crate::config::LoaderConfig;
use crate::error::{Result, StoreError};

/// A schema file that contributed nothing to the forest.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: StoreError,
}

/// Result of one [`SchemaLoader::load`] run.
#[derive(Debug)]
pub struct LoadOutcome {
    /// The loaded forest.
    pub instance: SchemaInstance,
    /// Every file processed, in processing order.
    pub files: Vec<PathBuf>,
    /// Files skipped because they failed to parse or validate.
    pub failures: Vec<FileFailure>,
}

/// Loads schema forests according to a [`LoaderConfig`].
#[derive(Debug, Clone, Default)]
pub struct SchemaLoader {
    config: LoaderConfig,
}

impl SchemaLoader {
    /// Creates a loader for `config`.
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Creates a loader for a colon-separated directory list.
    pub fn from_search_path(path: &str) -> Self {
        Self::new(LoaderConfig::from_search_path(path))
    }

    /// Active configuration.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Lists the schema files that [`load`](Self::load) would process, in
    /// order.
    pub fn files(&self) -> Vec<PathBuf> {
        list_schema_files(&self.config.search_path, self.config.formats)
    }

    /// Loads every schema file on the search path into one forest.
    pub fn load(&self) -> LoadOutcome {
        let files = self.files();
        let mut builder = SchemaBuilder::new();
        let mut failures = Vec::new();

        for path in &files {
            debug!(file = %path.display(), "parsing schema file");
            match self.parse_candidate(path) {
                Ok(parsed) => {
                    let root = parsed.root.name().to_string();
                    if builder.add(parsed.root, parsed.model) == AddOutcome::Merged {
                        debug!(file = %path.display(), "merging into /{root}");
                    }
                }
                Err(err) => {
                    error!(file = %path.display(), %err, "failed to parse schema file");
                    failures.push(FileFailure {
                        path: path.clone(),
                        error: err,
                    });
                }
            }
        }

        let instance = builder.finish();
        info!(
            files = files.len(),
            roots = instance.root_count(),
            models = instance.models().count(),
            failures = failures.len(),
            "schema loaded"
        );

        LoadOutcome {
            instance,
            files,
            failures,
        }
    }

    fn parse_candidate(&self, path: &Path) -> Result<ParsedSchema> {
        let parsed = parse_file(path)?;

        let findings = validate_tree(&parsed.root);
        for finding in &findings {
            warn!(file = %path.display(), %finding, "schema validation");
        }
        if self.config.reject_duplicate_siblings && has_duplicate_siblings(&findings) {
            return Err(StoreError::DuplicateSiblings(path.to_path_buf()));
        }

        Ok(parsed)
    }
}

/// Loads every schema file found in a colon-separated list of directories.
///
/// Files that fail to parse are logged and skipped.
pub fn load(folders: &str) -> SchemaInstance {
    SchemaLoader::from_search_path(folders).load().instance
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, contents: &str) {
        std::fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_load_empty_search_path() {
        let outcome = SchemaLoader::default().load();
        assert!(outcome.instance.is_empty());
        assert!(outcome.files.is_empty());
        assert!(outcome.failures.is_empty());
    }

    #[test]
    fn test_load_merges_same_root() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "a.xml",
            r#"<MODULE><NODE name="system"><NODE name="hostname" mode="rw"/></NODE></MODULE>"#,
        );
        write(
            dir.path(),
            "b.xml",
            r#"<MODULE><NODE name="system"><NODE name="timezone" mode="rw"/></NODE></MODULE>"#,
        );

        let outcome = SchemaLoader::from_search_path(&dir.path().to_string_lossy()).load();
        assert_eq!(outcome.files.len(), 2);
        assert_eq!(outcome.instance.root_count(), 1);
        let system = outcome.instance.root("system").unwrap();
        assert_eq!(system.children().len(), 2);
    }

    #[test]
    fn test_parse_failure_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.xml", "<MODULE><NODE");
        write(
            dir.path(),
            "b.xml",
            r#"<MODULE><NODE name="system"/></MODULE>"#,
        );

        let outcome = SchemaLoader::from_search_path(&dir.path().to_string_lossy()).load();
        assert_eq!(outcome.failures.len(), 1);
        assert!(outcome.failures[0].path.ends_with("a.xml"));
        assert!(matches!(outcome.failures[0].error, StoreError::ParseError(_)));
        assert!(outcome.instance.root("system").is_some());
    }

    #[test]
    fn test_duplicate_siblings_rejected_when_configured() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "a.xml",
            r#"<MODULE><NODE name="s"><NODE name="x"/><NODE name="x"/></NODE></MODULE>"#,
        );

        let mut config = LoaderConfig::from_search_path(&dir.path().to_string_lossy());
        let lenient = SchemaLoader::new(config.clone()).load();
        assert!(lenient.failures.is_empty());
        assert_eq!(lenient.instance.root("s").unwrap().children().len(), 2);

        config.reject_duplicate_siblings = true;
        let strict = SchemaLoader::new(config).load();
        assert_eq!(strict.failures.len(), 1);
        assert!(matches!(
            strict.failures[0].error,
            StoreError::DuplicateSiblings(_)
        ));
        assert!(strict.instance.is_empty());
    }
}
