//! Error types for schema store operations.
//!
//! Covers configuration I/O, per-file parse failures, and candidate trees
//! rejected by validation.

use std::path::PathBuf;

use config_schema_discovery::ParseError;
use thiserror::Error;

/// Errors that can occur while configuring or loading a schema store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A schema file could not be parsed.
    #[error("parse error: {0}")]
    ParseError(#[from] ParseError),

    /// A candidate tree has sibling nodes with the same name and the loader
    /// is configured to reject them.
    #[error("duplicate sibling names in {}", .0.display())]
    DuplicateSiblings(PathBuf),
}

/// Convenience alias for results with [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
