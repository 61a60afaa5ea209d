//! Schema forest loading and loader configuration.
//!
//! This crate ties file discovery and parsing to the schema forest: every
//! schema file on a search path is parsed and merged into one
//! [`SchemaInstance`](config_schema_core::SchemaInstance) that can then be
//! shared read-only across threads.
//!
//! # Quick start
//!
//! ```no_run
//! use config_schema_store::{LoaderConfig, SchemaLoader};
//!
//! // Load from a colon-separated directory list
//! let schema = config_schema_store::load("/etc/config-schema:/usr/share/config-schema");
//! if let Some(node) = schema.lookup("/interfaces/eth0/state") {
//!     println!("{}", node.translate_to(Some("1")).unwrap_or_default());
//! }
//!
//! // Load with a YAML configuration and inspect failures
//! let config = LoaderConfig::load("loader.yml").unwrap();
//! let outcome = SchemaLoader::new(config).load();
//! println!("{} files, {} failed", outcome.files.len(), outcome.failures.len());
//! ```

mod config;
mod error;
mod loader;

pub use config::LoaderConfig;
pub use error::{Result, StoreError};
pub use loader::{FileFailure, LoadOutcome, SchemaLoader, load};
