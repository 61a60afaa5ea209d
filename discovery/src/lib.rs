//! Schema file discovery and format parsers.
//!
//! This crate finds schema files on a colon-separated search path and turns
//! each one into a candidate tree for the schema forest.
//!
//! # Main entry points
//!
//! - [`list_schema_files`]: collect `*.xml`, `*.xml.gz` and `*.yang` files
//!   from a set of directories in deterministic processing order.
//! - [`parser::parse_file`]: parse one file into a
//!   [`ParsedSchema`](parser::ParsedSchema) (root node plus optional
//!   [`Model`](config_schema_core::Model)).
//!
//! # Example
//!
//! ```
//! use config_schema_discovery::parser::{SchemaParser, XmlParser};
//!
//! let parsed = XmlParser
//!     .parse_str(r#"<MODULE><NODE name="system"><NODE name="hostname" mode="rw"/></NODE></MODULE>"#)
//!     .unwrap();
//! assert_eq!(parsed.root.name(), "system");
//! ```

pub mod discover;
pub mod parser;

pub use discover::{FormatConfig, list_schema_files, split_search_path};
pub use parser::{MAX_NESTING, ParseError, ParsedSchema, SchemaFormat, parse_file};
