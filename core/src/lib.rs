//! Core schema tree model for a hierarchical configuration namespace.
//!
//! This crate defines the in-memory schema forest and the algorithms that run
//! against it:
//!
//! - [`Node`] / [`NodeFlags`]: one schema element and its access flags.
//! - [`Model`]: metadata (name, organization, version) reported by a source.
//! - [`merge_nodes`]: grafts a newly parsed tree onto an existing one.
//! - [`SchemaBuilder`] / [`SchemaInstance`]: the mutable forest used while
//!   loading, and the frozen forest handed to readers.
//! - [`SchemaInstance::lookup`]: slash-path resolution with `-`/`_`
//!   normalization and `*` wildcard children.
//! - [`Node::translate_to`] / [`Node::translate_from`]: enumeration value
//!   translation.
//! - [`validate_tree`]: structural checks for candidate trees.
//!
//! # Example
//!
//! ```
//! use config_schema_core::*;
//!
//! let mut builder = SchemaBuilder::new();
//! builder.add(
//!     Node::new("interfaces").with_child(
//!         Node::new("*").with_child(
//!             Node::leaf("admin_status")
//!                 .with_flags(NodeFlags::READ | NodeFlags::WRITE)
//!                 .with_child(Node::enum_value("up", "1"))
//!                 .with_child(Node::enum_value("down", "2")),
//!         ),
//!     ),
//!     Some(Model::new("example-interfaces")),
//! );
//! let schema = builder.finish();
//!
//! let node = schema.lookup("/interfaces/eth0/admin-status").unwrap();
//! assert!(node.is_writable());
//! assert_eq!(node.translate_from(Some("down")).as_deref(), Some("2"));
//! assert_eq!(node.translate_to(Some("1")).as_deref(), Some("up"));
//! ```

mod dump;
mod forest;
mod lookup;
mod merge;
mod model;
mod node;
mod translate;
mod validate;

pub use dump::dump_node;
pub use forest::{AddOutcome, SchemaBuilder, SchemaInstance};
pub use lookup::match_name;
pub use merge::merge_nodes;
pub use model::Model;
pub use node::{MAX_NAME_LEN, Node, NodeFlags, WILDCARD};
pub use validate::{ValidationError, has_duplicate_siblings, validate_tree};
