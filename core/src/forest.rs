//! The schema forest: named roots plus the model registry.
//!
//! Loading happens through a [`SchemaBuilder`], which is the only type that
//! can add or merge roots. [`SchemaBuilder::finish`] turns it into a
//! [`SchemaInstance`] that exposes shared references only, so a published
//! instance can be read from any number of threads without locking.
//!
//! # Example
//!
//! ```
//! use config_schema_core::*;
//!
//! let mut builder = SchemaBuilder::new();
//! builder.add(
//!     Node::new("system").with_child(Node::leaf("hostname")),
//!     Some(Model::new("example-system")),
//! );
//! builder.add(Node::new("system").with_child(Node::leaf("timezone")), None);
//! let schema = builder.finish();
//!
//! assert_eq!(schema.root_count(), 1);
//! assert!(schema.lookup("/system/timezone").is_some());
//! assert_eq!(schema.models().count(), 1);
//! ```

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::lookup::lookup_below;
use crate::merge::merge_nodes;
use crate::{Model, Node};

/// Outcome of [`SchemaBuilder::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The root name was new and the tree became a forest root.
    Inserted,
    /// A root of the same name existed and the tree was merged into it.
    Merged,
}

/// Mutable forest used while loading.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    roots: HashMap<String, Node>,
    models: Vec<Model>,
}

impl SchemaBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one parsed source.
    ///
    /// A root whose name already exists is merged into the existing root;
    /// otherwise it is inserted. The model, when present, is appended to the
    /// registry in either case.
    pub fn add(&mut self, root: Node, model: Option<Model>) -> AddOutcome {
        let outcome = match self.roots.get_mut(root.name()) {
            Some(orig) => {
                debug!(root = orig.name(), "merging into existing root");
                merge_nodes(orig, root);
                AddOutcome::Merged
            }
            None => {
                debug!(root = root.name(), "inserting new root");
                self.roots.insert(root.name().to_string(), root);
                AddOutcome::Inserted
            }
        };

        if let Some(model) = model {
            self.models.push(model);
        }

        outcome
    }

    /// Number of distinct roots added so far.
    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    /// Freezes the forest.
    pub fn finish(self) -> SchemaInstance {
        SchemaInstance {
            roots: self.roots,
            models: self.models,
        }
    }
}

/// A loaded, immutable schema forest.
#[derive(Debug, Default)]
pub struct SchemaInstance {
    roots: HashMap<String, Node>,
    models: Vec<Model>,
}

impl SchemaInstance {
    /// Resolves an absolute slash-delimited path to its schema node.
    ///
    /// The first segment selects a root by exact name; deeper segments use
    /// [`match_name`](crate::match_name) and wildcard children. Empty paths
    /// and paths without a leading `/` never match.
    ///
    /// # Examples
    ///
    /// ```
    /// use config_schema_core::*;
    ///
    /// let mut builder = SchemaBuilder::new();
    /// builder.add(
    ///     Node::new("interfaces").with_child(
    ///         Node::new("*").with_child(Node::leaf("admin_status")),
    ///     ),
    ///     None,
    /// );
    /// let schema = builder.finish();
    ///
    /// let node = schema.lookup("/interfaces/eth0/admin-status").unwrap();
    /// assert_eq!(node.name(), "admin_status");
    /// assert!(schema.lookup("/Interfaces").is_none());
    /// assert!(schema.lookup("interfaces").is_none());
    /// ```
    pub fn lookup(&self, path: &str) -> Option<&Node> {
        trace!(path, "lookup");
        let rest = path.strip_prefix('/')?;
        let (root_name, below) = match rest.split_once('/') {
            Some((root, below)) => (root, Some(below)),
            None => (rest, None),
        };

        let Some(root) = self.roots.get(root_name) else {
            trace!(root = root_name, "no root node");
            return None;
        };

        match below {
            None => Some(root),
            Some(below) => lookup_below(root, below),
        }
    }

    /// Returns the root with exactly this name.
    pub fn root(&self, name: &str) -> Option<&Node> {
        self.roots.get(name)
    }

    /// Roots in ascending name order.
    pub fn roots(&self) -> impl Iterator<Item = &Node> {
        let mut roots: Vec<&Node> = self.roots.values().collect();
        roots.sort_by(|a, b| a.name().cmp(b.name()));
        roots.into_iter()
    }

    /// Number of roots.
    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    /// Returns `true` when no root was loaded.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Models in file processing order.
    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.models.iter()
    }

    /// First model in processing order.
    pub fn first_model(&self) -> Option<&Model> {
        self.models.first()
    }

    /// Returns the model registered after `model`.
    ///
    /// `model` must be a reference obtained from this instance; a model from
    /// elsewhere has no successor.
    pub fn next_model(&self, model: &Model) -> Option<&Model> {
        let index = self
            .models
            .iter()
            .position(|m| std::ptr::eq(m, model))?;
        self.models.get(index + 1)
    }
}
