//! Structural checks for candidate schema trees.
//!
//! Parsers are free to produce any tree; these checks flag shapes that the
//! merge and lookup algorithms do not handle meaningfully, such as sibling
//! name collisions, before the tree joins a forest.
//!
//! # Examples
//!
//! ```
//! use config_schema_core::*;
//!
//! let tree = Node::new("system").with_child(Node::leaf("hostname"));
//! assert!(validate_tree(&tree).is_empty());
//!
//! let bad = Node::new("system")
//!     .with_child(Node::leaf("hostname"))
//!     .with_child(Node::leaf("hostname"));
//! let errors = validate_tree(&bad);
//! assert!(errors.iter().any(|e| matches!(e, ValidationError::DuplicateSibling { .. })));
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::Node;

/// Tree validation findings.
///
/// Each variant carries the slash path of the offending node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A node has an empty name.
    #[error("empty node name under {0}")]
    EmptyName(String),
    /// Two children of the same node share a name.
    #[error("duplicate sibling {name} under {parent}")]
    DuplicateSibling { parent: String, name: String },
    /// An ENUM node has no value to translate to.
    #[error("enum node without value: {0}")]
    EnumWithoutValue(String),
    /// An ENUM node has children of its own.
    #[error("enum node with children: {0}")]
    EnumWithChildren(String),
}

/// Validates a tree rooted at `root`.
pub fn validate_tree(root: &Node) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let path = format!("/{}", root.name());
    if root.name().is_empty() {
        errors.push(ValidationError::EmptyName("/".to_string()));
    }
    validate_node(root, &path, &mut errors);
    errors
}

/// Returns `true` when `errors` contains a sibling collision.
pub fn has_duplicate_siblings(errors: &[ValidationError]) -> bool {
    errors
        .iter()
        .any(|e| matches!(e, ValidationError::DuplicateSibling { .. }))
}

fn validate_node(node: &Node, path: &str, errors: &mut Vec<ValidationError>) {
    if node.is_enum() {
        if node.value().is_none() {
            errors.push(ValidationError::EnumWithoutValue(path.to_string()));
        }
        if !node.children().is_empty() {
            errors.push(ValidationError::EnumWithChildren(path.to_string()));
        }
    }

    let mut seen = HashSet::new();
    for child in node.children() {
        if child.name().is_empty() {
            errors.push(ValidationError::EmptyName(path.to_string()));
        }
        if !seen.insert(child.name()) {
            errors.push(ValidationError::DuplicateSibling {
                parent: path.to_string(),
                name: child.name().to_string(),
            });
        }
        validate_node(child, &format!("{path}/{}", child.name()), errors);
    }
}
