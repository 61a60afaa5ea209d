//! Tree merging for multi-source schemas.
//!
//! Later schema sources extend earlier ones: children the original tree
//! already knows are merged recursively, unknown children are moved over
//! (stolen) from the incoming tree. Node attributes are never reconciled, the
//! first source to describe a node keeps its flags, default, pattern and
//! description.
//!
//! # Example
//!
//! ```
//! use config_schema_core::*;
//!
//! let mut orig = Node::new("system").with_child(Node::leaf("hostname"));
//! let incoming = Node::new("system")
//!     .with_child(Node::leaf("hostname").with_default("ignored"))
//!     .with_child(Node::leaf("timezone"));
//!
//! merge_nodes(&mut orig, incoming);
//!
//! let names: Vec<&str> = orig.children().iter().map(|c| c.name()).collect();
//! assert_eq!(names, ["hostname", "timezone"]);
//! assert_eq!(orig.children()[0].default_value(), None);
//! ```

use tracing::trace;

use crate::Node;

/// Merges `incoming` into `orig`, consuming `incoming`.
///
/// Children are matched by exact name against the children `orig` had before
/// this call; unmatched children are appended to `orig` after the scan, in
/// their incoming order. Two same-named incoming siblings are therefore both
/// grafted rather than merged into each other.
pub fn merge_nodes(orig: &mut Node, incoming: Node) {
    merge_at_depth(orig, incoming, 0);
}

fn merge_at_depth(orig: &mut Node, incoming: Node, depth: usize) {
    let existing = orig.children.len();
    let mut stolen = Vec::new();

    for child in incoming.children {
        match orig.children[..existing]
            .iter_mut()
            .find(|o| o.name() == child.name())
        {
            Some(matched) => {
                trace!(depth, name = child.name(), "merging matching child");
                merge_at_depth(matched, child, depth + 1);
            }
            None => {
                trace!(depth, name = child.name(), "grafting new child");
                stolen.push(child);
            }
        }
    }

    orig.children.extend(stolen);
}
