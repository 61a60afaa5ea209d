//! Path resolution against a schema tree.
//!
//! Segments below the root are compared with [`match_name`], which treats
//! `-` and `_` as the same character. A child named `*` matches any segment.
//! The first matching child in insertion order is taken; there is no
//! backtracking.

use tracing::trace;

use crate::Node;

/// Compares two names with `-` and `_` treated as equal.
///
/// # Examples
///
/// ```
/// use config_schema_core::match_name;
///
/// assert!(match_name("foo-bar", "foo_bar"));
/// assert!(match_name("foo_bar", "foo_bar"));
/// assert!(!match_name("foo.bar", "foo_bar"));
/// assert!(!match_name("foo", "foo_"));
/// ```
pub fn match_name(a: &str, b: &str) -> bool {
    fn fold(c: u8) -> u8 {
        if c == b'-' { b'_' } else { c }
    }

    a.len() == b.len()
        && a
            .bytes()
            .zip(b.bytes())
            .all(|(x, y)| fold(x) == fold(y))
}

/// Finds the first child of `node` matching `segment`.
pub(crate) fn match_child<'a>(node: &'a Node, segment: &str, depth: usize) -> Option<&'a Node> {
    node.children().iter().find(|child| {
        let matched = child.is_wildcard() || match_name(child.name(), segment);
        trace!(depth, segment, candidate = child.name(), matched, "compare");
        matched
    })
}

/// Walks `path` (segments separated by `/`, no leading slash) below `node`.
///
/// An empty segment is an ordinary segment; only a wildcard child matches it.
pub(crate) fn lookup_below<'a>(node: &'a Node, path: &str) -> Option<&'a Node> {
    let mut current = node;
    for (depth, segment) in path.split('/').enumerate() {
        current = match_child(current, segment, depth)?;
    }
    Some(current)
}
