//! Schema tree node definitions.
//!
//! A [`Node`] is one element of the configuration namespace: a named entry
//! with access flags, optional default/pattern/description text, and an
//! ordered list of exclusively-owned children. Trees are plain owned data, so
//! dropping a root releases every descendant exactly once.

use std::fmt;
use std::ops::BitOr;

use serde::{Serialize, Serializer};

/// Longest node name kept, in bytes.
///
/// Longer names are truncated on a character boundary by [`Node::new`].
pub const MAX_NAME_LEN: usize = 255;

/// Name of the wildcard child that matches any single path segment.
pub const WILDCARD: &str = "*";

/// Bitset of per-node schema flags.
///
/// # Examples
///
/// ```
/// use config_schema_core::NodeFlags;
///
/// let flags = NodeFlags::LEAF | NodeFlags::READ;
/// assert!(flags.contains(NodeFlags::LEAF));
/// assert!(!flags.contains(NodeFlags::WRITE));
/// assert_eq!(flags.to_string(), "LEAF|READ");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NodeFlags(u8);

impl NodeFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Node carries a data value and has no schema-meaningful children.
    pub const LEAF: Self = Self(1 << 0);
    /// Value may be read.
    pub const READ: Self = Self(1 << 1);
    /// Value may be written.
    pub const WRITE: Self = Self(1 << 2);
    /// Node is one symbolic alternative of the enclosing enumeration.
    pub const ENUM: Self = Self(1 << 3);

    const NAMES: [(Self, &'static str); 4] = [
        (Self::LEAF, "LEAF"),
        (Self::READ, "READ"),
        (Self::WRITE, "WRITE"),
        (Self::ENUM, "ENUM"),
    ];

    /// Returns `true` when every bit of `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` when no flag is set.
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Sets every bit of `other`.
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Clears every bit of `other`.
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl BitOr for NodeFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Display for NodeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Self::NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        f.write_str(&names.join("|"))
    }
}

impl Serialize for NodeFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(
            Self::NAMES
                .iter()
                .filter(|(flag, _)| self.contains(*flag))
                .map(|(_, name)| *name),
        )
    }
}

/// A single schema element.
///
/// Parsers build nodes with the `with_*` builder methods; once a tree has been
/// handed to a [`SchemaInstance`](crate::SchemaInstance) it is only reachable
/// through shared references.
///
/// # Examples
///
/// ```
/// use config_schema_core::{Node, NodeFlags};
///
/// let state = Node::leaf("state")
///     .with_flags(NodeFlags::READ)
///     .with_default("1")
///     .with_child(Node::enum_value("up", "1"))
///     .with_child(Node::enum_value("down", "0"));
///
/// assert!(state.is_leaf());
/// assert!(state.is_readable());
/// assert!(!state.is_writable());
/// assert_eq!(state.children().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    name: String,
    #[serde(skip_serializing_if = "NodeFlags::is_empty")]
    flags: NodeFlags,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    defvalue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) children: Vec<Node>,
}

impl Node {
    /// Creates a node with no flags and no children.
    pub fn new(name: impl Into<String>) -> Self {
        let mut name = name.into();
        if name.len() > MAX_NAME_LEN {
            let mut end = MAX_NAME_LEN;
            while !name.is_char_boundary(end) {
                end -= 1;
            }
            name.truncate(end);
        }
        Self {
            name,
            flags: NodeFlags::NONE,
            value: None,
            defvalue: None,
            pattern: None,
            description: None,
            children: Vec::new(),
        }
    }

    /// Creates a node flagged as [`NodeFlags::LEAF`].
    pub fn leaf(name: impl Into<String>) -> Self {
        Self::new(name).with_flags(NodeFlags::LEAF)
    }

    /// Creates an [`NodeFlags::ENUM`] node mapping `name` to `value`.
    pub fn enum_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut node = Self::new(name).with_flags(NodeFlags::ENUM);
        node.value = Some(value.into());
        node
    }

    /// Adds flags to the node.
    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags.insert(flags);
        self
    }

    /// Sets the default value.
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.defvalue = Some(value.into());
        self
    }

    /// Sets the validation pattern.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a child.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Appends a child in place.
    pub fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Replaces all flags.
    pub fn set_flags(&mut self, flags: NodeFlags) {
        self.flags = flags;
    }

    /// Sets or clears the default value.
    pub fn set_default(&mut self, value: Option<String>) {
        self.defvalue = value;
    }

    /// Sets or clears the validation pattern.
    pub fn set_pattern(&mut self, pattern: Option<String>) {
        self.pattern = pattern;
    }

    /// Sets or clears the description.
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// Node name as written in the schema source.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current flags.
    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    /// Literal value denoted by an ENUM node.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Default value, in stored-value form.
    pub fn default_value(&self) -> Option<&str> {
        self.defvalue.as_deref()
    }

    /// Validation pattern, stored verbatim.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// Human-readable description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Returns the first child whose name is exactly `name`.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Returns `true` when [`NodeFlags::LEAF`] is set.
    pub fn is_leaf(&self) -> bool {
        self.flags.contains(NodeFlags::LEAF)
    }

    /// Returns `true` when [`NodeFlags::READ`] is set.
    pub fn is_readable(&self) -> bool {
        self.flags.contains(NodeFlags::READ)
    }

    /// Returns `true` when [`NodeFlags::WRITE`] is set.
    pub fn is_writable(&self) -> bool {
        self.flags.contains(NodeFlags::WRITE)
    }

    /// Returns `true` when [`NodeFlags::ENUM`] is set.
    pub fn is_enum(&self) -> bool {
        self.flags.contains(NodeFlags::ENUM)
    }

    /// Returns `true` for the `*` wildcard child.
    pub fn is_wildcard(&self) -> bool {
        self.name == WILDCARD
    }

    /// Counts this node and all of its descendants.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Node::subtree_len).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_is_empty() {
        let node = Node::new("interfaces");
        assert_eq!(node.name(), "interfaces");
        assert!(node.flags().is_empty());
        assert!(node.children().is_empty());
        assert!(node.value().is_none());
        assert!(node.default_value().is_none());
    }

    #[test]
    fn test_long_name_is_truncated_on_char_boundary() {
        let name = "é".repeat(200);
        let node = Node::new(name);
        assert!(node.name().len() <= MAX_NAME_LEN);
        assert_eq!(node.name().len(), 254);
    }

    #[test]
    fn test_flags_display_and_predicates() {
        let node = Node::leaf("mtu").with_flags(NodeFlags::READ | NodeFlags::WRITE);
        assert!(node.is_leaf());
        assert!(node.is_readable());
        assert!(node.is_writable());
        assert!(!node.is_enum());
        assert_eq!(node.flags().to_string(), "LEAF|READ|WRITE");
    }

    #[test]
    fn test_flags_remove() {
        let mut flags = NodeFlags::READ | NodeFlags::WRITE;
        flags.remove(NodeFlags::WRITE);
        assert_eq!(flags, NodeFlags::READ);
    }

    #[test]
    fn test_enum_value_node() {
        let node = Node::enum_value("up", "1");
        assert!(node.is_enum());
        assert_eq!(node.value(), Some("1"));
    }

    #[test]
    fn test_subtree_len_counts_descendants() {
        let tree = Node::new("a")
            .with_child(Node::new("b").with_child(Node::leaf("c")))
            .with_child(Node::leaf("d"));
        assert_eq!(tree.subtree_len(), 4);
    }

    #[test]
    fn test_serialize_skips_empty_fields() {
        let node = Node::leaf("mtu")
            .with_flags(NodeFlags::READ)
            .with_default("1500");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["name"], "mtu");
        assert_eq!(json["flags"], serde_json::json!(["LEAF", "READ"]));
        assert_eq!(json["default"], "1500");
        assert!(json.get("children").is_none());
        assert!(json.get("pattern").is_none());
    }
}
