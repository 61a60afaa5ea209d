//! Enumeration value translation.
//!
//! An enumerated field is a node whose ENUM children each map a symbolic
//! name to a literal value. Only [`Node::translate_to`] substitutes the
//! node's default for a missing input; callers rely on that asymmetry.

use crate::{Node, NodeFlags};

impl Node {
    /// Translates a stored value to its symbolic name.
    ///
    /// A missing `value` is replaced by the node's default first. When no
    /// ENUM child carries the value, the (possibly defaulted) input is
    /// returned unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use config_schema_core::Node;
    ///
    /// let state = Node::leaf("state")
    ///     .with_default("1")
    ///     .with_child(Node::enum_value("up", "1"))
    ///     .with_child(Node::enum_value("down", "0"));
    ///
    /// assert_eq!(state.translate_to(Some("0")).as_deref(), Some("down"));
    /// assert_eq!(state.translate_to(None).as_deref(), Some("up"));
    /// assert_eq!(state.translate_to(Some("7")).as_deref(), Some("7"));
    /// ```
    pub fn translate_to(&self, value: Option<&str>) -> Option<String> {
        let value = value.or(self.default_value());
        match self.enum_children().find(|n| n.value() == value) {
            Some(n) => Some(n.name().to_string()),
            None => value.map(str::to_string),
        }
    }

    /// Translates a symbolic name to its stored value.
    ///
    /// No default is substituted. When no ENUM child has this name, the input
    /// is returned unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use config_schema_core::Node;
    ///
    /// let state = Node::leaf("state")
    ///     .with_default("1")
    ///     .with_child(Node::enum_value("up", "1"));
    ///
    /// assert_eq!(state.translate_from(Some("up")).as_deref(), Some("1"));
    /// assert_eq!(state.translate_from(Some("sideways")).as_deref(), Some("sideways"));
    /// assert_eq!(state.translate_from(None), None);
    /// ```
    pub fn translate_from(&self, value: Option<&str>) -> Option<String> {
        match self.enum_children().find(|n| Some(n.name()) == value) {
            Some(n) => n.value().map(str::to_string),
            None => value.map(str::to_string),
        }
    }

    fn enum_children(&self) -> impl Iterator<Item = &Node> {
        self.children()
            .iter()
            .filter(|n| n.flags().contains(NodeFlags::ENUM))
    }
}
