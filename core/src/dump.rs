//! Human-readable rendering of a schema forest.

use std::fmt::Write;

use crate::{Node, NodeFlags, SchemaInstance};

/// Column at which descriptions start.
const DESCRIPTION_COLUMN: usize = 32;

impl SchemaInstance {
    /// Renders every root, in name order, as an indented tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use config_schema_core::*;
    ///
    /// let mut builder = SchemaBuilder::new();
    /// builder.add(
    ///     Node::new("system").with_child(
    ///         Node::leaf("hostname")
    ///             .with_flags(NodeFlags::READ | NodeFlags::WRITE)
    ///             .with_description("Host name"),
    ///     ),
    ///     None,
    /// );
    /// let text = builder.finish().dump();
    ///
    /// assert!(text.starts_with(" system\n"));
    /// assert!(text.contains("  hostname[rw]"));
    /// assert!(text.contains("\"Host name\""));
    /// ```
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for root in self.roots() {
            dump_node(&mut out, root, 0);
        }
        out
    }
}

/// Renders one subtree starting at `depth`.
pub fn dump_node(out: &mut String, node: &Node, depth: usize) {
    let mut line = format!("{:indent$}{}", "", node.name(), indent = (depth * 2).max(1));

    let flags = node.flags();
    if flags.contains(NodeFlags::ENUM) {
        let _ = write!(line, "[{}]", node.value().unwrap_or_default());
    } else if !flags.is_empty() && flags != NodeFlags::LEAF {
        line.push('[');
        if flags.contains(NodeFlags::READ) {
            line.push('r');
        }
        if flags.contains(NodeFlags::WRITE) {
            line.push('w');
        }
        line.push(']');
    }

    if let Some(description) = node.description() {
        let pad = DESCRIPTION_COLUMN.saturating_sub(line.len()).max(1);
        let _ = write!(line, "{:pad$}\"{}\"", "", description, pad = pad);
    }
    if let Some(default) = node.default_value() {
        let _ = write!(line, " {default}");
    }
    if let Some(pattern) = node.pattern() {
        let _ = write!(line, " {pattern}");
    }

    out.push_str(&line);
    out.push('\n');

    for child in node.children() {
        dump_node(out, child, depth + 1);
    }
}
