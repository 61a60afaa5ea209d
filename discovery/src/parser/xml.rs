//! XML schema documents.
//!
//! ```xml
//! <MODULE>
//!   <NODE name="interfaces" help="Interface configuration">
//!     <NODE name="*" help="Interface name">
//!       <NODE name="state" mode="r" default="0" help="Link state">
//!         <VALUE name="down" value="0"/>
//!         <VALUE name="up" value="1"/>
//!       </NODE>
//!     </NODE>
//!   </NODE>
//! </MODULE>
//! ```
//!
//! `mode` letters `r` and `w` map to READ and WRITE; other letters are
//! accepted and ignored. A `NODE` with a `mode`, or without `NODE` children,
//! is a leaf. Elements other than `NODE` and `VALUE` inside the module are
//! skipped together with their content.

use config_schema_core::{Node, NodeFlags};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::trace;

use super::{MAX_NESTING, ParseError, ParsedSchema, SchemaFormat, SchemaParser, single_root};

const MODULE: &[u8] = b"MODULE";
const NODE: &[u8] = b"NODE";
const VALUE: &[u8] = b"VALUE";

/// Parser for `MODULE`/`NODE`/`VALUE` XML documents.
///
/// # Examples
///
/// ```
/// use config_schema_discovery::parser::{SchemaParser, XmlParser};
///
/// let parsed = XmlParser
///     .parse_str(r#"<MODULE><NODE name="system"><NODE name="hostname" mode="rw"/></NODE></MODULE>"#)
///     .unwrap();
/// assert_eq!(parsed.root.name(), "system");
/// assert!(parsed.root.children()[0].is_writable());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlParser;

/// An element currently open in the document.
enum Open {
    Module,
    Node(PendingNode),
    Value,
    Skipped,
}

struct PendingNode {
    node: Node,
    has_mode: bool,
    has_node_children: bool,
}

impl SchemaParser for XmlParser {
    fn format(&self) -> SchemaFormat {
        SchemaFormat::Xml
    }

    fn parse_str(&self, source: &str) -> Result<ParsedSchema, ParseError> {
        let mut reader = Reader::from_str(source);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Open> = Vec::new();
        let mut roots = Vec::new();
        let mut seen_module = false;

        loop {
            let event = reader.read_event().map_err(|err| {
                ParseError::Xml(format!("{err} at byte {}", reader.buffer_position()))
            })?;
            match event {
                Event::Start(_) | Event::Empty(_) if stack.len() >= MAX_NESTING => {
                    return Err(ParseError::TooDeep {
                        line: line_at(source, reader.buffer_position()),
                    });
                }
                Event::Start(element) => {
                    let open = open_element(&element, &mut stack, &mut seen_module)?;
                    stack.push(open);
                }
                Event::Empty(element) => {
                    let open = open_element(&element, &mut stack, &mut seen_module)?;
                    close_element(open, &mut stack, &mut roots);
                }
                Event::End(_) => {
                    let open = stack
                        .pop()
                        .ok_or_else(|| ParseError::Xml("unbalanced end tag".to_string()))?;
                    close_element(open, &mut stack, &mut roots);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(ParseError::Xml("unexpected end of document".to_string()));
        }
        if !seen_module {
            return Err(ParseError::UnexpectedElement("missing MODULE".to_string()));
        }

        Ok(ParsedSchema {
            root: single_root(roots)?,
            model: None,
        })
    }
}

/// One-based line of a byte offset into `source`.
fn line_at(source: &str, position: u64) -> usize {
    let end = usize::try_from(position).map_or(source.len(), |p| p.min(source.len()));
    source.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}

fn open_element(
    element: &BytesStart<'_>,
    stack: &mut [Open],
    seen_module: &mut bool,
) -> Result<Open, ParseError> {
    let local = element.local_name();
    let tag = local.as_ref();

    match stack.last_mut() {
        None => {
            if tag != MODULE || *seen_module {
                return Err(ParseError::UnexpectedElement(
                    String::from_utf8_lossy(tag).into_owned(),
                ));
            }
            *seen_module = true;
            Ok(Open::Module)
        }
        Some(Open::Skipped) | Some(Open::Value) => Ok(Open::Skipped),
        Some(Open::Module) => {
            if tag == NODE {
                Ok(Open::Node(read_node(element)?))
            } else {
                trace!(element = %String::from_utf8_lossy(tag), "skipping element");
                Ok(Open::Skipped)
            }
        }
        Some(Open::Node(parent)) => {
            if tag == NODE {
                parent.has_node_children = true;
                Ok(Open::Node(read_node(element)?))
            } else if tag == VALUE {
                parent.node.push_child(read_value(element)?);
                Ok(Open::Value)
            } else {
                trace!(element = %String::from_utf8_lossy(tag), "skipping element");
                Ok(Open::Skipped)
            }
        }
    }
}

fn close_element(open: Open, stack: &mut [Open], roots: &mut Vec<Node>) {
    let Open::Node(pending) = open else {
        return;
    };

    let mut node = pending.node;
    if pending.has_mode || !pending.has_node_children {
        node.set_flags(node.flags() | NodeFlags::LEAF);
    }

    match stack.last_mut() {
        Some(Open::Node(parent)) => parent.node.push_child(node),
        _ => roots.push(node),
    }
}

fn read_node(element: &BytesStart<'_>) -> Result<PendingNode, ParseError> {
    let mut name = None;
    let mut flags = NodeFlags::NONE;
    let mut has_mode = false;
    let mut defvalue = None;
    let mut pattern = None;
    let mut description = None;

    for (key, value) in attributes(element)? {
        match key.as_str() {
            "name" => name = Some(value),
            "mode" => {
                has_mode = true;
                if value.contains('r') {
                    flags.insert(NodeFlags::READ);
                }
                if value.contains('w') {
                    flags.insert(NodeFlags::WRITE);
                }
            }
            "default" => defvalue = Some(value),
            "pattern" => pattern = Some(value),
            "help" => description = Some(value),
            _ => {}
        }
    }

    let name = name.ok_or(ParseError::MissingAttribute {
        element: "NODE",
        attribute: "name",
    })?;
    let mut node = Node::new(name).with_flags(flags);
    node.set_default(defvalue);
    node.set_pattern(pattern);
    node.set_description(description);

    Ok(PendingNode {
        node,
        has_mode,
        has_node_children: false,
    })
}

fn read_value(element: &BytesStart<'_>) -> Result<Node, ParseError> {
    let mut name = None;
    let mut value = None;
    let mut description = None;

    for (key, text) in attributes(element)? {
        match key.as_str() {
            "name" => name = Some(text),
            "value" => value = Some(text),
            "help" => description = Some(text),
            _ => {}
        }
    }

    let name = name.ok_or(ParseError::MissingAttribute {
        element: "VALUE",
        attribute: "name",
    })?;
    let value = value.ok_or(ParseError::MissingAttribute {
        element: "VALUE",
        attribute: "value",
    })?;

    let mut node = Node::enum_value(name, value);
    node.set_description(description);
    Ok(node)
}

fn attributes(element: &BytesStart<'_>) -> Result<Vec<(String, String)>, ParseError> {
    element
        .attributes()
        .map(|attr| {
            let attr = attr.map_err(|err| ParseError::Xml(err.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|err| ParseError::Xml(err.to_string()))?
                .into_owned();
            Ok((key, value))
        })
        .collect()
}
