//! YANG modules.
//!
//! Only the data-definition subset is mapped onto the schema tree:
//!
//! - `container` becomes a node, `leaf` a leaf node.
//! - `list` becomes a node with a single `*` child that holds the list body,
//!   so any key value resolves to the entry schema.
//! - `leaf-list` becomes a node with a single `*` leaf child.
//! - `choice` and `case` are transparent.
//! - `config false` makes leaves read-only for the whole subtree.
//! - `type enumeration` enums become ENUM children; implicit values count
//!   up from the previous value, starting at 0. A default naming an enum is
//!   stored as that enum's value.
//!
//! Groupings, typedefs, augments, RPCs and every other statement are
//! ignored. The module name, organization and newest revision are reported
//! as the model.

pub mod lexer;

use config_schema_core::{Model, Node, NodeFlags, WILDCARD};
use tracing::trace;

use self::lexer::{Token, TokenKind, YangLexer};
use super::{MAX_NESTING, ParseError, ParsedSchema, SchemaFormat, SchemaParser, single_root};

/// Parser for YANG modules.
///
/// # Examples
///
/// ```
/// use config_schema_discovery::parser::{SchemaParser, YangParser};
///
/// let parsed = YangParser
///     .parse_str(
///         r#"module example-system {
///                organization "Example Networks";
///                revision 2024-03-01;
///                container system {
///                    leaf hostname { type string; }
///                }
///            }"#,
///     )
///     .unwrap();
///
/// assert_eq!(parsed.root.name(), "system");
/// let model = parsed.model.unwrap();
/// assert_eq!(model.name(), Some("example-system"));
/// assert_eq!(model.version(), Some("2024-03-01"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct YangParser;

/// One YANG statement: `keyword [argument] (";" | "{" statements "}")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub keyword: String,
    pub argument: Option<String>,
    pub children: Vec<Statement>,
    pub line: usize,
}

impl Statement {
    fn arg(&self) -> &str {
        self.argument.as_deref().unwrap_or_default()
    }

    fn find(&self, keyword: &str) -> Option<&Statement> {
        self.children.iter().find(|s| s.keyword == keyword)
    }

    fn find_arg(&self, keyword: &str) -> Option<&str> {
        self.find(keyword).and_then(|s| s.argument.as_deref())
    }
}

impl SchemaParser for YangParser {
    fn format(&self) -> SchemaFormat {
        SchemaFormat::Yang
    }

    fn parse_str(&self, source: &str) -> Result<ParsedSchema, ParseError> {
        let tokens = YangLexer::tokenize(source)?;
        let statements = parse_statements(&tokens)?;

        let module = statements
            .iter()
            .find(|s| s.keyword == "module" || s.keyword == "submodule")
            .ok_or(ParseError::MissingModule)?;

        let mut model = Model::new(module.arg());
        if let Some(organization) = module.find_arg("organization") {
            model = model.with_organization(organization);
        }
        if let Some(revision) = newest_revision(module) {
            model = model.with_version(revision);
        }

        let roots = data_nodes(&module.children, true);
        Ok(ParsedSchema {
            root: single_root(roots)?,
            model: Some(model),
        })
    }
}

/// Parses a token stream into top-level statements.
pub fn parse_statements(tokens: &[Token]) -> Result<Vec<Statement>, ParseError> {
    let mut pos = 0;
    let statements = parse_block(tokens, &mut pos, 0)?;
    if let Some(token) = tokens.get(pos) {
        return Err(ParseError::Syntax {
            line: token.line,
            message: "unexpected '}'".to_string(),
        });
    }
    Ok(statements)
}

/// Parses statements until a closing brace or the end of input.
fn parse_block(
    tokens: &[Token],
    pos: &mut usize,
    depth: usize,
) -> Result<Vec<Statement>, ParseError> {
    let mut statements = Vec::new();
    while let Some(token) = tokens.get(*pos) {
        if token.kind == TokenKind::CloseBrace {
            break;
        }
        statements.push(parse_statement(tokens, pos, depth)?);
    }
    Ok(statements)
}

fn parse_statement(
    tokens: &[Token],
    pos: &mut usize,
    depth: usize,
) -> Result<Statement, ParseError> {
    let token = &tokens[*pos];
    let keyword = match &token.kind {
        TokenKind::Word(word) => word.clone(),
        other => {
            return Err(ParseError::Syntax {
                line: token.line,
                message: format!("expected keyword, found {other:?}"),
            });
        }
    };
    let line = token.line;
    *pos += 1;

    let argument = parse_argument(tokens, pos)?;

    let Some(token) = tokens.get(*pos) else {
        return Err(ParseError::Syntax {
            line,
            message: format!("unterminated statement '{keyword}'"),
        });
    };
    let children = match token.kind {
        TokenKind::Semicolon => {
            *pos += 1;
            Vec::new()
        }
        TokenKind::OpenBrace => {
            if depth >= MAX_NESTING {
                return Err(ParseError::TooDeep { line: token.line });
            }
            *pos += 1;
            let children = parse_block(tokens, pos, depth + 1)?;
            if tokens.get(*pos).map(|t| &t.kind) != Some(&TokenKind::CloseBrace) {
                return Err(ParseError::Syntax {
                    line,
                    message: format!("missing '}}' for '{keyword}'"),
                });
            }
            *pos += 1;
            children
        }
        _ => {
            return Err(ParseError::Syntax {
                line: token.line,
                message: format!("expected ';' or '{{' after '{keyword}'"),
            });
        }
    };

    Ok(Statement {
        keyword,
        argument,
        children,
        line,
    })
}

fn parse_argument(tokens: &[Token], pos: &mut usize) -> Result<Option<String>, ParseError> {
    let Some(token) = tokens.get(*pos) else {
        return Ok(None);
    };
    match &token.kind {
        TokenKind::Word(word) => {
            *pos += 1;
            Ok(Some(word.clone()))
        }
        TokenKind::Quoted(first) => {
            *pos += 1;
            let mut value = first.clone();
            while tokens.get(*pos).map(|t| &t.kind) == Some(&TokenKind::Plus) {
                match tokens.get(*pos + 1).map(|t| &t.kind) {
                    Some(TokenKind::Quoted(next)) => {
                        value.push_str(next);
                        *pos += 2;
                    }
                    _ => {
                        return Err(ParseError::Syntax {
                            line: token.line,
                            message: "'+' must be followed by a quoted string".to_string(),
                        });
                    }
                }
            }
            Ok(Some(value))
        }
        _ => Ok(None),
    }
}

/// Revision dates sort lexically; the newest is the largest.
fn newest_revision(module: &Statement) -> Option<&str> {
    module
        .children
        .iter()
        .filter(|s| s.keyword == "revision")
        .filter_map(|s| s.argument.as_deref())
        .max()
}

fn data_nodes(statements: &[Statement], config: bool) -> Vec<Node> {
    let mut nodes = Vec::new();
    for stmt in statements {
        match stmt.keyword.as_str() {
            "container" => {
                let config = config_of(stmt, config);
                let mut node = described(Node::new(stmt.arg()), stmt);
                for child in data_nodes(&stmt.children, config) {
                    node.push_child(child);
                }
                nodes.push(node);
            }
            "list" => {
                let config = config_of(stmt, config);
                let mut entry = Node::new(WILDCARD);
                for child in data_nodes(&stmt.children, config) {
                    entry.push_child(child);
                }
                nodes.push(described(Node::new(stmt.arg()), stmt).with_child(entry));
            }
            "leaf" => nodes.push(leaf(stmt, stmt.arg(), config)),
            "leaf-list" => {
                let mut entry = leaf(stmt, WILDCARD, config);
                entry.set_description(None);
                nodes.push(described(Node::new(stmt.arg()), stmt).with_child(entry));
            }
            "choice" | "case" => nodes.extend(data_nodes(&stmt.children, config)),
            other => trace!(keyword = other, line = stmt.line, "ignoring statement"),
        }
    }
    nodes
}

fn config_of(stmt: &Statement, inherited: bool) -> bool {
    inherited && stmt.find_arg("config") != Some("false")
}

fn described(mut node: Node, stmt: &Statement) -> Node {
    node.set_description(stmt.find_arg("description").map(str::to_string));
    node
}

fn leaf(stmt: &Statement, name: &str, config: bool) -> Node {
    let config = config_of(stmt, config);
    let mut flags = NodeFlags::LEAF | NodeFlags::READ;
    if config {
        flags.insert(NodeFlags::WRITE);
    }

    let mut node = described(Node::new(name).with_flags(flags), stmt);
    node.set_default(stmt.find_arg("default").map(str::to_string));

    if let Some(ty) = stmt.find("type") {
        node.set_pattern(ty.find_arg("pattern").map(str::to_string));
        if ty.arg() == "enumeration" {
            for value in enum_values(ty) {
                node.push_child(value);
            }
            // YANG defaults name the enum; the node stores values.
            let default = node.translate_from(node.default_value());
            node.set_default(default);
        }
    }
    node
}

fn enum_values(ty: &Statement) -> Vec<Node> {
    let mut next: i64 = 0;
    let mut values = Vec::new();
    for stmt in ty.children.iter().filter(|s| s.keyword == "enum") {
        let value = stmt
            .find_arg("value")
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(next);
        next = value.saturating_add(1);
        values.push(described(Node::enum_value(stmt.arg(), value.to_string()), stmt));
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERFACES: &str = r#"
module example-interfaces {
  yang-version 1.1;
  namespace "urn:example:interfaces";
  prefix if;

  organization "Example " + "Networks";
  description "Interface management.";

  revision 2023-01-15 { description "Initial."; }
  revision 2024-06-01;

  typedef ignored { type string; }

  container interfaces {
    description "Interface configuration";
    list interface {
      key "name";
      leaf name { type string; }
      leaf mtu {
        type uint16;
        default 1500;
        description "Maximum transmission unit";
      }
      leaf admin-status {
        type enumeration {
          enum up { value 1; description "Enabled"; }
          enum down { value 2; }
          enum testing;
        }
        default up;
      }
      leaf-list address {
        type string { pattern '[0-9.]+'; }
        description "IPv4 addresses";
      }
      container statistics {
        config false;
        leaf in-octets { type uint64; }
      }
      choice media {
        case copper { leaf speed { type uint32; } }
        case fibre { leaf wavelength { type uint32; } }
      }
    }
  }
}
"#;

    fn child<'a>(node: &'a Node, name: &str) -> &'a Node {
        node.child(name)
            .unwrap_or_else(|| panic!("missing child {name}"))
    }

    #[test]
    fn test_parse_module_model() {
        let parsed = YangParser.parse_str(INTERFACES).unwrap();
        let model = parsed.model.unwrap();
        assert_eq!(model.name(), Some("example-interfaces"));
        assert_eq!(model.organization(), Some("Example Networks"));
        assert_eq!(model.version(), Some("2024-06-01"));
    }

    #[test]
    fn test_parse_module_tree() {
        let root = YangParser.parse_str(INTERFACES).unwrap().root;
        assert_eq!(root.name(), "interfaces");
        assert_eq!(root.description(), Some("Interface configuration"));

        let list = child(&root, "interface");
        assert_eq!(list.children().len(), 1);
        let entry = child(list, "*");

        let names: Vec<&str> = entry.children().iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec!["name", "mtu", "admin-status", "address", "statistics", "speed", "wavelength"]
        );

        let mtu = child(entry, "mtu");
        assert!(mtu.is_leaf() && mtu.is_readable() && mtu.is_writable());
        assert_eq!(mtu.default_value(), Some("1500"));
        assert_eq!(mtu.description(), Some("Maximum transmission unit"));
    }

    #[test]
    fn test_enumeration_values() {
        let root = YangParser.parse_str(INTERFACES).unwrap().root;
        let status = child(child(child(&root, "interface"), "*"), "admin-status");
        let values: Vec<(&str, Option<&str>)> = status
            .children()
            .iter()
            .map(|c| (c.name(), c.value()))
            .collect();
        assert_eq!(
            values,
            vec![("up", Some("1")), ("down", Some("2")), ("testing", Some("3"))]
        );
        assert_eq!(status.children()[0].description(), Some("Enabled"));
        assert_eq!(status.default_value(), Some("1"));
        assert_eq!(status.translate_to(None).as_deref(), Some("up"));
    }

    #[test]
    fn test_implicit_enum_values_start_at_zero() {
        let parsed = YangParser
            .parse_str("module m { leaf l { type enumeration { enum a; enum b; enum c { value 10; } enum d; } } }")
            .unwrap();
        let values: Vec<Option<&str>> = parsed.root.children().iter().map(|c| c.value()).collect();
        assert_eq!(values, vec![Some("0"), Some("1"), Some("10"), Some("11")]);
    }

    #[test]
    fn test_leaf_list_and_config_false() {
        let root = YangParser.parse_str(INTERFACES).unwrap().root;
        let entry = child(child(&root, "interface"), "*");

        let address = child(entry, "address");
        assert_eq!(address.description(), Some("IPv4 addresses"));
        let item = child(address, "*");
        assert!(item.is_leaf());
        assert_eq!(item.pattern(), Some("[0-9.]+"));
        assert!(item.description().is_none());

        let octets = child(child(entry, "statistics"), "in-octets");
        assert!(octets.is_readable());
        assert!(!octets.is_writable());
    }

    #[test]
    fn test_missing_module() {
        let err = YangParser.parse_str("container x;").unwrap_err();
        assert!(matches!(err, ParseError::MissingModule));
    }

    #[test]
    fn test_module_without_data_nodes() {
        let err = YangParser
            .parse_str("module m { typedef t { type string; } }")
            .unwrap_err();
        assert!(matches!(err, ParseError::MissingRoot));
    }

    #[test]
    fn test_module_with_two_roots() {
        let err = YangParser
            .parse_str("module m { container a; container b; }")
            .unwrap_err();
        assert!(matches!(err, ParseError::MultipleRoots(_)));
    }

    #[test]
    fn test_syntax_errors() {
        assert!(matches!(
            YangParser.parse_str("module m { container a { }"),
            Err(ParseError::Syntax { .. })
        ));
        assert!(matches!(
            YangParser.parse_str("module m { } }"),
            Err(ParseError::Syntax { .. })
        ));
        assert!(matches!(
            YangParser.parse_str("module m"),
            Err(ParseError::Syntax { .. })
        ));
        assert!(matches!(
            YangParser.parse_str("module m { description \"a\" + ; }"),
            Err(ParseError::Syntax { .. })
        ));
    }

    fn nested_module(depth: usize) -> String {
        let mut source = String::from("module m {\n");
        source.push_str(&"container c {\n".repeat(depth));
        source.push_str(&"}".repeat(depth + 1));
        source
    }

    #[test]
    fn test_nesting_limit() {
        // The module brace counts as the first level.
        let schema = YangParser.parse_str(&nested_module(MAX_NESTING - 1)).unwrap();
        assert_eq!(schema.root.name(), "c");

        let err = YangParser.parse_str(&nested_module(MAX_NESTING)).unwrap_err();
        assert!(matches!(err, ParseError::TooDeep { line } if line == MAX_NESTING + 1));

        let err = YangParser.parse_str(&nested_module(5_000)).unwrap_err();
        assert!(matches!(err, ParseError::TooDeep { .. }));
    }

    #[test]
    fn test_parse_statements_shape() {
        let tokens = YangLexer::tokenize("a x { b; c \"y\" { d z; } }").unwrap();
        let statements = parse_statements(&tokens).unwrap();
        assert_eq!(statements.len(), 1);
        let a = &statements[0];
        assert_eq!(a.keyword, "a");
        assert_eq!(a.argument.as_deref(), Some("x"));
        assert_eq!(a.children.len(), 2);
        assert_eq!(a.children[0].argument, None);
        assert_eq!(a.children[1].children[0].argument.as_deref(), Some("z"));
    }
}
