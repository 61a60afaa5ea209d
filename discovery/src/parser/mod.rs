//! Schema file parsers.
//!
//! Each supported on-disk format has a [`SchemaParser`] that turns the file
//! contents into a candidate tree and, when the format carries it, model
//! metadata:
//!
//! - **XML** (`*.xml`, `*.xml.gz`): `MODULE` / `NODE` / `VALUE` documents,
//!   see [`XmlParser`].
//! - **YANG** (`*.yang`): a data-node subset of YANG modules, see
//!   [`YangParser`].
//!
//! Most callers use [`parse_file`], which picks the parser from the file name
//! and handles gzip decompression.

mod xml;
mod yang;

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use config_schema_core::{Model, Node};
use flate2::read::GzDecoder;
use thiserror::Error;

pub use xml::XmlParser;
pub use yang::{Statement, YangParser, parse_statements};
pub use yang::lexer::{Token, TokenKind, YangLexer};

/// On-disk schema formats, detected from the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaFormat {
    /// Plain XML.
    Xml,
    /// Gzip-compressed XML.
    XmlGz,
    /// YANG module.
    Yang,
}

impl SchemaFormat {
    /// Detects the format from a path's file name.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use config_schema_discovery::parser::SchemaFormat;
    ///
    /// assert_eq!(SchemaFormat::from_path(Path::new("/s/a.xml")), Some(SchemaFormat::Xml));
    /// assert_eq!(SchemaFormat::from_path(Path::new("a.xml.gz")), Some(SchemaFormat::XmlGz));
    /// assert_eq!(SchemaFormat::from_path(Path::new("a.yang")), Some(SchemaFormat::Yang));
    /// assert_eq!(SchemaFormat::from_path(Path::new("a.json")), None);
    /// ```
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        if name.ends_with(".xml.gz") {
            Some(Self::XmlGz)
        } else if name.ends_with(".xml") {
            Some(Self::Xml)
        } else if name.ends_with(".yang") {
            Some(Self::Yang)
        } else {
            None
        }
    }
}

/// Deepest element or statement nesting a parser accepts.
pub const MAX_NESTING: usize = 256;

/// Result of parsing one schema file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSchema {
    /// Candidate root; its name selects the forest root to merge into.
    pub root: Node,
    /// Metadata, for formats that carry it.
    pub model: Option<Model>,
}

/// Errors raised while reading or parsing a schema file.
#[derive(Debug, Error)]
pub enum ParseError {
    /// File could not be read or decompressed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File name does not match any supported format.
    #[error("unsupported schema file: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Malformed XML.
    #[error("XML error: {0}")]
    Xml(String),

    /// Malformed YANG source.
    #[error("syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// A required attribute is missing.
    #[error("<{element}> is missing the '{attribute}' attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    /// An element appears where the format does not allow it.
    #[error("unexpected element <{0}>")]
    UnexpectedElement(String),

    /// No YANG `module` or `submodule` statement.
    #[error("no module statement found")]
    MissingModule,

    /// The source defines no top-level schema node.
    #[error("no top-level schema node")]
    MissingRoot,

    /// The source defines more than one top-level schema node.
    #[error("multiple top-level schema nodes: {}", .0.join(", "))]
    MultipleRoots(Vec<String>),

    /// Nesting exceeds [`MAX_NESTING`].
    #[error("nesting deeper than {MAX_NESTING} levels at line {line}")]
    TooDeep { line: usize },
}

/// A parser for one schema format.
pub trait SchemaParser {
    /// Format handled by this parser.
    fn format(&self) -> SchemaFormat;

    /// Parses already-loaded file contents.
    fn parse_str(&self, source: &str) -> Result<ParsedSchema, ParseError>;
}

/// Returns the parser for `format`.
pub fn parser_for(format: SchemaFormat) -> &'static dyn SchemaParser {
    match format {
        SchemaFormat::Xml | SchemaFormat::XmlGz => &XmlParser,
        SchemaFormat::Yang => &YangParser,
    }
}

/// Reads and parses one schema file, choosing the parser from its name.
///
/// # Errors
///
/// Returns [`ParseError::UnsupportedFormat`] for unknown file names,
/// [`ParseError::Io`] when the file cannot be read or decompressed, and the
/// format parser's error otherwise.
pub fn parse_file(path: &Path) -> Result<ParsedSchema, ParseError> {
    let format = SchemaFormat::from_path(path)
        .ok_or_else(|| ParseError::UnsupportedFormat(path.to_path_buf()))?;

    let source = match format {
        SchemaFormat::XmlGz => {
            let mut decoder = GzDecoder::new(File::open(path)?);
            let mut source = String::new();
            decoder.read_to_string(&mut source)?;
            source
        }
        SchemaFormat::Xml | SchemaFormat::Yang => std::fs::read_to_string(path)?,
    };

    parser_for(format).parse_str(&source)
}

/// Picks the single top-level node out of `roots`.
fn single_root(roots: Vec<Node>) -> Result<Node, ParseError> {
    if roots.len() > 1 {
        return Err(ParseError::MultipleRoots(
            roots.iter().map(|r| r.name().to_string()).collect(),
        ));
    }
    roots.into_iter().next().ok_or(ParseError::MissingRoot)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::Compression;
    use flate2::write::GzEncoder;

    use super::*;

    const XML: &str = r#"<?xml version="1.0"?>
<MODULE>
  <NODE name="system">
    <NODE name="hostname" mode="rw" help="Host name"/>
  </NODE>
</MODULE>"#;

    #[test]
    fn test_parse_file_xml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("system.xml");
        std::fs::write(&path, XML).unwrap();

        let parsed = parse_file(&path).unwrap();
        assert_eq!(parsed.root.name(), "system");
        assert!(parsed.model.is_none());
    }

    #[test]
    fn test_parse_file_gzip_xml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("system.xml.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(XML.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let parsed = parse_file(&path).unwrap();
        assert_eq!(parsed.root.children()[0].name(), "hostname");
    }

    #[test]
    fn test_parse_file_corrupt_gzip_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xml.gz");
        std::fs::write(&path, "not gzip").unwrap();

        assert!(matches!(parse_file(&path), Err(ParseError::Io(_))));
    }

    #[test]
    fn test_parse_file_unsupported() {
        let err = parse_file(Path::new("schema.json")).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_parse_file_missing() {
        let err = parse_file(Path::new("/nonexistent/schema.yang")).unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }

    #[test]
    fn test_parser_for_formats() {
        assert_eq!(parser_for(SchemaFormat::XmlGz).format(), SchemaFormat::Xml);
        assert_eq!(parser_for(SchemaFormat::Yang).format(), SchemaFormat::Yang);
    }

    #[test]
    fn test_single_root() {
        assert!(matches!(single_root(vec![]), Err(ParseError::MissingRoot)));
        let err = single_root(vec![Node::new("a"), Node::new("b")]).unwrap_err();
        assert_eq!(err.to_string(), "multiple top-level schema nodes: a, b");
        assert_eq!(single_root(vec![Node::new("a")]).unwrap().name(), "a");
    }
}
