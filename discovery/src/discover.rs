//! Schema file discovery across a colon-separated search path.
//!
//! Files are collected from every directory in the order given, filtered by
//! the enabled [`SchemaFormat`]s, then stably sorted by ASCII-lowercased file
//! name. The processing order, and therefore the model registry order, is
//! the same on every run for an unchanged set of files.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::parser::SchemaFormat;

/// Which schema formats are picked up during discovery.
///
/// # Examples
///
/// ```
/// use config_schema_discovery::FormatConfig;
/// use config_schema_discovery::parser::SchemaFormat;
///
/// let formats = FormatConfig { xml: true, yang: false };
/// assert!(formats.is_enabled(SchemaFormat::XmlGz));
/// assert!(!formats.is_enabled(SchemaFormat::Yang));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// `*.xml` and `*.xml.gz` files.
    pub xml: bool,
    /// `*.yang` files.
    pub yang: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            xml: true,
            yang: true,
        }
    }
}

impl FormatConfig {
    pub fn is_enabled(&self, format: SchemaFormat) -> bool {
        match format {
            SchemaFormat::Xml | SchemaFormat::XmlGz => self.xml,
            SchemaFormat::Yang => self.yang,
        }
    }
}

/// Splits a colon-separated directory list, dropping empty entries.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use config_schema_discovery::split_search_path;
///
/// assert_eq!(
///     split_search_path("/etc/schema::/opt/schema"),
///     vec![PathBuf::from("/etc/schema"), PathBuf::from("/opt/schema")],
/// );
/// ```
pub fn split_search_path(path: &str) -> Vec<PathBuf> {
    path.split(':')
        .filter(|entry| !entry.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Lists schema files in `dirs` in processing order.
///
/// Missing or unreadable directories are skipped. Files with the same name
/// in different directories keep the directory order.
pub fn list_schema_files(dirs: &[PathBuf], formats: FormatConfig) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for dir in dirs {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                debug!(dir = %dir.display(), %err, "skipping schema directory");
                continue;
            }
        };

        let mut found = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                continue;
            }
            match SchemaFormat::from_path(&path) {
                Some(format) if formats.is_enabled(format) => {
                    trace!(file = %path.display(), ?format, "found schema file");
                    found.push(path);
                }
                _ => {}
            }
        }
        // read_dir order is unspecified; names differing only in case stay
        // in byte order.
        found.sort();
        files.extend(found);
    }

    files.sort_by_cached_key(|path| sort_key(path));
    files
}

fn sort_key(path: &Path) -> Vec<u8> {
    path.file_name()
        .map(|name| name.to_string_lossy().to_ascii_lowercase().into_bytes())
        .unwrap_or_default()
}
