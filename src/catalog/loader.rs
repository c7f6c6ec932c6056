//! Catalog file loading.
//!
//! Catalogs are either delimited text or a structured document (JSON or
//! YAML). The format is chosen from the file extension, falling back to
//! sniffing the content for unknown extensions.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use super::delimited::parse_delimited;
use super::entry::{Catalog, CatalogEntry};
use crate::error::{AuditError, Result};

/// Supported catalog file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// Header row plus delimited data rows.
    Delimited,
    /// JSON array of records, or an object with a `software` array.
    Json,
    /// YAML equivalent of the JSON shape.
    Yaml,
}

impl CatalogFormat {
    /// Determine the format from the file extension, if recognized.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yml" | "yaml" => Some(Self::Yaml),
            "csv" | "tsv" | "txt" => Some(Self::Delimited),
            _ => None,
        }
    }

    /// Guess the format from file content.
    pub fn sniff(content: &str) -> Self {
        match content.trim_start_matches('\u{feff}').trim_start().chars().next() {
            Some('[') | Some('{') => Self::Json,
            _ => Self::Delimited,
        }
    }
}

/// Parse catalog content in the given format.
///
/// The error string describes what was malformed; [`load_catalog`] wraps it
/// with the file path.
pub fn parse_catalog(content: &str, format: CatalogFormat) -> std::result::Result<Vec<CatalogEntry>, String> {
    match format {
        CatalogFormat::Delimited => parse_delimited(content),
        CatalogFormat::Json => {
            let doc: serde_json::Value = serde_json::from_str(content)
                .map_err(|e| format!("not a catalog document: {}", e))?;
            let software = doc.get("software").cloned();
            serde_json::from_value(software.unwrap_or(doc))
                .map_err(|e| format!("invalid catalog entry: {}", e))
        }
        CatalogFormat::Yaml => {
            let doc: serde_yaml::Value = serde_yaml::from_str(content)
                .map_err(|e| format!("not a catalog document: {}", e))?;
            let software = doc.get("software").cloned();
            serde_yaml::from_value(software.unwrap_or(doc))
                .map_err(|e| format!("invalid catalog entry: {}", e))
        }
    }
}

/// Load a catalog file.
///
/// # Errors
///
/// Returns `CatalogLoad` if the file cannot be read or any record is
/// malformed. No partial catalog is ever returned.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let catalog_error = |message: String| AuditError::CatalogLoad {
        path: path.to_path_buf(),
        message,
    };

    let content = fs::read_to_string(path).map_err(|e| catalog_error(e.to_string()))?;
    let format = CatalogFormat::from_path(path).unwrap_or_else(|| CatalogFormat::sniff(&content));

    let entries = parse_catalog(&content, format).map_err(catalog_error)?;

    for entry in entries.iter().filter(|e| e.expected_version.is_empty()) {
        warn!(
            "Catalog entry '{}' has no expected version and can only match unversioned packages",
            entry.software_name
        );
    }

    info!(
        "Loaded {} catalog entries from {}",
        entries.len(),
        path.display()
    );

    Ok(Catalog::new(entries, Some(path.to_path_buf())))
}
