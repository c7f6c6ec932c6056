//! Catalog entry types.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::{Error as _, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize};

/// One expected piece of software.
///
/// Identity is `software_name`, but duplicates are allowed and matched
/// independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Display name as the package manager reports it.
    #[serde(alias = "software_name", alias = "name")]
    pub software_name: String,

    /// Exact version string expected on the machine.
    #[serde(
        default,
        alias = "version",
        alias = "expected_version",
        deserialize_with = "deserialize_version"
    )]
    pub expected_version: String,

    /// Whether the software is approved for use.
    pub approved: bool,

    /// Restriction tag scoping the entry to a machine group.
    #[serde(
        default,
        alias = "restricted_to",
        deserialize_with = "deserialize_restriction"
    )]
    pub restricted_to: Option<String>,
}

impl CatalogEntry {
    /// Create an entry, normalizing an empty restriction to `None`.
    pub fn new(
        software_name: impl Into<String>,
        expected_version: impl Into<String>,
        approved: bool,
        restricted_to: Option<&str>,
    ) -> Self {
        Self {
            software_name: software_name.into(),
            expected_version: expected_version.into(),
            approved,
            restricted_to: normalize_restriction(restricted_to),
        }
    }

    /// Whether the entry is scoped to a restriction tag.
    pub fn is_restricted(&self) -> bool {
        self.restricted_to.is_some()
    }
}

/// Map absent, empty and whitespace-only tags to "no restriction".
pub fn normalize_restriction(tag: Option<&str>) -> Option<String> {
    tag.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Versions must be strings. A bare YAML or JSON number has already lost
/// its trailing zeros (`5.10` reads as `5.1`), so it is refused.
fn deserialize_version<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawVersion {
        Text(String),
        Other(IgnoredAny),
    }

    match RawVersion::deserialize(deserializer)? {
        RawVersion::Text(s) => Ok(s),
        RawVersion::Other(_) => Err(D::Error::custom("version must be a quoted string")),
    }
}

fn deserialize_restriction<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(normalize_restriction(raw.as_deref()))
}

/// An immutable, fully loaded catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    source: Option<PathBuf>,
    loaded_at: Option<DateTime<Utc>>,
}

impl Catalog {
    /// Create a catalog loaded from `source`.
    pub fn new(entries: Vec<CatalogEntry>, source: Option<PathBuf>) -> Self {
        Self {
            entries,
            source,
            loaded_at: Some(Utc::now()),
        }
    }

    /// The empty, never-loaded catalog.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Entries in file order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// File the catalog was read from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// When the catalog was loaded (None for the empty catalog).
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// Whether a catalog has been loaded at all.
    pub fn is_loaded(&self) -> bool {
        self.loaded_at.is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
