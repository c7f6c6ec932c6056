//! Installed package records.

use serde::{Deserialize, Serialize};

/// A package reported by the system package manager.
///
/// Records are rebuilt from the listing command on every reconciliation
/// and never mutated after parsing. Columns missing from a listing row are
/// empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledPackage {
    /// Display name (may contain single spaces).
    pub name: String,

    /// Package manager identifier (e.g., `Mozilla.Firefox.ESR`).
    pub identifier: String,

    /// Installed version.
    pub version: String,

    /// Newer version offered by the source, if any.
    pub available_version: String,

    /// Repository the package came from (empty for local installs).
    pub source: String,
}

impl InstalledPackage {
    /// Build a record from positional listing columns.
    ///
    /// Missing trailing columns become empty strings; columns past the
    /// fifth are ignored.
    pub fn from_columns<S: AsRef<str>>(columns: &[S]) -> Self {
        let column = |i: usize| {
            columns
                .get(i)
                .map(|c| c.as_ref().to_string())
                .unwrap_or_default()
        };

        Self {
            name: column(0),
            identifier: column(1),
            version: column(2),
            available_version: column(3),
            source: column(4),
        }
    }

    /// Whether the package manager offers a newer version.
    pub fn has_update(&self) -> bool {
        !self.available_version.is_empty()
    }
}
