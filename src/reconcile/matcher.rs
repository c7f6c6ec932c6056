//! Catalog-to-inventory matching.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogEntry;
use crate::inventory::InstalledPackage;

/// A catalog entry annotated with whether its exact version is installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    #[serde(flatten)]
    pub entry: CatalogEntry,

    /// True iff a package with the same name and version is installed.
    pub installed: bool,
}

impl ReportEntry {
    pub fn software_name(&self) -> &str {
        &self.entry.software_name
    }

    pub fn expected_version(&self) -> &str {
        &self.entry.expected_version
    }

    pub fn approved(&self) -> bool {
        self.entry.approved
    }

    pub fn restricted_to(&self) -> Option<&str> {
        self.entry.restricted_to.as_deref()
    }
}

/// Annotate every catalog entry with its installation state.
///
/// Matching is exact, case-sensitive string equality on both name and
/// version. Output order follows the catalog; neither input is modified.
pub fn reconcile(catalog: &[CatalogEntry], installed: &[InstalledPackage]) -> Vec<ReportEntry> {
    let present: HashSet<(&str, &str)> = installed
        .iter()
        .map(|pkg| (pkg.name.as_str(), pkg.version.as_str()))
        .collect();

    catalog
        .iter()
        .map(|entry| ReportEntry {
            installed: present.contains(&(
                entry.software_name.as_str(),
                entry.expected_version.as_str(),
            )),
            entry: entry.clone(),
        })
        .collect()
}
