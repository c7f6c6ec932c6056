//! Package listing parser.
//!
//! Turns the tabular text printed by the package manager's listing command
//! into [`InstalledPackage`] records. The listing starts with a fixed
//! preamble (banner, header and separator lines) which is discarded
//! unconditionally. Columns are separated by runs of two or more spaces,
//! since names and identifiers may contain single spaces.
//!
//! # Example
//!
//! ```
//! use swaudit::inventory::parse_installed_packages;
//!
//! let output = "\n\nName  Id  Version\n-----\n\
//!               Mozilla FirefoxESR x86  Mozilla.Firefox.ESR  115.9.0  115.10.0  winget\n";
//! let packages = parse_installed_packages(&format!("banner\n{}", output));
//! assert_eq!(packages.len(), 1);
//! assert_eq!(packages[0].name, "Mozilla FirefoxESR x86");
//! ```

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use super::package::InstalledPackage;

/// Number of preamble lines the listing command prints before data rows.
pub const DEFAULT_PREAMBLE_LINES: usize = 5;

/// Number of columns in a complete listing row.
pub const LISTING_COLUMNS: usize = 5;

/// Two or more consecutive spaces.
static COLUMN_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(" {2,}").expect("COLUMN_SEPARATOR must compile"));

/// Split a single listing row into columns.
///
/// The row is trimmed first; single spaces stay inside a column.
pub fn split_columns(line: &str) -> Vec<&str> {
    let line = line.trim();
    if line.is_empty() {
        return Vec::new();
    }
    COLUMN_SEPARATOR.split(line).collect()
}

/// Parse listing output using the default five-line preamble.
pub fn parse_installed_packages(raw_output: &str) -> Vec<InstalledPackage> {
    parse_listing(raw_output, DEFAULT_PREAMBLE_LINES)
}

/// Parse listing output, discarding `preamble_lines` leading lines.
///
/// Output shorter than the preamble yields no packages. Blank lines after
/// the preamble are skipped. Rows with fewer than five columns produce
/// partial records rather than being dropped.
pub fn parse_listing(raw_output: &str, preamble_lines: usize) -> Vec<InstalledPackage> {
    let packages: Vec<InstalledPackage> = raw_output
        .trim()
        .lines()
        .skip(preamble_lines)
        .filter_map(|line| {
            let columns = split_columns(line);
            if columns.is_empty() {
                return None;
            }
            if columns.len() < LISTING_COLUMNS {
                warn!(
                    "Listing row has {} of {} columns: {}",
                    columns.len(),
                    LISTING_COLUMNS,
                    line.trim()
                );
            }
            Some(InstalledPackage::from_columns(&columns))
        })
        .collect();

    debug!("Parsed {} installed packages", packages.len());
    packages
}
