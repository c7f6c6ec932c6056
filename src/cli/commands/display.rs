//! Shared rendering helpers for report, catalog, and package output.

use serde::Serialize;

use crate::catalog::CatalogEntry;
use crate::error::{AuditError, Result};
use crate::inventory::InstalledPackage;
use crate::reconcile::{ComplianceReport, ReportSummary};
use crate::ui::{AuditTheme, Table, UserInterface};

/// Serialize a value for `--json` output.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| AuditError::Other(e.into()))
}

/// Emit `{"error": "..."}` for a failed `--json` run.
pub fn emit_json_error(ui: &mut dyn UserInterface, error: &AuditError) {
    let payload = serde_json::json!({ "error": error.to_string() });
    ui.emit(&payload.to_string());
}

fn restriction_cell(theme: &AuditTheme, tag: Option<&str>) -> String {
    match tag {
        Some(tag) => theme.tag.apply_to(tag).to_string(),
        None => theme.dim.apply_to("-").to_string(),
    }
}

fn approval_cell(approved: bool) -> &'static str {
    if approved {
        "yes"
    } else {
        "no"
    }
}

/// Report table. Detail adds approval and restriction columns.
pub fn report_table(report: &ComplianceReport, theme: &AuditTheme, detail: bool) -> Table {
    let mut headers = vec!["Software", "Version", "Status"];
    if detail {
        headers.extend(["Approved", "Restricted To"]);
    }

    let mut table = Table::new(headers);
    for row in &report.entries {
        let mut cells = vec![
            row.software_name().to_string(),
            row.expected_version().to_string(),
            theme.format_status(row.installed),
        ];
        if detail {
            cells.push(approval_cell(row.approved()).to_string());
            cells.push(restriction_cell(theme, row.restricted_to()));
        }
        table.add_row(cells);
    }
    table
}

/// Catalog listing table.
pub fn catalog_table<'a>(
    entries: impl IntoIterator<Item = &'a CatalogEntry>,
    theme: &AuditTheme,
) -> Table {
    let mut table = Table::new(["Software", "Version", "Approved", "Restricted To"]);
    for entry in entries {
        table.add_row([
            entry.software_name.clone(),
            entry.expected_version.clone(),
            approval_cell(entry.approved).to_string(),
            restriction_cell(theme, entry.restricted_to.as_deref()),
        ]);
    }
    table
}

/// Installed package table.
pub fn packages_table(packages: &[InstalledPackage]) -> Table {
    let mut table = Table::new(["Name", "Id", "Version", "Available", "Source"]);
    for package in packages {
        table.add_row([
            package.name.as_str(),
            package.identifier.as_str(),
            package.version.as_str(),
            package.available_version.as_str(),
            package.source.as_str(),
        ]);
    }
    table
}

/// One-line summary under the report table.
pub fn summary_line(summary: &ReportSummary) -> String {
    let mut line = format!(
        "{} of {} entries installed, {} missing",
        summary.installed, summary.total, summary.missing
    );
    if summary.approved_missing > 0 {
        line.push_str(&format!(" ({} approved)", summary.approved_missing));
    }
    line
}
