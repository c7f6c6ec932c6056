//! Compliance report and its boundary representation.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::matcher::ReportEntry;
use crate::error::Result;

/// The result of one reconciliation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    /// Annotated, filtered entries in catalog order.
    pub entries: Vec<ReportEntry>,

    /// Whether any catalog was loaded when the report was built.
    pub catalog_loaded: bool,

    /// File the catalog came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_source: Option<PathBuf>,

    pub generated_at: DateTime<Utc>,
}

/// Counts over a report's entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total: usize,
    pub installed: usize,
    pub missing: usize,
    /// Approved entries whose expected version is not installed.
    pub approved_missing: usize,
}

impl ComplianceReport {
    /// Create a report stamped with the current time.
    pub fn new(entries: Vec<ReportEntry>, catalog_loaded: bool, catalog_source: Option<PathBuf>) -> Self {
        Self {
            entries,
            catalog_loaded,
            catalog_source,
            generated_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether every reported entry is installed.
    pub fn is_compliant(&self) -> bool {
        self.entries.iter().all(|e| e.installed)
    }

    pub fn summary(&self) -> ReportSummary {
        self.entries.iter().fold(ReportSummary::default(), |mut acc, e| {
            acc.total += 1;
            if e.installed {
                acc.installed += 1;
            } else {
                acc.missing += 1;
                if e.approved() {
                    acc.approved_missing += 1;
                }
            }
            acc
        })
    }
}

/// What the presentation layer receives: a report or an error message.
///
/// Failures never cross this boundary as faults, and a failed run never
/// carries a partial report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComplianceResponse {
    Report(ComplianceReport),
    Error { error: String },
}

impl From<Result<ComplianceReport>> for ComplianceResponse {
    fn from(result: Result<ComplianceReport>) -> Self {
        match result {
            Ok(report) => Self::Report(report),
            Err(e) => Self::Error {
                error: e.to_string(),
            },
        }
    }
}

impl ComplianceResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn report(&self) -> Option<&ComplianceReport> {
        match self {
            Self::Report(report) => Some(report),
            Self::Error { .. } => None,
        }
    }
}
