//! Reconciliation of installed packages against the catalog.
//!
//! - [`matcher`] - exact name and version join producing [`ReportEntry`] rows
//! - [`filter`] - restriction-tag narrowing
//! - [`report`] - [`ComplianceReport`] and the [`ComplianceResponse`] boundary type
//! - [`auditor`] - the [`ComplianceAuditor`] orchestrator

pub mod auditor;
pub mod filter;
pub mod matcher;
pub mod report;

pub use auditor::{ComplianceAuditor, PendingReport};
pub use filter::{apply_restriction, Restrictions};
pub use matcher::{reconcile, ReportEntry};
pub use report::{ComplianceReport, ComplianceResponse, ReportSummary};
