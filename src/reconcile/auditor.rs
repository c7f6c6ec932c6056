//! Reconciliation orchestration.
//!
//! [`ComplianceAuditor`] ties the pieces together: run the listing command,
//! parse its output, match against the active catalog snapshot and apply the
//! restriction filter. It exposes the two boundary operations a front end
//! needs: [`ComplianceAuditor::load_catalog`] and
//! [`ComplianceAuditor::get_compliance_report`].
//!
//! # Example
//!
//! ```
//! use swaudit::catalog::{Catalog, CatalogEntry, CatalogStore};
//! use swaudit::inventory::{ListingOutput, PackageLister};
//! use swaudit::reconcile::ComplianceAuditor;
//! use std::sync::Arc;
//!
//! struct Canned;
//!
//! impl PackageLister for Canned {
//!     fn describe(&self) -> String {
//!         "canned".to_string()
//!     }
//!     fn list(&self) -> swaudit::Result<ListingOutput> {
//!         Ok(ListingOutput::success("1\n2\n3\n4\n5\nTool  tool.id  1.0  2.0  winget\n"))
//!     }
//! }
//!
//! let store = Arc::new(CatalogStore::with_catalog(Catalog::new(
//!     vec![CatalogEntry::new("Tool", "1.0", true, None)],
//!     None,
//! )));
//! let auditor = ComplianceAuditor::with_store(Arc::new(Canned), store);
//! let report = auditor.get_compliance_report(None).unwrap();
//! assert!(report.entries[0].installed);
//! ```

use std::path::Path;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use anyhow::anyhow;
use tracing::{debug, info};

use super::filter::{apply_restriction, Restrictions};
use super::matcher::reconcile;
use super::report::{ComplianceReport, ComplianceResponse};
use crate::catalog::{Catalog, CatalogStore};
use crate::config::ListingSettings;
use crate::error::{AuditError, Result};
use crate::inventory::{parse_listing, InstalledPackage, PackageLister, DEFAULT_PREAMBLE_LINES};

/// Runs reconciliations against a shared catalog.
///
/// Cloning is cheap; clones share the lister and the catalog store.
#[derive(Clone)]
pub struct ComplianceAuditor {
    lister: Arc<dyn PackageLister>,
    catalog: Arc<CatalogStore>,
    preamble_lines: usize,
}

impl std::fmt::Debug for ComplianceAuditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComplianceAuditor")
            .field("lister", &self.lister.describe())
            .field("preamble_lines", &self.preamble_lines)
            .finish()
    }
}

impl ComplianceAuditor {
    /// Create an auditor with an empty catalog.
    pub fn new(lister: impl PackageLister + 'static) -> Self {
        Self::with_store(Arc::new(lister), Arc::new(CatalogStore::new()))
    }

    /// Create an auditor sharing an existing catalog store.
    pub fn with_store(lister: Arc<dyn PackageLister>, catalog: Arc<CatalogStore>) -> Self {
        Self {
            lister,
            catalog,
            preamble_lines: DEFAULT_PREAMBLE_LINES,
        }
    }

    /// Create an auditor running the configured listing command.
    pub fn from_settings(settings: &ListingSettings) -> Self {
        Self::new(settings.lister()).with_preamble_lines(settings.preamble_lines)
    }

    /// Override how many leading listing lines are discarded.
    pub fn with_preamble_lines(mut self, preamble_lines: usize) -> Self {
        self.preamble_lines = preamble_lines;
        self
    }

    /// The shared catalog store.
    pub fn catalog_store(&self) -> &Arc<CatalogStore> {
        &self.catalog
    }

    /// Load a catalog file and make it active.
    ///
    /// On failure the previously active catalog stays in effect.
    pub fn load_catalog(&self, path: &Path) -> Result<Arc<Catalog>> {
        self.catalog.reload(path)
    }

    /// Run the listing command and parse what it printed.
    ///
    /// A non-zero exit or any stderr output fails the call; neither can be
    /// told apart from "nothing installed" otherwise.
    pub fn installed_packages(&self) -> Result<Vec<InstalledPackage>> {
        let command = self.lister.describe();
        let output = self.lister.list()?;

        if !output.success {
            let status = output
                .exit_code
                .map(|code| format!("exited with status {}", code))
                .unwrap_or_else(|| "terminated by signal".to_string());
            return Err(AuditError::CommandExecution {
                command,
                message: status,
            });
        }

        if output.has_stderr() {
            return Err(AuditError::CommandOutput {
                command,
                stderr: output.stderr.trim().to_string(),
            });
        }

        Ok(parse_listing(&output.stdout, self.preamble_lines))
    }

    /// Build a compliance report for the active catalog.
    ///
    /// The catalog snapshot is taken once, after the listing succeeds, so a
    /// concurrent reload is seen entirely or not at all.
    pub fn get_compliance_report(
        &self,
        restrictions: Option<&Restrictions>,
    ) -> Result<ComplianceReport> {
        let installed = self.installed_packages()?;
        let catalog = self.catalog.snapshot();

        debug!(
            "Reconciling {} catalog entries against {} installed packages",
            catalog.len(),
            installed.len()
        );

        let entries = apply_restriction(reconcile(catalog.entries(), &installed), restrictions);
        let report = ComplianceReport::new(
            entries,
            catalog.is_loaded(),
            catalog.source().map(Path::to_path_buf),
        );

        let summary = report.summary();
        info!(
            "Compliance report: {} entries, {} installed, {} missing",
            summary.total, summary.installed, summary.missing
        );

        Ok(report)
    }

    /// Build a report and convert any failure into an error response.
    pub fn respond(&self, restrictions: Option<&Restrictions>) -> ComplianceResponse {
        self.get_compliance_report(restrictions).into()
    }

    /// Build a report on a worker thread.
    pub fn spawn_compliance_report(&self, restrictions: Option<Restrictions>) -> PendingReport {
        let (tx, rx) = mpsc::channel();
        let auditor = self.clone();

        thread::spawn(move || {
            let _ = tx.send(auditor.get_compliance_report(restrictions.as_ref()));
        });

        PendingReport { receiver: rx }
    }
}

/// A reconciliation running on a worker thread.
#[derive(Debug)]
pub struct PendingReport {
    receiver: Receiver<Result<ComplianceReport>>,
}

impl PendingReport {
    /// Block until the report is ready.
    pub fn wait(self) -> Result<ComplianceReport> {
        self.receiver.recv().map_err(|_| worker_stopped())?
    }

    /// Return the report if it is ready, without blocking.
    pub fn try_result(&self) -> Option<Result<ComplianceReport>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(worker_stopped())),
        }
    }
}

fn worker_stopped() -> AuditError {
    AuditError::Other(anyhow!("reconciliation worker stopped before reporting"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;
    use crate::inventory::ListingOutput;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use tempfile::TempDir;

    const LISTING: &str = "\
Name                 Id                  Version       Available  Source
-------------------------------------------------------------------------
\n\n\n\
AcroReaderDC x86     Adobe.Reader.32     22.003.20314  23.1       winget
7-Zip 23.01 (x64)    7zip.7zip           23.01.00.1               winget
";

    struct CannedLister {
        output: ListingOutput,
        calls: AtomicUsize,
    }

    impl CannedLister {
        fn new(output: ListingOutput) -> Self {
            Self {
                output,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl PackageLister for CannedLister {
        fn describe(&self) -> String {
            "winget list".to_string()
        }

        fn list(&self) -> Result<ListingOutput> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.output.clone())
        }
    }

    fn reference_catalog() -> Catalog {
        Catalog::new(
            vec![
                CatalogEntry::new("AcroReaderDC x86", "22.003.20314", true, None),
                CatalogEntry::new("Barco ClickShareExtensionPack x64", "1.2.0.6", false, Some("Laptop")),
            ],
            None,
        )
    }

    fn auditor_with(output: ListingOutput, catalog: Catalog) -> (ComplianceAuditor, Arc<CannedLister>) {
        let lister = Arc::new(CannedLister::new(output));
        let auditor = ComplianceAuditor::with_store(
            lister.clone(),
            Arc::new(CatalogStore::with_catalog(catalog)),
        );
        (auditor, lister)
    }

    #[test]
    fn unfiltered_report_includes_every_entry() {
        let (auditor, _) = auditor_with(ListingOutput::success(LISTING), reference_catalog());
        let report = auditor.get_compliance_report(None).unwrap();

        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.entries[0].software_name(), "AcroReaderDC x86");
        assert!(report.entries[0].installed);
        assert_eq!(report.entries[1].software_name(), "Barco ClickShareExtensionPack x64");
        assert!(!report.entries[1].installed);
        assert!(report.catalog_loaded);
    }

    #[test]
    fn filtered_report_keeps_only_tagged_entries() {
        let (auditor, _) = auditor_with(ListingOutput::success(LISTING), reference_catalog());
        let tags = Restrictions::from_tags(["Laptop"]);
        let report = auditor.get_compliance_report(Some(&tags)).unwrap();

        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].software_name(), "Barco ClickShareExtensionPack x64");
        assert!(!report.entries[0].installed);
    }

    #[test]
    fn exact_version_required() {
        let catalog = Catalog::new(
            vec![CatalogEntry::new("7-Zip 23.01 (x64)", "23.01.00.0", false, None)],
            None,
        );
        let (auditor, _) = auditor_with(ListingOutput::success(LISTING), catalog);
        let report = auditor.get_compliance_report(None).unwrap();
        assert!(!report.entries[0].installed);
    }

    #[test]
    fn non_zero_exit_is_execution_error() {
        let output = ListingOutput::failure(Some(2), LISTING.to_string(), String::new());
        let (auditor, _) = auditor_with(output, reference_catalog());

        let err = auditor.get_compliance_report(None).unwrap_err();
        assert!(matches!(err, AuditError::CommandExecution { .. }));
        assert!(err.to_string().contains("status 2"));
    }

    #[test]
    fn stderr_output_is_output_error() {
        let mut output = ListingOutput::success(LISTING);
        output.stderr = "Failed when searching source: winget\n".to_string();
        let (auditor, _) = auditor_with(output, reference_catalog());

        let err = auditor.get_compliance_report(None).unwrap_err();
        assert!(matches!(err, AuditError::CommandOutput { .. }));
    }

    #[test]
    fn respond_converts_failure_without_partial_report() {
        let output = ListingOutput::failure(None, LISTING.to_string(), "killed".to_string());
        let (auditor, _) = auditor_with(output, reference_catalog());

        let response = auditor.respond(None);
        assert!(response.is_error());
        assert!(response.report().is_none());
    }

    #[test]
    fn no_catalog_loaded_yields_empty_report() {
        let auditor = ComplianceAuditor::new(CannedLister::new(ListingOutput::success(LISTING)));
        let report = auditor.get_compliance_report(None).unwrap();
        assert!(report.is_empty());
        assert!(!report.catalog_loaded);
    }

    #[test]
    fn listing_runs_on_every_request() {
        let (auditor, lister) = auditor_with(ListingOutput::success(LISTING), reference_catalog());
        auditor.get_compliance_report(None).unwrap();
        auditor.get_compliance_report(None).unwrap();
        assert_eq!(lister.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn custom_preamble_lines() {
        let listing = "Name  Id  Version\nAcroReaderDC x86  Adobe.Reader.32  22.003.20314\n";
        let (auditor, _) = auditor_with(ListingOutput::success(listing), reference_catalog());
        let auditor = auditor.with_preamble_lines(1);

        let report = auditor.get_compliance_report(None).unwrap();
        assert!(report.entries[0].installed);
    }

    #[test]
    fn load_catalog_replaces_active_catalog() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.json");
        fs::write(
            &path,
            r#"[{"software_name": "7-Zip 23.01 (x64)", "version": "23.01.00.1", "approved": true, "restrictedTo": null}]"#,
        )
        .unwrap();

        let (auditor, _) = auditor_with(ListingOutput::success(LISTING), reference_catalog());
        auditor.load_catalog(&path).unwrap();

        let report = auditor.get_compliance_report(None).unwrap();
        assert_eq!(report.entries.len(), 1);
        assert!(report.entries[0].installed);
        assert_eq!(report.catalog_source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn failed_load_keeps_previous_catalog() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.csv");
        fs::write(&path, "name,version\nbroken,1\n").unwrap();

        let (auditor, _) = auditor_with(ListingOutput::success(LISTING), reference_catalog());
        assert!(auditor.load_catalog(&path).is_err());

        let report = auditor.get_compliance_report(None).unwrap();
        assert_eq!(report.entries.len(), 2);
    }

    #[test]
    fn spawned_report_delivers_result() {
        let (auditor, _) = auditor_with(ListingOutput::success(LISTING), reference_catalog());
        let pending = auditor.spawn_compliance_report(Some(Restrictions::from_tags(["Laptop"])));
        let report = pending.wait().unwrap();
        assert_eq!(report.entries.len(), 1);
    }

    /// Lister that parks inside `list()` until the test releases it.
    struct GatedLister {
        entered: Arc<Barrier>,
        release: Arc<Barrier>,
    }

    impl PackageLister for GatedLister {
        fn describe(&self) -> String {
            "gated".to_string()
        }

        fn list(&self) -> Result<ListingOutput> {
            self.entered.wait();
            self.release.wait();
            Ok(ListingOutput::success(LISTING))
        }
    }

    #[test]
    fn reload_during_reconciliation_is_seen_whole() {
        let entered = Arc::new(Barrier::new(2));
        let release = Arc::new(Barrier::new(2));
        let lister = GatedLister {
            entered: Arc::clone(&entered),
            release: Arc::clone(&release),
        };
        let store = Arc::new(CatalogStore::with_catalog(reference_catalog()));
        let auditor = ComplianceAuditor::with_store(Arc::new(lister), Arc::clone(&store));

        let pending = auditor.spawn_compliance_report(None);
        entered.wait();
        store.replace(Catalog::new(
            vec![CatalogEntry::new("7-Zip 23.01 (x64)", "23.01.00.1", true, None)],
            None,
        ));
        release.wait();

        let report = pending.wait().unwrap();
        let names: Vec<_> = report.entries.iter().map(|e| e.software_name()).collect();
        assert_eq!(names, vec!["7-Zip 23.01 (x64)"]);
        assert!(report.entries[0].installed);
    }
}
