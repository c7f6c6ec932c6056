//! Check command implementation.
//!
//! The `swaudit check` command reconciles installed software with the
//! catalog and renders the compliance report.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::args::CheckArgs;
use crate::config::{load_config, AuditConfig};
use crate::error::Result;
use crate::reconcile::{ComplianceAuditor, ComplianceReport, ComplianceResponse, Restrictions};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::{emit_json_error, report_table, summary_line, to_json};

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: CheckArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    /// Command-line tags win over configured ones.
    fn restrictions(&self, config: &AuditConfig) -> Option<Restrictions> {
        let tags = if self.args.restrict.is_empty() {
            &config.restrictions
        } else {
            &self.args.restrict
        };
        let restrictions = Restrictions::from_tags(tags);
        (!restrictions.is_empty()).then_some(restrictions)
    }

    /// Build the report, noting whether a restriction filter was applied.
    fn build_report(&self) -> Result<(ComplianceReport, bool)> {
        let config = load_config(&self.project_root, self.config_path.as_deref())?;
        let auditor = ComplianceAuditor::from_settings(&config.listing);

        if let Some(path) = self.args.catalog.as_ref().or(config.catalog.as_ref()) {
            auditor.load_catalog(path)?;
        } else {
            debug!("No catalog configured");
        }

        let restrictions = self.restrictions(&config);
        let filtered = restrictions.is_some();
        let report = auditor.spawn_compliance_report(restrictions).wait()?;
        Ok((report, filtered))
    }

    fn render(&self, report: &ComplianceReport, filtered: bool, ui: &mut dyn UserInterface) {
        if !report.catalog_loaded {
            ui.message("No catalog loaded");
            ui.show_hint("Pass --catalog PATH or set `catalog:` in .swaudit/config.yml");
            return;
        }

        if let Some(source) = &report.catalog_source {
            ui.show_header(&format!("Compliance against {}", source.display()));
        }

        if report.is_empty() {
            if filtered {
                ui.message("No catalog entries match the requested restrictions");
            } else {
                ui.message("Catalog is empty");
            }
            return;
        }

        let theme = ui.theme();
        let detail = ui.output_mode().shows_detail();
        ui.message(&report_table(report, &theme, detail).render());

        let summary = report.summary();
        if report.is_compliant() {
            ui.success(&format!("All {} entries installed", summary.total));
        } else {
            ui.message(&summary_line(&summary));
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (report, filtered) = match self.build_report() {
            Ok(built) => built,
            Err(e) => {
                if self.args.json {
                    emit_json_error(ui, &e);
                } else {
                    ui.error(&e.to_string());
                }
                return Ok(CommandResult::failure(1));
            }
        };

        let compliant = report.is_compliant();
        if self.args.json {
            ui.emit(&to_json(&ComplianceResponse::Report(report))?);
        } else {
            self.render(&report, filtered, ui);
        }

        if self.args.strict && !compliant {
            return Ok(CommandResult::failure(1));
        }
        Ok(CommandResult::success())
    }
}
