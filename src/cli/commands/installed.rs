//! Installed command implementation.
//!
//! The `swaudit installed` command runs the listing command and shows the
//! packages it reported, without consulting any catalog.

use std::path::{Path, PathBuf};

use crate::cli::args::InstalledArgs;
use crate::config::load_config;
use crate::error::Result;
use crate::inventory::InstalledPackage;
use crate::reconcile::ComplianceAuditor;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::{emit_json_error, packages_table, to_json};

/// The installed command implementation.
pub struct InstalledCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: InstalledArgs,
}

impl InstalledCommand {
    /// Create a new installed command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: InstalledArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    fn packages(&self) -> Result<Vec<InstalledPackage>> {
        let config = load_config(&self.project_root, self.config_path.as_deref())?;
        ComplianceAuditor::from_settings(&config.listing).installed_packages()
    }
}

impl Command for InstalledCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let packages = match self.packages() {
            Ok(packages) => packages,
            Err(e) => {
                if self.args.json {
                    emit_json_error(ui, &e);
                } else {
                    ui.error(&e.to_string());
                }
                return Ok(CommandResult::failure(1));
            }
        };

        if self.args.json {
            ui.emit(&to_json(&packages)?);
            return Ok(CommandResult::success());
        }

        if packages.is_empty() {
            ui.message("No installed packages reported");
            return Ok(CommandResult::success());
        }

        ui.message(&packages_table(&packages).render());

        let updates = packages.iter().filter(|p| p.has_update()).count();
        ui.message(&format!(
            "{} packages installed, {} with updates available",
            packages.len(),
            updates
        ));

        Ok(CommandResult::success())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn setup_project(script: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".swaudit");
        fs::create_dir_all(&dir).unwrap();
        let config = format!(
            "listing:\n  program: sh\n  args: [\"-c\", {:?}]\n  preamble_lines: 2\n",
            script
        );
        fs::write(dir.join("config.yml"), config).unwrap();
        temp
    }

    #[test]
    fn lists_parsed_packages() {
        let temp = setup_project(
            "printf 'Name  Id  Version  Available  Source\\n----\\nGit  Git.Git  2.44.0  2.45.0  winget\\n'",
        );
        let mut ui = MockUI::new();
        let cmd = InstalledCommand::new(temp.path(), None, InstalledArgs::default());
        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("Git.Git"));
        assert!(ui.has_message("1 packages installed, 1 with updates available"));
    }

    #[test]
    fn json_lists_packages() {
        let temp = setup_project("printf 'h\\n-\\nGit  Git.Git  2.44.0    winget\\n'");
        let mut ui = MockUI::new();
        let cmd = InstalledCommand::new(temp.path(), None, InstalledArgs { json: true });
        cmd.execute(&mut ui).unwrap();

        let json = ui.last_json().unwrap();
        assert_eq!(json[0]["identifier"], "Git.Git");
        assert_eq!(json[0]["version"], "2.44.0");
    }

    #[test]
    fn failing_command_is_error() {
        let temp = setup_project("exit 3");
        let mut ui = MockUI::new();
        let cmd = InstalledCommand::new(temp.path(), None, InstalledArgs::default());
        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("exited with status 3"));
    }

    #[test]
    fn empty_listing_says_so() {
        let temp = setup_project("true");
        let mut ui = MockUI::new();
        let cmd = InstalledCommand::new(temp.path(), None, InstalledArgs::default());
        cmd.execute(&mut ui).unwrap();
        assert!(ui.has_message("No installed packages reported"));
    }
}
