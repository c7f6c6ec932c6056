//! Catalog command implementation.
//!
//! The `swaudit catalog` command loads a catalog file and displays its
//! entries. It never runs the listing command, which makes it a quick way
//! to validate a catalog before deploying it.

use crate::catalog::load_catalog;
use crate::cli::args::CatalogArgs;
use crate::error::Result;
use crate::reconcile::Restrictions;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::{catalog_table, emit_json_error, to_json};

/// The catalog command implementation.
pub struct CatalogCommand {
    args: CatalogArgs,
}

impl CatalogCommand {
    /// Create a new catalog command.
    pub fn new(args: CatalogArgs) -> Self {
        Self { args }
    }
}

impl Command for CatalogCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let catalog = match load_catalog(&self.args.path) {
            Ok(catalog) => catalog,
            Err(e) => {
                if self.args.json {
                    emit_json_error(ui, &e);
                } else {
                    ui.error(&e.to_string());
                }
                return Ok(CommandResult::failure(1));
            }
        };

        let restrictions = Restrictions::from_tags(&self.args.restrict);
        let entries: Vec<_> = catalog
            .entries()
            .iter()
            .filter(|e| restrictions.admits(e.restricted_to.as_deref()))
            .collect();

        if self.args.json {
            ui.emit(&to_json(&entries)?);
            return Ok(CommandResult::success());
        }

        ui.show_header(&format!("Catalog {}", self.args.path.display()));
        if entries.is_empty() {
            ui.message("No catalog entries");
            return Ok(CommandResult::success());
        }

        let theme = ui.theme();
        ui.message(&catalog_table(entries.iter().copied(), &theme).render());

        let approved = entries.iter().filter(|e| e.approved).count();
        let restricted = entries.iter().filter(|e| e.is_restricted()).count();
        ui.success(&format!(
            "{} entries ({} approved, {} restricted)",
            entries.len(),
            approved,
            restricted
        ));

        Ok(CommandResult::success())
    }
}
