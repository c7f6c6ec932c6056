//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::ui::UserInterface;

use super::catalog::CatalogCommand;
use super::check::CheckCommand;
use super::completions::CompletionsCommand;
use super::installed::InstalledCommand;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// Failures the user should see are reported through `ui` and turned
    /// into a non-zero [`CommandResult`]. `Err` is reserved for faults in
    /// producing output.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    ///
    /// With no subcommand, runs `check` with the top-level check flags.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = cli.config.as_deref();
        match &cli.command {
            Some(Commands::Check(args)) => {
                CheckCommand::new(&self.project_root, config, args.clone()).execute(ui)
            }
            Some(Commands::Installed(args)) => {
                InstalledCommand::new(&self.project_root, config, args.clone()).execute(ui)
            }
            Some(Commands::Catalog(args)) => CatalogCommand::new(args.clone()).execute(ui),
            Some(Commands::Completions(args)) => {
                CompletionsCommand::new(args.clone()).execute(ui)
            }
            None => {
                CheckCommand::new(&self.project_root, config, cli.check.clone()).execute(ui)
            }
        }
    }
}
