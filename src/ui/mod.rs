//! Terminal output.
//!
//! This module provides:
//! - [`UserInterface`] trait for output abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for pipes and CI logs
//! - [`MockUI`] for tests
//! - [`Table`] for report rendering
//!
//! # Example
//!
//! ```
//! use swaudit::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(false, OutputMode::Silent);
//! ui.show_header("Compliance");
//! ui.success("All approved software is installed");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use table::Table;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, AuditTheme};

/// Trait for user-facing output.
///
/// Status output respects the [`OutputMode`]. Errors and [`emit`]
/// payloads are always written.
///
/// [`emit`]: UserInterface::emit
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Change the output mode.
    fn set_output_mode(&mut self, mode: OutputMode);

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a section header.
    fn show_header(&mut self, title: &str);

    /// Show a follow-up hint.
    fn show_hint(&mut self, hint: &str);

    /// Write a machine-readable payload to stdout, unstyled.
    fn emit(&mut self, payload: &str);

    /// Styles for building report cells.
    fn theme(&self) -> AuditTheme;

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}
