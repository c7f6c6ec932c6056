//! Plain UI for pipes, redirects, and CI logs.

use super::{AuditTheme, OutputMode, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Never styles output. Warnings and errors go to stderr so stdout stays
/// clean for `--json` consumers.
pub struct NonInteractiveUI {
    mode: OutputMode,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_chrome() {
            println!("\n{}\n", title);
        }
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_chrome() {
            println!("  {}", hint);
        }
    }

    fn emit(&mut self, payload: &str) {
        println!("{}", payload);
    }

    fn theme(&self) -> AuditTheme {
        AuditTheme::plain()
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
