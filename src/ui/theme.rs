//! Visual theme and styling.

use console::Style;

/// Terminal styles for audit output.
#[derive(Debug, Clone)]
pub struct AuditTheme {
    /// Installed entries and success lines (green).
    pub success: Style,
    /// Warnings (orange).
    pub warning: Style,
    /// Missing entries and errors (red bold).
    pub error: Style,
    /// Secondary text.
    pub dim: Style,
    /// Emphasis (bold).
    pub highlight: Style,
    /// Headers (cyan bold).
    pub header: Style,
    /// Restriction tags (magenta).
    pub tag: Style,
    /// Hints (dim italic).
    pub hint: Style,
}

impl Default for AuditTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditTheme {
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().cyan().bold(),
            tag: Style::new().magenta(),
            hint: Style::new().dim().italic(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            tag: Style::new(),
            hint: Style::new(),
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    pub fn format_header(&self, title: &str) -> String {
        format!("{}", self.header.apply_to(title))
    }

    pub fn format_hint(&self, hint: &str) -> String {
        format!("{}", self.hint.apply_to(hint))
    }

    /// Status cell for a report row.
    pub fn format_status(&self, installed: bool) -> String {
        if installed {
            format!("{}", self.success.apply_to("✓ installed"))
        } else {
            format!("{}", self.error.apply_to("✗ missing"))
        }
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
