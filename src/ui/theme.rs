//! Visual theme and styling.

use console::Style;

/// The installer's visual theme.
#[derive(Debug, Clone)]
pub struct InstallerTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for headers (bold cyan).
    pub header: Style,
    /// Style for step titles (bold).
    pub step_title: Style,
    /// Style for commands shown in output (dim italic).
    pub command: Style,
    /// Style for box-drawing borders (dim).
    pub border: Style,
}

impl Default for InstallerTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl InstallerTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            header: Style::new().bold().cyan(),
            step_title: Style::new().bold(),
            command: Style::new().dim().italic(),
            border: Style::new().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            header: Style::new(),
            step_title: Style::new(),
            command: Style::new(),
            border: Style::new(),
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a skipped message (icon + text in dim).
    pub fn format_skipped(&self, msg: &str) -> String {
        format!("{}", self.dim.apply_to(format!("○ {}", msg)))
    }

    /// Format a numbered step title.
    pub fn format_step(&self, current: usize, total: usize, title: &str) -> String {
        format!(
            "{} {}",
            self.dim.apply_to(format!("[{}/{}]", current, total)),
            self.step_title.apply_to(title)
        )
    }

    /// Format a header with an underline.
    pub fn format_header(&self, title: &str) -> String {
        let rule = "─".repeat(title.chars().count());
        format!(
            "{}\n{}",
            self.header.apply_to(title),
            self.dim.apply_to(rule)
        )
    }
}

/// Check if colors should be used.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check if stdout is a TTY
    console::Term::stdout().is_term()
}
