//! Visual theme and styling.

use console::Style;

use crate::state::Theme;

/// Mandal's visual theme.
#[derive(Debug, Clone)]
pub struct MandalTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for accents such as the progress bar (cyan, or magenta on dark).
    pub info: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
    /// Style for headers.
    pub header: Style,
    /// Style for key labels in key-value displays (bold).
    pub key: Style,
    /// Style for today's cell in the challenge grid.
    pub today: Style,
}

impl Default for MandalTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl MandalTheme {
    /// Create the default (light) theme.
    pub fn new() -> Self {
        Self::for_preference(Theme::Light)
    }

    /// Create the palette for a stored theme preference.
    pub fn for_preference(theme: Theme) -> Self {
        let accent = match theme {
            Theme::Light => Style::new().cyan(),
            Theme::Dark => Style::new().magenta(),
        };
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            info: accent.clone(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: accent.clone().bold(),
            key: Style::new().bold(),
            today: accent.bold().underlined(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            key: Style::new(),
            today: Style::new(),
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

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("◎"),
            self.highlight.apply_to(title)
        )
    }

    /// Format a key-value line.
    pub fn format_field(&self, key: &str, value: &str) -> String {
        format!("{} {}", self.key.apply_to(format!("{}:", key)), value)
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
