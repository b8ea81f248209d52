//! Live progress bar for a timed session.

use indicatif::{ProgressBar, ProgressStyle};

use super::progress::format_clock;
use super::theme::MandalTheme;
use super::ProgressHandle;

/// Progress bar counting elapsed session seconds.
pub struct SessionBar {
    bar: ProgressBar,
    total: u64,
}

impl SessionBar {
    /// Create a visible bar for a session of `total` seconds.
    pub fn new(total: u64, message: &str) -> Self {
        let bar = ProgressBar::new(total);
        if let Ok(style) =
            ProgressStyle::default_bar().template("{prefix} [{bar:32.cyan/blue}] {msg}")
        {
            bar.set_style(style.progress_chars("█▓░"));
        }
        bar.set_prefix(message.to_string());

        let session_bar = Self { bar, total };
        session_bar.bar.set_message(session_bar.label(0));
        session_bar
    }

    /// Create a bar that doesn't show (for quiet and silent modes).
    pub fn hidden(total: u64) -> Self {
        Self {
            bar: ProgressBar::hidden(),
            total,
        }
    }

    fn label(&self, seconds: u64) -> String {
        format!("{} / {}", format_clock(seconds), format_clock(self.total))
    }

    /// Current position in seconds.
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    fn finish_with(&mut self, line: String) {
        if let Ok(style) = ProgressStyle::default_bar().template("{msg}") {
            self.bar.set_style(style);
        }
        self.bar.finish_with_message(line);
    }
}

impl ProgressHandle for SessionBar {
    fn set_position(&mut self, seconds: u64) {
        self.bar.set_position(seconds.min(self.total));
        self.bar.set_message(self.label(seconds));
    }

    fn finish(&mut self, msg: &str) {
        let theme = MandalTheme::new();
        self.finish_with(theme.format_success(msg));
    }

    fn abandon(&mut self, msg: &str) {
        let theme = MandalTheme::new();
        self.finish_with(theme.format_warning(msg));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_bar_tracks_position() {
        let mut bar = SessionBar::hidden(873);
        bar.set_position(10);
        assert_eq!(bar.position(), 10);
        bar.finish("done");
    }

    #[test]
    fn position_is_capped_at_total() {
        let mut bar = SessionBar::hidden(5);
        bar.set_position(9);
        assert_eq!(bar.position(), 5);
    }

    #[test]
    fn label_shows_elapsed_and_total() {
        let bar = SessionBar::hidden(873);
        assert_eq!(bar.label(61), "00:01:01 / 00:14:33");
    }

    #[test]
    fn visible_bar_finishes() {
        let mut bar = SessionBar::new(3, "Session");
        bar.set_position(1);
        bar.abandon("Stopped early");
    }
}
