//! Non-interactive UI for scripts and pipes.

use std::collections::HashMap;

use crate::error::{MandalError, Result};

use super::theme::MandalTheme;
use super::{OutputMode, ProgressHandle, Prompt, PromptResult, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Prompts resolve from `MANDAL_PROMPT_<KEY>` environment variables or
/// their default. No progress bar is drawn.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with("MANDAL_PROMPT_"))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
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

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        let env_key = format!("MANDAL_PROMPT_{}", prompt.key.to_uppercase());
        if let Some(value) = self.env_overrides.get(&env_key) {
            return Ok(PromptResult::String(value.clone()));
        }

        if let Some(default) = &prompt.default {
            return Ok(PromptResult::String(default.clone()));
        }

        Err(MandalError::InvalidInput {
            message: format!(
                "Cannot prompt for '{}' in non-interactive mode (no default value)",
                prompt.key
            ),
        })
    }

    fn start_progress(&mut self, _total: u64, message: &str) -> Box<dyn ProgressHandle> {
        if self.mode.shows_progress() {
            println!("{}", message);
        }
        Box::new(NoopProgress { mode: self.mode })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n◎ {}\n", title);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Progress handle that only reports the final line.
struct NoopProgress {
    mode: OutputMode,
}

impl ProgressHandle for NoopProgress {
    fn set_position(&mut self, _seconds: u64) {}

    fn finish(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", MandalTheme::plain().format_success(msg));
        }
    }

    fn abandon(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", MandalTheme::plain().format_warning(msg));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::PromptType;

    #[test]
    fn non_interactive_is_not_interactive() {
        let ui = NonInteractiveUI::new(OutputMode::Normal);
        assert!(!ui.is_interactive());
    }

    #[test]
    fn prompt_uses_default() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        let prompt = Prompt::input("name", "Your name", Some("Friend"));

        let result = ui.prompt(&prompt).unwrap();
        assert_eq!(result.as_string(), "Friend");
    }

    #[test]
    fn prompt_fails_without_default() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        let prompt = Prompt {
            key: "title".to_string(),
            question: "Title?".to_string(),
            prompt_type: PromptType::Input,
            default: None,
        };

        let result = ui.prompt(&prompt);
        assert!(matches!(result, Err(MandalError::InvalidInput { .. })));
    }

    #[test]
    fn prompt_uses_env_override() {
        let mut overrides = HashMap::new();
        overrides.insert("MANDAL_PROMPT_CLEAR".to_string(), "yes".to_string());

        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, overrides);
        let prompt = Prompt::confirm("clear", "End the challenge?", false);

        let result = ui.prompt(&prompt).unwrap();
        assert_eq!(result.as_bool(), Some(true));
    }

    #[test]
    fn confirm_default_reads_as_bool() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        let prompt = Prompt::confirm("clear", "End the challenge?", false);

        let result = ui.prompt(&prompt).unwrap();
        assert_eq!(result.as_bool(), Some(false));
    }

    #[test]
    fn output_mode_preserved() {
        let ui = NonInteractiveUI::new(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn noop_progress_accepts_updates() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Silent, HashMap::new());
        let mut progress = ui.start_progress(10, "Meditating");
        progress.set_position(3);
        progress.finish("Session recorded");
    }
}
