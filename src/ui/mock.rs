//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use mandal::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("clear", "yes");
//!
//! ui.message("Day 3 of 48");
//! ui.success("Session recorded");
//!
//! assert!(ui.messages().contains(&"Day 3 of 48".to_string()));
//! assert!(ui.successes().contains(&"Session recorded".to_string()));
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use crate::error::Result;
use crate::state::Theme;

use super::{OutputMode, ProgressHandle, Prompt, PromptResult, PromptType, UserInterface};

/// Mock UI implementation for testing.
///
/// Captures all UI interactions and allows pre-configured prompt responses.
/// Supports both single responses (via `set_prompt_response`) and queued
/// responses (via `queue_prompt_responses`) for keys asked more than once.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    theme: Option<Theme>,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    progress: Rc<RefCell<MockProgress>>,
    prompt_responses: HashMap<String, String>,
    prompt_queues: HashMap<String, VecDeque<String>>,
    prompts_shown: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Normal,
            ..Default::default()
        }
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set a response for a prompt key.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Queue several responses for the same prompt key.
    ///
    /// Responses are returned in order, then `set_prompt_response`
    /// and the prompt default take over.
    pub fn queue_prompt_responses(&mut self, key: &str, responses: Vec<&str>) {
        let queue = responses.into_iter().map(|s| s.to_string()).collect();
        self.prompt_queues.insert(key.to_string(), queue);
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get the keys of every prompt shown.
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// The last theme applied, if any.
    pub fn theme(&self) -> Option<Theme> {
        self.theme
    }

    /// Snapshot of the progress display.
    pub fn progress(&self) -> MockProgress {
        self.progress.borrow().clone()
    }

    /// Check if any message contains the given text.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if any success message contains the given text.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if any warning contains the given text.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if any error contains the given text.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Clear all captured interactions.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.successes.clear();
        self.warnings.clear();
        self.errors.clear();
        self.headers.clear();
        self.prompts_shown.clear();
        *self.progress.borrow_mut() = MockProgress::default();
    }

    fn respond(prompt: &Prompt, response: String) -> PromptResult {
        if matches!(prompt.prompt_type, PromptType::Confirm) {
            PromptResult::Bool(matches!(response.as_str(), "true" | "yes" | "y" | "1"))
        } else {
            PromptResult::String(response)
        }
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.prompts_shown.push(prompt.key.clone());

        if let Some(queue) = self.prompt_queues.get_mut(&prompt.key) {
            if let Some(response) = queue.pop_front() {
                return Ok(Self::respond(prompt, response));
            }
        }

        if let Some(response) = self.prompt_responses.get(&prompt.key) {
            return Ok(Self::respond(prompt, response.clone()));
        }

        if let Some(default) = &prompt.default {
            return Ok(Self::respond(prompt, default.clone()));
        }

        Ok(Self::respond(prompt, String::new()))
    }

    fn start_progress(&mut self, total: u64, message: &str) -> Box<dyn ProgressHandle> {
        *self.progress.borrow_mut() = MockProgress {
            message: Some(message.to_string()),
            total,
            ..Default::default()
        };
        Box::new(SharedProgress(Rc::clone(&self.progress)))
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = Some(theme);
    }
}

/// What a mock progress display went through.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MockProgress {
    /// Message the display was started with.
    pub message: Option<String>,
    /// Total seconds.
    pub total: u64,
    /// Every position set, in order.
    pub positions: Vec<u64>,
    /// Final line when finished normally.
    pub finished: Option<String>,
    /// Final line when ended early.
    pub abandoned: Option<String>,
}

/// Handle writing into the mock's shared progress record.
struct SharedProgress(Rc<RefCell<MockProgress>>);

impl ProgressHandle for SharedProgress {
    fn set_position(&mut self, seconds: u64) {
        self.0.borrow_mut().positions.push(seconds);
    }

    fn finish(&mut self, msg: &str) {
        self.0.borrow_mut().finished = Some(msg.to_string());
    }

    fn abandon(&mut self, msg: &str) {
        self.0.borrow_mut().abandoned = Some(msg.to_string());
    }
}
