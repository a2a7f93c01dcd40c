//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use sod_installer::ui::{MockUI, Prompt, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("install_path", "/games/eq");
//!
//! ui.message("Checking for required packages...");
//! let answer = ui.prompt(&Prompt::input("install_path", "Path", None)).unwrap();
//!
//! assert_eq!(answer.as_string(), "/games/eq");
//! assert!(ui.has_message("required packages"));
//! ```

use std::collections::HashMap;

use crate::error::Result;

use super::{OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    steps: Vec<(usize, usize, String)>,
    spinners: Vec<String>,
    command_outputs: Vec<(String, String)>,
    error_blocks: Vec<(String, String)>,
    prompt_responses: HashMap<String, String>,
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

    /// Set a response for a prompt key.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Set the output mode reported to callers.
    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
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

    /// Get all captured step titles as (current, total, title).
    pub fn steps(&self) -> &[(usize, usize, String)] {
        &self.steps
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Command output echoed in verbose mode, as (command, output).
    pub fn command_outputs(&self) -> &[(String, String)] {
        &self.command_outputs
    }

    /// Get all captured error blocks as (command, output).
    pub fn error_blocks(&self) -> &[(String, String)] {
        &self.error_blocks
    }

    /// Get all prompts that were shown (by key).
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific success was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
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

        let response = self
            .prompt_responses
            .get(&prompt.key)
            .or(prompt.default.as_ref())
            .cloned();

        match prompt.prompt_type {
            PromptType::Acknowledge => Ok(PromptResult::Bool(true)),
            PromptType::Input => Ok(PromptResult::String(response.unwrap_or_default())),
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner::new())
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_step(&mut self, current: usize, total: usize, title: &str) {
        self.steps.push((current, total, title.to_string()));
    }

    fn show_command_output(&mut self, command: &str, output: &str) {
        if self.mode.shows_command_output() {
            self.command_outputs
                .push((command.to_string(), output.to_string()));
        }
    }

    fn show_error_block(&mut self, command: &str, output: &str) {
        self.error_blocks
            .push((command.to_string(), output.to_string()));
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Mock spinner that captures finish messages.
#[derive(Debug, Default)]
pub struct MockSpinner {
    messages: Vec<String>,
    status: Option<SpinnerStatus>,
}

/// Status of a mock spinner when finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStatus {
    /// Finished successfully.
    Success,
    /// Finished with error.
    Error,
    /// Skipped.
    Skipped,
}

impl MockSpinner {
    /// Create a new mock spinner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish messages recorded on the spinner.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// How the spinner finished, if it did.
    pub fn status(&self) -> Option<SpinnerStatus> {
        self.status
    }
}

impl SpinnerHandle for MockSpinner {
    fn finish_success(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
        self.status = Some(SpinnerStatus::Success);
    }

    fn finish_error(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
        self.status = Some(SpinnerStatus::Error);
    }

    fn finish_skipped(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
        self.status = Some(SpinnerStatus::Skipped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_captures_messages() {
        let mut ui = MockUI::new();
        ui.message("Hello");
        ui.success("Done");
        ui.warning("Old winetricks");
        ui.error("Failed");

        assert!(ui.has_message("Hello"));
        assert!(ui.has_success("Done"));
        assert!(ui.has_warning("winetricks"));
        assert!(ui.has_error("Failed"));
    }

    #[test]
    fn mock_prompt_uses_response_then_default() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("install_path", "/games/eq");

        let configured = ui
            .prompt(&Prompt::input("install_path", "Path", Some("/default")))
            .unwrap();
        let defaulted = ui
            .prompt(&Prompt::input("other", "Other", Some("/default")))
            .unwrap();

        assert_eq!(configured.as_string(), "/games/eq");
        assert_eq!(defaulted.as_string(), "/default");
        assert_eq!(ui.prompts_shown(), &["install_path", "other"]);
    }

    #[test]
    fn mock_acknowledge_always_continues() {
        let mut ui = MockUI::new();
        let result = ui.prompt(&Prompt::acknowledge("continue", "Press Enter")).unwrap();
        assert_eq!(result, PromptResult::Bool(true));
    }

    #[test]
    fn mock_records_steps_and_error_blocks() {
        let mut ui = MockUI::new();
        ui.show_step(1, 12, "Checking privileges");
        ui.show_error_block("wine EQ_setup.exe", "err:module");

        assert_eq!(ui.steps()[0], (1, 12, "Checking privileges".to_string()));
        assert_eq!(ui.error_blocks()[0].0, "wine EQ_setup.exe");
    }

    #[test]
    fn mock_echoes_command_output_only_when_verbose() {
        let mut ui = MockUI::new();
        ui.show_command_output("winetricks list-installed", "corefonts");
        assert!(ui.command_outputs().is_empty());

        ui.set_output_mode(OutputMode::Verbose);
        ui.show_command_output("winetricks list-installed", "corefonts");
        assert_eq!(
            ui.command_outputs(),
            &[(
                "winetricks list-installed".to_string(),
                "corefonts".to_string()
            )]
        );
    }

    #[test]
    fn mock_spinner_tracks_status() {
        let mut spinner = MockSpinner::new();
        spinner.finish_success("Downloaded");

        assert_eq!(spinner.status(), Some(SpinnerStatus::Success));
        assert_eq!(spinner.messages(), &["Downloaded"]);
    }
}
