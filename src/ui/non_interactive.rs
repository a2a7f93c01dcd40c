//! Non-interactive UI for CI/headless runs.

use std::collections::HashMap;

use crate::error::{InstallError, Result};

use super::{OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface};

/// Environment variable prefix for answering prompts without a terminal.
pub const PROMPT_ENV_PREFIX: &str = "SOD_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// "Press Enter" pauses are passed through. Input prompts are answered from
/// `SOD_PROMPT_<KEY>` environment variables, then from the prompt default.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
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
        if self.mode.shows_messages() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        println!("✓ {}", msg);
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("⚠ {}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());

        match prompt.prompt_type {
            PromptType::Acknowledge => {
                if self.mode.shows_messages() {
                    println!("{}", prompt.question);
                }
                Ok(PromptResult::Bool(true))
            }
            PromptType::Input => {
                if let Some(value) = self.env_overrides.get(&env_key) {
                    return Ok(PromptResult::String(value.clone()));
                }
                if let Some(default) = &prompt.default {
                    return Ok(PromptResult::String(default.clone()));
                }
                Err(InstallError::PromptUnavailable {
                    key: prompt.key.clone(),
                })
            }
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            println!("  {}", message);
        }
        Box::new(NoopSpinner { mode: self.mode })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_messages() {
            println!("\n{}\n", title);
        }
    }

    fn show_step(&mut self, current: usize, total: usize, title: &str) {
        if self.mode.shows_messages() {
            println!("\n[{}/{}] {}", current, total, title);
        }
    }

    fn show_command_output(&mut self, command: &str, output: &str) {
        if !self.mode.shows_command_output() {
            return;
        }
        println!("    $ {}", command);
        for line in output.lines() {
            println!("    │ {}", line);
        }
    }

    fn show_error_block(&mut self, command: &str, output: &str) {
        eprintln!();
        eprintln!("    ┌─ Command ──────────────────────────");
        eprintln!("    │ {}", command);
        if !output.is_empty() {
            eprintln!("    ├─ Output ───────────────────────────");
            for line in output.lines() {
                eprintln!("    │ {}", line);
            }
        }
        eprintln!("    └────────────────────────────────────");
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner that prints only its final status.
struct NoopSpinner {
    mode: OutputMode,
}

impl SpinnerHandle for NoopSpinner {
    fn finish_success(&mut self, msg: &str) {
        println!("  ✓ {}", msg);
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("  ✗ {}", msg);
    }

    fn finish_skipped(&mut self, msg: &str) {
        if self.mode.shows_messages() {
            println!("  ○ {}", msg);
        }
    }
}
