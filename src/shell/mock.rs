//! Scripted command runner for testing.
//!
//! `ScriptedRunner` implements [`CommandRunner`] without spawning anything.
//! Responses are configured per command line; every invocation is recorded
//! for later assertion.
//!
//! # Example
//!
//! ```
//! use sod_installer::shell::{CommandRunner, ScriptedRunner};
//!
//! let runner = ScriptedRunner::new();
//! runner.respond("wine --version", 0, "wine-1.7.2\n");
//!
//! let result = runner.run("wine --version");
//! assert_eq!(result.exit_code, 0);
//! assert_eq!(runner.invocations(), vec!["wine --version".to_string()]);
//!
//! // Unconfigured commands behave like a tool that is not installed.
//! assert_eq!(runner.run("mono --version").exit_code, 127);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use super::command::{CommandResult, CommandRunner};

/// Exit code returned for commands with no configured response.
pub const NOT_FOUND: i32 = 127;

/// Command runner that answers from a table of canned results.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: RefCell<HashMap<String, CommandResult>>,
    invocations: RefCell<Vec<String>>,
}

impl ScriptedRunner {
    /// Create a runner with no configured responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the exit code and stdout returned for `command`.
    pub fn respond(&self, command: &str, exit_code: i32, stdout: &str) {
        self.respond_with(
            command,
            CommandResult::new(exit_code, stdout.to_string(), String::new(), Duration::ZERO),
        );
    }

    /// Configure a complete result for `command`.
    pub fn respond_with(&self, command: &str, result: CommandResult) {
        self.responses
            .borrow_mut()
            .insert(command.to_string(), result);
    }

    /// Every command line run so far, in order.
    pub fn invocations(&self) -> Vec<String> {
        self.invocations.borrow().clone()
    }

    /// Whether `command` was run at least once.
    pub fn was_run(&self, command: &str) -> bool {
        self.invocations.borrow().iter().any(|c| c == command)
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, command: &str) -> CommandResult {
        self.invocations.borrow_mut().push(command.to_string());
        self.responses
            .borrow()
            .get(command)
            .cloned()
            .unwrap_or_else(|| {
                CommandResult::new(
                    NOT_FOUND,
                    String::new(),
                    format!("sh: 1: {}: not found\n", command),
                    Duration::ZERO,
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_response_is_returned() {
        let runner = ScriptedRunner::new();
        runner.respond("winetricks list-installed", 0, "corefonts\n");

        let result = runner.run("winetricks list-installed");
        assert!(result.success());
        assert_eq!(result.stdout, "corefonts\n");
    }

    #[test]
    fn unknown_command_looks_missing() {
        let runner = ScriptedRunner::new();
        let result = runner.run("cabextract --version");
        assert_eq!(result.exit_code, NOT_FOUND);
        assert!(result.stderr.contains("not found"));
    }

    #[test]
    fn invocations_are_recorded_in_order() {
        let runner = ScriptedRunner::new();
        runner.run("a");
        runner.run("b");
        assert_eq!(runner.invocations(), vec!["a", "b"]);
        assert!(runner.was_run("b"));
        assert!(!runner.was_run("c"));
    }
}
