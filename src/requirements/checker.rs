//! Dependency checker for required external tools.
//!
//! Every tool is run with `<tool> --version`. A non-zero exit status means
//! the tool is missing, whatever the cause. All tools are checked before a
//! verdict is reached so the user sees the complete list at once.

use crate::config::ToolRequirement;
use crate::error::{InstallError, Result};
use crate::shell::{CommandResult, CommandRunner};

/// A tool that answered its version query.
#[derive(Debug, Clone)]
pub struct FoundTool {
    /// Tool name.
    pub name: String,
    /// The `--version` result, including the version text.
    pub result: CommandResult,
}

/// Outcome of probing all required tools.
#[derive(Debug, Clone, Default)]
pub struct DependencyReport {
    /// Tools that are present.
    pub found: Vec<FoundTool>,
    /// Tools that are missing.
    pub missing: Vec<ToolRequirement>,
}

impl DependencyReport {
    /// Whether every tool is present.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Version output of a found tool.
    pub fn version_output(&self, name: &str) -> Option<&str> {
        self.found
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.result.stdout.as_str())
    }

    /// Turn the report into a gate: an error listing every missing tool.
    pub fn into_result(self) -> Result<Self> {
        if self.is_complete() {
            Ok(self)
        } else {
            Err(InstallError::MissingDependencies {
                missing: self
                    .missing
                    .iter()
                    .map(|t| t.describe().to_string())
                    .collect(),
            })
        }
    }
}

/// Checks tools through a [`CommandRunner`].
pub struct DependencyChecker<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> DependencyChecker<'a> {
    /// Create a checker using `runner` for the version queries.
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Run `<name> --version`.
    pub fn check_tool(&self, name: &str) -> CommandResult {
        self.runner.run(&format!("{} --version", name))
    }

    /// Check every tool in `tools`.
    pub fn check_all(&self, tools: &[ToolRequirement]) -> DependencyReport {
        let mut report = DependencyReport::default();

        for tool in tools {
            let result = self.check_tool(&tool.name);
            if result.success() {
                tracing::debug!("Found {}: {}", tool.name, result.stdout.trim());
                report.found.push(FoundTool {
                    name: tool.name.clone(),
                    result,
                });
            } else {
                tracing::debug!("{} is missing (exit code {})", tool.name, result.exit_code);
                report.missing.push(tool.clone());
            }
        }

        report
    }
}
