//! Shell command execution.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Exit code reported when no real status is available.
pub const NO_STATUS: i32 = -1;

/// Result of executing a shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Exit code (-1 if the process could not be spawned or was killed by a signal).
    pub exit_code: i32,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,
}

impl CommandResult {
    /// Create a result from a finished process.
    pub fn new(exit_code: i32, stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
        }
    }

    /// Result for a process that never started.
    pub fn spawn_failed() -> Self {
        Self::new(NO_STATUS, String::new(), String::new(), Duration::ZERO)
    }

    /// Whether command succeeded (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Standard output followed by standard error.
    pub fn output(&self) -> String {
        match (self.stdout.is_empty(), self.stderr.is_empty()) {
            (_, true) => self.stdout.clone(),
            (true, false) => self.stderr.clone(),
            (false, false) => {
                let mut merged = self.stdout.clone();
                if !merged.ends_with('\n') {
                    merged.push('\n');
                }
                merged.push_str(&self.stderr);
                merged
            }
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,
}

/// Runs command lines on behalf of the installer steps.
pub trait CommandRunner {
    /// Run a command line and report its status and captured output.
    ///
    /// Implementations never fail: problems starting the process are
    /// reported as exit code [`NO_STATUS`].
    fn run(&self, command: &str) -> CommandResult;
}

/// [`CommandRunner`] that executes through the system shell.
#[derive(Debug, Clone, Default)]
pub struct ShellRunner {
    options: CommandOptions,
}

impl ShellRunner {
    /// Create a runner that executes commands in `cwd`.
    pub fn new(cwd: &Path) -> Self {
        Self {
            options: CommandOptions {
                cwd: Some(cwd.to_path_buf()),
            },
        }
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str) -> CommandResult {
        execute(command, &self.options)
    }
}

/// Execute a shell command, capturing stdout and stderr.
pub fn execute(command: &str, options: &CommandOptions) -> CommandResult {
    let start = Instant::now();

    let (shell, flag) = shell_invocation();
    let mut cmd = Command::new(shell);
    cmd.arg(flag).arg(command);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    cmd.stdin(Stdio::inherit());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    tracing::debug!("Executing: {}", command);

    let output = match cmd.output() {
        Ok(output) => output,
        Err(e) => {
            tracing::debug!("Failed to spawn '{}': {}", command, e);
            return CommandResult::spawn_failed();
        }
    };

    let result = CommandResult::new(
        output.status.code().unwrap_or(NO_STATUS),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        start.elapsed(),
    );

    tracing::debug!(
        "'{}' exited with {} after {:?}",
        command,
        result.exit_code,
        result.duration
    );

    result
}

/// Shell executable and the flag that passes it a command line.
fn shell_invocation() -> (&'static str, &'static str) {
    if cfg!(target_os = "windows") {
        ("cmd.exe", "/C")
    } else {
        ("/bin/sh", "-c")
    }
}
