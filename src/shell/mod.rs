//! Shell command execution and platform detection.

pub mod command;
pub mod mock;
pub mod platform;

pub use command::{execute, CommandOptions, CommandResult, CommandRunner, ShellRunner, NO_STATUS};
pub use mock::ScriptedRunner;
pub use platform::{is_ci, is_elevated, make_executable};
