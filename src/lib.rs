//! sod-installer - Linux installer for the Shards of Dalaya EverQuest server.
//!
//! Drives Wine and winetricks to install the EverQuest Live client, applies
//! the Shards of Dalaya patcher, and leaves a launch script and a desktop
//! shortcut behind.
//!
//! # Modules
//!
//! - [`artifact`] - Installer checksums and the patcher download
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and built-in defaults
//! - [`error`] - Error types and result aliases
//! - [`ini`] - Line-prefix rewriting of the client INI
//! - [`requirements`] - Tool checks, version parsing and helper packages
//! - [`runner`] - The ordered install steps
//! - [`shell`] - Shell command execution
//! - [`shortcut`] - Desktop entries and the launch script
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use sod_installer::requirements::{compare_versions, VersionOrdering};
//!
//! assert_eq!(compare_versions("1.5.13", "1.5.12"), VersionOrdering::FirstGreater);
//! assert_eq!(compare_versions("1.4", "1.5.13"), VersionOrdering::SecondGreater);
//! ```
//!
//! For a full scripted run, see the integration tests.

pub mod artifact;
pub mod cli;
pub mod config;
pub mod error;
pub mod ini;
pub mod requirements;
pub mod runner;
pub mod shell;
pub mod shortcut;
pub mod ui;

pub use error::{InstallError, Result};
