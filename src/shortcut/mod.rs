//! Desktop shortcut and launch script management.
//!
//! Provides functionality for:
//! - Recovering the game install path from the installer's desktop entry
//! - Creating a desktop shortcut (`~/Desktop/*.desktop`)
//! - Creating the launch script the shortcut runs
//!
//! Both files are written only when absent, so re-running the installer
//! never clobbers user edits.

pub mod desktop_entry;
pub mod launch_script;

pub use desktop_entry::{read_field, DesktopEntry, InstallLocation, WriteOutcome};
pub use launch_script::LaunchScript;
