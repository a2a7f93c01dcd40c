//! Install orchestration.
//!
//! - [`context`] - The explicit run context
//! - [`installer`] - The ordered step sequence

pub mod context;
pub mod installer;

pub use context::InstallContext;
pub use installer::{report_error, InstallSummary, Installer, STEP_COUNT};
