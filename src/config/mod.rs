//! Installer configuration.
//!
//! - [`schema`] - The YAML schema with built-in defaults
//! - [`loader`] - Config file discovery and parsing

pub mod loader;
pub mod schema;

pub use loader::{discover_config, load_config, load_config_file, DEFAULT_CONFIG_FILE};
pub use schema::{
    ClientConfigPatch, InstallerArtifact, InstallerConfig, PatcherArtifact, ShortcutConfig,
    ToolRequirement, VersionRequirements,
};
