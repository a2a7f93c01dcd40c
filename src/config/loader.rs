//! Configuration file discovery and loading.

use crate::config::schema::InstallerConfig;
use crate::error::{InstallError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "sod-install.yml";

/// Find the config file to use, if any.
///
/// An explicit path is returned as-is; otherwise `sod-install.yml` in the
/// working directory is used when it exists.
pub fn discover_config(work_dir: &Path, explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let path = work_dir.join(DEFAULT_CONFIG_FILE);
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Load the installer configuration.
///
/// Falls back to the built-in defaults when no file is found. A file passed
/// explicitly must exist.
pub fn load_config(work_dir: &Path, explicit: Option<&Path>) -> Result<InstallerConfig> {
    match discover_config(work_dir, explicit) {
        Some(path) => load_config_file(&path),
        None => {
            tracing::debug!("No config file found, using defaults");
            Ok(InstallerConfig::default())
        }
    }
}

/// Parse a single YAML config file.
pub fn load_config_file(path: &Path) -> Result<InstallerConfig> {
    if !path.exists() {
        return Err(InstallError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    tracing::debug!("Loading config from {}", path.display());

    if content.trim().is_empty() {
        return Ok(InstallerConfig::default());
    }

    serde_yaml::from_str(&content).map_err(|e| InstallError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
