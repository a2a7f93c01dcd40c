//! Explicit run context threaded through every installer step.

use std::path::{Path, PathBuf};

use crate::config::InstallerConfig;
use crate::error::{InstallError, Result};
use crate::shell::is_elevated;

/// Everything a run depends on besides the command runner and the UI.
#[derive(Debug, Clone)]
pub struct InstallContext {
    /// Directory holding the installer and receiving the patcher and launch script.
    pub work_dir: PathBuf,
    /// The user's home directory (desktop entries live below it).
    pub home_dir: PathBuf,
    /// Whether the process runs with root privileges.
    pub elevated: bool,
    /// Whether `--force-root` was given.
    pub force_root: bool,
    /// Loaded configuration.
    pub config: InstallerConfig,
}

impl InstallContext {
    /// Create a context with explicit directories; not elevated, not forced.
    pub fn new(work_dir: &Path, home_dir: &Path, config: InstallerConfig) -> Self {
        Self {
            work_dir: work_dir.to_path_buf(),
            home_dir: home_dir.to_path_buf(),
            elevated: false,
            force_root: false,
            config,
        }
    }

    /// Create a context for the current user and process.
    pub fn detect(work_dir: &Path, config: InstallerConfig) -> Result<Self> {
        let home_dir = dirs::home_dir().ok_or_else(|| {
            InstallError::Other(anyhow::anyhow!("Unable to determine the home directory"))
        })?;

        Ok(Self {
            elevated: is_elevated(),
            ..Self::new(work_dir, &home_dir, config)
        })
    }

    /// Set the `--force-root` override.
    pub fn with_force_root(mut self, force_root: bool) -> Self {
        self.force_root = force_root;
        self
    }

    /// Override the detected privilege level.
    pub fn with_elevated(mut self, elevated: bool) -> Self {
        self.elevated = elevated;
        self
    }

    /// A file in the working directory.
    pub fn work_path(&self, name: &str) -> PathBuf {
        self.work_dir.join(name)
    }

    /// A path relative to the home directory.
    pub fn home_path(&self, relative: &str) -> PathBuf {
        self.home_dir.join(relative)
    }

    /// Whether the privilege check lets the run continue.
    pub fn privileges_allowed(&self) -> bool {
        !self.elevated || self.force_root
    }

    /// Default runtime-prefix locations where the game usually lands.
    pub fn default_install_candidates(&self) -> Vec<PathBuf> {
        ["Program Files", "Program Files (x86)"]
            .iter()
            .map(|program_files| {
                self.home_dir
                    .join(".wine/drive_c")
                    .join(program_files)
                    .join("Sony Online Entertainment/Installed Games/EverQuest")
            })
            .collect()
    }
}
