//! Helper-package (winetricks verb) detection and installation.

use crate::error::{InstallError, Result};
use crate::shell::CommandRunner;

/// Packages reported by the helper's `list-installed` command.
#[derive(Debug, Clone, Default)]
pub struct InstalledPackageSet {
    listing: String,
}

impl InstalledPackageSet {
    /// Wrap the raw listing output.
    pub fn from_listing(listing: &str) -> Self {
        Self {
            listing: listing.to_string(),
        }
    }

    /// The raw listing output.
    pub fn listing(&self) -> &str {
        &self.listing
    }

    /// Whether `package` appears anywhere in the listing.
    pub fn contains(&self, package: &str) -> bool {
        self.listing.contains(package)
    }
}

/// Drives the helper-package installer.
pub struct PackageInstaller<'a> {
    runner: &'a dyn CommandRunner,
    helper: String,
}

impl<'a> PackageInstaller<'a> {
    /// Create an installer for the given helper tool (e.g. `winetricks`).
    pub fn new(runner: &'a dyn CommandRunner, helper: &str) -> Self {
        Self {
            runner,
            helper: helper.to_string(),
        }
    }

    /// Command line that lists installed packages.
    pub fn list_command(&self) -> String {
        format!("{} list-installed", self.helper)
    }

    /// Command line that installs `package` unattended.
    pub fn install_command(&self, package: &str) -> String {
        format!("{} -q {}", self.helper, package)
    }

    /// Query the installed packages.
    pub fn list_installed(&self) -> Result<InstalledPackageSet> {
        let command = self.list_command();
        let result = self.runner.run(&command);
        if !result.success() {
            return Err(InstallError::CommandFailed {
                command,
                code: result.exit_code,
                output: result.output(),
            });
        }
        Ok(InstalledPackageSet::from_listing(&result.stdout))
    }

    /// Install one package unattended, returning its captured output.
    pub fn install(&self, package: &str) -> Result<String> {
        let command = self.install_command(package);
        let result = self.runner.run(&command);
        if !result.success() {
            return Err(InstallError::CommandFailed {
                command,
                code: result.exit_code,
                output: result.output(),
            });
        }
        Ok(result.output())
    }
}
