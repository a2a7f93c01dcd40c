//! The install command.

use std::path::PathBuf;

use crate::config::load_config;
use crate::error::Result;
use crate::runner::{InstallContext, InstallSummary, Installer};
use crate::shell::{CommandRunner, ShellRunner};
use crate::ui::UserInterface;

use super::args::Cli;

/// Resolved inputs for one installer run.
#[derive(Debug, Clone)]
pub struct InstallCommand {
    work_dir: PathBuf,
    config_path: Option<PathBuf>,
    force_root: bool,
}

impl InstallCommand {
    /// Resolve the working directory and options from parsed arguments.
    ///
    /// The working directory is made absolute; it ends up in the desktop
    /// entry, which is launched from elsewhere.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let work_dir = match &cli.work_dir {
            Some(dir) => std::path::absolute(dir)?,
            None => std::env::current_dir()?,
        };

        Ok(Self {
            work_dir,
            config_path: cli.config.clone(),
            force_root: cli.force_root,
        })
    }

    /// The directory the installer works in.
    pub fn work_dir(&self) -> &std::path::Path {
        &self.work_dir
    }

    /// Load configuration and run against the real shell.
    pub fn execute(&self, ui: &mut dyn UserInterface) -> Result<InstallSummary> {
        let runner = ShellRunner::new(&self.work_dir);
        self.execute_with(&runner, ui)
    }

    /// Load configuration and run against the given runner.
    pub fn execute_with(
        &self,
        runner: &dyn CommandRunner,
        ui: &mut dyn UserInterface,
    ) -> Result<InstallSummary> {
        let config = load_config(&self.work_dir, self.config_path.as_deref())?;
        let ctx = InstallContext::detect(&self.work_dir, config)?.with_force_root(self.force_root);
        tracing::debug!(
            "Working in {} (elevated: {}, force_root: {})",
            ctx.work_dir.display(),
            ctx.elevated,
            ctx.force_root
        );

        Installer::new(&ctx, runner, ui).run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InstallError;
    use crate::config::InstallerConfig;
    use crate::shell::ScriptedRunner;
    use crate::ui::MockUI;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_dir_is_used() {
        let cli = Cli::parse_from(["sod-install", "--dir", "/games/sod"]);
        let command = InstallCommand::from_cli(&cli).unwrap();
        assert_eq!(command.work_dir(), std::path::Path::new("/games/sod"));
    }

    #[test]
    fn relative_dir_becomes_absolute() {
        let cli = Cli::parse_from(["sod-install", "--dir", "games/sod"]);
        let command = InstallCommand::from_cli(&cli).unwrap();

        assert!(command.work_dir().is_absolute());
        assert!(command.work_dir().ends_with("games/sod"));
    }

    #[test]
    fn shortcut_for_relative_dir_uses_absolute_paths() {
        let home = TempDir::new().unwrap();
        let cli = Cli::parse_from(["sod-install", "--dir", "games/sod"]);
        let command = InstallCommand::from_cli(&cli).unwrap();
        let ctx = InstallContext::new(command.work_dir(), home.path(), InstallerConfig::default());
        let runner = ScriptedRunner::new();
        let mut ui = MockUI::new();

        assert!(Installer::new(&ctx, &runner, &mut ui).write_shortcut());

        let entry = fs::read_to_string(home.path().join("Desktop/SoD.desktop")).unwrap();
        let exec = entry
            .lines()
            .find_map(|l| l.strip_prefix("Exec="))
            .unwrap();
        let path = entry
            .lines()
            .find_map(|l| l.strip_prefix("Path="))
            .unwrap();
        assert!(exec.starts_with('/'), "{}", exec);
        assert!(exec.ends_with("games/sod/runsod.sh"), "{}", exec);
        assert!(path.starts_with('/'), "{}", path);
    }

    #[test]
    fn missing_explicit_config_fails_before_any_command() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yml");
        let dir = temp.path().display().to_string();
        let config = missing.display().to_string();
        let cli = Cli::parse_from([
            "sod-install",
            "--dir",
            dir.as_str(),
            "--config",
            config.as_str(),
        ]);
        let runner = ScriptedRunner::new();
        let mut ui = MockUI::new();

        let err = InstallCommand::from_cli(&cli)
            .unwrap()
            .execute_with(&runner, &mut ui)
            .unwrap_err();

        assert!(matches!(err, InstallError::ConfigNotFound { .. }));
        assert!(runner.invocations().is_empty());
    }
}
