//! The installer step sequence.
//!
//! Steps run strictly in order. Each gating step returns an
//! [`InstallError`] that ends the run; version checks, a missing client
//! INI and a failed shortcut only produce warnings.

use std::path::Path;
use std::time::Duration;

use crate::artifact::{validate_artifact, FetchOutcome, HttpFetcher, RemoteSource};
use crate::error::{InstallError, Result};
use crate::ini::{patch_lines, PatchOutcome};
use crate::requirements::{
    compare_versions, extract_release_date, extract_version, DependencyChecker, DependencyReport,
    PackageInstaller, VersionOrdering,
};
use crate::shell::{CommandRunner, NO_STATUS};
use crate::shortcut::{DesktopEntry, InstallLocation, LaunchScript, WriteOutcome};
use crate::ui::{Prompt, UserInterface};

use super::context::InstallContext;

/// Number of numbered steps shown to the user.
pub const STEP_COUNT: usize = 12;

/// What a successful run did.
#[derive(Debug, Clone, Default)]
pub struct InstallSummary {
    /// Whether the patcher was downloaded during this run.
    pub patcher_downloaded: bool,
    /// Helper packages installed during this run.
    pub packages_installed: Vec<String>,
    /// Game install directory, empty if unknown.
    pub install_path: String,
    /// Whether the client INI was rewritten.
    pub client_config_patched: bool,
    /// Whether the launch script was created during this run.
    pub launch_script_written: bool,
    /// Whether the desktop shortcut was created during this run.
    pub shortcut_written: bool,
}

/// Runs the installation against a context, a command runner and a UI.
pub struct Installer<'a> {
    ctx: &'a InstallContext,
    runner: &'a dyn CommandRunner,
    ui: &'a mut dyn UserInterface,
    step: usize,
}

impl<'a> Installer<'a> {
    /// Create an installer.
    pub fn new(
        ctx: &'a InstallContext,
        runner: &'a dyn CommandRunner,
        ui: &'a mut dyn UserInterface,
    ) -> Self {
        Self {
            ctx,
            runner,
            ui,
            step: 0,
        }
    }

    /// Run every step in order.
    pub fn run(&mut self) -> Result<InstallSummary> {
        let ctx = self.ctx;
        let config = &ctx.config;
        self.ui.show_header(&format!(
            "{} Linux Installer v{}",
            config.app_name,
            env!("CARGO_PKG_VERSION")
        ));

        let mut summary = InstallSummary::default();

        self.check_privileges()?;
        let report = self.check_dependencies()?;
        self.check_versions(&report);
        self.validate_installer()?;
        summary.patcher_downloaded = self.fetch_patcher()?;
        summary.packages_installed = self.ensure_packages()?;
        self.run_client_installer()?;
        summary.install_path = self.run_patcher()?;
        summary.client_config_patched = self.patch_client_config(&summary.install_path)?;
        summary.launch_script_written = self.write_launch_script()?;
        summary.shortcut_written = self.write_shortcut();
        self.finish();

        Ok(summary)
    }

    fn warn(&mut self, msg: &str) {
        tracing::warn!("{}", msg);
        self.ui.warning(msg);
    }

    fn begin(&mut self, title: &str) {
        self.step += 1;
        self.ui.show_step(self.step, STEP_COUNT, title);
    }

    /// Refuse to run as root unless forced.
    pub fn check_privileges(&mut self) -> Result<()> {
        self.begin("Checking privileges");
        let ctx = self.ctx;
        if ctx.privileges_allowed() {
            if ctx.elevated {
                self.warn("Running as root because --force-root was given. This is NOT recommended!");
            }
            return Ok(());
        }
        Err(InstallError::ElevatedPrivileges)
    }

    /// Check every required tool.
    pub fn check_dependencies(&mut self) -> Result<DependencyReport> {
        self.begin("Checking for required packages");
        let report = DependencyChecker::new(self.runner)
            .check_all(&self.ctx.config.tools)
            .into_result()?;
        self.ui.success("All good!");
        Ok(report)
    }

    /// Warn about tools older than recommended.
    pub fn check_versions(&mut self, report: &DependencyReport) {
        self.begin("Checking executable versions");
        let ctx = self.ctx;
        let config = &ctx.config;
        let mut all_good = true;

        if let Some(output) = report.version_output(&config.runtime) {
            match extract_version(output) {
                Some(version) => {
                    if compare_versions(&version, &config.versions.runtime)
                        == VersionOrdering::SecondGreater
                    {
                        all_good = false;
                        self.warn(&format!(
                            "You are using version {} of {}. {} or higher is recommended.",
                            version, config.runtime, config.versions.runtime
                        ));
                    }
                }
                None => {
                    all_good = false;
                    self.warn(&format!(
                        "Unable to determine the {} version from '{}'",
                        config.runtime,
                        output.trim()
                    ));
                }
            }
        }

        if let Some(output) = report.version_output(&config.helper) {
            match extract_release_date(output) {
                Some(release) if release < config.versions.helper_release => {
                    all_good = false;
                    self.warn(&format!(
                        "You are using version {} of {}. {} or higher is recommended.",
                        release, config.helper, config.versions.helper_release
                    ));
                }
                Some(_) => {}
                None => {
                    all_good = false;
                    self.warn(&format!(
                        "Unable to determine the {} version from '{}'",
                        config.helper,
                        output.trim()
                    ));
                }
            }
        }

        if all_good {
            self.ui.success("All good!");
        }
    }

    /// Require the client installer with a known checksum.
    pub fn validate_installer(&mut self) -> Result<()> {
        let ctx = self.ctx;
        let artifact = &ctx.config.installer;
        self.begin(&format!("Validating {}", artifact.file));

        let path = ctx.work_path(&artifact.file);
        match validate_artifact(&path, &artifact.checksums) {
            Ok(_) => {
                self.ui.success("All good!");
                Ok(())
            }
            Err(e) => {
                self.ui.message(&format!(
                    "Please download it from {} and make sure it is named {} (case is important!)",
                    artifact.download_hint, artifact.file
                ));
                Err(e)
            }
        }
    }

    /// Download the patcher unless it is already present.
    pub fn fetch_patcher(&mut self) -> Result<bool> {
        let ctx = self.ctx;
        let patcher = &ctx.config.patcher;
        self.begin(&format!("Checking for {}", patcher.file));

        let target = ctx.work_path(&patcher.file);
        let source = RemoteSource::new(&patcher.host, &patcher.path);
        let fetcher = HttpFetcher::new(patcher.timeout_secs.map(Duration::from_secs))?;
        let mut spinner = self.ui.start_spinner(&format!(
            "Fetching {} from {} if missing, please wait...",
            patcher.file,
            source.url()
        ));

        match fetcher.fetch_if_absent(&source, &target) {
            Ok(FetchOutcome::Downloaded { bytes }) => {
                spinner.finish_success(&format!("Downloaded {} ({} bytes)", patcher.file, bytes));
                Ok(true)
            }
            Ok(FetchOutcome::AlreadyPresent) => {
                spinner.finish_skipped(&format!("{} already present", patcher.file));
                Ok(false)
            }
            Err(e) => {
                spinner.finish_error(&format!("Failed to download {}", patcher.file));
                Err(e)
            }
        }
    }

    /// Install missing helper packages.
    pub fn ensure_packages(&mut self) -> Result<Vec<String>> {
        let ctx = self.ctx;
        let config = &ctx.config;
        self.begin(&format!("Validating {} packages", config.helper));

        let installer = PackageInstaller::new(self.runner, &config.helper);
        let installed = installer.list_installed()?;
        self.ui
            .show_command_output(&installer.list_command(), installed.listing());
        let mut newly_installed = Vec::new();

        for package in &config.packages {
            if installed.contains(package) {
                tracing::debug!("{} package {} already installed", config.helper, package);
                continue;
            }
            let mut spinner = self.ui.start_spinner(&format!(
                "Installing {} {} package - this may take a long time...",
                package, config.helper
            ));
            match installer.install(package) {
                Ok(output) => {
                    spinner.finish_success(&format!("Installed {}", package));
                    self.ui
                        .show_command_output(&installer.install_command(package), &output);
                    newly_installed.push(package.clone());
                }
                Err(e) => {
                    spinner.finish_error(&format!("Unable to install '{}'", package));
                    return Err(e);
                }
            }
        }

        self.ui.success("All good!");
        Ok(newly_installed)
    }

    /// Run the client installer under the runtime.
    pub fn run_client_installer(&mut self) -> Result<()> {
        let ctx = self.ctx;
        let file = ctx.config.installer.file.clone();
        self.begin("Installing the Live client");

        self.ui.message(
            "Now the Live game itself is installed. Log in with your Station account, but DO NOT \
             hit play when the installation is finished, simply close out of the game.\n\
             THIS WILL TAKE A LONG TIME!\n\
             NOTE: The installer may ask you to install DirectX. Allow it to do so, but it will \
             likely fail. That's ok, just ignore the error and move on.",
        );
        self.ui.prompt(&Prompt::acknowledge(
            "start_client_installer",
            "(Press Enter to continue)",
        ))?;

        self.run_under_runtime(&file)
    }

    /// Locate the install, then run the patcher under the runtime.
    ///
    /// Returns the install path, which may be empty if it stayed unknown.
    pub fn run_patcher(&mut self) -> Result<String> {
        let ctx = self.ctx;
        let file = ctx.config.patcher.file.clone();
        self.begin("Patching for Shards of Dalaya content");

        let install_path = self.resolve_install_path()?;

        self.ui
            .message("You must do a few things when the patcher window opens:\n");
        if install_path.is_empty() {
            let candidates: Vec<String> = ctx
                .default_install_candidates()
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            self.ui.message(&format!(
                "1) Use the Browse button to locate your EverQuest directory. By default, this \
                 will be either {}",
                candidates.join(" or ")
            ));
        } else {
            self.ui.message(&format!(
                "1) Use the Browse button to locate your EverQuest directory. This should be in {}",
                install_path
            ));
        }
        self.ui.message(
            "2) Uncheck the 'Use EQW' box. Using EQW in Wine is not supported\n\
             3) Click Patch and Run\n\
             4) When the game loads, walk through the screens until you get to the login \
             screen, then quit",
        );
        self.ui
            .prompt(&Prompt::acknowledge("start_patcher", "(Press Enter to continue)"))?;

        self.run_under_runtime(&file)?;
        Ok(install_path)
    }

    /// Install path from the installer's desktop entry, or from the user.
    fn resolve_install_path(&mut self) -> Result<String> {
        let ctx = self.ctx;
        let source = ctx.home_path(&ctx.config.shortcut.source);
        let location = InstallLocation::from_desktop_file(&source);
        if location.has_install_path() {
            return Ok(location.install_path);
        }

        self.warn(&format!(
            "Unable to determine the EverQuest install path from {}",
            source.display()
        ));
        let answer = self.ui.prompt(&Prompt::input(
            "install_path",
            "EverQuest install directory (leave empty if unknown)",
            Some(""),
        ))?;
        Ok(answer.as_string().trim().to_string())
    }

    /// Force the configured INI line in the client config.
    pub fn patch_client_config(&mut self, install_path: &str) -> Result<bool> {
        let ctx = self.ctx;
        let patch = &ctx.config.client_config;
        self.begin(&format!("Modifying {}", patch.file));

        if install_path.is_empty() {
            self.warn(&format!(
                "Install path unknown, skipping {}. Set {} yourself.",
                patch.file, patch.replacement
            ));
            return Ok(false);
        }

        let path = Path::new(install_path).join(&patch.file);
        match patch_lines(&path, &patch.prefix, &patch.replacement)? {
            PatchOutcome::Skipped => {
                self.warn(&format!("{} not found, leaving it alone", path.display()));
                Ok(false)
            }
            PatchOutcome::Patched { replaced, backup } => {
                if replaced > 0 {
                    self.ui.message(&format!(
                        "Found {} line, replaced with {}",
                        patch.prefix.trim_end_matches('='),
                        patch.replacement
                    ));
                }
                self.ui
                    .success(&format!("Backup saved to {}", backup.display()));
                Ok(true)
            }
        }
    }

    /// Create the launch script if missing.
    pub fn write_launch_script(&mut self) -> Result<bool> {
        let ctx = self.ctx;
        let config = &ctx.config;
        self.begin("Creating launch script");

        let script = LaunchScript::new(
            &ctx.work_path(&config.launch_script),
            &config.runtime,
            &config.patcher.file,
        );
        match script.write_if_absent()? {
            WriteOutcome::Written => {
                self.ui
                    .success(&format!("Created {}", script.path().display()));
                Ok(true)
            }
            WriteOutcome::AlreadyExists => {
                self.ui.message(&format!(
                    "{} already exists, leaving it alone",
                    config.launch_script
                ));
                Ok(false)
            }
        }
    }

    /// Create the desktop shortcut if missing; failures only warn.
    pub fn write_shortcut(&mut self) -> bool {
        let ctx = self.ctx;
        let config = &ctx.config;
        self.begin("Creating desktop shortcut");

        let work_dir = ctx.work_dir.display().to_string();
        let source = ctx.home_path(&config.shortcut.source);
        let icon = InstallLocation::from_desktop_file(&source).icon;
        let entry = DesktopEntry::application(
            &config.app_name,
            &ctx.work_path(&config.launch_script).display().to_string(),
            &work_dir,
            &icon,
        );

        let target = ctx.home_path(&config.shortcut.target);
        match entry.write_if_absent(&target) {
            Ok(WriteOutcome::Written) => {
                self.ui.success(&format!("Created {}", target.display()));
                true
            }
            Ok(WriteOutcome::AlreadyExists) => {
                self.ui.message(&format!(
                    "{} already exists, leaving it alone",
                    target.display()
                ));
                false
            }
            Err(e) => {
                self.warn(&format!("Unable to write desktop entry: {}", e));
                false
            }
        }
    }

    fn finish(&mut self) {
        let ctx = self.ctx;
        let config = &ctx.config;
        self.ui.success(&format!(
            "Congratulations! {} is now installed. You can run it by executing './{}'",
            config.app_name, config.launch_script
        ));
        self.ui.message(
            "If you are getting messages on your buttons saying 'String not found', re-run the \
             patcher and check the 'Repatch All' button. This should fix the problem.",
        );
    }

    /// Run `<runtime> <file>`; only a missing status is fatal.
    fn run_under_runtime(&mut self, file: &str) -> Result<()> {
        let ctx = self.ctx;
        let command = format!("{} {}", ctx.config.runtime, file);
        let mut spinner = self.ui.start_spinner(&format!("Running {}...", command));
        let result = self.runner.run(&command);

        if result.exit_code <= NO_STATUS {
            spinner.finish_error(&format!("Unable to run {}", file));
            self.ui.show_command_output(&command, &result.output());
            return Err(InstallError::CommandFailed {
                command,
                code: result.exit_code,
                output: result.output(),
            });
        }

        if result.success() {
            spinner.finish_success(&format!("{} finished", file));
            self.ui.show_command_output(&command, &result.output());
        } else {
            spinner.finish_success(&format!("{} exited with code {}", file, result.exit_code));
            self.ui.show_command_output(&command, &result.output());
            let advice = if self.ui.output_mode().shows_command_output() {
                "Check the output above if something looks wrong."
            } else {
                "Re-run with --verbose to see its output."
            };
            self.warn(&format!(
                "{} exited with code {}; continuing. {}",
                command, result.exit_code, advice
            ));
        }
        Ok(())
    }
}

/// Show a fatal error, including captured command output when present.
pub fn report_error(ui: &mut dyn UserInterface, err: &InstallError) {
    ui.error(&format!("ERROR: {}", err));
    if let Some((command, output)) = err.diagnostic_output() {
        ui.show_error_block(command, output);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InstallerConfig;
    use crate::shell::ScriptedRunner;
    use crate::ui::{MockUI, OutputMode};
    use std::fs;
    use tempfile::TempDir;

    fn context(temp: &TempDir) -> InstallContext {
        let work = temp.path().join("work");
        let home = temp.path().join("home");
        fs::create_dir_all(&work).unwrap();
        fs::create_dir_all(&home).unwrap();
        InstallContext::new(&work, &home, InstallerConfig::default())
    }

    fn all_tools(runner: &ScriptedRunner, wine: &str, winetricks: &str) {
        runner.respond("wine --version", 0, wine);
        runner.respond("winetricks --version", 0, winetricks);
        runner.respond("mono --version", 0, "Mono JIT compiler version 6.12.0\n");
        runner.respond("cabextract --version", 0, "cabextract version 1.9.1\n");
    }

    #[test]
    fn root_is_refused_without_override() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp).with_elevated(true);
        let runner = ScriptedRunner::new();
        let mut ui = MockUI::new();

        let err = Installer::new(&ctx, &runner, &mut ui).run().unwrap_err();

        assert!(matches!(err, InstallError::ElevatedPrivileges));
        assert!(runner.invocations().is_empty());
    }

    #[test]
    fn forced_root_continues_with_warning() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp).with_elevated(true).with_force_root(true);
        let runner = ScriptedRunner::new();
        let mut ui = MockUI::new();

        Installer::new(&ctx, &runner, &mut ui)
            .check_privileges()
            .unwrap();

        assert!(ui.has_warning("--force-root"));
    }

    #[test]
    fn missing_tools_stop_before_validation() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let runner = ScriptedRunner::new();
        runner.respond("wine --version", 0, "wine-1.7.2\n");
        let mut ui = MockUI::new();

        let err = Installer::new(&ctx, &runner, &mut ui).run().unwrap_err();

        match err {
            InstallError::MissingDependencies { missing } => assert_eq!(missing.len(), 3),
            other => panic!("Expected MissingDependencies, got {:?}", other),
        }
        assert!(!runner.was_run("winetricks list-installed"));
    }

    #[test]
    fn old_versions_only_warn() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let runner = ScriptedRunner::new();
        all_tools(&runner, "wine-1.4.1\n", "20110629\n");
        let mut ui = MockUI::new();

        let mut installer = Installer::new(&ctx, &runner, &mut ui);
        let report = installer.check_dependencies().unwrap();
        installer.check_versions(&report);

        assert!(ui.has_warning("version 1.4.1 of wine"));
        assert!(ui.has_warning("version 20110629 of winetricks"));
    }

    #[test]
    fn current_versions_are_all_good() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let runner = ScriptedRunner::new();
        all_tools(&runner, "wine-9.0\n", "20240105 - sha256sum: abc\n");
        let mut ui = MockUI::new();

        let mut installer = Installer::new(&ctx, &runner, &mut ui);
        let report = installer.check_dependencies().unwrap();
        installer.check_versions(&report);

        assert!(ui.warnings().is_empty());
    }

    #[test]
    fn missing_installer_is_fatal() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let runner = ScriptedRunner::new();
        let mut ui = MockUI::new();

        let err = Installer::new(&ctx, &runner, &mut ui)
            .validate_installer()
            .unwrap_err();

        assert!(matches!(err, InstallError::ArtifactMissing { .. }));
        assert!(ui.has_message("case is important"));
    }

    #[test]
    fn existing_patcher_is_not_downloaded() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        fs::write(ctx.work_path("sodpatcher.exe"), "").unwrap();
        let runner = ScriptedRunner::new();
        let mut ui = MockUI::new();

        let downloaded = Installer::new(&ctx, &runner, &mut ui)
            .fetch_patcher()
            .unwrap();

        assert!(!downloaded);
        assert_eq!(ui.spinners().len(), 1);
        assert_eq!(fs::read_to_string(ctx.work_path("sodpatcher.exe")).unwrap(), "");
    }

    #[test]
    fn verbose_mode_echoes_helper_and_runtime_output() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let runner = ScriptedRunner::new();
        runner.respond("winetricks list-installed", 0, "corefonts\n");
        runner.respond("winetricks -q directx9", 0, "Executing w_do_call directx9\n");
        runner.respond("wine EQ_setup.exe", 3, "fixme:ole:CoInitializeSecurity\n");
        let mut ui = MockUI::new();
        ui.set_output_mode(OutputMode::Verbose);

        let mut installer = Installer::new(&ctx, &runner, &mut ui);
        installer.ensure_packages().unwrap();
        installer.run_client_installer().unwrap();

        let outputs = ui.command_outputs();
        assert_eq!(outputs.len(), 3);
        assert_eq!(outputs[0].0, "winetricks list-installed");
        assert_eq!(outputs[0].1, "corefonts\n");
        assert_eq!(outputs[1].0, "winetricks -q directx9");
        assert!(outputs[1].1.contains("w_do_call directx9"));
        assert_eq!(outputs[2].0, "wine EQ_setup.exe");
        assert!(outputs[2].1.contains("CoInitializeSecurity"));
        assert!(ui.has_warning("Check the output above"));
    }

    #[test]
    fn normal_mode_keeps_command_output_hidden() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let runner = ScriptedRunner::new();
        runner.respond("wine EQ_setup.exe", 3, "fixme:ole:CoInitializeSecurity\n");
        let mut ui = MockUI::new();

        Installer::new(&ctx, &runner, &mut ui)
            .run_client_installer()
            .unwrap();

        assert!(ui.command_outputs().is_empty());
        assert!(ui.has_warning("Re-run with --verbose"));
    }

    #[test]
    fn only_missing_packages_are_installed() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let runner = ScriptedRunner::new();
        runner.respond("winetricks list-installed", 0, "corefonts\n");
        runner.respond("winetricks -q directx9", 0, "");
        let mut ui = MockUI::new();

        let installed = Installer::new(&ctx, &runner, &mut ui)
            .ensure_packages()
            .unwrap();

        assert_eq!(installed, vec!["directx9"]);
        assert!(!runner.was_run("winetricks -q corefonts"));
    }

    #[test]
    fn runtime_spawn_failure_is_fatal() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let runner = ScriptedRunner::new();
        runner.respond("wine EQ_setup.exe", NO_STATUS, "");
        let mut ui = MockUI::new();

        let err = Installer::new(&ctx, &runner, &mut ui)
            .run_client_installer()
            .unwrap_err();

        assert!(matches!(err, InstallError::CommandFailed { code: -1, .. }));
    }

    #[test]
    fn runtime_nonzero_exit_only_warns() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let runner = ScriptedRunner::new();
        runner.respond("wine EQ_setup.exe", 1, "");
        let mut ui = MockUI::new();

        Installer::new(&ctx, &runner, &mut ui)
            .run_client_installer()
            .unwrap();

        assert!(ui.has_warning("exited with code 1"));
        assert!(ui.prompts_shown().contains(&"start_client_installer".to_string()));
    }

    #[test]
    fn unknown_install_path_asks_user() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let runner = ScriptedRunner::new();
        runner.respond("wine sodpatcher.exe", 0, "");
        let mut ui = MockUI::new();
        ui.set_prompt_response("install_path", "/games/eq");

        let path = Installer::new(&ctx, &runner, &mut ui)
            .run_patcher()
            .unwrap();

        assert_eq!(path, "/games/eq");
        assert!(ui.has_message("This should be in /games/eq"));
    }

    #[test]
    fn unknown_install_path_skips_ini() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let runner = ScriptedRunner::new();
        let mut ui = MockUI::new();

        let patched = Installer::new(&ctx, &runner, &mut ui)
            .patch_client_config("")
            .unwrap();

        assert!(!patched);
        assert!(ui.has_warning("skipping eqclient.ini"));
    }

    #[test]
    fn report_error_shows_command_output() {
        let mut ui = MockUI::new();
        let err = InstallError::CommandFailed {
            command: "winetricks list-installed".into(),
            code: 1,
            output: "no such prefix".into(),
        };

        report_error(&mut ui, &err);

        assert!(ui.has_error("winetricks list-installed"));
        assert_eq!(ui.error_blocks()[0].1, "no such prefix");
    }
}
