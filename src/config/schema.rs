//! Configuration schema definitions.
//!
//! Every field has a default matching the stock Shards of Dalaya install,
//! so an empty or partial YAML file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Root configuration structure for `sod-install.yml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InstallerConfig {
    /// Display name used in banners and the desktop shortcut.
    pub app_name: String,

    /// Compatibility runtime used to run Windows executables.
    pub runtime: String,

    /// Helper-package installer for the runtime.
    pub helper: String,

    /// Tools that must answer `<tool> --version` successfully.
    pub tools: Vec<ToolRequirement>,

    /// Recommended minimum versions (warnings only).
    pub versions: VersionRequirements,

    /// The game client installer that must be supplied by the user.
    pub installer: InstallerArtifact,

    /// The server patcher downloaded on demand.
    pub patcher: PatcherArtifact,

    /// Helper packages installed into the runtime.
    pub packages: Vec<String>,

    /// The client INI line forced on after patching.
    pub client_config: ClientConfigPatch,

    /// Desktop shortcut settings.
    pub shortcut: ShortcutConfig,

    /// Launch script written to the working directory.
    pub launch_script: String,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            app_name: "Shards of Dalaya".to_string(),
            runtime: "wine".to_string(),
            helper: "winetricks".to_string(),
            tools: vec![
                ToolRequirement::new("wine", "Wine 1.5.13 or greater"),
                ToolRequirement::new("winetricks", "winetricks"),
                ToolRequirement::new("mono", "mono (mono-complete for some users)"),
                ToolRequirement::new("cabextract", "cabextract"),
            ],
            versions: VersionRequirements::default(),
            installer: InstallerArtifact::default(),
            patcher: PatcherArtifact::default(),
            packages: vec!["directx9".to_string(), "corefonts".to_string()],
            client_config: ClientConfigPatch::default(),
            shortcut: ShortcutConfig::default(),
            launch_script: "runsod.sh".to_string(),
        }
    }
}

/// A tool checked with `--version`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolRequirement {
    /// Executable name.
    pub name: String,

    /// What to tell the user to install when it is missing.
    #[serde(default)]
    pub hint: Option<String>,
}

impl ToolRequirement {
    /// Create a requirement with an install hint.
    pub fn new(name: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    /// The line reported when this tool is missing.
    pub fn describe(&self) -> &str {
        self.hint.as_deref().unwrap_or(&self.name)
    }
}

/// Recommended minimum tool versions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VersionRequirements {
    /// Minimum Wine version (dotted).
    pub runtime: String,

    /// Minimum winetricks release (YYYYMMDD).
    pub helper_release: u64,
}

impl Default for VersionRequirements {
    fn default() -> Self {
        Self {
            runtime: "1.5.13".to_string(),
            helper_release: 20120819,
        }
    }
}

/// The user-supplied client installer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InstallerArtifact {
    /// File name relative to the working directory (case matters).
    pub file: String,

    /// Accepted MD5 digests, lowercase hex.
    pub checksums: Vec<String>,

    /// Where the user can obtain the installer.
    pub download_hint: String,
}

impl Default for InstallerArtifact {
    fn default() -> Self {
        Self {
            file: "EQ_setup.exe".to_string(),
            checksums: vec![
                "25a22975f78cfd0262e46831ff58916d".to_string(),
                "692d56ecfa277f7926be2f6584e6b98a".to_string(),
            ],
            download_hint: "http://everquest.station.sony.com".to_string(),
        }
    }
}

/// The server patcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PatcherArtifact {
    /// File name relative to the working directory.
    pub file: String,

    /// Host serving the patcher.
    pub host: String,

    /// Path of the patcher on the host.
    pub path: String,

    /// Request timeout in seconds (none by default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for PatcherArtifact {
    fn default() -> Self {
        Self {
            file: "sodpatcher.exe".to_string(),
            host: "shardsofdalaya.com".to_string(),
            path: "/patcher2/sodpatcher.exe".to_string(),
            timeout_secs: None,
        }
    }
}

/// A single-line INI rewrite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfigPatch {
    /// File name inside the game install directory.
    pub file: String,

    /// Lines starting with this prefix are replaced.
    pub prefix: String,

    /// Replacement line, without line ending.
    pub replacement: String,
}

impl Default for ClientConfigPatch {
    fn default() -> Self {
        Self {
            file: "eqclient.ini".to_string(),
            prefix: "WindowedMode=".to_string(),
            replacement: "WindowedMode=TRUE".to_string(),
        }
    }
}

/// Desktop shortcut locations, relative to the home directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ShortcutConfig {
    /// Entry written by the game installer, used to find the install path.
    pub source: String,

    /// Entry created for the patched client.
    pub target: String,
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self {
            source: "Desktop/EverQuest.desktop".to_string(),
            target: "Desktop/SoD.desktop".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_install() {
        let config = InstallerConfig::default();
        assert_eq!(config.installer.file, "EQ_setup.exe");
        assert_eq!(config.installer.checksums.len(), 2);
        assert_eq!(config.patcher.path, "/patcher2/sodpatcher.exe");
        assert_eq!(config.packages, vec!["directx9", "corefonts"]);
        assert_eq!(config.client_config.replacement, "WindowedMode=TRUE");
        assert_eq!(config.tools.len(), 4);
    }

    #[test]
    fn empty_yaml_yields_defaults() {
        let config: InstallerConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, InstallerConfig::default());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let yaml = "patcher:\n  host: mirror.example.org\n";
        let config: InstallerConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.patcher.host, "mirror.example.org");
        assert_eq!(config.patcher.file, "sodpatcher.exe");
        assert_eq!(config.runtime, "wine");
    }

    #[test]
    fn tool_without_hint_describes_itself() {
        let yaml = "tools:\n  - name: wine\n";
        let config: InstallerConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.tools[0].describe(), "wine");
    }
}
