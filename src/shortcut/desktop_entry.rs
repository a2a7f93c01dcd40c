//! Desktop entry reading and writing.

use regex::Regex;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::shell::make_executable;

/// Result of writing a file that is only created once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was created.
    Written,
    /// A file was already there and was left alone.
    AlreadyExists,
}

/// A `[Desktop Entry]` launcher file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopEntry {
    pub name: String,
    pub exec: String,
    pub entry_type: String,
    pub startup_notify: bool,
    pub path: String,
    pub icon: String,
}

impl DesktopEntry {
    /// An application entry that runs `exec` from `path`.
    pub fn application(name: &str, exec: &str, path: &str, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            exec: exec.to_string(),
            entry_type: "Application".to_string(),
            startup_notify: true,
            path: path.to_string(),
            icon: icon.to_string(),
        }
    }

    /// Serialize to the `Key=Value` file format.
    pub fn render(&self) -> String {
        format!(
            "[Desktop Entry]\nName={}\nExec={}\nType={}\nStartupNotify={}\nPath={}\nIcon={}\n",
            self.name, self.exec, self.entry_type, self.startup_notify, self.path, self.icon
        )
    }

    /// Write the entry to `target` unless a file already exists there.
    pub fn write_if_absent(&self, target: &Path) -> Result<WriteOutcome> {
        if target.exists() {
            tracing::debug!("{} already exists, leaving it alone", target.display());
            return Ok(WriteOutcome::AlreadyExists);
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(target, self.render())?;
        make_executable(target)?;

        Ok(WriteOutcome::Written)
    }
}

/// Value of the first `key=` line in a desktop entry, if any.
pub fn read_field(content: &str, key: &str) -> Option<String> {
    let pattern = format!(r"(?m)^{}=(.*?)\r?$", regex::escape(key));
    let re = Regex::new(&pattern).ok()?;
    re.captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Install path and icon recovered from the game installer's desktop entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallLocation {
    /// Game install directory, empty if unknown.
    pub install_path: String,
    /// Icon name or path, empty if unknown.
    pub icon: String,
}

impl InstallLocation {
    /// Read `Path=` and `Icon=` from the entry at `path`.
    ///
    /// A missing or unparsable file yields empty values.
    pub fn from_desktop_file(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(
                    "Unable to read {} to determine the install path: {}",
                    path.display(),
                    e
                );
                return Self::default();
            }
        };

        let install_path = read_field(&content, "Path").unwrap_or_else(|| {
            tracing::warn!("No Path= entry in {}", path.display());
            String::new()
        });
        let icon = read_field(&content, "Icon").unwrap_or_else(|| {
            tracing::warn!("No Icon= entry in {}", path.display());
            String::new()
        });

        Self { install_path, icon }
    }

    /// Whether the install path is known.
    pub fn has_install_path(&self) -> bool {
        !self.install_path.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const EQ_ENTRY: &str = "[Desktop Entry]\nName=EverQuest\nExec=env WINEPREFIX=\"/home/user/.wine\" wine LaunchPad.exe\nType=Application\nStartupNotify=true\nPath=/home/user/.wine/drive_c/Program Files/Sony/EverQuest\nIcon=1A3D_LaunchPad.0\n";

    #[test]
    fn render_writes_keys_in_order() {
        let entry = DesktopEntry::application(
            "Shards of Dalaya",
            "/games/sod/runsod.sh",
            "/games/sod",
            "eq.png",
        );
        assert_eq!(
            entry.render(),
            "[Desktop Entry]\nName=Shards of Dalaya\nExec=/games/sod/runsod.sh\nType=Application\nStartupNotify=true\nPath=/games/sod\nIcon=eq.png\n"
        );
    }

    #[test]
    fn read_field_is_line_anchored() {
        let content = "TryExecPath=/wrong\nPath=/right\n";
        assert_eq!(read_field(content, "Path"), Some("/right".to_string()));
        assert_eq!(read_field(content, "Icon"), None);
    }

    #[test]
    fn read_field_handles_crlf() {
        assert_eq!(
            read_field("Icon=eq\r\n", "Icon"),
            Some("eq".to_string())
        );
    }

    #[test]
    fn location_from_installer_entry() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("EverQuest.desktop");
        fs::write(&path, EQ_ENTRY).unwrap();

        let location = InstallLocation::from_desktop_file(&path);

        assert_eq!(
            location.install_path,
            "/home/user/.wine/drive_c/Program Files/Sony/EverQuest"
        );
        assert_eq!(location.icon, "1A3D_LaunchPad.0");
        assert!(location.has_install_path());
    }

    #[test]
    fn missing_entry_yields_empty_location() {
        let temp = TempDir::new().unwrap();
        let location = InstallLocation::from_desktop_file(&temp.path().join("EverQuest.desktop"));

        assert_eq!(location, InstallLocation::default());
        assert!(!location.has_install_path());
    }

    #[test]
    fn write_if_absent_creates_executable_entry() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("Desktop").join("SoD.desktop");
        let entry = DesktopEntry::application("SoD", "/x/runsod.sh", "/x", "");

        assert_eq!(entry.write_if_absent(&target).unwrap(), WriteOutcome::Written);
        assert_eq!(fs::read_to_string(&target).unwrap(), entry.render());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&target).unwrap().permissions().mode();
            assert_ne!(mode & 0o111, 0);
        }
    }

    #[test]
    fn write_if_absent_keeps_existing_entry() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("SoD.desktop");
        fs::write(&target, "custom").unwrap();
        let entry = DesktopEntry::application("SoD", "/x/runsod.sh", "/x", "");

        assert_eq!(
            entry.write_if_absent(&target).unwrap(),
            WriteOutcome::AlreadyExists
        );
        assert_eq!(fs::read_to_string(&target).unwrap(), "custom");
    }
}
