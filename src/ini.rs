//! Line-prefix rewriting for the generated client INI file.
//!
//! The rewritten file is assembled in a temporary file next to the original,
//! the original is copied to a `.bak` sibling, and the temporary file is then
//! renamed over the original. A missing file is not an error.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::Result;

/// What [`patch_lines`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The file does not exist; nothing was touched.
    Skipped,
    /// The file was rewritten and backed up.
    Patched {
        /// Number of lines replaced.
        replaced: usize,
        /// Location of the pre-patch copy.
        backup: PathBuf,
    },
}

/// Path of the backup written next to `path` (`eqclient.ini.bak`).
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".bak");
    path.with_file_name(name)
}

/// Replace every line of `path` that starts with `prefix` by `replacement`.
///
/// Replaced lines keep their original line ending; all other lines are
/// copied byte for byte.
pub fn patch_lines(path: &Path, prefix: &str, replacement: &str) -> Result<PatchOutcome> {
    if !path.is_file() {
        tracing::debug!("{} not found, skipping patch", path.display());
        return Ok(PatchOutcome::Skipped);
    }

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let temp = NamedTempFile::new_in(&dir)?;

    let mut replaced = 0;
    {
        let mut reader = BufReader::new(File::open(path)?);
        let mut writer = BufWriter::new(temp.as_file());
        let mut line = Vec::new();

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }

            if line.starts_with(prefix.as_bytes()) {
                writer.write_all(replacement.as_bytes())?;
                writer.write_all(line_ending(&line))?;
                replaced += 1;
            } else {
                writer.write_all(&line)?;
            }
        }

        writer.flush()?;
    }

    let backup = backup_path(path);
    fs::copy(path, &backup)?;

    let permissions = fs::metadata(path)?.permissions();
    fs::set_permissions(temp.path(), permissions)?;
    temp.persist(path).map_err(|e| e.error)?;

    tracing::debug!(
        "Patched {} ({} line(s) replaced, backup at {})",
        path.display(),
        replaced,
        backup.display()
    );

    Ok(PatchOutcome::Patched { replaced, backup })
}

/// The trailing `\r\n`, `\n`, or nothing.
fn line_ending(line: &[u8]) -> &[u8] {
    if line.ends_with(b"\r\n") {
        b"\r\n"
    } else if line.ends_with(b"\n") {
        b"\n"
    } else {
        b""
    }
}
