//! Launch script generation.

use std::fs;
use std::path::{Path, PathBuf};

use super::desktop_entry::WriteOutcome;
use crate::error::Result;
use crate::shell::make_executable;

/// A `/bin/sh` script that runs one executable under the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchScript {
    path: PathBuf,
    runtime: String,
    executable: String,
}

impl LaunchScript {
    /// Script at `path` running `<runtime> <executable>`.
    pub fn new(path: &Path, runtime: &str, executable: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            runtime: runtime.to_string(),
            executable: executable.to_string(),
        }
    }

    /// Location of the script.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Script contents.
    pub fn render(&self) -> String {
        format!("#!/bin/sh\n\n{} {}\n", self.runtime, self.executable)
    }

    /// Write the script unless it already exists, and mark it executable.
    pub fn write_if_absent(&self) -> Result<WriteOutcome> {
        if self.path.exists() {
            return Ok(WriteOutcome::AlreadyExists);
        }
        fs::write(&self.path, self.render())?;
        make_executable(&self.path)?;
        Ok(WriteOutcome::Written)
    }
}
