//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::Parser;
use std::path::PathBuf;

use crate::ui::OutputMode;

/// Linux installer for the Shards of Dalaya EverQuest server.
///
/// Place EQ_setup.exe in the working directory, then run this installer.
#[derive(Debug, Parser)]
#[command(name = "sod-install")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run even when invoked as root (NOT recommended)
    #[arg(long)]
    pub force_root: bool,

    /// Directory holding EQ_setup.exe (overrides current directory)
    #[arg(short = 'C', long = "dir", value_name = "DIR")]
    pub work_dir: Option<PathBuf>,

    /// Path to config file (overrides <DIR>/sod-install.yml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Never wait for input; answer prompts from SOD_PROMPT_* variables
    #[arg(long)]
    pub non_interactive: bool,

    /// Echo the output of every wine and winetricks command
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Output mode selected by `--quiet` and `--verbose`.
    pub fn output_mode(&self) -> OutputMode {
        if self.quiet {
            OutputMode::Quiet
        } else if self.verbose {
            OutputMode::Verbose
        } else {
            OutputMode::Normal
        }
    }
}
