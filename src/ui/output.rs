//! Output verbosity.

/// How much the installer prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Everything, plus the captured output of wine and winetricks.
    Verbose,
    /// Step titles, instructions, spinners and results.
    #[default]
    Normal,
    /// Results, warnings and errors only.
    Quiet,
}

impl OutputMode {
    /// Whether captured command output is echoed after each command.
    pub fn shows_command_output(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Whether spinners are drawn while commands run.
    pub fn shows_spinners(&self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Whether headers, step titles and informational messages are printed.
    pub fn shows_messages(&self) -> bool {
        !matches!(self, Self::Quiet)
    }
}
