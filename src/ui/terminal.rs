//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use crate::error::Result;

use super::{
    prompt_user, should_use_colors, InstallerTheme, NonInteractiveUI, OutputMode,
    ProgressSpinner, Prompt, PromptResult, SpinnerHandle, UserInterface,
};

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: InstallerTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            InstallerTheme::new()
        } else {
            InstallerTheme::plain()
        };

        Self {
            term: Term::stdout(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_messages() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_error(msg)).ok();
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        prompt_user(prompt, &self.term)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            Box::new(ProgressSpinner::new(message, self.theme.clone()))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_messages() {
            writeln!(self.term, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }

    fn show_step(&mut self, current: usize, total: usize, title: &str) {
        if self.mode.shows_messages() {
            writeln!(
                self.term,
                "\n{}",
                self.theme.format_step(current, total, title)
            )
            .ok();
        }
    }

    fn show_command_output(&mut self, command: &str, output: &str) {
        if !self.mode.shows_command_output() {
            return;
        }
        let b = &self.theme.border;
        writeln!(
            self.term,
            "    {} {}",
            b.apply_to("$"),
            self.theme.command.apply_to(command)
        )
        .ok();
        for line in output.lines() {
            writeln!(self.term, "    {} {}", b.apply_to("│"), self.theme.dim.apply_to(line)).ok();
        }
    }

    fn show_error_block(&mut self, command: &str, output: &str) {
        let b = &self.theme.border;
        writeln!(
            self.term,
            "    {} {}",
            b.apply_to("┌─"),
            b.apply_to("Command ──────────────────────────")
        )
        .ok();
        writeln!(
            self.term,
            "    {} {}",
            b.apply_to("│"),
            self.theme.command.apply_to(command)
        )
        .ok();

        if !output.is_empty() {
            writeln!(
                self.term,
                "    {} {}",
                b.apply_to("├─"),
                b.apply_to("Output ───────────────────────────")
            )
            .ok();
            for line in output.lines() {
                writeln!(self.term, "    {} {}", b.apply_to("│"), line).ok();
            }
        }

        writeln!(
            self.term,
            "    {}",
            b.apply_to("└────────────────────────────────────")
        )
        .ok();
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

/// Create the appropriate UI based on context.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}
