//! Interactive prompts.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;

use crate::error::{InstallError, Result};

use super::{Prompt, PromptResult, PromptType};

/// Convert dialoguer errors to InstallError.
fn map_dialoguer_err(e: dialoguer::Error) -> InstallError {
    InstallError::Io(e.into())
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Prompt the user for input.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    match &prompt.prompt_type {
        PromptType::Acknowledge => prompt_acknowledge(prompt, term),
        PromptType::Input => prompt_input(prompt, term),
    }
}

fn prompt_acknowledge(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    term.write_line(&format!("{}", style(&prompt.question).dim()))?;
    term.read_line()?;
    Ok(PromptResult::Bool(true))
}

fn prompt_input(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let theme = prompt_theme();
    let input = Input::<String>::with_theme(&theme)
        .with_prompt(&prompt.question)
        .allow_empty(true);

    let result: String = if let Some(default) = &prompt.default {
        input
            .default(default.clone())
            .interact_on(term)
            .map_err(map_dialoguer_err)?
    } else {
        input.interact_on(term).map_err(map_dialoguer_err)?
    };

    Ok(PromptResult::String(result.trim().to_string()))
}
