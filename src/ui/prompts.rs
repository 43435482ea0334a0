//! ui::prompts
//!
//! Interactive prompts.
//!
//! # Design
//!
//! Prompts are only shown in interactive mode. In non-interactive mode,
//! operations requiring user input must either have defaults or fail
//! with a clear error message.
//!
//! Prompting goes through the [`Prompter`] trait so callers can be driven
//! by a scripted prompter in tests. [`TerminalPrompter`] blocks the calling
//! thread until the user picks an entry or dismisses the list.

use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("not in interactive mode")]
    NotInteractive,

    #[error("IO error: {0}")]
    IoError(String),
}

/// One entry in a selection list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Primary text.
    pub label: String,
    /// Secondary text shown next to the label.
    pub detail: String,
}

impl Choice {
    /// Render the entry as a single line.
    pub fn render(&self) -> String {
        if self.detail.is_empty() {
            self.label.clone()
        } else {
            format!("{}  {}", self.label, self.detail)
        }
    }
}

/// Something that can ask the user to choose.
pub trait Prompter {
    /// Ask the user to pick one of `choices`.
    ///
    /// Returns `Ok(Some(index))` for a pick and `Ok(None)` if the user
    /// dismissed the prompt.
    fn select(&self, message: &str, choices: &[Choice]) -> Result<Option<usize>, PromptError>;
}

/// Prompts on the controlling terminal.
#[derive(Debug, Clone, Copy)]
pub struct TerminalPrompter {
    interactive: bool,
}

impl TerminalPrompter {
    /// Create a prompter. With `interactive == false` every prompt fails
    /// with [`PromptError::NotInteractive`].
    pub fn new(interactive: bool) -> Self {
        Self { interactive }
    }
}

impl Prompter for TerminalPrompter {
    fn select(&self, message: &str, choices: &[Choice]) -> Result<Option<usize>, PromptError> {
        if !self.interactive {
            return Err(PromptError::NotInteractive);
        }

        let items: Vec<String> = choices.iter().map(Choice::render).collect();
        Select::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .items(&items)
            .default(0)
            .interact_opt()
            .map_err(|e| PromptError::IoError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_with_detail() {
        let choice = Choice {
            label: "api".to_string(),
            detail: "/ws/api".to_string(),
        };
        assert_eq!(choice.render(), "api  /ws/api");
    }

    #[test]
    fn render_without_detail() {
        let choice = Choice {
            label: "api".to_string(),
            detail: String::new(),
        };
        assert_eq!(choice.render(), "api");
    }

    #[test]
    fn non_interactive_refuses() {
        let prompter = TerminalPrompter::new(false);
        let result = prompter.select("pick", &[]);
        assert!(matches!(result, Err(PromptError::NotInteractive)));
    }
}
