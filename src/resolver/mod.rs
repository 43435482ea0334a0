//! resolver
//!
//! Picks exactly one project root for an invocation.
//!
//! # Rules
//!
//! Applied in order; the first rule that decides wins:
//!
//! 1. No open roots: [`ResolveError::NoWorkspaceOpen`].
//! 2. The location hint lies inside an open root: that root.
//! 3. Exactly one root is open: that root, even if a hint missed it.
//! 4. The active document lies inside an open root: that root.
//! 5. Ask the user. Dismissing the prompt cancels the invocation.
//!
//! When a path lies inside several nested roots, the deepest root wins so a
//! click inside a nested project never resolves to its ancestor.
//!
//! # Invariants
//!
//! - The result is always one of the roots passed in, never a guess.
//! - The resolver holds no state; every call is independent.
//! - Only rule 5 prompts, and it never falls back to a default.

use std::fmt;
use std::path::Path;

use thiserror::Error;

use crate::core::types::{LocationHint, ProjectRoot};
use crate::ui::prompts::{Choice, PromptError, Prompter};

/// Message shown above the disambiguation list.
pub const PROMPT_MESSAGE: &str = "Select a workspace folder";

/// Errors from root resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The host has no project root open.
    #[error("no workspace folder is open")]
    NoWorkspaceOpen,

    /// A prompt was needed but prompting is disabled.
    #[error(
        "{count} workspace folders are open and none contains the target; \
         pass a path inside one of them or run interactively to choose"
    )]
    Ambiguous { count: usize },

    /// The prompt itself failed.
    #[error("failed to prompt for a workspace folder: {0}")]
    Prompt(String),
}

/// Which rule chose the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionRule {
    /// The location hint lies inside the root.
    Hint,
    /// Only one root was open.
    SingleRoot,
    /// The active document lies inside the root.
    ActiveEditor,
    /// The user picked it from the prompt.
    UserChoice,
}

impl fmt::Display for ResolutionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ResolutionRule::Hint => "contains the target path",
            ResolutionRule::SingleRoot => "only open folder",
            ResolutionRule::ActiveEditor => "contains the active document",
            ResolutionRule::UserChoice => "selected by user",
        };
        f.write_str(text)
    }
}

/// The root chosen for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoot {
    /// The chosen root.
    pub root: ProjectRoot,
    /// The rule that chose it.
    pub rule: ResolutionRule,
}

impl ResolvedRoot {
    /// Absolute path of the chosen root.
    pub fn path(&self) -> &Path {
        self.root.path()
    }
}

/// Resolve the root for one invocation.
///
/// Returns `Ok(None)` when the user dismisses the disambiguation prompt.
/// That is a cancellation, not a failure, and callers abort silently.
///
/// # Errors
///
/// - [`ResolveError::NoWorkspaceOpen`] if `open_roots` is empty
/// - [`ResolveError::Ambiguous`] if a prompt is needed but not possible
/// - [`ResolveError::Prompt`] if the prompt fails
pub fn resolve(
    hint: Option<&LocationHint>,
    open_roots: &[ProjectRoot],
    active_document: Option<&Path>,
    prompter: &dyn Prompter,
) -> Result<Option<ResolvedRoot>, ResolveError> {
    if open_roots.is_empty() {
        return Err(ResolveError::NoWorkspaceOpen);
    }

    if let Some(root) = hint.and_then(|h| containing_root(h.as_path(), open_roots)) {
        return Ok(Some(chosen(root, ResolutionRule::Hint)));
    }

    if let [only] = open_roots {
        return Ok(Some(chosen(only, ResolutionRule::SingleRoot)));
    }

    if let Some(root) = active_document.and_then(|p| containing_root(p, open_roots)) {
        return Ok(Some(chosen(root, ResolutionRule::ActiveEditor)));
    }

    let choices: Vec<Choice> = open_roots
        .iter()
        .map(|root| Choice {
            label: root.name().to_string(),
            detail: root.path().display().to_string(),
        })
        .collect();

    match prompter.select(PROMPT_MESSAGE, &choices) {
        Ok(Some(index)) => match open_roots.get(index) {
            Some(root) => Ok(Some(chosen(root, ResolutionRule::UserChoice))),
            None => Err(ResolveError::Prompt(format!(
                "selection {} out of range",
                index
            ))),
        },
        Ok(None) => Ok(None),
        Err(PromptError::NotInteractive) => Err(ResolveError::Ambiguous {
            count: open_roots.len(),
        }),
        Err(PromptError::IoError(message)) => Err(ResolveError::Prompt(message)),
    }
}

/// The most specific open root containing `path`.
///
/// Ties between roots of equal depth (only possible for duplicates) go to
/// the first one listed.
pub fn containing_root<'a>(path: &Path, open_roots: &'a [ProjectRoot]) -> Option<&'a ProjectRoot> {
    // max_by_key keeps the last maximum; iterating in reverse makes that
    // the first listed.
    open_roots
        .iter()
        .rev()
        .filter(|root| root.contains(path))
        .max_by_key(|root| root.depth())
}

fn chosen(root: &ProjectRoot, rule: ResolutionRule) -> ResolvedRoot {
    ResolvedRoot {
        root: root.clone(),
        rule,
    }
}
