//! engine
//!
//! Runs one invocation: collect open roots, resolve a root, launch the tool.
//!
//! # Lifecycle
//!
//! ```text
//! Roots -> Resolve -> [Prompt if ambiguous] -> Check target -> Spawn
//! ```
//!
//! Each invocation is independent. The only suspension point is the
//! disambiguation prompt; dismissing it ends the invocation with no side
//! effect.
//!
//! # Invariants
//!
//! - At most one process is spawned per invocation
//! - The launched root is always one of the open roots
//! - Settings are built once at startup and passed in explicitly
//!
//! # Example
//!
//! ```
//! use prompt_launcher::engine::{self, Context, Outcome, Request, Settings};
//! use prompt_launcher::launcher::mock::RecordingSpawner;
//! use prompt_launcher::ui::prompts::TerminalPrompter;
//!
//! let ctx = Context {
//!     cwd: Some("/ws/app".into()),
//!     interactive: false,
//!     ..Default::default()
//! };
//! let spawner = RecordingSpawner::new();
//! let outcome = engine::invoke(
//!     &ctx,
//!     &Settings::default(),
//!     &Request::default(),
//!     &TerminalPrompter::new(false),
//!     &spawner,
//! )
//! .unwrap();
//!
//! assert!(matches!(outcome, Outcome::Launched { .. }));
//! assert_eq!(spawner.spawned().len(), 1);
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::config::Config;
use crate::core::types::{absolutize, LocationHint, ProjectRoot, TypeError};
use crate::core::workspace::{RootSources, WorkspaceError};
use crate::launcher::{self, LaunchError, LaunchTarget, Launched, Spawner};
use crate::resolver::{self, ResolveError, ResolvedRoot};
use crate::ui::output::{self, Verbosity};
use crate::ui::prompts::Prompter;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags that affect command behavior.
#[derive(Debug, Clone)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Interactive mode enabled.
    pub interactive: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            cwd: None,
            debug: false,
            quiet: false,
            interactive: true,
        }
    }
}

impl Context {
    /// Output verbosity for this context.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    /// Absolute working directory of the invocation.
    ///
    /// A relative `--cwd` is taken relative to the process directory.
    pub fn working_dir(&self) -> Result<PathBuf, EngineError> {
        let process_dir = std::env::current_dir().map_err(EngineError::WorkingDir);
        match &self.cwd {
            Some(cwd) if cwd.is_absolute() => Ok(absolutize(cwd, Path::new("/"))),
            Some(cwd) => Ok(absolutize(cwd, &process_dir?)),
            None => process_dir,
        }
    }
}

/// Process-wide settings, built once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// The executable to launch.
    pub target: LaunchTarget,
}

impl Settings {
    /// Build settings from the loaded config and an optional command-line
    /// override.
    pub fn from_config(config: &Config, binary_flag: Option<&str>, cwd: &Path) -> Self {
        let raw = binary_flag
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| config.binary());
        Self {
            target: LaunchTarget::parse(raw, cwd, dirs::home_dir().as_deref()),
        }
    }
}

/// What the trigger supplied.
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// The path the trigger was fired on.
    pub hint: Option<PathBuf>,
    /// Where the open roots come from.
    pub sources: RootSources,
    /// The document open in the active editor.
    pub active_document: Option<PathBuf>,
}

/// Errors from engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("cannot determine working directory: {0}")]
    WorkingDir(std::io::Error),

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error("invalid target path: {0}")]
    Hint(#[from] TypeError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Launch(#[from] LaunchError),
}

/// Result of an invocation that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The tool was started.
    Launched {
        resolved: ResolvedRoot,
        launched: Launched,
    },
    /// The user dismissed the prompt.
    Cancelled,
}

/// Collect the open roots for a request.
pub fn open_roots(ctx: &Context, request: &Request) -> Result<Vec<ProjectRoot>, EngineError> {
    let cwd = ctx.working_dir()?;
    Ok(request.sources.open_roots(&cwd)?)
}

/// Resolve the root for a request without launching anything.
///
/// Returns `Ok(None)` if the user cancelled.
pub fn resolve(
    ctx: &Context,
    request: &Request,
    prompter: &dyn Prompter,
) -> Result<Option<ResolvedRoot>, EngineError> {
    let verbosity = ctx.verbosity();
    let cwd = ctx.working_dir()?;
    let roots = request.sources.open_roots(&cwd)?;
    output::debug(format!("{} open root(s)", roots.len()), verbosity);

    let hint = request
        .hint
        .as_deref()
        .map(|h| LocationHint::resolve(h, &cwd))
        .transpose()?;
    if let Some(hint) = &hint {
        output::debug(format!("hint: {}", hint), verbosity);
    }

    let active = request.active_document.as_deref().map(|p| absolutize(p, &cwd));

    let resolved = resolver::resolve(hint.as_ref(), &roots, active.as_deref(), prompter)?;
    match &resolved {
        Some(r) => output::debug(format!("root: {} ({})", r.path().display(), r.rule), verbosity),
        None => output::debug("selection cancelled", verbosity),
    }
    Ok(resolved)
}

/// Resolve a root and launch the tool against it.
pub fn invoke(
    ctx: &Context,
    settings: &Settings,
    request: &Request,
    prompter: &dyn Prompter,
    spawner: &dyn Spawner,
) -> Result<Outcome, EngineError> {
    let resolved = match resolve(ctx, request, prompter)? {
        Some(resolved) => resolved,
        None => return Ok(Outcome::Cancelled),
    };

    let verbosity = ctx.verbosity();
    output::debug(format!("binary: {}", settings.target), verbosity);

    let launched = launcher::launch(&resolved, &settings.target, spawner)?;
    output::debug(format!("spawned pid {}", launched.pid), verbosity);

    Ok(Outcome::Launched { resolved, launched })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launcher::mock::RecordingSpawner;
    use crate::resolver::ResolutionRule;
    use crate::ui::prompts::{Choice, PromptError};
    use std::ffi::OsString;

    struct Dismiss;

    impl Prompter for Dismiss {
        fn select(&self, _: &str, _: &[Choice]) -> Result<Option<usize>, PromptError> {
            Ok(None)
        }
    }

    fn ctx(cwd: &str) -> Context {
        Context {
            cwd: Some(PathBuf::from(cwd)),
            debug: false,
            quiet: true,
            interactive: false,
        }
    }

    fn request(roots: &[&str], hint: Option<&str>) -> Request {
        Request {
            hint: hint.map(PathBuf::from),
            sources: RootSources {
                workspace_file: None,
                roots: roots.iter().map(PathBuf::from).collect(),
            },
            active_document: None,
        }
    }

    #[test]
    fn relative_hint_resolved_against_cwd() {
        let spawner = RecordingSpawner::new();
        let outcome = invoke(
            &ctx("/ws/b/src"),
            &Settings::default(),
            &request(&["/ws/a", "/ws/b"], Some("main.rs")),
            &Dismiss,
            &spawner,
        )
        .unwrap();

        match outcome {
            Outcome::Launched { resolved, .. } => {
                assert_eq!(resolved.path(), Path::new("/ws/b"));
                assert_eq!(resolved.rule, ResolutionRule::Hint);
            }
            Outcome::Cancelled => panic!("expected launch"),
        }
        let spawned = spawner.spawned();
        assert_eq!(spawned.len(), 1);
        assert_eq!(spawned[0].args, vec![OsString::from("/ws/b")]);
    }

    #[test]
    fn cancelled_prompt_spawns_nothing() {
        let spawner = RecordingSpawner::new();
        let outcome = invoke(
            &ctx("/"),
            &Settings::default(),
            &request(&["/ws/a", "/ws/b"], None),
            &Dismiss,
            &spawner,
        )
        .unwrap();

        assert_eq!(outcome, Outcome::Cancelled);
        assert!(spawner.spawned().is_empty());
    }

    #[test]
    fn active_document_relative_to_cwd() {
        let spawner = RecordingSpawner::new();
        let mut req = request(&["/ws/a", "/ws/b"], None);
        req.active_document = Some(PathBuf::from("../a/lib.rs"));

        let resolved = resolve(&ctx("/ws/b"), &req, &Dismiss).unwrap().unwrap();
        assert_eq!(resolved.path(), Path::new("/ws/a"));
        assert_eq!(resolved.rule, ResolutionRule::ActiveEditor);
        assert!(spawner.spawned().is_empty());
    }

    #[test]
    fn missing_binary_reported_before_spawn() {
        let spawner = RecordingSpawner::new();
        let settings = Settings {
            target: LaunchTarget::Path(PathBuf::from("/nonexistent/bin/prompt")),
        };
        let err = invoke(
            &ctx("/ws/a"),
            &settings,
            &Request::default(),
            &Dismiss,
            &spawner,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            EngineError::Launch(LaunchError::BinaryNotFound { .. })
        ));
        assert!(spawner.spawned().is_empty());
    }

    #[test]
    fn settings_prefer_flag_over_config() {
        let mut config = Config::default();
        config.set("binary", "/opt/from-config", Path::new("/ws")).unwrap();

        let settings = Settings::from_config(&config, Some("from-flag"), Path::new("/ws"));
        assert_eq!(settings.target, LaunchTarget::Name("from-flag".to_string()));

        let settings = Settings::from_config(&config, Some(" "), Path::new("/ws"));
        assert_eq!(
            settings.target,
            LaunchTarget::Path(PathBuf::from("/opt/from-config"))
        );
    }

    #[test]
    fn working_dir_normalizes_override() {
        let ctx = ctx("/ws/a/../b/.");
        assert_eq!(ctx.working_dir().unwrap(), PathBuf::from("/ws/b"));
    }
}
