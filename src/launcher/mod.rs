//! launcher
//!
//! Starts the external tool against a resolved root.
//!
//! # Contract
//!
//! The tool is started as `<executable> <root>` with `<root>` as its working
//! directory, standard streams disconnected, and the inherited environment.
//! The child is detached and never waited on: once the spawn call returns,
//! this process keeps no reference to it.
//!
//! # Preconditions
//!
//! An absolute executable path must name an existing, executable regular
//! file; otherwise [`LaunchError::BinaryNotFound`] is returned and nothing
//! is spawned. A bare name is looked up on `PATH` by the operating system
//! at spawn time and is not checked beforehand.
//!
//! # Modules
//!
//! - [`spawn`] - The [`Spawner`] seam and the real detached spawner
//! - [`mock`] - A recording spawner for tests

pub mod mock;
pub mod spawn;

pub use spawn::{DetachedSpawner, Spawner};

use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::config::DEFAULT_BINARY;
use crate::core::types::{absolutize, normalize};
use crate::resolver::ResolvedRoot;

/// Why an executable path failed the precondition check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryProblem {
    /// Nothing exists at the path.
    Missing,
    /// The path exists but is not a regular file.
    NotAFile,
    /// The file has no execute permission.
    NotExecutable,
}

impl fmt::Display for BinaryProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            BinaryProblem::Missing => "does not exist",
            BinaryProblem::NotAFile => "is not a file",
            BinaryProblem::NotExecutable => "is not executable",
        };
        f.write_str(text)
    }
}

/// Errors from launching the external tool.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The configured executable path is unusable.
    #[error(
        "executable '{}' {problem}; set a valid path with \
         `prompt-launch config set binary <PATH>` or pass --binary",
        .path.display()
    )]
    BinaryNotFound { path: PathBuf, problem: BinaryProblem },

    /// The operating system refused or failed to start the process.
    #[error("failed to launch '{program}' in '{}': {source}", .root.display())]
    LaunchFailed {
        program: String,
        root: PathBuf,
        source: std::io::Error,
    },
}

/// The executable to start.
///
/// Built once at startup and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchTarget {
    /// An absolute path, checked before spawning.
    Path(PathBuf),
    /// A bare name resolved through `PATH` at spawn time.
    Name(String),
}

impl LaunchTarget {
    /// Interpret a configured executable reference.
    ///
    /// - blank: the default bare name
    /// - `~/...`: expanded against `home`
    /// - absolute: used as is
    /// - relative with a path separator: made absolute against `cwd`
    /// - anything else: a bare name
    pub fn parse(raw: &str, cwd: &Path, home: Option<&Path>) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return LaunchTarget::Name(DEFAULT_BINARY.to_string());
        }

        if let (Some(rest), Some(home)) = (raw.strip_prefix("~/"), home) {
            return LaunchTarget::Path(normalize(&home.join(rest)));
        }

        let path = Path::new(raw);
        if path.is_absolute() {
            return LaunchTarget::Path(normalize(path));
        }

        if raw.contains('/') || raw.contains(std::path::MAIN_SEPARATOR) {
            return LaunchTarget::Path(absolutize(path, cwd));
        }

        LaunchTarget::Name(raw.to_string())
    }

    /// The program handed to the operating system.
    pub fn program(&self) -> OsString {
        match self {
            LaunchTarget::Path(path) => path.as_os_str().to_owned(),
            LaunchTarget::Name(name) => OsString::from(name),
        }
    }

    /// Check the precondition for absolute paths.
    ///
    /// Bare names always pass.
    pub fn check(&self) -> Result<(), LaunchError> {
        match self {
            LaunchTarget::Path(path) => {
                check_executable(path).map_err(|problem| LaunchError::BinaryNotFound {
                    path: path.clone(),
                    problem,
                })
            }
            LaunchTarget::Name(_) => Ok(()),
        }
    }
}

impl Default for LaunchTarget {
    fn default() -> Self {
        LaunchTarget::Name(DEFAULT_BINARY.to_string())
    }
}

impl fmt::Display for LaunchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchTarget::Path(path) => write!(f, "{}", path.display()),
            LaunchTarget::Name(name) => write!(f, "{} (from PATH)", name),
        }
    }
}

/// A fully specified process launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    /// Program to execute.
    pub program: OsString,
    /// Positional arguments.
    pub args: Vec<OsString>,
    /// Working directory for the child.
    pub cwd: PathBuf,
}

impl LaunchCommand {
    /// The command for launching `target` against `root`.
    pub fn for_root(target: &LaunchTarget, root: &Path) -> Self {
        Self {
            program: target.program(),
            args: vec![root.as_os_str().to_owned()],
            cwd: root.to_path_buf(),
        }
    }
}

/// A successful launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launched {
    /// Process id of the detached child, for diagnostics only.
    pub pid: u32,
    /// The root the tool was started in.
    pub root: PathBuf,
}

/// Launch `target` against `root`.
///
/// Returns as soon as the process has been started.
///
/// # Errors
///
/// - [`LaunchError::BinaryNotFound`] if an absolute target fails its check
/// - [`LaunchError::LaunchFailed`] if the spawn itself fails
pub fn launch(
    root: &ResolvedRoot,
    target: &LaunchTarget,
    spawner: &dyn Spawner,
) -> Result<Launched, LaunchError> {
    target.check()?;

    let command = LaunchCommand::for_root(target, root.path());
    let pid = spawner
        .spawn(&command)
        .map_err(|source| LaunchError::LaunchFailed {
            program: command.program.to_string_lossy().into_owned(),
            root: command.cwd.clone(),
            source,
        })?;

    Ok(Launched {
        pid,
        root: command.cwd,
    })
}

fn check_executable(path: &Path) -> Result<(), BinaryProblem> {
    let metadata = fs::metadata(path).map_err(|_| BinaryProblem::Missing)?;
    if !metadata.is_file() {
        return Err(BinaryProblem::NotAFile);
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if metadata.permissions().mode() & 0o111 == 0 {
            return Err(BinaryProblem::NotExecutable);
        }
    }

    Ok(())
}
