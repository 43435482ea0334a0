//! core::workspace
//!
//! Enumerates the project roots the host currently has open.
//!
//! # Sources
//!
//! - Explicit root paths (one per `--root` flag)
//! - A `.code-workspace` file whose `folders` array lists the roots
//! - The invocation directory, when neither of the above is given
//!
//! Workspace-file roots come first, then explicit roots. Exact duplicate
//! paths are dropped, keeping the first occurrence. An explicitly empty
//! workspace file yields no roots at all, which the resolver reports as
//! "no workspace open".
//!
//! # Workspace File Format
//!
//! ```json
//! {
//!   "folders": [
//!     { "path": "backend" },
//!     { "path": "/abs/frontend", "name": "web" }
//!   ]
//! }
//! ```
//!
//! The file is JSON with comments: `//` and `/* */` comments and trailing
//! commas are accepted, as in the files the editor writes. A folder is given
//! either by `path` (relative folder paths resolve against the directory
//! holding the file) or by `uri`. `file://` URIs name local folders; folders
//! on other schemes (remote hosts, virtual file systems) are skipped.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use super::types::{absolutize, ProjectRoot, TypeError};

/// Errors from reading the open roots.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("failed to read workspace file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse workspace file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid root '{path}': {source}")]
    InvalidRoot { path: PathBuf, source: TypeError },
}

#[derive(Debug, Deserialize)]
struct WorkspaceFile {
    #[serde(default)]
    folders: Vec<WorkspaceFolder>,
}

#[derive(Debug, Deserialize)]
struct WorkspaceFolder {
    #[serde(default)]
    path: Option<PathBuf>,
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

impl WorkspaceFolder {
    /// The local directory this entry names, if any.
    fn local_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.path {
            return Some(path.clone());
        }
        let url = Url::parse(self.uri.as_deref()?.trim()).ok()?;
        if url.scheme() != "file" {
            return None;
        }
        url.to_file_path().ok()
    }
}

/// Where the open roots come from for one invocation.
#[derive(Debug, Clone, Default)]
pub struct RootSources {
    /// A workspace file listing folders.
    pub workspace_file: Option<PathBuf>,
    /// Roots given directly.
    pub roots: Vec<PathBuf>,
}

impl RootSources {
    /// Whether any source was supplied explicitly.
    pub fn is_explicit(&self) -> bool {
        self.workspace_file.is_some() || !self.roots.is_empty()
    }

    /// Collect the open roots.
    ///
    /// Relative paths are resolved against `cwd`. With no explicit source,
    /// `cwd` itself is the single open root.
    pub fn open_roots(&self, cwd: &Path) -> Result<Vec<ProjectRoot>, WorkspaceError> {
        if !self.is_explicit() {
            return Ok(vec![to_root(None, cwd, cwd)?]);
        }

        let mut roots = Vec::new();
        if let Some(file) = &self.workspace_file {
            roots.extend(read_workspace_file(&absolutize(file, cwd))?);
        }
        for path in &self.roots {
            roots.push(to_root(None, path, cwd)?);
        }

        Ok(dedup_roots(roots))
    }
}

/// Read the roots listed in a workspace file.
pub fn read_workspace_file(path: &Path) -> Result<Vec<ProjectRoot>, WorkspaceError> {
    let contents = fs::read_to_string(path).map_err(|e| WorkspaceError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let parsed: WorkspaceFile = json5::from_str(&contents).map_err(|e| WorkspaceError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let base = path.parent().unwrap_or_else(|| Path::new("/"));
    parsed
        .folders
        .into_iter()
        .filter_map(|folder| folder.local_path().map(|local| (folder.name, local)))
        .map(|(name, local)| to_root(name, &local, base))
        .collect()
}

fn to_root(name: Option<String>, path: &Path, base: &Path) -> Result<ProjectRoot, WorkspaceError> {
    let absolute = absolutize(path, base);
    let root = match name.filter(|n| !n.trim().is_empty()) {
        Some(name) => ProjectRoot::new(name, &absolute),
        None => ProjectRoot::from_path(&absolute),
    };
    root.map_err(|source| WorkspaceError::InvalidRoot {
        path: path.to_path_buf(),
        source,
    })
}

fn dedup_roots(roots: Vec<ProjectRoot>) -> Vec<ProjectRoot> {
    let mut seen = HashSet::new();
    roots
        .into_iter()
        .filter(|root| seen.insert(root.path().to_path_buf()))
        .collect()
}
