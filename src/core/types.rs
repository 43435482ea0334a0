//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`ProjectRoot`] - A top-level directory the host has open
//! - [`LocationHint`] - The path a trigger was fired on, if any
//!
//! # Validation
//!
//! Both types hold absolute, lexically normalized paths. Normalization
//! removes `.` components and folds `..` into the preceding component
//! without touching the filesystem, so symlinks are left as the host
//! reported them.
//!
//! # Examples
//!
//! ```
//! use prompt_launcher::core::types::{LocationHint, ProjectRoot};
//! use std::path::Path;
//!
//! let root = ProjectRoot::from_path("/ws/app").unwrap();
//! assert_eq!(root.name(), "app");
//!
//! let hint = LocationHint::resolve(Path::new("src/main.rs"), Path::new("/ws/app")).unwrap();
//! assert!(root.contains(hint.as_path()));
//!
//! // Relative roots cannot be represented
//! assert!(ProjectRoot::from_path("ws/app").is_err());
//! ```

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("path cannot be empty")]
    EmptyPath,

    #[error("project root must be an absolute path: {0}")]
    RelativeRoot(PathBuf),

    #[error("project root name cannot be empty")]
    EmptyName,
}

/// Lexically normalize a path.
///
/// `.` components are dropped and `..` removes the preceding normal
/// component. A `..` directly under the root stays at the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let ends_with_normal = matches!(out.components().next_back(), Some(Component::Normal(_)));
                if ends_with_normal {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

/// Make `path` absolute against `base`, then normalize it.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// One top-level directory the host currently has open.
///
/// Roots are owned and enumerated by the host; the resolver only reads
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ProjectRoot {
    name: String,
    path: PathBuf,
}

impl ProjectRoot {
    /// Create a root with an explicit display name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::EmptyName` for a blank name and
    /// `TypeError::RelativeRoot` if `path` is not absolute.
    pub fn new(name: impl Into<String>, path: impl AsRef<Path>) -> Result<Self, TypeError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TypeError::EmptyName);
        }
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(TypeError::EmptyPath);
        }
        if !path.is_absolute() {
            return Err(TypeError::RelativeRoot(path.to_path_buf()));
        }
        Ok(Self {
            name,
            path: normalize(path),
        })
    }

    /// Create a root named after its final path component.
    ///
    /// A filesystem root such as `/` has no final component and is named
    /// by its full path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TypeError> {
        let path = path.as_ref();
        let normalized = normalize(path);
        let name = normalized
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| normalized.display().to_string());
        Self::new(name, path)
    }

    /// Display name shown in the disambiguation prompt.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute path of the root.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether `path` is this root or lies beneath it.
    ///
    /// Containment is component-wise, so `/ws/ab` is not inside `/ws/a`.
    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.path)
    }

    /// Number of path components, used to prefer the most specific of
    /// several nested roots.
    pub fn depth(&self) -> usize {
        self.path.components().count()
    }
}

impl fmt::Display for ProjectRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.path.display())
    }
}

/// The filesystem location a trigger was fired on.
///
/// Supplied per invocation and never retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationHint(PathBuf);

impl LocationHint {
    /// Build a hint from a raw path, making it absolute against `cwd`.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::EmptyPath` if `raw` is empty.
    pub fn resolve(raw: &Path, cwd: &Path) -> Result<Self, TypeError> {
        if raw.as_os_str().is_empty() {
            return Err(TypeError::EmptyPath);
        }
        Ok(Self(absolutize(raw, cwd)))
    }

    /// The absolute hint path.
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for LocationHint {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for LocationHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
