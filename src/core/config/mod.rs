//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! There is a single user-level configuration file. It is read once at
//! startup; the resulting values are never mutated during an invocation.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! Searched in order:
//! 1. `$PROMPT_LAUNCH_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/prompt-launch/config.toml`
//! 3. `~/.prompt-launch/config.toml` (canonical write location)
//!
//! # Example
//!
//! ```no_run
//! use prompt_launcher::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("Binary: {}", config.binary());
//! println!("Interactive: {}", config.interactive());
//! ```

pub mod schema;

pub use schema::GlobalConfig;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::types::absolutize;

/// Executable launched when no override is configured. Resolved via `PATH`.
pub const DEFAULT_BINARY: &str = "prompt";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "PROMPT_LAUNCH_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("unknown configuration key '{0}' (expected one of: binary, interactive)")]
    UnknownKey(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// User configuration
    pub global: GlobalConfig,
    /// Path to the config file (if loaded)
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed.
    /// A missing config file is not an error (defaults are used).
    pub fn load() -> Result<Self, ConfigError> {
        match Self::locate(|key| std::env::var(key).ok(), dirs::home_dir()) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let global: GlobalConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        global.validate()?;

        Ok(Self {
            global,
            path: Some(path.to_path_buf()),
        })
    }

    /// Find the first existing config file.
    ///
    /// `env` looks up environment variables; `home` is the user's home
    /// directory.
    pub fn locate(env: impl Fn(&str) -> Option<String>, home: Option<PathBuf>) -> Option<PathBuf> {
        // 1. Check $PROMPT_LAUNCH_CONFIG
        if let Some(path) = env(CONFIG_ENV).map(PathBuf::from) {
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/prompt-launch/config.toml
        if let Some(xdg_home) = env("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("prompt-launch/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.prompt-launch/config.toml
        home.map(|h| h.join(".prompt-launch/config.toml"))
            .filter(|p| p.exists())
    }

    /// Where `config set` writes.
    ///
    /// The file that [`Config::load`] would read if one exists. Otherwise an
    /// explicit `$PROMPT_LAUNCH_CONFIG` (created on write), falling back to
    /// `~/.prompt-launch/config.toml`.
    pub fn write_path() -> Result<PathBuf, ConfigError> {
        if let Some(path) = Self::locate(|key| std::env::var(key).ok(), dirs::home_dir()) {
            return Ok(path);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.trim().is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".prompt-launch/config.toml"))
    }

    /// Write config atomically.
    ///
    /// Creates parent directories if needed. Uses atomic write
    /// (write to temp file, then rename) to prevent corruption.
    pub fn write(path: &Path, config: &GlobalConfig) -> Result<(), ConfigError> {
        config.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    // =========================================================================
    // Accessors with defaults
    // =========================================================================

    /// The configured executable, falling back to [`DEFAULT_BINARY`].
    pub fn binary(&self) -> &str {
        self.global.binary_override().unwrap_or(DEFAULT_BINARY)
    }

    /// Check if interactive mode is enabled by default.
    ///
    /// Defaults to `true` if not configured.
    pub fn interactive(&self) -> bool {
        self.global.interactive.unwrap_or(true)
    }

    /// Get the path the config was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read one key as a display string. Unset keys read as empty.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            "binary" => Ok(self.global.binary.clone().unwrap_or_default()),
            "interactive" => Ok(self
                .global
                .interactive
                .map(|b| b.to_string())
                .unwrap_or_default()),
            _ => Err(ConfigError::UnknownKey(key.to_string())),
        }
    }

    /// Set one key from its string form. An empty value clears the key.
    ///
    /// A relative `binary` path (one containing a separator) is stored
    /// absolute against `cwd`; bare names and `~/` paths are stored as given.
    pub fn set(&mut self, key: &str, value: &str, cwd: &Path) -> Result<(), ConfigError> {
        let value = value.trim();
        match key {
            "binary" => {
                self.global.binary = (!value.is_empty()).then(|| anchor_binary(value, cwd));
            }
            "interactive" => {
                self.global.interactive = match value {
                    "" => None,
                    "true" => Some(true),
                    "false" => Some(false),
                    other => {
                        return Err(ConfigError::InvalidValue(format!(
                            "interactive must be 'true' or 'false', got '{}'",
                            other
                        )))
                    }
                };
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        self.global.validate()
    }
}

fn anchor_binary(value: &str, cwd: &Path) -> String {
    let path = Path::new(value);
    let relative_path = !value.starts_with("~/")
        && !path.is_absolute()
        && (value.contains('/') || value.contains(std::path::MAIN_SEPARATOR));
    if relative_path {
        absolutize(path, cwd).to_string_lossy().into_owned()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_without_file() {
        let config = Config::default();
        assert_eq!(config.binary(), DEFAULT_BINARY);
        assert!(config.interactive());
        assert!(config.loaded_from().is_none());
    }

    #[test]
    fn locate_prefers_env_var() {
        let temp = TempDir::new().unwrap();
        let explicit = temp.path().join("explicit.toml");
        fs::write(&explicit, "").unwrap();
        let home = temp.path().join("home");
        fs::create_dir_all(home.join(".prompt-launch")).unwrap();
        fs::write(home.join(".prompt-launch/config.toml"), "").unwrap();

        let env_path = explicit.to_string_lossy().into_owned();
        let found = Config::locate(
            |key| (key == CONFIG_ENV).then(|| env_path.clone()),
            Some(home),
        );
        assert_eq!(found, Some(explicit));
    }

    #[test]
    fn locate_xdg_before_home() {
        let temp = TempDir::new().unwrap();
        let xdg = temp.path().join("xdg");
        fs::create_dir_all(xdg.join("prompt-launch")).unwrap();
        fs::write(xdg.join("prompt-launch/config.toml"), "").unwrap();
        let home = temp.path().join("home");
        fs::create_dir_all(home.join(".prompt-launch")).unwrap();
        fs::write(home.join(".prompt-launch/config.toml"), "").unwrap();

        let xdg_str = xdg.to_string_lossy().into_owned();
        let found = Config::locate(
            |key| (key == "XDG_CONFIG_HOME").then(|| xdg_str.clone()),
            Some(home),
        );
        assert_eq!(found, Some(xdg.join("prompt-launch/config.toml")));
    }

    #[test]
    fn locate_falls_back_to_home() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".prompt-launch")).unwrap();
        fs::write(temp.path().join(".prompt-launch/config.toml"), "").unwrap();

        let found = Config::locate(no_env, Some(temp.path().to_path_buf()));
        assert_eq!(found, Some(temp.path().join(".prompt-launch/config.toml")));
    }

    #[test]
    fn locate_nothing() {
        let temp = TempDir::new().unwrap();
        assert_eq!(Config::locate(no_env, Some(temp.path().to_path_buf())), None);
    }

    #[test]
    fn load_binary_override() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "binary = \"/opt/prompt\"\ninteractive = false\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.binary(), "/opt/prompt");
        assert!(!config.interactive());
        assert_eq!(config.loaded_from(), Some(path.as_path()));
    }

    #[test]
    fn blank_binary_uses_default() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "binary = \"\"").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.binary(), DEFAULT_BINARY);
    }

    #[test]
    fn unknown_fields_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "binary = \"prompt\"\nunknown_field = true\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn write_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/dir/config.toml");

        let mut config = Config::default();
        config.set("binary", "/usr/local/bin/prompt", Path::new("/")).unwrap();
        Config::write(&path, &config.global).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("toml.tmp").exists());
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.binary(), "/usr/local/bin/prompt");
    }

    #[test]
    fn set_and_get_keys() {
        let mut config = Config::default();
        config.set("interactive", "false", Path::new("/")).unwrap();
        assert_eq!(config.get("interactive").unwrap(), "false");

        config.set("binary", "prompt-nightly", Path::new("/ws")).unwrap();
        assert_eq!(config.get("binary").unwrap(), "prompt-nightly");

        config.set("binary", "", Path::new("/ws")).unwrap();
        assert_eq!(config.get("binary").unwrap(), "");
        assert_eq!(config.binary(), DEFAULT_BINARY);
    }

    #[test]
    fn set_rejects_bad_bool() {
        let mut config = Config::default();
        let err = config.set("interactive", "yes", Path::new("/")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn unknown_key_rejected() {
        let mut config = Config::default();
        assert!(matches!(
            config.get("trunk"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            config.set("trunk", "main", Path::new("/")),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn relative_binary_stored_absolute() {
        let mut config = Config::default();
        config
            .set("binary", "./bin/../tools/prompt", Path::new("/home/dev/project"))
            .unwrap();
        assert_eq!(config.get("binary").unwrap(), "/home/dev/project/tools/prompt");
        assert_eq!(config.binary(), "/home/dev/project/tools/prompt");
    }

    #[test]
    fn bare_and_home_binaries_stored_as_given() {
        let mut config = Config::default();
        config.set("binary", "prompt-dev", Path::new("/ws")).unwrap();
        assert_eq!(config.get("binary").unwrap(), "prompt-dev");

        config.set("binary", "~/bin/prompt", Path::new("/ws")).unwrap();
        assert_eq!(config.get("binary").unwrap(), "~/bin/prompt");
    }
}
