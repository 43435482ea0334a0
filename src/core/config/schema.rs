//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Location
//!
//! Searched in order:
//! 1. `$PROMPT_LAUNCH_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/prompt-launch/config.toml`
//! 3. `~/.prompt-launch/config.toml` (canonical write location)
//!
//! # Validation
//!
//! Values are validated after parsing. Unknown keys are rejected so a
//! misspelled setting is reported instead of silently ignored.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// User configuration.
///
/// # Example
///
/// ```toml
/// binary = "/usr/local/bin/prompt"
/// interactive = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Override for the external executable (path or bare name).
    /// Blank means "use the default".
    pub binary: Option<String>,

    /// Default interactive mode
    pub interactive: Option<bool>,
}

impl GlobalConfig {
    /// Keys accepted by `config get` / `config set`.
    pub const KEYS: &'static [&'static str] = &["binary", "interactive"];

    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(binary) = &self.binary {
            if binary.chars().any(|c| c.is_control()) {
                return Err(ConfigError::InvalidValue(
                    "binary cannot contain control characters".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// The binary override, if set and not blank.
    pub fn binary_override(&self) -> Option<&str> {
        self.binary
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
    }
}
