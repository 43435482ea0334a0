//! config command - Get, set, or list configuration values

use crate::core::config::{Config, GlobalConfig};
use crate::engine::Context;
use anyhow::{Context as _, Result};
use std::path::PathBuf;

/// Load the config file that `set` would write, or defaults if absent.
fn load_writable() -> Result<(Config, PathBuf)> {
    let path = Config::write_path().context("Failed to locate config file")?;
    let config = if path.exists() {
        Config::load_from(&path).context("Failed to load config")?
    } else {
        Config::default()
    };
    Ok((config, path))
}

/// Get a configuration value.
pub fn get(_ctx: &Context, key: &str) -> Result<()> {
    let config = Config::load().context("Failed to load config")?;
    let value = config.get(key)?;

    if value.is_empty() {
        // Key exists but has no value - exit silently
        Ok(())
    } else {
        println!("{}", value);
        Ok(())
    }
}

/// Set a configuration value.
pub fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let (mut config, path) = load_writable()?;
    let cwd = ctx.working_dir()?;

    config.set(key, value, &cwd)?;
    Config::write(&path, &config.global).context("Failed to write config")?;

    if !ctx.quiet {
        let stored = config.get(key)?;
        if stored.is_empty() {
            println!("Cleared {}", key);
        } else {
            println!("Set {} = {}", key, stored);
        }
    }

    Ok(())
}

/// List all configuration values.
pub fn list(_ctx: &Context) -> Result<()> {
    let config = Config::load().context("Failed to load config")?;

    match config.loaded_from() {
        Some(path) => println!("# {}", path.display()),
        None => println!("# (no config file, using defaults)"),
    }

    for key in GlobalConfig::KEYS {
        let value = config.get(key)?;
        if value.is_empty() {
            println!("{} = (not set)", key);
        } else {
            println!("{} = {}", key, value);
        }
    }
    println!("# effective binary: {}", config.binary());

    Ok(())
}
