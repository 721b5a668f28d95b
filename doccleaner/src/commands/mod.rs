// doccleaner/src/commands/mod.rs
//! Subcommand implementations and the helpers they share.

pub mod check;
pub mod clean;

use anyhow::{bail, Context, Result};
use log::debug;
use std::path::{Path, PathBuf};

use doccleaner_core::{CleanerConfig, DocCleaner, EngineOptions};

use crate::cleaners::host_registry;

/// File name looked up when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "doccleaner.toml";

/// Picks the configuration file: the explicit path, then `doccleaner.toml` in
/// the working directory, then `<config_dir>/doccleaner/doccleaner.toml`.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.is_file() {
        debug!("Using configuration from the working directory: {}", local.display());
        return Ok(local);
    }

    if let Some(dir) = dirs::config_dir() {
        let user = dir.join("doccleaner").join(DEFAULT_CONFIG_FILE);
        if user.is_file() {
            debug!("Using user configuration: {}", user.display());
            return Ok(user);
        }
    }

    bail!(
        "No configuration found: pass --config FILE or create {} in the working directory",
        DEFAULT_CONFIG_FILE
    )
}

/// Loads the configuration at `path` and builds a cleaner over the host registry.
pub fn load_cleaner(path: &Path, options: EngineOptions) -> Result<DocCleaner> {
    let config = CleanerConfig::load_from_file(path)?;
    DocCleaner::from_config(&config, &host_registry(), options)
        .with_context(|| format!("Invalid configuration {}", path.display()))
}
