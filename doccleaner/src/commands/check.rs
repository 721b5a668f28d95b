// doccleaner/src/commands/check.rs
//! The `check` command: load a configuration, build its trie and list the leaves.

use anyhow::Result;
use log::info;
use serde_json::Value;
use std::io::Write;
use std::path::Path;

use doccleaner_core::{Document, EngineOptions};

use super::load_cleaner;

/// Prints one `path = method [args]` line per configured leaf and returns how
/// many there are. Fails on unreadable files, bad paths and unknown operations.
pub fn run_check<W: Write>(config_path: &Path, writer: &mut W) -> Result<usize> {
    let cleaner = load_cleaner(config_path, EngineOptions::default())?;
    let leaves = cleaner.trie().leaf_paths();
    for (path, node) in &leaves {
        let Some(operation) = node.operation() else {
            continue;
        };
        if operation.args().is_empty() {
            writeln!(writer, "{} = {}", path, operation.name())?;
        } else {
            let args = Value::Array(operation.args().iter().map(Document::to_json).collect());
            writeln!(writer, "{} = {} {}", path, operation.name(), args)?;
        }
    }
    info!("Configuration {} is valid: {} path(s).", config_path.display(), leaves.len());
    Ok(leaves.len())
}
