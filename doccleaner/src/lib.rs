// doccleaner/src/lib.rs
//! # Doccleaner CLI Application
//!
//! Command-line front end for `doccleaner-core`: loads a cleaner configuration,
//! registers the host cleaners (`mask`, `hash`, `replace`) next to the
//! built-ins, and cleans JSON documents from files or stdin.
//!
//! License: MIT OR Apache-2.0

pub mod cleaners;
pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;

use anyhow::Result;
use log::warn;
use std::io;
use std::process::ExitCode;

use doccleaner_core::{EngineOptions, MapRepresentation};

use crate::cli::{CheckCommand, CleanCommand, Cli, Commands};
use crate::commands::{check, clean, load_cleaner, resolve_config_path};

/// Exit code of `clean --strict` when some fields could not be cleaned.
pub const EXIT_FIELD_FAILURES: u8 = 2;

/// Runs the parsed command line.
pub fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Clean(cmd) => run_clean_command(cmd, cli.quiet),
        Commands::Check(cmd) => run_check_command(cmd),
    }
}

fn run_clean_command(cmd: CleanCommand, quiet: bool) -> Result<ExitCode> {
    let config_path = resolve_config_path(cmd.config.as_deref())?;
    let options = EngineOptions {
        root_scalar_fallback: cmd.root_scalar_fallback,
    };
    let cleaner = load_cleaner(&config_path, options)?;

    let opts = clean::CleanOptions {
        input: clean::read_input(cmd.input_file.as_deref())?,
        output_path: cmd.output,
        lines: cmd.lines,
        representation: if cmd.native_maps {
            MapRepresentation::DocumentMap
        } else {
            MapRepresentation::Object
        },
        pretty: cmd.pretty,
        no_summary: cmd.no_summary,
        quiet,
    };
    let outcome = clean::run_clean_opts(&cleaner, &opts)?;

    if cmd.strict && !outcome.report.is_clean() {
        warn!(
            "{} field(s) could not be cleaned; exiting with status {}.",
            outcome.report.failures.len(),
            EXIT_FIELD_FAILURES
        );
        return Ok(ExitCode::from(EXIT_FIELD_FAILURES));
    }
    Ok(ExitCode::SUCCESS)
}

fn run_check_command(cmd: CheckCommand) -> Result<ExitCode> {
    let config_path = resolve_config_path(cmd.config.as_deref())?;
    check::run_check(&config_path, &mut io::stdout().lock())?;
    Ok(ExitCode::SUCCESS)
}
