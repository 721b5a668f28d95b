// doccleaner/src/cli.rs
//! This file defines the command-line interface (CLI) for the doccleaner application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "doccleaner",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Rewrite configured fields of JSON documents",
    long_about = "Doccleaner rewrites selected fields of nested JSON documents. A configuration binds dotted paths such as `customers.wife.name` to named operations (set, nil, date, mask, hash, replace); every value found at a configured path is replaced, everything else is written back untouched.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `doccleaner` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cleans a JSON document (or JSON Lines) read from a file or stdin.
    #[command(about = "Cleans a JSON document read from a file or stdin.")]
    Clean(CleanCommand),

    /// Loads a configuration, builds its path trie and lists the configured leaves.
    #[command(about = "Validates a configuration and lists every configured path.")]
    Check(CheckCommand),
}

/// Arguments for the `clean` command.
#[derive(Parser, Debug)]
pub struct CleanCommand {
    /// Path to the cleaner configuration (TOML, YAML or `path = method` lines).
    #[arg(long = "config", short = 'c', value_name = "FILE", env = "DOCCLEANER_CONFIG", help = "Path to the cleaner configuration file.")]
    pub config: Option<PathBuf>,

    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Write cleaned output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Treat every non-empty input line as its own document.
    #[arg(long = "lines", short = 'l', help = "Read and write JSON Lines, one document per line.")]
    pub lines: bool,

    /// Load objects as insertion-ordered database maps.
    #[arg(long = "native-maps", help = "Load objects as ordered database-native maps (keeps key order).")]
    pub native_maps: bool,

    /// Apply single-leaf configurations to bare scalars at the top level.
    #[arg(long = "root-scalar-fallback", help = "Apply a lone top-level leaf to scalar documents and scalar array items.")]
    pub root_scalar_fallback: bool,

    /// Pretty-print output documents.
    #[arg(long, short = 'p', help = "Pretty-print the cleaned JSON.", conflicts_with = "lines")]
    pub pretty: bool,

    /// Exit with a non-zero code when any field could not be cleaned.
    #[arg(long, help = "Exit with a non-zero code when any field could not be cleaned.")]
    pub strict: bool,

    /// Suppress the clean summary.
    #[arg(long = "no-summary", help = "Suppress the clean summary printed to stderr.")]
    pub no_summary: bool,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckCommand {
    /// Path to the cleaner configuration to validate.
    #[arg(long = "config", short = 'c', value_name = "FILE", env = "DOCCLEANER_CONFIG", help = "Path to the cleaner configuration file.")]
    pub config: Option<PathBuf>,
}
