// doccleaner/src/logger.rs
//! Logger bootstrap for the doccleaner binary.
//!
//! `RUST_LOG` is honoured unless an explicit level is passed in, which is how
//! `--quiet` and `--debug` win over the environment.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initialises `env_logger` on stderr. Safe to call more than once; later calls
/// are ignored.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.target(Target::Stderr).format_timestamp(None);
    let _ = builder.try_init();
}

/// Maps the global CLI flags to an explicit level, if any.
pub fn level_from_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}
