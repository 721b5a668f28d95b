// doccleaner/src/main.rs
//! Doccleaner entry point.
//!
//! Parses the command line, initialises logging and hands off to the library.

use clap::Parser;
use is_terminal::IsTerminal;
use std::io;
use std::process::ExitCode;

use doccleaner::cli::Cli;
use doccleaner::logger;
use doccleaner::ui::output_format;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_logger(logger::level_from_flags(cli.quiet, cli.debug));

    match doccleaner::run(cli) {
        Ok(code) => code,
        Err(e) => {
            let stderr_supports_color = io::stderr().is_terminal();
            let _ = output_format::print_error_message(
                &mut io::stderr(),
                &format!("Error: {:#}", e),
                stderr_supports_color,
            );
            ExitCode::FAILURE
        }
    }
}
