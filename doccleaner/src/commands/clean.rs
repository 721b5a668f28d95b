// doccleaner/src/commands/clean.rs
//! The `clean` command: read JSON, rewrite configured fields, write JSON.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use doccleaner_core::{parse_json_document, CleanReport, DocCleaner, Document, MapRepresentation};

use crate::ui::{clean_summary, output_format};

/// Options for a single `clean` run.
#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    pub input: String,
    pub output_path: Option<PathBuf>,
    pub lines: bool,
    pub representation: MapRepresentation,
    pub pretty: bool,
    pub no_summary: bool,
    pub quiet: bool,
}

/// What a run did, for the caller to turn into an exit code.
#[derive(Debug)]
pub struct CleanOutcome {
    pub documents: usize,
    pub report: CleanReport,
}

/// Reads the whole input from `path`, or stdin when none is given.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            info!("Reading input from file: {}", path.display());
            fs::read_to_string(path).with_context(|| format!("Failed to read input file {}", path.display()))
        }
        None => {
            info!("Reading input from stdin.");
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read input from stdin")?;
            Ok(buffer)
        }
    }
}

/// The main operation runner for the `clean` command.
pub fn run_clean_opts(cleaner: &DocCleaner, opts: &CleanOptions) -> Result<CleanOutcome> {
    info!("Starting doccleaner clean operation.");

    let (output, documents, report) = if opts.lines {
        clean_lines(cleaner, opts)?
    } else {
        let (output, report) = clean_document(cleaner, &opts.input, opts)?;
        (output, 1, report)
    };
    debug!(
        "Cleaned {} document(s): {} field(s) applied, {} failed.",
        documents,
        report.applied,
        report.failures.len()
    );

    handle_primary_output(opts, &output)?;
    handle_clean_summary(&report, documents, opts)?;

    info!("Doccleaner clean operation completed.");
    Ok(CleanOutcome { documents, report })
}

fn clean_document(cleaner: &DocCleaner, text: &str, opts: &CleanOptions) -> Result<(String, CleanReport)> {
    let mut document = parse_json_document(text, opts.representation)?;
    let report = cleaner.clean(&mut document);
    Ok((render(&document, opts.pretty)?, report))
}

/// JSON Lines: every non-blank line is its own document, output keeps line order.
fn clean_lines(cleaner: &DocCleaner, opts: &CleanOptions) -> Result<(String, usize, CleanReport)> {
    let mut rendered = Vec::new();
    let mut report = CleanReport::new();
    for (lineno, line) in opts.input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let (output, line_report) = clean_document(cleaner, line, opts)
            .with_context(|| format!("Failed to clean input line {}", lineno + 1))?;
        rendered.push(output);
        report.merge(line_report);
    }
    let documents = rendered.len();
    Ok((rendered.join("\n"), documents, report))
}

fn render(document: &Document, pretty: bool) -> Result<String> {
    let value = document.to_json();
    let text = if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    };
    text.context("Failed to serialise cleaned document")
}

fn handle_primary_output(opts: &CleanOptions, output: &str) -> Result<()> {
    if let Some(path) = &opts.output_path {
        if !opts.quiet {
            let _ = output_format::print_info_message(
                &mut io::stderr(),
                &format!("Writing cleaned content to file: {}", path.display()),
                io::stderr().is_terminal(),
            );
        }
        let mut file =
            fs::File::create(path).with_context(|| format!("Failed to create output file: {}", path.display()))?;
        if !output.is_empty() {
            writeln!(file, "{}", output)?;
        }
        if !opts.quiet {
            let _ = output_format::print_success_message(
                &mut io::stderr(),
                "Cleaned content written successfully.",
                io::stderr().is_terminal(),
            );
        }
    } else {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        if !output.is_empty() {
            writeln!(writer, "{}", output)?;
        }
    }
    Ok(())
}

fn handle_clean_summary(report: &CleanReport, documents: usize, opts: &CleanOptions) -> Result<()> {
    if !opts.no_summary && !opts.quiet {
        let stderr_supports_color = io::stderr().is_terminal();
        clean_summary::print_summary(report, documents, &mut io::stderr(), stderr_supports_color)?;
    }
    Ok(())
}
