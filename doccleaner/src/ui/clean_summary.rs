// doccleaner/src/ui/clean_summary.rs
//! Prints the per-run summary of a `clean` pass.

use owo_colors::AnsiColors;
use std::io::{self, Write};

use doccleaner_core::CleanReport;

use crate::ui::output_format::paint;

/// Writes counts and every failed field to `writer`.
pub fn print_summary<W: Write>(
    report: &CleanReport,
    documents: usize,
    writer: &mut W,
    enable_colors: bool,
) -> io::Result<()> {
    writeln!(writer, "{}", paint("Clean Summary:", AnsiColors::BrightWhite, enable_colors))?;
    writeln!(writer, "  Documents: {}", documents)?;
    writeln!(
        writer,
        "  Fields cleaned: {}",
        paint(&report.applied.to_string(), AnsiColors::Green, enable_colors)
    )?;

    if report.is_clean() {
        if report.applied == 0 {
            writeln!(writer, "  No configured fields were found in the input.")?;
        }
        return Ok(());
    }

    writeln!(
        writer,
        "  Fields failed: {}",
        paint(&report.failures.len().to_string(), AnsiColors::Red, enable_colors)
    )?;
    for failure in &report.failures {
        let path = failure.field_path().unwrap_or("$");
        writeln!(
            writer,
            "    - {}: {}",
            paint(path, AnsiColors::Yellow, enable_colors),
            failure
        )?;
    }
    Ok(())
}
