// doccleaner/src/ui/output_format.rs
//! Coloured status messages on stderr.
//!
//! Colours are only emitted when the caller says the target supports them,
//! so piped and redirected output stays plain.

use owo_colors::{AnsiColors, OwoColorize};
use std::io::{self, Write};

pub(crate) fn paint(text: &str, color: AnsiColors, enable_colors: bool) -> String {
    if enable_colors {
        text.color(color).to_string()
    } else {
        text.to_string()
    }
}

pub fn print_info_message<W: Write>(writer: &mut W, message: &str, enable_colors: bool) -> io::Result<()> {
    writeln!(writer, "{}", paint(message, AnsiColors::Cyan, enable_colors))
}

pub fn print_success_message<W: Write>(writer: &mut W, message: &str, enable_colors: bool) -> io::Result<()> {
    writeln!(writer, "{}", paint(message, AnsiColors::Green, enable_colors))
}

pub fn print_error_message<W: Write>(writer: &mut W, message: &str, enable_colors: bool) -> io::Result<()> {
    writeln!(writer, "{}", paint(message, AnsiColors::Red, enable_colors))
}
