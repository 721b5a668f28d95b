// doccleaner-core/src/cleaners/builtin.rs
//! The reference cleaners: `set`, `nil` and `date`.
//! License: MIT OR APACHE 2.0

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::cleaner::{CleanerError, ValueCleaner};
use crate::document::{Document, Scalar};

/// Replaces the value with the configured argument, or keeps it when none is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct SetCleaner;

impl ValueCleaner for SetCleaner {
    fn clean(&self, value: &Document, args: &[Document]) -> Result<Document, CleanerError> {
        match args {
            [] => Ok(value.clone()),
            [replacement] => Ok(replacement.clone()),
            _ => Err(CleanerError::Arity {
                cleaner: "set".to_string(),
                expected: "0 or 1".to_string(),
                got: args.len(),
            }),
        }
    }
}

/// Always yields null.
#[derive(Debug, Clone, Copy, Default)]
pub struct NilCleaner;

impl ValueCleaner for NilCleaner {
    fn clean(&self, _value: &Document, _args: &[Document]) -> Result<Document, CleanerError> {
        Ok(Document::null())
    }
}

/// Replaces the value with a date parsed from `[layout, literal]`.
///
/// The layout uses chrono's `strftime` syntax. Layouts carrying an offset are
/// parsed as such; layouts without one are read as UTC, and date-only layouts
/// as midnight UTC. Any arity other than two yields null without an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateCleaner;

impl ValueCleaner for DateCleaner {
    fn clean(&self, _value: &Document, args: &[Document]) -> Result<Document, CleanerError> {
        let [layout, literal] = args else {
            return Ok(Document::null());
        };
        let layout = string_arg(layout, "layout")?;
        let literal = string_arg(literal, "literal")?;
        parse_date(layout, literal).map(|date| Document::Scalar(Scalar::Date(date)))
    }
}

fn string_arg<'a>(arg: &'a Document, what: &str) -> Result<&'a str, CleanerError> {
    arg.as_str().ok_or_else(|| CleanerError::InvalidArgument {
        cleaner: "date".to_string(),
        message: format!("{} must be a string, got {}", what, arg.type_name()),
    })
}

fn parse_date(layout: &str, literal: &str) -> Result<DateTime<FixedOffset>, CleanerError> {
    let with_offset = match DateTime::parse_from_str(literal, layout) {
        Ok(date) => return Ok(date),
        Err(e) => e,
    };
    if let Ok(naive) = NaiveDateTime::parse_from_str(literal, layout) {
        return Ok(Utc.from_utc_datetime(&naive).into());
    }
    if let Ok(day) = NaiveDate::parse_from_str(literal, layout) {
        if let Some(midnight) = day.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&midnight).into());
        }
    }
    Err(CleanerError::DateParse {
        layout: layout.to_string(),
        literal: literal.to_string(),
        source: with_offset,
    })
}
