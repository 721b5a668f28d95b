//! Provides the per-document report produced by a cleaning pass, plus the
//! helpers that keep original field values out of debug logs.
//!
//! Traversal failures are collected here rather than aborting the pass: every
//! configured field that could be cleaned is cleaned, and the report says which
//! ones could not.

use lazy_static::lazy_static;
use log::debug;

use crate::document::Document;
use crate::errors::DocCleanerError;

lazy_static! {
    /// Whether original values may appear in debug logs. Off unless
    /// `DOCCLEANER_ALLOW_DEBUG_VALUES=true`.
    static ref VALUE_DEBUG_ALLOWED: bool = {
        std::env::var("DOCCLEANER_ALLOW_DEBUG_VALUES")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// Outcome of cleaning one document.
#[derive(Debug, Default)]
pub struct CleanReport {
    /// Number of leaf operations that succeeded and were written back.
    pub applied: usize,
    /// Traversal failures in the order they were met.
    pub failures: Vec<DocCleanerError>,
}

impl CleanReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no field failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// The last failure seen, if any.
    pub fn last_error(&self) -> Option<&DocCleanerError> {
        self.failures.last()
    }

    /// Paths of every failed field.
    pub fn failed_paths(&self) -> Vec<&str> {
        self.failures.iter().filter_map(DocCleanerError::field_path).collect()
    }

    /// Folds another report in, e.g. when cleaning a batch of documents.
    pub fn merge(&mut self, other: CleanReport) {
        self.applied += other.applied;
        self.failures.extend(other.failures);
    }

    /// `Ok(applied)` for a clean pass, `Err(FieldFailures)` carrying the last
    /// failure otherwise.
    pub fn into_result(mut self) -> Result<usize, DocCleanerError> {
        match self.failures.pop() {
            None => Ok(self.applied),
            Some(last) => Err(DocCleanerError::FieldFailures {
                count: self.failures.len() + 1,
                last: Box::new(last),
            }),
        }
    }

    pub(crate) fn record_applied(&mut self, path: &str, operation: &str, before: &Document, after: &Document) {
        self.applied += 1;
        debug!(
            "Cleaned '{}' with '{}': {} -> {}",
            path,
            operation,
            loggable_value(before),
            loggable_value(after)
        );
    }

    pub(crate) fn record_failure(&mut self, failure: DocCleanerError) {
        debug!("Field left untouched: {}", failure);
        self.failures.push(failure);
    }
}

/// Placeholder for a value that must not be logged verbatim.
pub fn redact_value(value: &Document) -> String {
    match value.as_str() {
        Some(s) if s.chars().count() > 8 => format!("[REDACTED {}: {} chars]", value.type_name(), s.chars().count()),
        _ => format!("[REDACTED {}]", value.type_name()),
    }
}

fn loggable_value(value: &Document) -> String {
    if *VALUE_DEBUG_ALLOWED {
        value.to_json().to_string()
    } else {
        redact_value(value)
    }
}
