//! errors.rs - Custom error types for the doccleaner-core library.
//!
//! Configuration-time variants (`InvalidPath`, `UnknownOperation`, `ConfigParse`)
//! are fatal and surface before any document is touched. Traversal-time variants
//! (`Operation`, `AmbiguousLeaf`) are local to one field and are collected in a
//! `CleanReport` instead of aborting the pass.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

use crate::cleaner::CleanerError;

/// This enum represents all possible error types in the `doccleaner-core` library.
///
/// New variants may be added in future versions, hence `#[non_exhaustive]`.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DocCleanerError {
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Path '{path}' references unknown operation '{method}'")]
    UnknownOperation { path: String, method: String },

    #[error("Operation '{operation}' failed at '{path}': {source}")]
    Operation {
        path: String,
        operation: String,
        #[source]
        source: CleanerError,
    },

    #[error("Scalar at '{path}' reached a node with several candidate leaves ({})", .candidates.join(", "))]
    AmbiguousLeaf { path: String, candidates: Vec<String> },

    #[error("{count} field(s) could not be cleaned; last failure: {last}")]
    FieldFailures {
        count: usize,
        last: Box<DocCleanerError>,
    },

    #[error("Failed to parse cleaner configuration: {0}")]
    ConfigParse(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),
}

impl DocCleanerError {
    /// True for the errors that stop configuration loading.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            DocCleanerError::InvalidPath { .. }
                | DocCleanerError::UnknownOperation { .. }
                | DocCleanerError::ConfigParse(_)
        )
    }

    /// The document path a traversal failure is attached to.
    pub fn field_path(&self) -> Option<&str> {
        match self {
            DocCleanerError::Operation { path, .. } | DocCleanerError::AmbiguousLeaf { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }
}
