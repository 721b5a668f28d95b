// doccleaner-core/src/cleaner.rs
//! Defines the `ValueCleaner` trait, the `Operation` binding and the registry
//! that maps operation names to cleaners.
//!
//! A cleaner is a pure function from the current value plus the arguments
//! captured at configuration time to a replacement value. The registry is built
//! by the host and handed to `DocCleaner::from_config`; after that it is never
//! consulted again, the resolved cleaners live in the trie.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::cleaners::builtin::{DateCleaner, NilCleaner, SetCleaner};
use crate::document::Document;

/// Errors a cleaner can raise for one specific value.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CleanerError {
    #[error("'{cleaner}' expects {expected} argument(s), got {got}")]
    Arity {
        cleaner: String,
        expected: String,
        got: usize,
    },

    #[error("Failed to parse date '{literal}' with layout '{layout}': {source}")]
    DateParse {
        layout: String,
        literal: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Invalid argument for '{cleaner}': {message}")]
    InvalidArgument { cleaner: String, message: String },

    /// Free-form failure for host-supplied cleaners.
    #[error("{0}")]
    Failed(String),
}

/// A trait for pluggable value transformations.
///
/// Implementations must not depend on call order or keep state between calls:
/// they receive the current value and the statically configured arguments and
/// return either the replacement or an error. The value is borrowed, so a
/// failing cleaner leaves it untouched.
pub trait ValueCleaner: Send + Sync + fmt::Debug {
    fn clean(&self, value: &Document, args: &[Document]) -> Result<Document, CleanerError>;
}

/// A cleaner bound to the arguments configured for one path.
#[derive(Clone)]
pub struct Operation {
    name: String,
    cleaner: Arc<dyn ValueCleaner>,
    args: Vec<Document>,
}

impl Operation {
    pub fn new(name: impl Into<String>, cleaner: Arc<dyn ValueCleaner>, args: Vec<Document>) -> Self {
        Self {
            name: name.into(),
            cleaner,
            args,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[Document] {
        &self.args
    }

    /// Invokes the underlying cleaner with the bound arguments.
    pub fn apply(&self, value: &Document) -> Result<Document, CleanerError> {
        self.cleaner.clean(value, &self.args)
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("cleaner", &self.cleaner)
            .field("args", &self.args)
            .finish()
    }
}

/// Name → cleaner mapping supplied by the host.
#[derive(Debug, Clone, Default)]
pub struct CleanerRegistry {
    cleaners: HashMap<String, Arc<dyn ValueCleaner>>,
}

impl CleanerRegistry {
    /// An empty registry. Most hosts want `with_builtins` instead.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding `set`, `nil` and `date`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("set", SetCleaner);
        registry.register("nil", NilCleaner);
        registry.register("date", DateCleaner);
        registry
    }

    /// Registers `cleaner` under `name`, replacing any previous entry.
    pub fn register<C>(&mut self, name: impl Into<String>, cleaner: C) -> &mut Self
    where
        C: ValueCleaner + 'static,
    {
        self.cleaners.insert(name.into(), Arc::new(cleaner));
        self
    }

    /// Registers an already shared cleaner, e.g. one a test wants to inspect afterwards.
    pub fn register_shared(&mut self, name: impl Into<String>, cleaner: Arc<dyn ValueCleaner>) -> &mut Self {
        self.cleaners.insert(name.into(), cleaner);
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ValueCleaner>> {
        self.cleaners.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cleaners.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.cleaners.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
