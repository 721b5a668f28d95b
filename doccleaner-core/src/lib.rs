// doccleaner-core/src/lib.rs
//! # DocCleaner Core Library
//!
//! `doccleaner-core` rewrites selected fields of nested documents according to a
//! declarative configuration: each configured dotted path (`customer.address.zip`)
//! is bound to a named operation with fixed arguments, and only the values found
//! at those paths are replaced. Everything else in the document is left as is.
//!
//! ## Modules
//!
//! * `document`: The `Document` model (objects, sequences, database-native maps, scalars).
//! * `cleaner`: The `ValueCleaner` trait, `Operation` bindings and the `CleanerRegistry`.
//! * `cleaners`: The built-in `set`, `nil` and `date` cleaners.
//! * `trie`: The `PathTrie` built once from every configured path.
//! * `engine`: The `DocCleaner` traversal engine and its `EngineOptions`.
//! * `report`: The `CleanReport` collecting per-field failures.
//! * `config`: Loading `CleanerConfig` from TOML, YAML or `path = method` lines.
//! * `headless`: One-shot helpers for cleaning JSON text.
//! * `errors`: The `DocCleanerError` type.
//!
//! ## Usage Example
//!
//! ```rust
//! use doccleaner_core::{CleanerConfig, CleanerRegistry, DocCleaner, Document, EngineOptions};
//! use anyhow::Result;
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     let config = CleanerConfig::from_toml_str(r#"
//!         ["customers.iuc"]
//!         method = "set"
//!         args = ["xxx"]
//!     "#)?;
//!     let cleaner = DocCleaner::from_config(&config, &CleanerRegistry::with_builtins(), EngineOptions::default())?;
//!
//!     let mut doc = Document::from(json!({"customers": [{"iuc": "1234", "name": "homer"}]}));
//!     let report = cleaner.clean(&mut doc);
//!
//!     assert!(report.is_clean());
//!     assert_eq!(doc.to_json(), json!({"customers": [{"iuc": "xxx", "name": "homer"}]}));
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Configuration problems (`InvalidPath`, `UnknownOperation`) fail
//! `DocCleaner::from_config` before any document is processed. Failures of
//! individual fields during cleaning never abort the pass; they are collected
//! in the returned `CleanReport` and the failed field keeps its original value.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod cleaner;
pub mod cleaners;
pub mod config;
pub mod document;
pub mod engine;
pub mod errors;
pub mod headless;
pub mod report;
pub mod trie;

pub use cleaner::{CleanerError, CleanerRegistry, Operation, ValueCleaner};
pub use cleaners::builtin::{DateCleaner, NilCleaner, SetCleaner};
pub use config::{merge_configs, CleanerConfig, PathRule};
pub use document::{Document, DocumentMap, Scalar};
pub use engine::{DocCleaner, EngineOptions};
pub use errors::DocCleanerError;
pub use headless::{headless_clean_json, parse_json_document, MapRepresentation};
pub use report::{redact_value, CleanReport};
pub use trie::{PathTrie, TrieNode};
