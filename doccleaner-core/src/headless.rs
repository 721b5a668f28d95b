// doccleaner-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for cleaning JSON text in one call, without managing a
//! `DocCleaner` or the document model yourself.

use anyhow::{Context, Result};
use serde_json::Value;

use crate::cleaner::CleanerRegistry;
use crate::config::CleanerConfig;
use crate::document::Document;
use crate::engine::{DocCleaner, EngineOptions};
use crate::report::CleanReport;

/// How JSON objects are loaded before cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapRepresentation {
    /// Generic string-keyed objects.
    #[default]
    Object,
    /// Database-native ordered maps.
    DocumentMap,
}

/// Parses `input` as JSON into the requested representation.
pub fn parse_json_document(input: &str, representation: MapRepresentation) -> Result<Document> {
    let value: Value = serde_json::from_str(input).context("Input is not valid JSON")?;
    Ok(match representation {
        MapRepresentation::Object => Document::from(value),
        MapRepresentation::DocumentMap => Document::from_json_document_map(value),
    })
}

/// Builds a cleaner from `config`, cleans the JSON document in `input` and
/// returns the re-serialised document with the report.
///
/// Configuration errors (bad paths, unknown operations) are returned as errors;
/// field failures are not, they are in the report.
pub fn headless_clean_json(
    config: &CleanerConfig,
    registry: &CleanerRegistry,
    options: EngineOptions,
    input: &str,
) -> Result<(String, CleanReport)> {
    let cleaner = DocCleaner::from_config(config, registry, options)?;
    let mut document = parse_json_document(input, MapRepresentation::Object)?;
    let report = cleaner.clean(&mut document);
    let output = serde_json::to_string(&document.to_json()).context("Failed to serialise cleaned document")?;
    Ok((output, report))
}
