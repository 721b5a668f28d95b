// doccleaner-core/src/engine.rs
//! The traversal engine: walks a document alongside the path trie and applies
//! the bound operations at the leaves.
//!
//! Dispatch is on the runtime shape of the value. Sequences are cleaned element
//! by element with the same node; both map representations are matched against
//! the node's children by key; scalars only make sense below a node with a
//! single leaf child. Unmatched keys are never visited.
//!
//! A failing operation never aborts the pass. The failure is recorded in the
//! `CleanReport` with the path of the field, the original value stays in place,
//! and traversal continues with the next sibling or element.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, warn};

use crate::cleaner::{CleanerRegistry, Operation};
use crate::config::CleanerConfig;
use crate::document::Document;
use crate::errors::DocCleanerError;
use crate::report::CleanReport;
use crate::trie::{PathTrie, TrieNode};

/// Tunables for the traversal engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Apply the single-leaf scalar fallback at the root too.
    ///
    /// Off by default: a scalar at the top of the document (or a scalar element
    /// of a top-level sequence) has no field name for a path to match, so it is
    /// left alone. Turning this on makes `["a", "b"]` under a lone `leaf1 = set`
    /// rule come out as `[x, x]`.
    pub root_scalar_fallback: bool,
}

/// A compiled cleaner: the path trie plus the engine options.
#[derive(Debug, Clone)]
pub struct DocCleaner {
    trie: PathTrie,
    options: EngineOptions,
}

impl DocCleaner {
    /// Resolves every rule against `registry` and builds the trie.
    ///
    /// Fails on the first malformed path or unknown operation; no document can
    /// be cleaned with a partially loaded configuration.
    pub fn from_config(
        config: &CleanerConfig,
        registry: &CleanerRegistry,
        options: EngineOptions,
    ) -> Result<Self, DocCleanerError> {
        debug!("Building path trie from {} rule(s).", config.rules.len());
        let mut trie = PathTrie::new();
        for rule in &config.rules {
            let cleaner = registry.get(&rule.method).ok_or_else(|| {
                DocCleanerError::UnknownOperation {
                    path: rule.path.clone(),
                    method: rule.method.clone(),
                }
            })?;
            trie.add_path(&rule.path, Operation::new(rule.method.clone(), cleaner, rule.args.clone()))?;
        }
        debug!("Path trie ready with {} leaf path(s).", trie.len());
        Ok(Self::from_trie(trie, options))
    }

    /// Wraps a trie built by hand.
    pub fn from_trie(trie: PathTrie, options: EngineOptions) -> Self {
        Self { trie, options }
    }

    pub fn trie(&self) -> &PathTrie {
        &self.trie
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Cleans `document` in place and reports what happened.
    pub fn clean(&self, document: &mut Document) -> CleanReport {
        let mut report = CleanReport::new();
        self.clean_node(self.trie.root(), document, "", true, &mut report);
        report
    }

    fn clean_node(&self, node: &TrieNode, value: &mut Document, path: &str, at_root: bool, report: &mut CleanReport) {
        match value {
            Document::Sequence(items) => {
                for (i, item) in items.iter_mut().enumerate() {
                    let item_path = format!("{}[{}]", path, i);
                    self.clean_node(node, item, &item_path, at_root, report);
                }
            }
            Document::Object(map) => {
                for child in node.children() {
                    if let Some(field) = map.get_mut(child.segment()) {
                        self.clean_field(child, field, &join(path, child.segment()), report);
                    }
                }
            }
            Document::DocumentMap(map) => {
                for child in node.children() {
                    if let Some(field) = map.get_mut(child.segment()) {
                        self.clean_field(child, field, &join(path, child.segment()), report);
                    }
                }
            }
            Document::Scalar(_) => self.clean_scalar(node, value, path, at_root, report),
        }
    }

    /// A key matched `child`: apply its operation, or descend when it is a branch.
    fn clean_field(&self, child: &TrieNode, field: &mut Document, path: &str, report: &mut CleanReport) {
        match child.operation() {
            Some(operation) => apply(operation, field, path, report),
            None => self.clean_node(child, field, path, false, report),
        }
    }

    fn clean_scalar(&self, node: &TrieNode, value: &mut Document, path: &str, at_root: bool, report: &mut CleanReport) {
        if at_root && !self.options.root_scalar_fallback {
            return;
        }
        match node.children() {
            [] => {}
            [only] => match only.operation() {
                Some(operation) => apply(operation, value, path, report),
                None => debug!("Scalar at '{}' stops above branch '{}'; left as is.", display(path), only.segment()),
            },
            children => {
                let candidates: Vec<String> = children.iter().map(|c| c.segment().to_string()).collect();
                warn!(
                    "Scalar at '{}' is ambiguous between {} configured fields; left as is.",
                    display(path),
                    candidates.len()
                );
                report.record_failure(DocCleanerError::AmbiguousLeaf {
                    path: display(path).to_string(),
                    candidates,
                });
            }
        }
    }
}

/// Runs `operation` on `value`, writing back only on success.
fn apply(operation: &Operation, value: &mut Document, path: &str, report: &mut CleanReport) {
    match operation.apply(value) {
        Ok(cleaned) => {
            report.record_applied(display(path), operation.name(), value, &cleaned);
            *value = cleaned;
        }
        Err(source) => report.record_failure(DocCleanerError::Operation {
            path: display(path).to_string(),
            operation: operation.name().to_string(),
            source,
        }),
    }
}

fn join(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", path, segment)
    }
}

fn display(path: &str) -> &str {
    if path.is_empty() { "$" } else { path }
}
