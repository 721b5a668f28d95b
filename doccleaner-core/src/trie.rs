// doccleaner-core/src/trie.rs
//! The path trie: one node per dotted-path segment, leaves bound to an `Operation`.
//!
//! The trie is built once from the whole configuration and is read-only
//! afterwards. Sibling lookup is by name, so the final shape does not depend on
//! the order paths were registered in.
//!
//! A node can be a leaf and have children at the same time (`a` and `a.b` both
//! configured). The leaf wins: traversal applies the operation to the whole
//! value under `a` and never descends into it. Registering `a` after `a.b`
//! binds the operation to the existing branch, so both registration orders
//! produce the same effect.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, warn};

use crate::cleaner::Operation;
use crate::errors::DocCleanerError;

/// Segment name given to the synthetic root.
pub const ROOT_SEGMENT: &str = "root";

/// One segment of a configured path.
#[derive(Debug, Clone)]
pub struct TrieNode {
    segment: String,
    operation: Option<Operation>,
    children: Vec<TrieNode>,
}

impl TrieNode {
    fn new(segment: impl Into<String>) -> Self {
        Self {
            segment: segment.into(),
            operation: None,
            children: Vec::new(),
        }
    }

    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// True iff this node terminates a configured path.
    pub fn is_leaf(&self) -> bool {
        self.operation.is_some()
    }

    pub fn operation(&self) -> Option<&Operation> {
        self.operation.as_ref()
    }

    pub fn children(&self) -> &[TrieNode] {
        &self.children
    }

    pub fn child(&self, segment: &str) -> Option<&TrieNode> {
        self.children.iter().find(|c| c.segment == segment)
    }

    fn child_index(&self, segment: &str) -> Option<usize> {
        self.children.iter().position(|c| c.segment == segment)
    }

    /// Returns the child named `segment`, creating a branch node when missing.
    fn child_or_insert(&mut self, segment: &str) -> &mut TrieNode {
        let idx = match self.child_index(segment) {
            Some(idx) => idx,
            None => {
                self.children.push(TrieNode::new(segment));
                self.children.len() - 1
            }
        };
        &mut self.children[idx]
    }
}

/// The trie of every configured path, rooted at a synthetic node.
#[derive(Debug, Clone)]
pub struct PathTrie {
    root: TrieNode,
}

impl Default for PathTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl PathTrie {
    pub fn new() -> Self {
        Self {
            root: TrieNode::new(ROOT_SEGMENT),
        }
    }

    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Registers `dotted_path` with `operation` and returns the leaf node.
    ///
    /// Registering a path that already ends on a leaf is a silent no-op: the
    /// first registration wins and the existing node is returned unchanged.
    pub fn add_path(&mut self, dotted_path: &str, operation: Operation) -> Result<&TrieNode, DocCleanerError> {
        let segments = split_path(dotted_path)?;
        let (last, parents) = segments
            .split_last()
            .ok_or_else(|| invalid(dotted_path, "path is empty"))?;

        let mut current = &mut self.root;
        for segment in parents {
            if current.is_leaf() {
                warn!(
                    "Path '{}' is shadowed: '{}' is already bound to '{}'.",
                    dotted_path,
                    current.segment,
                    current.operation.as_ref().map(Operation::name).unwrap_or_default()
                );
            }
            current = current.child_or_insert(segment);
        }

        let node = current.child_or_insert(last);
        match &node.operation {
            Some(existing) => {
                debug!(
                    "Ignoring duplicate registration of '{}' with '{}'; keeping '{}'.",
                    dotted_path,
                    operation.name(),
                    existing.name()
                );
            }
            None => {
                if !node.children.is_empty() {
                    warn!(
                        "Leaf '{}' shadows {} longer path(s) configured below it.",
                        dotted_path,
                        node.children.len()
                    );
                }
                debug!("Bound '{}' to operation '{}'.", dotted_path, operation.name());
                node.operation = Some(operation);
            }
        }
        Ok(node)
    }

    /// Finds the node for `dotted_path`, leaf or branch.
    pub fn find(&self, dotted_path: &str) -> Option<&TrieNode> {
        let segments = split_path(dotted_path).ok()?;
        segments
            .iter()
            .try_fold(&self.root, |node, segment| node.child(segment))
    }

    /// Every configured path with its node, depth-first in insertion order.
    pub fn leaf_paths(&self) -> Vec<(String, &TrieNode)> {
        let mut out = Vec::new();
        for child in &self.root.children {
            collect_leaves(child, child.segment.clone(), &mut out);
        }
        out
    }

    /// Number of configured leaves.
    pub fn len(&self) -> usize {
        self.leaf_paths().len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }
}

fn collect_leaves<'a>(node: &'a TrieNode, path: String, out: &mut Vec<(String, &'a TrieNode)>) {
    if node.is_leaf() {
        out.push((path.clone(), node));
    }
    for child in &node.children {
        collect_leaves(child, format!("{}.{}", path, child.segment), out);
    }
}

/// Splits a dotted path, rejecting empty paths and empty or blank segments.
///
/// Segments are taken verbatim: `"a. b"` addresses a key named `" b"`, so keys
/// with surrounding spaces can be targeted.
pub fn split_path(dotted_path: &str) -> Result<Vec<&str>, DocCleanerError> {
    if dotted_path.trim().is_empty() {
        return Err(invalid(dotted_path, "path is empty"));
    }
    let segments: Vec<&str> = dotted_path.split('.').collect();
    if segments.iter().any(|s| s.trim().is_empty()) {
        return Err(invalid(dotted_path, "path contains an empty segment"));
    }
    Ok(segments)
}

fn invalid(path: &str, reason: &str) -> DocCleanerError {
    DocCleanerError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}
