//! Configuration management for `doccleaner-core`.
//!
//! A configuration is a list of `PathRule`s: a dotted document path, the name
//! of the operation to apply there, and the arguments bound to it. This module
//! reads that list from TOML (one table per quoted path), YAML (a mapping of
//! path to `{method, args}`), or the legacy line format (`path = method`), and
//! provides utilities for validating and merging configs.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use log::{debug, info};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::document::{Document, Scalar};
use crate::errors::DocCleanerError;
use crate::trie::split_path;

/// A single configured path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathRule {
    /// Dotted document path (e.g. `customers.wife.name`).
    pub path: String,
    /// Name of the registered operation.
    pub method: String,
    /// Arguments handed to the operation on every call.
    pub args: Vec<Document>,
}

impl PathRule {
    pub fn new(path: impl Into<String>, method: impl Into<String>, args: Vec<Document>) -> Self {
        Self {
            path: path.into(),
            method: method.into(),
            args,
        }
    }
}

/// The set of rules a `DocCleaner` is built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanerConfig {
    pub rules: Vec<PathRule>,
}

/// On-disk shape of one rule in the TOML and YAML formats.
#[derive(Debug, Deserialize)]
struct MethodEntry<V> {
    method: String,
    #[serde(default = "Vec::new")]
    args: Vec<V>,
}

impl CleanerConfig {
    /// Loads rules from a file, choosing the parser by extension:
    /// `.toml`, `.yaml`/`.yml`, anything else is read as `path = method` lines.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading cleaner configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let config = match extension.as_str() {
            "toml" => Self::from_toml_str(&text),
            "yaml" | "yml" => Self::from_yaml_str(&text),
            _ => Self::from_lines_str(&text),
        }
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.validate()?;
        info!("Loaded {} rule(s) from file {}.", config.rules.len(), path.display());
        Ok(config)
    }

    /// Parses the TOML format:
    ///
    /// ```toml
    /// ["customers.iuc"]
    /// method = "set"
    /// args = ["xxx"]
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let entries: BTreeMap<String, MethodEntry<toml::Value>> =
            toml::from_str(text).context("Invalid TOML cleaner configuration")?;
        let rules = entries
            .into_iter()
            .map(|(path, entry)| {
                let args = entry.args.into_iter().map(toml_to_document).collect();
                PathRule::new(path, entry.method, args)
            })
            .collect::<Vec<_>>();
        debug!("Parsed {} TOML rule(s).", rules.len());
        Ok(Self { rules })
    }

    /// Parses the YAML format:
    ///
    /// ```yaml
    /// customers.iuc:
    ///   method: set
    ///   args: ["xxx"]
    /// ```
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let entries: BTreeMap<String, MethodEntry<serde_yml::Value>> =
            serde_yml::from_str(text).context("Invalid YAML cleaner configuration")?;
        let rules = entries
            .into_iter()
            .map(|(path, entry)| {
                let args = entry.args.into_iter().map(yaml_to_document).collect();
                PathRule::new(path, entry.method, args)
            })
            .collect::<Vec<_>>();
        debug!("Parsed {} YAML rule(s).", rules.len());
        Ok(Self { rules })
    }

    /// Parses `path = method` lines. Blank lines and `#` comments are skipped;
    /// rules keep file order and carry no arguments.
    pub fn from_lines_str(text: &str) -> Result<Self> {
        let mut rules = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (path, method) = line.split_once('=').ok_or_else(|| {
                DocCleanerError::ConfigParse(format!(
                    "line {}: expected 'path = method', got '{}'",
                    lineno + 1,
                    line
                ))
            })?;
            rules.push(PathRule::new(path.trim(), method.trim(), Vec::new()));
        }
        debug!("Parsed {} line rule(s).", rules.len());
        Ok(Self { rules })
    }

    /// Checks every rule up front and reports all problems at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        for rule in &self.rules {
            if let Err(e) = split_path(&rule.path) {
                errors.push(e.to_string());
            }
            if rule.method.trim().is_empty() {
                errors.push(format!("Path '{}' has an empty `method` field.", rule.path));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("Rule validation failed:\n{}", errors.join("\n")))
        }
    }

    /// Configured paths, in rule order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.path.as_str())
    }
}

/// Merges an overlay configuration into a base one.
///
/// Overlay rules replace base rules with the same path in place; new paths are
/// appended in overlay order.
pub fn merge_configs(base: CleanerConfig, overlay: Option<CleanerConfig>) -> CleanerConfig {
    debug!("merge_configs called. Base rules count: {}", base.rules.len());
    let Some(overlay) = overlay else {
        return base;
    };

    let mut rules = base.rules;
    let mut index: HashMap<String, usize> = rules
        .iter()
        .enumerate()
        .map(|(i, r)| (r.path.clone(), i))
        .collect();

    for rule in overlay.rules {
        match index.get(&rule.path) {
            Some(&i) => {
                debug!("Overriding rule for '{}' with '{}'.", rule.path, rule.method);
                rules[i] = rule;
            }
            None => {
                index.insert(rule.path.clone(), rules.len());
                rules.push(rule);
            }
        }
    }

    debug!("Final total rules after merge: {}", rules.len());
    CleanerConfig { rules }
}

fn toml_to_document(value: toml::Value) -> Document {
    match value {
        toml::Value::String(s) => Document::string(s),
        toml::Value::Integer(i) => Document::Scalar(Scalar::Integer(i)),
        toml::Value::Float(x) => Document::Scalar(Scalar::Float(x)),
        toml::Value::Boolean(b) => Document::Scalar(Scalar::Bool(b)),
        toml::Value::Datetime(dt) => toml_datetime_to_document(&dt.to_string()),
        toml::Value::Array(items) => Document::Sequence(items.into_iter().map(toml_to_document).collect()),
        toml::Value::Table(table) => Document::Object(
            table.into_iter().map(|(k, v)| (k, toml_to_document(v))).collect(),
        ),
    }
}

/// TOML datetimes come in four flavours; the ones without an offset are read as UTC
/// and a bare local time stays a string.
fn toml_datetime_to_document(text: &str) -> Document {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Document::Scalar(Scalar::Date(dt));
    }
    for layout in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, layout) {
            return Document::Scalar(Scalar::Date(Utc.from_utc_datetime(&naive).into()));
        }
    }
    if let Some(midnight) = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Document::Scalar(Scalar::Date(Utc.from_utc_datetime(&midnight).into()));
    }
    Document::string(text)
}

fn yaml_to_document(value: serde_yml::Value) -> Document {
    match value {
        serde_yml::Value::Null => Document::null(),
        serde_yml::Value::Bool(b) => Document::Scalar(Scalar::Bool(b)),
        serde_yml::Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => Document::Scalar(Scalar::Integer(i)),
            (None, Some(u)) => Document::Scalar(Scalar::UInt(u)),
            _ => Document::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN))),
        },
        serde_yml::Value::String(s) => Document::string(s),
        serde_yml::Value::Sequence(items) => {
            Document::Sequence(items.into_iter().map(yaml_to_document).collect())
        }
        serde_yml::Value::Mapping(map) => Document::Object(
            map.into_iter()
                .map(|(k, v)| (yaml_key(k), yaml_to_document(v)))
                .collect(),
        ),
        serde_yml::Value::Tagged(tagged) => yaml_to_document(tagged.value),
    }
}

fn yaml_key(key: serde_yml::Value) -> String {
    match key {
        serde_yml::Value::String(s) => s,
        other => serde_yml::to_string(&other)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    }
}
