// doccleaner/src/cleaners.rs
//! Host cleaners the CLI registers on top of the core built-ins.
//!
//! * `mask`: replaces every character of the value's text with `*` (or the
//!   first character of an optional argument).
//! * `hash`: SHA-256 hex digest of the value's text, with an optional salt.
//! * `replace`: regex substitution, `args = [pattern, replacement]`.
//!
//! Null values pass through all three unchanged; objects and sequences are
//! rejected, since a leaf is expected to hold a scalar.
//!
//! License: MIT OR Apache-2.0

use log::debug;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Mutex;

use doccleaner_core::{CleanerError, CleanerRegistry, Document, Scalar, ValueCleaner};

/// Built-ins plus `mask`, `hash` and `replace`.
pub fn host_registry() -> CleanerRegistry {
    let mut registry = CleanerRegistry::with_builtins();
    registry
        .register("mask", MaskCleaner)
        .register("hash", HashCleaner)
        .register("replace", ReplaceCleaner::default());
    registry
}

/// Text form of a scalar, `None` for null.
fn scalar_text<'a>(cleaner: &str, value: &'a Document) -> Result<Option<Cow<'a, str>>, CleanerError> {
    match value.as_scalar() {
        Some(Scalar::Null) => Ok(None),
        Some(Scalar::String(s)) => Ok(Some(Cow::Borrowed(s.as_str()))),
        Some(other) => Ok(Some(Cow::Owned(other.to_string()))),
        None => Err(CleanerError::Failed(format!(
            "'{}' expects a scalar, got {}",
            cleaner,
            value.type_name()
        ))),
    }
}

fn string_arg<'a>(cleaner: &str, arg: &'a Document, what: &str) -> Result<&'a str, CleanerError> {
    arg.as_str().ok_or_else(|| CleanerError::InvalidArgument {
        cleaner: cleaner.to_string(),
        message: format!("{} must be a string, got {}", what, arg.type_name()),
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaskCleaner;

impl ValueCleaner for MaskCleaner {
    fn clean(&self, value: &Document, args: &[Document]) -> Result<Document, CleanerError> {
        let mask = match args {
            [] => '*',
            [arg] => string_arg("mask", arg, "mask character")?
                .chars()
                .next()
                .ok_or_else(|| CleanerError::InvalidArgument {
                    cleaner: "mask".to_string(),
                    message: "mask character must not be empty".to_string(),
                })?,
            _ => {
                return Err(CleanerError::Arity {
                    cleaner: "mask".to_string(),
                    expected: "0 or 1".to_string(),
                    got: args.len(),
                });
            }
        };
        let Some(text) = scalar_text("mask", value)? else {
            return Ok(value.clone());
        };
        Ok(Document::string(std::iter::repeat_n(mask, text.chars().count()).collect::<String>()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HashCleaner;

impl ValueCleaner for HashCleaner {
    fn clean(&self, value: &Document, args: &[Document]) -> Result<Document, CleanerError> {
        let salt = match args {
            [] => "",
            [arg] => string_arg("hash", arg, "salt")?,
            _ => {
                return Err(CleanerError::Arity {
                    cleaner: "hash".to_string(),
                    expected: "0 or 1".to_string(),
                    got: args.len(),
                });
            }
        };
        let Some(text) = scalar_text("hash", value)? else {
            return Ok(value.clone());
        };
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(text.as_bytes());
        Ok(Document::string(hex::encode(hasher.finalize())))
    }
}

/// Compiled patterns are cached by source, since one cleaner serves every path
/// bound to `replace`.
#[derive(Debug, Default)]
pub struct ReplaceCleaner {
    compiled: Mutex<HashMap<String, Regex>>,
}

impl ReplaceCleaner {
    fn regex(&self, pattern: &str) -> Result<Regex, CleanerError> {
        let mut compiled = self
            .compiled
            .lock()
            .map_err(|_| CleanerError::Failed("replace pattern cache is poisoned".to_string()))?;
        if let Some(re) = compiled.get(pattern) {
            return Ok(re.clone());
        }
        let re = Regex::new(pattern).map_err(|e| CleanerError::InvalidArgument {
            cleaner: "replace".to_string(),
            message: format!("invalid pattern '{}': {}", pattern, e),
        })?;
        debug!("Compiled replace pattern '{}'.", pattern);
        compiled.insert(pattern.to_string(), re.clone());
        Ok(re)
    }
}

impl ValueCleaner for ReplaceCleaner {
    fn clean(&self, value: &Document, args: &[Document]) -> Result<Document, CleanerError> {
        let [pattern, replacement] = args else {
            return Err(CleanerError::Arity {
                cleaner: "replace".to_string(),
                expected: "2".to_string(),
                got: args.len(),
            });
        };
        let pattern = string_arg("replace", pattern, "pattern")?;
        let replacement = string_arg("replace", replacement, "replacement")?;
        let Some(text) = scalar_text("replace", value)? else {
            return Ok(value.clone());
        };
        let re = self.regex(pattern)?;
        Ok(Document::string(re.replace_all(&text, replacement).into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn s(v: &str) -> Document {
        Document::from(v)
    }

    #[test]
    fn test_mask_keeps_length() {
        assert_eq!(MaskCleaner.clean(&s("homer"), &[]).unwrap(), s("*****"));
        assert_eq!(MaskCleaner.clean(&s("héllo"), &[s("#")]).unwrap(), s("#####"));
        assert_eq!(MaskCleaner.clean(&Document::from(1234), &[]).unwrap(), s("****"));
        assert!(MaskCleaner.clean(&Document::null(), &[]).unwrap().is_null());
    }

    #[test]
    fn test_mask_rejects_bad_arguments() {
        assert!(matches!(
            MaskCleaner.clean(&s("x"), &[s("")]),
            Err(CleanerError::InvalidArgument { .. })
        ));
        assert!(matches!(
            MaskCleaner.clean(&s("x"), &[s("a"), s("b")]),
            Err(CleanerError::Arity { got: 2, .. })
        ));
        assert!(matches!(
            MaskCleaner.clean(&Document::from(json!({"a": 1})), &[]),
            Err(CleanerError::Failed(_))
        ));
    }

    #[test]
    fn test_hash_is_sha256_hex() {
        // sha256("abc")
        assert_eq!(
            HashCleaner.clean(&s("abc"), &[]).unwrap(),
            s("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
        let salted = HashCleaner.clean(&s("abc"), &[s("pepper")]).unwrap();
        assert_ne!(salted, HashCleaner.clean(&s("abc"), &[]).unwrap());
        assert_eq!(salted.as_str().unwrap().len(), 64);
    }

    #[test]
    fn test_replace_substitutes_every_match() {
        let cleaner = ReplaceCleaner::default();
        let args = [s(r"\d"), s("#")];
        assert_eq!(cleaner.clean(&s("555-0134"), &args).unwrap(), s("###-####"));
        assert_eq!(cleaner.clean(&s("no digits"), &args).unwrap(), s("no digits"));
        assert_eq!(cleaner.compiled.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_replace_reports_bad_patterns_and_arity() {
        let cleaner = ReplaceCleaner::default();
        assert!(matches!(
            cleaner.clean(&s("x"), &[s("("), s("y")]),
            Err(CleanerError::InvalidArgument { .. })
        ));
        assert!(matches!(
            cleaner.clean(&s("x"), &[s("x")]),
            Err(CleanerError::Arity { got: 1, .. })
        ));
    }

    #[test]
    fn test_host_registry_contains_builtins() {
        let registry = host_registry();
        assert_eq!(registry.names(), vec!["date", "hash", "mask", "nil", "replace", "set"]);
    }
}
