// doccleaner-core/src/document.rs
//! The dynamically-typed document model the traversal engine walks.
//!
//! A document is a closed set of shapes: a generic object, a sequence, a
//! database-native ordered map, or a scalar. The engine dispatches on these
//! variants with exhaustive matches and mutates objects and sequences in place.
//!
//! License: MIT OR APACHE 2.0

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::fmt;

/// A scalar leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    /// Integers above `i64::MAX`, kept exact.
    UInt(u64),
    Float(f64),
    String(String),
    Date(DateTime<FixedOffset>),
}

impl Scalar {
    /// Short name of the variant, used in error messages and logs.
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "bool",
            Scalar::Integer(_) | Scalar::UInt(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::String(_) => "string",
            Scalar::Date(_) => "date",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::UInt(u) => write!(f, "{}", u),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::String(s) => write!(f, "{}", s),
            Scalar::Date(d) => write!(f, "{}", format_date(d)),
        }
    }
}

/// An insertion-ordered map, the shape document databases hand out for a record.
///
/// Keys are unique; `insert` on an existing key replaces the value in place and
/// keeps the original position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentMap {
    entries: Vec<(String, Document)>,
}

impl DocumentMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Document> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Document> {
        self.entries.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Inserts or replaces `key`, returning the previous value if there was one.
    pub fn insert(&mut self, key: impl Into<String>, value: Document) -> Option<Document> {
        let key = key.into();
        match self.get_mut(&key) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Document)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>> FromIterator<(K, Document)> for DocumentMap {
    fn from_iter<I: IntoIterator<Item = (K, Document)>>(iter: I) -> Self {
        let mut map = DocumentMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// A document or any fragment of one.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// Generic string-keyed mapping.
    Object(BTreeMap<String, Document>),
    Sequence(Vec<Document>),
    /// Database-native ordered map. Traversed exactly like `Object`.
    DocumentMap(DocumentMap),
    Scalar(Scalar),
}

impl Default for Document {
    fn default() -> Self {
        Document::Scalar(Scalar::Null)
    }
}

impl Document {
    pub fn null() -> Self {
        Document::Scalar(Scalar::Null)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Document::Scalar(Scalar::String(s.into()))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Document::Scalar(Scalar::Null))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Document::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Document::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Looks up a field on either map representation.
    pub fn get(&self, key: &str) -> Option<&Document> {
        match self {
            Document::Object(map) => map.get(key),
            Document::DocumentMap(map) => map.get(key),
            Document::Sequence(_) | Document::Scalar(_) => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Document::Object(_) => "object",
            Document::Sequence(_) => "sequence",
            Document::DocumentMap(_) => "document-map",
            Document::Scalar(s) => s.type_name(),
        }
    }

    /// Converts a JSON value, turning every JSON object into a `DocumentMap`
    /// instead of a generic `Object`.
    pub fn from_json_document_map(value: Value) -> Self {
        match value {
            Value::Object(map) => Document::DocumentMap(
                map.into_iter()
                    .map(|(k, v)| (k, Document::from_json_document_map(v)))
                    .collect(),
            ),
            Value::Array(items) => Document::Sequence(
                items.into_iter().map(Document::from_json_document_map).collect(),
            ),
            other => Document::from(other),
        }
    }

    /// Renders the document as JSON. Dates become RFC 3339 strings.
    pub fn to_json(&self) -> Value {
        match self {
            Document::Object(map) => Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect::<Map<_, _>>(),
            ),
            Document::DocumentMap(map) => Value::Object(
                map.iter().map(|(k, v)| (k.to_string(), v.to_json())).collect::<Map<_, _>>(),
            ),
            Document::Sequence(items) => Value::Array(items.iter().map(Document::to_json).collect()),
            Document::Scalar(scalar) => match scalar {
                Scalar::Null => Value::Null,
                Scalar::Bool(b) => Value::Bool(*b),
                Scalar::Integer(i) => Value::Number(Number::from(*i)),
                Scalar::UInt(u) => Value::Number(Number::from(*u)),
                Scalar::Float(x) => Number::from_f64(*x).map(Value::Number).unwrap_or(Value::Null),
                Scalar::String(s) => Value::String(s.clone()),
                Scalar::Date(d) => Value::String(format_date(d)),
            },
        }
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Document::Scalar(Scalar::Null),
            Value::Bool(b) => Document::Scalar(Scalar::Bool(b)),
            Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Document::Scalar(Scalar::Integer(i)),
                (None, Some(u)) => Document::Scalar(Scalar::UInt(u)),
                _ => Document::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN))),
            },
            Value::String(s) => Document::Scalar(Scalar::String(s)),
            Value::Array(items) => Document::Sequence(items.into_iter().map(Document::from).collect()),
            Value::Object(map) => Document::Object(
                map.into_iter().map(|(k, v)| (k, Document::from(v))).collect(),
            ),
        }
    }
}

impl From<Scalar> for Document {
    fn from(scalar: Scalar) -> Self {
        Document::Scalar(scalar)
    }
}

impl From<&str> for Document {
    fn from(s: &str) -> Self {
        Document::string(s)
    }
}

impl From<String> for Document {
    fn from(s: String) -> Self {
        Document::string(s)
    }
}

impl From<i64> for Document {
    fn from(i: i64) -> Self {
        Document::Scalar(Scalar::Integer(i))
    }
}

impl From<i32> for Document {
    fn from(i: i32) -> Self {
        Document::Scalar(Scalar::Integer(i64::from(i)))
    }
}

impl From<bool> for Document {
    fn from(b: bool) -> Self {
        Document::Scalar(Scalar::Bool(b))
    }
}

impl From<DateTime<FixedOffset>> for Document {
    fn from(d: DateTime<FixedOffset>) -> Self {
        Document::Scalar(Scalar::Date(d))
    }
}

fn format_date(d: &DateTime<FixedOffset>) -> String {
    d.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_round_trip_keeps_shapes() {
        let input = json!({"a": [1, 2.5, "x", null, true], "b": {"c": "d"}});
        let doc = Document::from(input.clone());
        assert!(matches!(doc, Document::Object(_)));
        assert_eq!(doc.to_json(), input);
    }

    #[test]
    fn document_map_conversion_is_recursive() {
        let doc = Document::from_json_document_map(json!({"a": [{"b": 1}]}));
        let Document::DocumentMap(map) = &doc else {
            panic!("expected a document map, got {}", doc.type_name());
        };
        let Some(Document::Sequence(items)) = map.get("a") else {
            panic!("expected a sequence under 'a'");
        };
        assert!(matches!(items[0], Document::DocumentMap(_)));
        assert_eq!(doc.to_json(), json!({"a": [{"b": 1}]}));
    }

    #[test]
    fn document_map_keeps_insertion_order_on_replace() {
        let mut map = DocumentMap::new();
        map.insert("z", Document::from(1));
        map.insert("a", Document::from(2));
        let previous = map.insert("z", Document::from(3));
        assert_eq!(previous, Some(Document::from(1)));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["z", "a"]);
        assert_eq!(map.get("z"), Some(&Document::from(3)));
    }

    #[test]
    fn document_map_round_trip_keeps_source_key_order() {
        let doc = Document::from_json_document_map(serde_json::from_str(r#"{"z":1,"m":2,"a":3}"#).unwrap());
        assert_eq!(serde_json::to_string(&doc.to_json()).unwrap(), r#"{"z":1,"m":2,"a":3}"#);
    }

    #[test]
    fn dates_render_as_rfc3339_utc() {
        let date = DateTime::parse_from_rfc3339("1979-05-27T07:32:00Z").unwrap();
        assert_eq!(Document::from(date).to_json(), json!("1979-05-27T07:32:00Z"));
    }

    #[test]
    fn integers_above_i64_max_stay_exact() {
        let doc = Document::from(json!({"id": u64::MAX, "neg": i64::MIN}));
        assert_eq!(doc.get("id"), Some(&Document::Scalar(Scalar::UInt(u64::MAX))));
        assert_eq!(
            serde_json::to_string(&doc.to_json()).unwrap(),
            r#"{"id":18446744073709551615,"neg":-9223372036854775808}"#
        );
    }

    #[test]
    fn non_finite_floats_render_as_null() {
        assert_eq!(Document::Scalar(Scalar::Float(f64::NAN)).to_json(), Value::Null);
    }
}
