//! Configuration document model.
//!
//! A document is an ordered mapping from section names to values. Sections
//! are flat: a section never contains another section.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Number;
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Root key holding document metadata rather than a section.
pub const NAMESPACE_KEY: &str = "namespace";

/// A flat, ordered mapping of field keys to values.
pub type Section = IndexMap<String, Value>;

/// Document errors.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Document root must be a JSON object")]
    NotAnObject,
    #[error("Unsupported value at `{path}`: {reason}")]
    Unsupported { path: String, reason: &'static str },
    #[error("Update path is empty")]
    EmptyPath,
    #[error("Update path `{0}` is deeper than section/field")]
    PathTooDeep(String),
}

fn unsupported(path: &str, reason: &'static str) -> DocumentError {
    DocumentError::Unsupported {
        path: path.to_string(),
        reason,
    }
}

/// A document value. Exactly one of the five kinds a configuration can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Number(Number),
    Text(String),
    /// Two numbers, used for offsets, positions and sizes.
    Pair([Number; 2]),
    /// Only legal directly under the document root.
    Section(Section),
}

impl Value {
    /// Create a pair of integers.
    pub fn pair(x: i64, y: i64) -> Self {
        Value::Pair([Number::from(x), Number::from(y)])
    }

    /// Create a number value from a float. Returns `None` for NaN or infinity.
    pub fn from_f64(value: f64) -> Option<Self> {
        Number::from_f64(value).map(Value::Number)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Both components of a pair as floats.
    pub fn as_pair(&self) -> Option<(f64, f64)> {
        match self {
            Value::Pair([x, y]) => Some((x.as_f64()?, y.as_f64()?)),
            _ => None,
        }
    }

    pub fn as_section(&self) -> Option<&Section> {
        match self {
            Value::Section(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn is_section(&self) -> bool {
        matches!(self, Value::Section(_))
    }

    /// Convert a JSON value found inside a section.
    fn from_json_field(path: &str, json: JsonValue) -> Result<Self, DocumentError> {
        match json {
            JsonValue::Bool(b) => Ok(Value::Bool(b)),
            JsonValue::Number(n) => Ok(Value::Number(n)),
            JsonValue::String(s) => Ok(Value::Text(s)),
            JsonValue::Array(items) => {
                let [x, y]: [JsonValue; 2] = items
                    .try_into()
                    .map_err(|_| unsupported(path, "arrays must hold exactly two numbers"))?;
                match (x, y) {
                    (JsonValue::Number(x), JsonValue::Number(y)) => Ok(Value::Pair([x, y])),
                    _ => Err(unsupported(path, "arrays must hold exactly two numbers")),
                }
            }
            JsonValue::Null => Err(unsupported(path, "null is not a configuration value")),
            JsonValue::Object(_) => Err(unsupported(path, "sections cannot be nested")),
        }
    }

    /// Convert a JSON value found directly under the document root.
    fn from_json_root(path: &str, json: JsonValue) -> Result<Self, DocumentError> {
        match json {
            JsonValue::Object(map) => {
                let mut fields = Section::with_capacity(map.len());
                for (key, value) in map {
                    let field_path = format!("{path}/{key}");
                    fields.insert(key, Value::from_json_field(&field_path, value)?);
                }
                Ok(Value::Section(fields))
            }
            other => Value::from_json_field(path, other),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Pair(pair) => pair.serialize(serializer),
            Value::Section(fields) => fields.serialize(serializer),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Section> for Value {
    fn from(value: Section) -> Self {
        Value::Section(value)
    }
}

/// A configuration document: sections plus the `namespace` metadata key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Document {
    entries: IndexMap<String, Value>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document from JSON text.
    ///
    /// Anything that is not one of the five value kinds is rejected with
    /// the path of the offending entry.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let parsed: JsonValue = serde_json::from_str(json)?;
        let JsonValue::Object(map) = parsed else {
            return Err(DocumentError::NotAnObject);
        };

        let mut entries = IndexMap::with_capacity(map.len());
        for (key, value) in map {
            let value = Value::from_json_root(&key, value)?;
            entries.insert(key, value);
        }
        Ok(Self { entries })
    }

    /// Serialize the document to compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize the document to pretty-printed JSON (two-space indent).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Get a root entry.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Get a section by name.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.entries.get(name).and_then(Value::as_section)
    }

    /// Get one field of a section.
    pub fn field(&self, section: &str, key: &str) -> Option<&Value> {
        self.section(section).and_then(|fields| fields.get(key))
    }

    /// The namespace metadata value, if present.
    pub fn namespace(&self) -> Option<&Value> {
        self.entries.get(NAMESPACE_KEY)
    }

    /// Sections in document order, excluding the namespace key.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.entries
            .iter()
            .filter(|(key, _)| key.as_str() != NAMESPACE_KEY)
            .filter_map(|(key, value)| value.as_section().map(|fields| (key.as_str(), fields)))
    }

    /// Names of all sections in document order.
    pub fn section_names(&self) -> Vec<String> {
        self.sections().map(|(name, _)| name.to_string()).collect()
    }

    /// Set the value at `path`.
    ///
    /// A one-element path addresses a root entry; a two-element path
    /// addresses a field inside a section, creating the section if absent
    /// and replacing a non-section entry with an empty section.
    pub fn set(&mut self, path: &[&str], value: Value) -> Result<(), DocumentError> {
        match path {
            [] => Err(DocumentError::EmptyPath),
            [key] => {
                if let Value::Section(fields) = &value {
                    if let Some((field, _)) = fields.iter().find(|(_, v)| v.is_section()) {
                        return Err(unsupported(
                            &format!("{key}/{field}"),
                            "sections cannot be nested",
                        ));
                    }
                }
                self.entries.insert(key.to_string(), value);
                Ok(())
            }
            [section, key] => {
                if value.is_section() {
                    return Err(unsupported(
                        &format!("{section}/{key}"),
                        "sections cannot be nested",
                    ));
                }
                let entry = self
                    .entries
                    .entry(section.to_string())
                    .or_insert_with(|| Value::Section(Section::new()));
                if !entry.is_section() {
                    *entry = Value::Section(Section::new());
                }
                if let Value::Section(fields) = entry {
                    fields.insert(key.to_string(), value);
                }
                Ok(())
            }
            _ => Err(DocumentError::PathTooDeep(path.join("/"))),
        }
    }

    /// Check if the document has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of root entries, including the namespace key.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
