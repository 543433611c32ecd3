//! Structured documents and their canonical byte form.
//!
//! A `Document` is a flat JSON object whose top-level fields keep their
//! insertion order.  The canonical bytes of a document are its compact
//! `serde_json` serialization: no whitespace, fields in document order.
//! Signatures are computed over exactly these bytes, so every edit
//! below must leave untouched fields byte-identical.
//!
//! Numbers keep their source text (`arbitrary_precision`), so a float or
//! an integer wider than `u64` re-serializes exactly as it was parsed.

use std::fmt;

use serde::de::{self, DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::errors::{Result, VaultError};

/// Field name reserved for the embedded signature.
pub const SIGNATURE_FIELD: &str = "signature";

/// An ordered mapping of unique field names to JSON values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    fields: Map<String, Value>,
}

impl Document {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Parse serialized bytes into a document.
    ///
    /// Fails with `MalformedDocument` if the bytes are not a JSON object
    /// or repeat a top-level field name.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| VaultError::MalformedDocument(e.to_string()))
    }

    /// Convert a serializable value into a document.
    ///
    /// The value must serialize to a JSON object.
    pub fn from_serializable<T: Serialize + ?Sized>(data: &T) -> Result<Self> {
        match serde_json::to_value(data) {
            Ok(Value::Object(fields)) => Ok(Self { fields }),
            Ok(other) => Err(VaultError::SerializationError(format!(
                "expected an object at the top level, got {}",
                value_kind(&other)
            ))),
            Err(e) => Err(VaultError::SerializationError(e.to_string())),
        }
    }

    /// Convert the document into a typed value.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T> {
        serde_json::from_value(Value::Object(self.fields))
            .map_err(|e| VaultError::DeserializationError(e.to_string()))
    }

    // ------------------------------------------------------------------
    // Field editing
    // ------------------------------------------------------------------

    /// Set `name` to `value`.
    ///
    /// An existing field keeps its position; a new field is appended last.
    pub fn with_field(mut self, name: &str, value: Value) -> Self {
        // IndexMap::insert replaces in place for existing keys.
        self.fields.insert(name.to_string(), value);
        self
    }

    /// Remove `name` if present, preserving the order of the remaining fields.
    pub fn without_field(mut self, name: &str) -> Self {
        // `remove` would swap the last field into the hole.
        self.fields.shift_remove(name);
        self
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Field names in document order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Serialize to canonical bytes (compact JSON, document order).
    pub fn to_canonical_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(&self.fields).map_err(|e| VaultError::SerializationError(e.to_string()))
    }

    /// Serialize to indented JSON for display. Not canonical.
    pub fn to_pretty_string(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.fields)
            .map_err(|e| VaultError::SerializationError(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Byte-level editing
// ---------------------------------------------------------------------------

/// Rewrite `bytes` with `name` set to `value`, returning canonical bytes.
pub fn with_field(bytes: &[u8], name: &str, value: Value) -> Result<Vec<u8>> {
    validate_field_name(name)?;
    Document::parse(bytes)?
        .with_field(name, value)
        .to_canonical_bytes()
}

/// Rewrite `bytes` without `name`, returning canonical bytes.
///
/// A missing field is not an error.
pub fn without_field(bytes: &[u8], name: &str) -> Result<Vec<u8>> {
    validate_field_name(name)?;
    Document::parse(bytes)?.without_field(name).to_canonical_bytes()
}

fn validate_field_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(VaultError::InvalidName("field name cannot be empty".into()));
    }
    Ok(())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Serde
// ---------------------------------------------------------------------------

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(DocumentVisitor)
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Document;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object with unique field names")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Document, A::Error> {
        let mut fields = Map::new();
        while let Some((name, value)) = access.next_entry::<String, Value>()? {
            if fields.contains_key(&name) {
                return Err(de::Error::custom(format!("duplicate field `{name}`")));
            }
            fields.insert(name, value);
        }
        Ok(Document { fields })
    }
}
