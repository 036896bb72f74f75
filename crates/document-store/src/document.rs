use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{DocumentStoreError, Result};

/// Address of a document: a collection name and a document id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentPath {
    collection: String,
    id: String,
}

impl DocumentPath {
    /// Creates a path to `collection/id`.
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Returns the collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns the document id within its collection.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl std::fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

/// Formats a timestamp the way server-resolved timestamps are stored.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Value written to a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Replace the field with this value.
    Value(Value),

    /// Replace the field with the store's clock at commit time.
    ServerTimestamp,

    /// Append each element that the array does not already contain.
    ///
    /// A missing or non-array field is treated as an empty array.
    ArrayUnion(Vec<Value>),
}

/// A set of field writes applied to one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteFields {
    fields: BTreeMap<String, FieldValue>,
}

impl WriteFields {
    /// Creates an empty write.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a plain JSON value.
    pub fn value(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields
            .insert(field.into(), FieldValue::Value(value.into()));
        self
    }

    /// Writes any serializable value.
    pub fn serialized<T: Serialize + ?Sized>(
        self,
        field: impl Into<String>,
        value: &T,
    ) -> Result<Self> {
        Ok(self.value(field, serde_json::to_value(value)?))
    }

    /// Writes the store's commit timestamp.
    pub fn server_timestamp(mut self, field: impl Into<String>) -> Self {
        self.fields.insert(field.into(), FieldValue::ServerTimestamp);
        self
    }

    /// Appends elements to an array field.
    pub fn array_union(mut self, field: impl Into<String>, elements: Vec<Value>) -> Self {
        self.fields
            .insert(field.into(), FieldValue::ArrayUnion(elements));
        self
    }

    /// Returns true if no field is written.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the pending write for a field.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Applies the writes to `data`, resolving server values with `now`.
    pub(crate) fn apply_to(&self, data: &mut Map<String, Value>, now: DateTime<Utc>) {
        for (field, value) in &self.fields {
            match value {
                FieldValue::Value(v) => {
                    data.insert(field.clone(), v.clone());
                }
                FieldValue::ServerTimestamp => {
                    data.insert(field.clone(), Value::String(format_timestamp(now)));
                }
                FieldValue::ArrayUnion(elements) => {
                    let mut array = match data.remove(field) {
                        Some(Value::Array(existing)) => existing,
                        _ => Vec::new(),
                    };
                    for element in elements {
                        if !array.contains(element) {
                            array.push(element.clone());
                        }
                    }
                    data.insert(field.clone(), Value::Array(array));
                }
            }
        }
    }
}

/// A stored document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub path: DocumentPath,
    pub data: Map<String, Value>,
    /// Commit time of the last write.
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Returns a field of the document.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    /// Deserializes the document body.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(Value::Object(self.data.clone()))?)
    }
}

/// Result of a conditional decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecrementOutcome {
    /// The field was decremented.
    Applied { remaining: i64 },

    /// The field held less than requested and was left unchanged.
    Insufficient { available: i64 },
}

/// Decrements an integer field unless that would take it below zero.
pub(crate) fn apply_decrement(
    path: &DocumentPath,
    data: &mut Map<String, Value>,
    field: &str,
    amount: u32,
) -> Result<DecrementOutcome> {
    let current = data
        .get(field)
        .and_then(Value::as_i64)
        .ok_or_else(|| DocumentStoreError::InvalidField {
            path: path.clone(),
            field: field.to_string(),
            reason: "expected an integer".to_string(),
        })?;

    let amount = i64::from(amount);
    if current < amount {
        return Ok(DecrementOutcome::Insufficient { available: current });
    }

    let remaining = current - amount;
    data.insert(field.to_string(), Value::from(remaining));
    Ok(DecrementOutcome::Applied { remaining })
}

/// Converts a stored JSON value into a document body.
pub(crate) fn into_object(path: &DocumentPath, value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(DocumentStoreError::Corrupt(path.clone())),
    }
}
