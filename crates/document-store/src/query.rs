use serde_json::Value;

use crate::Document;

/// Builder for equality queries over one collection.
///
/// Results are ordered by document id.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentQuery {
    /// Collection to search.
    pub collection: String,

    /// Field/value pairs that must all match exactly.
    pub filters: Vec<(String, Value)>,

    /// Maximum number of documents to return.
    pub limit: Option<usize>,
}

impl DocumentQuery {
    /// Creates a query over every document of a collection.
    pub fn collection(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            filters: Vec::new(),
            limit: None,
        }
    }

    /// Requires `field` to equal `value`.
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    /// Limits the number of results.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns true if the document satisfies every filter.
    pub fn matches(&self, document: &Document) -> bool {
        document.path.collection() == self.collection
            && self
                .filters
                .iter()
                .all(|(field, value)| document.get(field) == Some(value))
    }
}
