//! Document store used by the storefront.
//!
//! Documents are JSON objects addressed by `collection/id`. Writes are
//! expressed as [`WriteFields`], which may carry server-resolved values
//! ([`FieldValue::ServerTimestamp`]) and atomic array appends
//! ([`FieldValue::ArrayUnion`]).

pub mod document;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod query;
pub mod store;

pub use document::{
    DecrementOutcome, Document, DocumentPath, FieldValue, WriteFields, format_timestamp,
};
pub use error::{DocumentStoreError, Result};
pub use memory::InMemoryDocumentStore;
pub use postgres::PostgresDocumentStore;
pub use query::DocumentQuery;
pub use store::{DocumentStore, DocumentStoreExt};
