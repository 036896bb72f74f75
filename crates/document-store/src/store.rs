use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::{DecrementOutcome, Document, DocumentPath, DocumentQuery, Result, WriteFields};

/// Core trait for document store implementations.
///
/// Every operation is a single round trip to the store; no operation spans
/// more than one document. All implementations must be thread-safe.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads one document.
    ///
    /// Returns None if it does not exist.
    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>>;

    /// Returns the documents of a collection matching every filter.
    async fn query(&self, query: DocumentQuery) -> Result<Vec<Document>>;

    /// Creates or replaces a document with exactly the given fields.
    async fn set(&self, path: &DocumentPath, fields: WriteFields) -> Result<()>;

    /// Creates a document, failing with `AlreadyExists` if it is present.
    async fn create(&self, path: &DocumentPath, fields: WriteFields) -> Result<()>;

    /// Merges fields into an existing document.
    ///
    /// Fails with `NotFound` if the document does not exist. The merge is
    /// atomic: array unions from concurrent writers are never lost.
    async fn update(&self, path: &DocumentPath, fields: WriteFields) -> Result<()>;

    /// Deletes a document. Deleting a missing document succeeds.
    async fn delete(&self, path: &DocumentPath) -> Result<()>;

    /// Atomically decrements an integer field if it holds at least `amount`.
    ///
    /// Fails with `NotFound` if the document does not exist and with
    /// `InvalidField` if the field is not an integer.
    async fn decrement_if_sufficient(
        &self,
        path: &DocumentPath,
        field: &str,
        amount: u32,
    ) -> Result<DecrementOutcome>;
}

/// Extension trait providing convenience methods for document stores.
#[async_trait]
pub trait DocumentStoreExt: DocumentStore {
    /// Reads and deserializes one document.
    async fn get_as<T>(&self, path: &DocumentPath) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        match self.get(path).await? {
            Some(doc) => Ok(Some(doc.decode()?)),
            None => Ok(None),
        }
    }

    /// Checks if a document exists.
    async fn exists(&self, path: &DocumentPath) -> Result<bool> {
        Ok(self.get(path).await?.is_some())
    }

    /// Returns the first document matching a query.
    async fn find_one(&self, query: DocumentQuery) -> Result<Option<Document>> {
        Ok(self.query(query.limit(1)).await?.into_iter().next())
    }
}

// Blanket implementation for all DocumentStore implementations
impl<T: DocumentStore + ?Sized> DocumentStoreExt for T {}
