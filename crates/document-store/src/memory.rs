use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Map;
use tokio::sync::RwLock;

use crate::document::apply_decrement;
use crate::{
    DecrementOutcome, Document, DocumentPath, DocumentQuery, DocumentStoreError, Result,
    WriteFields, store::DocumentStore,
};

#[derive(Default)]
struct InMemoryState {
    documents: BTreeMap<DocumentPath, Document>,
    failing_paths: HashSet<DocumentPath>,
    fail_all_writes: bool,
    write_count: u64,
}

impl InMemoryState {
    fn check_writable(&self, path: &DocumentPath) -> Result<()> {
        if self.fail_all_writes || self.failing_paths.contains(path) {
            return Err(DocumentStoreError::Unavailable(format!(
                "write to {path} rejected"
            )));
        }
        Ok(())
    }
}

/// In-memory document store for tests and local runs.
///
/// Each operation holds the store lock for its whole duration, so `update`
/// and `decrement_if_sufficient` are atomic with respect to each other.
/// Writes can be made to fail per document to exercise partial-failure paths.
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    state: Arc<RwLock<InMemoryState>>,
}

impl InMemoryDocumentStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write to `path` fail with `Unavailable`.
    pub async fn fail_writes_to(&self, path: DocumentPath) {
        self.state.write().await.failing_paths.insert(path);
    }

    /// Makes every subsequent write fail with `Unavailable`.
    pub async fn set_fail_all_writes(&self, fail: bool) {
        self.state.write().await.fail_all_writes = fail;
    }

    /// Removes all injected failures.
    pub async fn clear_failures(&self) {
        let mut state = self.state.write().await;
        state.failing_paths.clear();
        state.fail_all_writes = false;
    }

    /// Returns the number of successful mutations since creation.
    pub async fn write_count(&self) -> u64 {
        self.state.read().await.write_count
    }

    /// Returns the total number of documents stored.
    pub async fn document_count(&self) -> usize {
        self.state.read().await.documents.len()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>> {
        Ok(self.state.read().await.documents.get(path).cloned())
    }

    async fn query(&self, query: DocumentQuery) -> Result<Vec<Document>> {
        let state = self.state.read().await;
        let matching = state
            .documents
            .values()
            .filter(|doc| query.matches(doc))
            .cloned();

        let documents: Vec<Document> = match query.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        };
        Ok(documents)
    }

    async fn set(&self, path: &DocumentPath, fields: WriteFields) -> Result<()> {
        let mut state = self.state.write().await;
        state.check_writable(path)?;

        let now = Utc::now();
        let mut data = Map::new();
        fields.apply_to(&mut data, now);
        state.documents.insert(
            path.clone(),
            Document {
                path: path.clone(),
                data,
                updated_at: now,
            },
        );
        state.write_count += 1;
        Ok(())
    }

    async fn create(&self, path: &DocumentPath, fields: WriteFields) -> Result<()> {
        let mut state = self.state.write().await;
        state.check_writable(path)?;

        if state.documents.contains_key(path) {
            return Err(DocumentStoreError::AlreadyExists(path.clone()));
        }

        let now = Utc::now();
        let mut data = Map::new();
        fields.apply_to(&mut data, now);
        state.documents.insert(
            path.clone(),
            Document {
                path: path.clone(),
                data,
                updated_at: now,
            },
        );
        state.write_count += 1;
        Ok(())
    }

    async fn update(&self, path: &DocumentPath, fields: WriteFields) -> Result<()> {
        let mut state = self.state.write().await;
        state.check_writable(path)?;

        let now = Utc::now();
        let doc = state
            .documents
            .get_mut(path)
            .ok_or_else(|| DocumentStoreError::NotFound(path.clone()))?;
        fields.apply_to(&mut doc.data, now);
        doc.updated_at = now;
        state.write_count += 1;
        Ok(())
    }

    async fn delete(&self, path: &DocumentPath) -> Result<()> {
        let mut state = self.state.write().await;
        state.check_writable(path)?;

        if state.documents.remove(path).is_some() {
            state.write_count += 1;
        }
        Ok(())
    }

    async fn decrement_if_sufficient(
        &self,
        path: &DocumentPath,
        field: &str,
        amount: u32,
    ) -> Result<DecrementOutcome> {
        let mut state = self.state.write().await;
        state.check_writable(path)?;

        let doc = state
            .documents
            .get_mut(path)
            .ok_or_else(|| DocumentStoreError::NotFound(path.clone()))?;
        let outcome = apply_decrement(path, &mut doc.data, field, amount)?;
        if let DecrementOutcome::Applied { .. } = outcome {
            doc.updated_at = Utc::now();
            state.write_count += 1;
        }
        Ok(outcome)
    }
}
