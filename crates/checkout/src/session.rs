//! Signed-in session and buyer profile lookup.

use async_trait::async_trait;
use common::UserId;
use document_store::{DocumentPath, DocumentStore, DocumentStoreError, DocumentStoreExt};
use domain::UserProfile;
use domain::collections::USERS;

/// The authenticated user issued by the identity service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub uid: UserId,
}

impl Session {
    /// Creates a session for `uid`.
    pub fn new(uid: impl Into<UserId>) -> Self {
        Self { uid: uid.into() }
    }
}

/// Source of buyer profiles.
#[async_trait]
pub trait ProfileReader: Send + Sync {
    /// Returns the current profile of `uid`, if one exists.
    async fn read_profile(&self, uid: &UserId) -> Result<Option<UserProfile>, DocumentStoreError>;
}

/// Reads profiles from the `users` collection.
#[derive(Debug, Clone)]
pub struct StoreProfileReader<S> {
    store: S,
}

impl<S> StoreProfileReader<S> {
    /// Creates a profile reader over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: DocumentStore> ProfileReader for StoreProfileReader<S> {
    async fn read_profile(&self, uid: &UserId) -> Result<Option<UserProfile>, DocumentStoreError> {
        self.store
            .get_as::<UserProfile>(&DocumentPath::new(USERS, uid.as_str()))
            .await
    }
}
