use thiserror::Error;

use crate::DocumentPath;

/// Errors that can occur when interacting with the document store.
#[derive(Debug, Error)]
pub enum DocumentStoreError {
    /// The document does not exist.
    #[error("Document not found: {0}")]
    NotFound(DocumentPath),

    /// A create was attempted on a document that already exists.
    #[error("Document already exists: {0}")]
    AlreadyExists(DocumentPath),

    /// A field did not hold the kind of value the operation needs.
    #[error("Invalid field '{field}' on {path}: {reason}")]
    InvalidField {
        path: DocumentPath,
        field: String,
        reason: String,
    },

    /// Stored data is not a JSON object.
    #[error("Corrupt document {0}: stored data is not an object")]
    Corrupt(DocumentPath),

    /// The store rejected or could not complete the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for document store operations.
pub type Result<T> = std::result::Result<T, DocumentStoreError>;
