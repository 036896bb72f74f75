//! View error types.

use common::{TransactionId, Username};
use thiserror::Error;

/// Errors that can occur while reading a view.
#[derive(Debug, Error)]
pub enum ViewError {
    /// An error occurred in the document store.
    #[error("Document store error: {0}")]
    Store(#[from] document_store::DocumentStoreError),

    /// The buyer has no order with this transaction id.
    #[error("Order {transaction_id} not found for {buyer}")]
    OrderNotFound {
        buyer: Username,
        transaction_id: TransactionId,
    },
}

/// Result type for view operations.
pub type Result<T> = std::result::Result<T, ViewError>;
