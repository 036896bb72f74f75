//! Checkout error types.

use common::UserId;
use document_store::DocumentStoreError;
use domain::OrderError;
use thiserror::Error;

/// Notice shown to the buyer when placement fails after validation.
pub const GENERIC_FAILURE: &str = "Failed to place order. Please try again.";

/// Notice shown to a buyer whose profile has no username yet.
pub const USERNAME_REQUIRED: &str = "Set a username on your profile before placing an order";

/// Errors that can occur while placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// No signed-in user.
    #[error("You must be logged in to place an order")]
    NotAuthenticated,

    /// The checkout selection is empty.
    #[error("No items selected for checkout")]
    EmptySelection,

    /// The buyer profile has no username to key the ledger and cart by.
    #[error("User {0} has no username")]
    MissingUsername(UserId),

    /// An item failed validation.
    #[error("Invalid item: {0}")]
    InvalidItem(#[from] OrderError),

    /// A store call failed; writes committed before it are kept.
    #[error("Checkout step '{step}' failed on {target}: {source}")]
    StepFailed {
        step: &'static str,
        target: String,
        #[source]
        source: DocumentStoreError,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CheckoutError {
    /// Wraps a store error raised by `step` while working on `target`.
    pub fn step(step: &'static str, target: impl ToString) -> impl FnOnce(DocumentStoreError) -> Self {
        let target = target.to_string();
        move |source| CheckoutError::StepFailed {
            step,
            target,
            source,
        }
    }

    /// Returns true if the request was refused before anything was written.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            CheckoutError::NotAuthenticated
                | CheckoutError::EmptySelection
                | CheckoutError::MissingUsername(_)
                | CheckoutError::InvalidItem(_)
        )
    }

    /// Returns the step that failed, if any.
    pub fn failed_step(&self) -> Option<&'static str> {
        match self {
            CheckoutError::StepFailed { step, .. } => Some(step),
            _ => None,
        }
    }

    /// Returns the message shown to the buyer.
    ///
    /// Store failures never leak details; they are logged instead.
    pub fn user_message(&self) -> String {
        match self {
            CheckoutError::NotAuthenticated
            | CheckoutError::EmptySelection
            | CheckoutError::InvalidItem(_) => self.to_string(),
            CheckoutError::MissingUsername(_) => USERNAME_REQUIRED.to_string(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

/// Convenience type alias for checkout results.
pub type Result<T> = std::result::Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use document_store::DocumentPath;

    use super::*;

    #[test]
    fn test_precondition_messages() {
        assert_eq!(
            CheckoutError::NotAuthenticated.user_message(),
            "You must be logged in to place an order"
        );
        assert_eq!(
            CheckoutError::EmptySelection.user_message(),
            "No items selected for checkout"
        );
        assert!(CheckoutError::EmptySelection.is_precondition());
    }

    #[test]
    fn test_missing_username_has_its_own_notice() {
        let err = CheckoutError::MissingUsername(UserId::new("uid-7"));
        assert!(err.is_precondition());
        assert_eq!(err.user_message(), USERNAME_REQUIRED);
        assert!(!err.user_message().contains("uid-7"));
    }

    #[test]
    fn test_amount_overflow_is_an_invalid_item() {
        let err = CheckoutError::from(OrderError::AmountOverflow);
        assert!(err.is_precondition());
        assert_eq!(err.user_message(), "Invalid item: Order amount is too large");
    }

    #[test]
    fn test_store_failure_is_generic() {
        let err = CheckoutError::step("buyer_ledger", "orders/juan")(
            DocumentStoreError::NotFound(DocumentPath::new("orders", "juan")),
        );
        assert_eq!(err.user_message(), GENERIC_FAILURE);
        assert_eq!(err.failed_step(), Some("buyer_ledger"));
        assert!(!err.is_precondition());
        assert!(err.to_string().contains("orders/juan"));
    }
}
