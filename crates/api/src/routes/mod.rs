//! HTTP handlers and the state they share.

pub mod checkout;
pub mod health;
pub mod metrics;
pub mod orders;

use ::checkout::{OrderPlacement, StoreProfileReader};
use document_store::DocumentStore;
use views::{PurchaseHistory, SellerDashboard};

/// Shared application state accessible from all handlers.
pub struct AppState<S: DocumentStore> {
    pub placement: OrderPlacement<S, StoreProfileReader<S>>,
    pub history: PurchaseHistory<S>,
    pub dashboard: SellerDashboard<S>,
    pub store: S,
}
