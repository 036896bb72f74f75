//! Seller dashboard: order counts and per-status tabs.

use common::Username;
use document_store::{DocumentPath, DocumentStore, DocumentStoreExt};
use domain::collections::SELLER_ORDERS;
use domain::ledger::newest_first;
use domain::{Order, OrderStatus, SellerLedger};
use serde::Serialize;

use crate::Result;

/// Number of a seller's orders in each dashboard status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub upcoming: usize,
    pub to_ship: usize,
    pub shipped: usize,
}

impl StatusCounts {
    /// Counts the orders of a seller ledger.
    pub fn of(ledger: &SellerLedger) -> Self {
        Self {
            upcoming: ledger.count_with_status(OrderStatus::Upcoming),
            to_ship: ledger.count_with_status(OrderStatus::ToShip),
            shipped: ledger.count_with_status(OrderStatus::Shipped),
        }
    }
}

/// Reads a seller's ledger for the shop dashboard.
#[derive(Debug, Clone)]
pub struct SellerDashboard<S> {
    store: S,
}

impl<S: DocumentStore> SellerDashboard<S> {
    /// Creates a dashboard reader over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the seller's ledger; a seller without orders has an empty one.
    pub async fn ledger(&self, seller: &Username) -> Result<SellerLedger> {
        let path = DocumentPath::new(SELLER_ORDERS, seller.as_str());
        Ok(self
            .store
            .get_as::<SellerLedger>(&path)
            .await?
            .unwrap_or_default())
    }

    /// Counts the seller's orders by status.
    #[tracing::instrument(skip(self))]
    pub async fn order_counts(&self, seller: &Username) -> Result<StatusCounts> {
        Ok(StatusCounts::of(&self.ledger(seller).await?))
    }

    /// Lists the seller's orders newest first, optionally for one status.
    #[tracing::instrument(skip(self))]
    pub async fn orders(
        &self,
        seller: &Username,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>> {
        let ledger = self.ledger(seller).await?;
        Ok(newest_first(&ledger.orders, status))
    }
}

#[cfg(test)]
mod tests {
    use document_store::InMemoryDocumentStore;

    use super::*;

    #[tokio::test]
    async fn seller_without_ledger_has_zero_counts() {
        let dashboard = SellerDashboard::new(InMemoryDocumentStore::new());
        let counts = dashboard.order_counts(&Username::new("ana")).await.unwrap();
        assert_eq!(counts, StatusCounts::default());
        assert!(
            dashboard
                .orders(&Username::new("ana"), None)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn counts_serialize_camel_case() {
        let counts = StatusCounts {
            upcoming: 2,
            to_ship: 1,
            shipped: 0,
        };
        assert_eq!(
            serde_json::to_value(counts).unwrap(),
            serde_json::json!({"upcoming": 2, "toShip": 1, "shipped": 0})
        );
    }
}
