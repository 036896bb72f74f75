//! Buyer purchase history.

use common::{TransactionId, Username};
use document_store::{DocumentPath, DocumentStore, DocumentStoreExt};
use domain::collections::BUYER_ORDERS;
use domain::ledger::newest_first;
use domain::{BuyerLedger, Order, OrderStatus};

use crate::{Result, ViewError};

/// Reads a buyer's ledger for the purchases screen.
#[derive(Debug, Clone)]
pub struct PurchaseHistory<S> {
    store: S,
}

impl<S: DocumentStore> PurchaseHistory<S> {
    /// Creates a purchase history reader over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    async fn ledger(&self, buyer: &Username) -> Result<Option<BuyerLedger>> {
        let path = DocumentPath::new(BUYER_ORDERS, buyer.as_str());
        Ok(self.store.get_as::<BuyerLedger>(&path).await?)
    }

    /// Lists the buyer's orders newest first, optionally for one status.
    #[tracing::instrument(skip(self))]
    pub async fn orders(
        &self,
        buyer: &Username,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>> {
        Ok(self
            .ledger(buyer)
            .await?
            .map(|ledger| newest_first(&ledger.orders, status))
            .unwrap_or_default())
    }

    /// Finds one of the buyer's orders.
    #[tracing::instrument(skip(self))]
    pub async fn find(&self, buyer: &Username, transaction_id: &TransactionId) -> Result<Order> {
        self.ledger(buyer)
            .await?
            .and_then(|ledger| ledger.find(transaction_id).cloned())
            .ok_or_else(|| ViewError::OrderNotFound {
                buyer: buyer.clone(),
                transaction_id: transaction_id.clone(),
            })
    }
}
