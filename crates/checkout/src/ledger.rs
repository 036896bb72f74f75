//! Buyer and seller order ledgers.

use common::Username;
use document_store::{DocumentPath, DocumentStore, DocumentStoreError, WriteFields};
use domain::collections::{
    BUYER_ORDERS, CREATED_AT_FIELD, ORDERS_FIELD, SELLER_ORDERS, UPDATED_AT_FIELD,
};
use domain::{Order, SellerPartition};
use serde_json::Value;

use crate::error::{CheckoutError, Result};
use crate::steps::{STEP_BUYER_LEDGER, STEP_SELLER_LEDGER};

/// How an order reached a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerWrite {
    /// The ledger did not exist and was created holding the order.
    Created,
    /// The order was appended to an existing ledger.
    Appended,
}

/// Appends placed orders to the buyer and seller ledgers.
#[derive(Debug, Clone)]
pub struct LedgerWriter<S> {
    store: S,
}

impl<S: DocumentStore> LedgerWriter<S> {
    /// Creates a ledger writer over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Appends `order` to `orders/{buyer}`.
    #[tracing::instrument(skip(self, order), fields(transaction_id = %order.transaction_id))]
    pub async fn record_for_buyer(&self, buyer: &Username, order: &Order) -> Result<LedgerWrite> {
        let path = DocumentPath::new(BUYER_ORDERS, buyer.as_str());
        let entry = serde_json::to_value(order)?;

        let initial = WriteFields::new()
            .value("userId", order.user_id.as_str())
            .value("username", buyer.as_str())
            .value(ORDERS_FIELD, vec![entry.clone()]);

        self.create_or_append(&path, initial, entry)
            .await
            .map_err(CheckoutError::step(STEP_BUYER_LEDGER, &path))
    }

    /// Appends each seller's projection of `order` to `sellerOrders/{seller}`.
    ///
    /// Sellers are written one at a time in partition order; the first
    /// failure stops the loop and earlier sellers keep their entry.
    #[tracing::instrument(skip_all, fields(transaction_id = %order.transaction_id))]
    pub async fn record_for_sellers(
        &self,
        order: &Order,
        partition: &SellerPartition,
    ) -> Result<Vec<(Username, LedgerWrite)>> {
        let mut writes = Vec::with_capacity(partition.len());

        for group in partition {
            let projection = order.seller_projection(group);
            let write = self.record_for_seller(&group.seller, &projection).await?;
            writes.push((group.seller.clone(), write));
        }

        Ok(writes)
    }

    /// Appends one seller projection to `sellerOrders/{seller}`.
    pub async fn record_for_seller(
        &self,
        seller: &Username,
        projection: &Order,
    ) -> Result<LedgerWrite> {
        let path = DocumentPath::new(SELLER_ORDERS, seller.as_str());
        let entry = serde_json::to_value(projection)?;
        let initial = WriteFields::new().value(ORDERS_FIELD, vec![entry.clone()]);

        let write = self
            .create_or_append(&path, initial, entry)
            .await
            .map_err(CheckoutError::step(STEP_SELLER_LEDGER, &path))?;
        tracing::debug!(%seller, ?write, "seller ledger written");
        Ok(write)
    }

    /// Creates the ledger if absent, otherwise appends `entry` to it.
    ///
    /// A concurrent writer that creates the ledger first turns the create
    /// into an append, so neither order is lost.
    async fn create_or_append(
        &self,
        path: &DocumentPath,
        initial: WriteFields,
        entry: Value,
    ) -> std::result::Result<LedgerWrite, DocumentStoreError> {
        let initial = initial
            .server_timestamp(CREATED_AT_FIELD)
            .server_timestamp(UPDATED_AT_FIELD);

        match self.store.create(path, initial).await {
            Ok(()) => return Ok(LedgerWrite::Created),
            Err(DocumentStoreError::AlreadyExists(_)) => {}
            Err(e) => return Err(e),
        }

        let append = WriteFields::new()
            .array_union(ORDERS_FIELD, vec![entry])
            .server_timestamp(UPDATED_AT_FIELD);
        self.store.update(path, append).await?;
        Ok(LedgerWrite::Appended)
    }
}
