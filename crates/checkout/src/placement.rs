//! The order placement flow.

use std::collections::HashSet;
use std::time::Instant;

use chrono::Utc;
use common::Username;
use document_store::DocumentStore;
use domain::{CheckoutSummary, Order, OrderAssembler, OrderItem, ProductId};
use serde::Serialize;

use crate::cart::{CartOutcome, CartPruner};
use crate::error::{CheckoutError, Result};
use crate::ledger::LedgerWriter;
use crate::session::{ProfileReader, Session};
use crate::steps::{
    STEP_BUYER_LEDGER, STEP_CART, STEP_READ_PROFILE, STEP_SELLER_LEDGER, STEP_STOCK,
};
use crate::stock::{StockReconciler, StockReport};

/// A checkout request.
#[derive(Debug, Clone)]
pub struct PlaceOrder {
    /// The signed-in user, if any.
    pub session: Option<Session>,
    /// The cart lines selected for checkout.
    pub items: Vec<OrderItem>,
}

impl PlaceOrder {
    /// Creates a request from a session and a selection.
    pub fn new(session: Option<Session>, items: Vec<OrderItem>) -> Self {
        Self { session, items }
    }
}

/// Receipt of a placed order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
    pub order: Order,
    pub buyer: Username,
    pub stock: StockReport,
    pub cart: CartOutcome,
}

/// Places orders.
///
/// Runs the steps strictly in sequence: buyer ledger, seller ledgers, stock,
/// cart. There is no cross-document atomicity and no compensation; a failed
/// write leaves everything committed before it in place.
pub struct OrderPlacement<S, P>
where
    S: DocumentStore,
    P: ProfileReader,
{
    assembler: OrderAssembler,
    profiles: P,
    ledgers: LedgerWriter<S>,
    stock: StockReconciler<S>,
    cart: CartPruner<S>,
}

impl<S, P> OrderPlacement<S, P>
where
    S: DocumentStore + Clone,
    P: ProfileReader,
{
    /// Creates a placement flow over `store`.
    pub fn new(store: S, profiles: P, assembler: OrderAssembler) -> Self {
        Self {
            assembler,
            profiles,
            ledgers: LedgerWriter::new(store.clone()),
            stock: StockReconciler::new(store.clone()),
            cart: CartPruner::new(store),
        }
    }

    /// Returns the assembler used for totals.
    pub fn assembler(&self) -> &OrderAssembler {
        &self.assembler
    }

    /// Computes the checkout summary for a selection without placing it.
    pub fn preview(&self, items: &[OrderItem]) -> Result<CheckoutSummary> {
        if items.is_empty() {
            return Err(CheckoutError::EmptySelection);
        }
        Ok(self.assembler.preview(items)?)
    }

    /// Places an order for the signed-in buyer.
    ///
    /// Nothing is written unless there is a session and the selection is
    /// valid. Every call assigns a fresh transaction id, so submitting the
    /// same selection twice places two orders.
    #[tracing::instrument(skip_all, fields(items = request.items.len()))]
    pub async fn place_order(&self, request: PlaceOrder) -> Result<PlacedOrder> {
        metrics::counter!("checkout_attempts_total").increment(1);
        let started = Instant::now();

        let result = self.run(request).await;

        metrics::histogram!("checkout_duration_seconds").record(started.elapsed().as_secs_f64());
        match &result {
            Ok(placed) => {
                metrics::counter!("checkout_orders_total").increment(1);
                tracing::info!(
                    transaction_id = %placed.order.transaction_id,
                    buyer = %placed.buyer,
                    total = %placed.order.total,
                    "order placed"
                );
            }
            Err(e) if e.is_precondition() => {
                metrics::counter!("checkout_rejected_total").increment(1);
                tracing::info!(error = %e, "checkout rejected");
            }
            Err(e) => {
                let step = e.failed_step().unwrap_or("unknown");
                metrics::counter!("checkout_failed_total", "step" => step).increment(1);
                tracing::error!(error = %e, step, "order placement failed");
            }
        }

        result
    }

    async fn run(&self, request: PlaceOrder) -> Result<PlacedOrder> {
        let session = request.session.ok_or(CheckoutError::NotAuthenticated)?;
        if request.items.is_empty() {
            return Err(CheckoutError::EmptySelection);
        }
        self.assembler.validate(&request.items)?;

        let profile = self
            .profiles
            .read_profile(&session.uid)
            .await
            .map_err(CheckoutError::step(STEP_READ_PROFILE, &session.uid))?;
        let buyer = profile
            .as_ref()
            .and_then(|p| p.username.clone())
            .filter(|u| !u.is_blank())
            .ok_or_else(|| CheckoutError::MissingUsername(session.uid.clone()))?;

        let (order, partition) = self.assembler.assemble(
            session.uid,
            request.items,
            profile.as_ref(),
            Utc::now(),
        )?;
        tracing::debug!(
            transaction_id = %order.transaction_id,
            sellers = partition.len(),
            "order assembled"
        );

        self.ledgers.record_for_buyer(&buyer, &order).await?;
        tracing::info!(step = STEP_BUYER_LEDGER, "checkout step completed");

        self.ledgers.record_for_sellers(&order, &partition).await?;
        tracing::info!(step = STEP_SELLER_LEDGER, "checkout step completed");

        let stock = self.stock.reconcile(&order.items).await;
        tracing::info!(
            step = STEP_STOCK,
            warnings = stock.warnings().count(),
            "checkout step completed"
        );

        let purchased: HashSet<ProductId> = order.product_ids().into_iter().collect();
        let cart = self.cart.prune(&buyer, &purchased).await?;
        tracing::info!(step = STEP_CART, ?cart, "checkout step completed");

        Ok(PlacedOrder {
            order,
            buyer,
            stock,
            cart,
        })
    }
}

#[cfg(test)]
mod tests {
    use document_store::{DocumentPath, InMemoryDocumentStore, WriteFields};
    use domain::Money;
    use domain::collections::USERS;

    use super::*;
    use crate::session::StoreProfileReader;

    type TestPlacement = OrderPlacement<InMemoryDocumentStore, StoreProfileReader<InMemoryDocumentStore>>;

    async fn setup() -> (TestPlacement, InMemoryDocumentStore) {
        let store = InMemoryDocumentStore::new();
        store
            .set(
                &DocumentPath::new(USERS, "uid-juan"),
                WriteFields::new().value("username", "juan"),
            )
            .await
            .unwrap();
        let placement = OrderPlacement::new(
            store.clone(),
            StoreProfileReader::new(store.clone()),
            OrderAssembler::default(),
        );
        (placement, store)
    }

    fn items() -> Vec<OrderItem> {
        vec![OrderItem::new("rice", "Rice", "ana", Money::from_cents(100), 1)]
    }

    #[tokio::test]
    async fn test_happy_path() {
        let (placement, _) = setup().await;
        let placed = placement
            .place_order(PlaceOrder::new(Some(Session::new("uid-juan")), items()))
            .await
            .unwrap();

        assert_eq!(placed.buyer.as_str(), "juan");
        assert_eq!(placed.order.total, Money::from_cents(8100));
        assert_eq!(placed.cart, CartOutcome::NoCart);
    }

    #[tokio::test]
    async fn test_missing_session_writes_nothing() {
        let (placement, store) = setup().await;
        let writes = store.write_count().await;

        let err = placement
            .place_order(PlaceOrder::new(None, items()))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::NotAuthenticated));
        assert_eq!(store.write_count().await, writes);
    }

    #[tokio::test]
    async fn test_empty_selection() {
        let (placement, _) = setup().await;
        let err = placement
            .place_order(PlaceOrder::new(Some(Session::new("uid-juan")), vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::EmptySelection));
    }

    #[tokio::test]
    async fn test_profile_without_username() {
        let (placement, store) = setup().await;
        let writes = store.write_count().await;

        let err = placement
            .place_order(PlaceOrder::new(Some(Session::new("uid-nobody")), items()))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::MissingUsername(_)));
        assert_eq!(store.write_count().await, writes);
    }

    #[tokio::test]
    async fn test_preview_rejects_empty_selection() {
        let (placement, _) = setup().await;
        assert!(matches!(
            placement.preview(&[]),
            Err(CheckoutError::EmptySelection)
        ));
        let summary = placement.preview(&items()).unwrap();
        assert_eq!(summary.total, Money::from_cents(8100));
    }
}
