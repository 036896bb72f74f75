//! Stock reconciliation after an order is recorded.

use document_store::{DecrementOutcome, DocumentQuery, DocumentStore, DocumentStoreExt};
use domain::collections::{PRODUCT_ID_FIELD, PRODUCTS, STOCK_FIELD};
use domain::{OrderItem, ProductId};
use serde::Serialize;

/// What happened to one item's stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StockOutcome {
    /// Stock was reduced by the ordered quantity.
    Decremented { remaining: i64 },

    /// No product carries this id; stock was not touched.
    ProductNotFound,

    /// The product holds fewer units than ordered; stock was not touched.
    Insufficient { available: i64 },

    /// The store call failed; stock may or may not have changed.
    Failed { reason: String },
}

impl StockOutcome {
    /// Returns true unless the stock was decremented.
    pub fn is_warning(&self) -> bool {
        !matches!(self, StockOutcome::Decremented { .. })
    }
}

/// Stock outcome of one order item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLine {
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(flatten)]
    pub outcome: StockOutcome,
}

/// Per-item stock outcomes of one order, in item order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StockReport {
    pub lines: Vec<StockLine>,
}

impl StockReport {
    /// Returns the lines whose stock was not decremented.
    pub fn warnings(&self) -> impl Iterator<Item = &StockLine> {
        self.lines.iter().filter(|l| l.outcome.is_warning())
    }

    /// Returns true if every item was decremented.
    pub fn is_clean(&self) -> bool {
        self.warnings().next().is_none()
    }

    /// Returns the outcome recorded for a product, first occurrence.
    pub fn outcome_for(&self, product_id: &ProductId) -> Option<&StockOutcome> {
        self.lines
            .iter()
            .find(|l| &l.product_id == product_id)
            .map(|l| &l.outcome)
    }
}

/// Decrements catalog stock for ordered items.
///
/// Problems with one item never stop the others and never fail the order;
/// they are logged and reported.
#[derive(Debug, Clone)]
pub struct StockReconciler<S> {
    store: S,
}

impl<S: DocumentStore> StockReconciler<S> {
    /// Creates a stock reconciler over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Reconciles every item in order.
    #[tracing::instrument(skip_all, fields(items = items.len()))]
    pub async fn reconcile(&self, items: &[OrderItem]) -> StockReport {
        let mut report = StockReport::default();

        for item in items {
            let outcome = self.reconcile_item(&item.product_id, item.quantity).await;
            if outcome.is_warning() {
                metrics::counter!("stock_warnings_total").increment(1);
            }
            report.lines.push(StockLine {
                product_id: item.product_id.clone(),
                quantity: item.quantity,
                outcome,
            });
        }

        report
    }

    /// Decrements one product's stock if it can cover `quantity`.
    pub async fn reconcile_item(&self, product_id: &ProductId, quantity: u32) -> StockOutcome {
        let query =
            DocumentQuery::collection(PRODUCTS).where_eq(PRODUCT_ID_FIELD, product_id.as_str());

        let product = match self.store.find_one(query).await {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                tracing::warn!(%product_id, "product not found, stock not updated");
                return StockOutcome::ProductNotFound;
            }
            Err(e) => {
                tracing::error!(%product_id, error = %e, "failed to look up product");
                return StockOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        match self
            .store
            .decrement_if_sufficient(&product.path, STOCK_FIELD, quantity)
            .await
        {
            Ok(DecrementOutcome::Applied { remaining }) => {
                tracing::debug!(%product_id, quantity, remaining, "stock decremented");
                StockOutcome::Decremented { remaining }
            }
            Ok(DecrementOutcome::Insufficient { available }) => {
                tracing::warn!(%product_id, quantity, available, "insufficient stock, not updated");
                StockOutcome::Insufficient { available }
            }
            Err(e) => {
                tracing::error!(%product_id, error = %e, "failed to update product stock");
                StockOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
