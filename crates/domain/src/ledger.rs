//! Persisted order ledgers.
//!
//! A ledger is a single document holding every order of one party in an
//! append-only `orders` array.

use chrono::{DateTime, Utc};
use common::{TransactionId, UserId, Username};
use serde::{Deserialize, Serialize};

use crate::order::{Order, OrderStatus};

/// The `orders/{buyer}` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerLedger {
    pub user_id: UserId,
    pub username: Username,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl BuyerLedger {
    /// Finds an order by transaction id.
    pub fn find(&self, transaction_id: &TransactionId) -> Option<&Order> {
        self.orders
            .iter()
            .find(|o| &o.transaction_id == transaction_id)
    }
}

/// The `sellerOrders/{seller}` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerLedger {
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SellerLedger {
    /// Counts orders currently in `status`.
    pub fn count_with_status(&self, status: OrderStatus) -> usize {
        self.orders.iter().filter(|o| o.status == status).count()
    }
}

/// Returns `orders` newest first, optionally restricted to one status.
pub fn newest_first(orders: &[Order], status: Option<OrderStatus>) -> Vec<Order> {
    let mut selected: Vec<Order> = orders
        .iter()
        .filter(|o| status.is_none_or(|s| o.status == s))
        .cloned()
        .collect();
    // RFC 3339 UTC strings order chronologically.
    selected.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    selected
}
