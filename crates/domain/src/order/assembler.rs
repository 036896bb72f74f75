//! Order assembly from a checkout selection.

use chrono::{DateTime, SecondsFormat, Utc};
use common::{TransactionId, UserId, Username};
use serde::{Deserialize, Serialize};

use super::{
    CustomerSnapshot, Money, OrderError, OrderItem, OrderStatus, ProductId, SellerGroup,
    SellerPartition, UserProfile,
};

/// Flat shipping fee charged once per order (₱80.00).
pub const DEFAULT_SHIPPING_FEE: Money = Money::from_cents(8000);

/// A placed order.
///
/// The same shape is stored in the buyer ledger and, with items restricted
/// to one seller, in each seller ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub transaction_id: TransactionId,
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    pub subtotal: Money,
    pub shipping: Money,
    pub total: Money,
    pub status: OrderStatus,
    /// RFC 3339 placement time, embedded in ledger arrays.
    pub created_at: String,
    /// RFC 3339 client-side placement time.
    pub order_date: String,
    pub customer_info: CustomerSnapshot,
    pub sellers: Vec<Username>,
}

impl Order {
    /// Returns the copy of this order stored in `group.seller`'s ledger.
    ///
    /// Totals stay those of the whole order.
    pub fn seller_projection(&self, group: &SellerGroup) -> Order {
        Order {
            items: group.items.clone(),
            status: OrderStatus::seller_initial(),
            ..self.clone()
        }
    }

    /// Returns the product ids of all items, duplicates included.
    pub fn product_ids(&self) -> Vec<ProductId> {
        self.items.iter().map(|i| i.product_id.clone()).collect()
    }
}

/// Totals shown on the checkout screen before an order is placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub groups: Vec<SummaryGroup>,
    pub item_count: usize,
    pub subtotal: Money,
    pub shipping: Money,
    pub total: Money,
}

/// One seller's section of a [`CheckoutSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryGroup {
    pub seller: Username,
    pub items: Vec<OrderItem>,
    pub subtotal: Money,
}

/// Builds orders from validated checkout selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderAssembler {
    shipping_fee: Money,
}

impl Default for OrderAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_SHIPPING_FEE)
    }
}

impl OrderAssembler {
    /// Creates an assembler charging `shipping_fee` per order.
    pub fn new(shipping_fee: Money) -> Self {
        Self { shipping_fee }
    }

    /// Returns the shipping fee charged per order.
    pub fn shipping_fee(&self) -> Money {
        self.shipping_fee
    }

    /// Checks every item and groups them by seller.
    pub fn validate(&self, items: &[OrderItem]) -> Result<SellerPartition, OrderError> {
        if items.is_empty() {
            return Err(OrderError::NoItems);
        }

        for (position, item) in items.iter().enumerate() {
            if item.product_id.as_str().trim().is_empty() {
                return Err(OrderError::MissingProductId { position });
            }
            if item.quantity == 0 {
                return Err(OrderError::InvalidQuantity {
                    product_id: item.product_id.to_string(),
                });
            }
            if item.price.is_negative() {
                return Err(OrderError::NegativePrice {
                    product_id: item.product_id.to_string(),
                    price: item.price,
                });
            }
        }

        self.totals(items)?;
        SellerPartition::from_items(items)
    }

    /// Returns `(subtotal, total)` for the items.
    fn totals(&self, items: &[OrderItem]) -> Result<(Money, Money), OrderError> {
        let subtotal = subtotal_of(items)?;
        let total = subtotal
            .checked_add(self.shipping_fee)
            .ok_or(OrderError::AmountOverflow)?;
        Ok((subtotal, total))
    }

    /// Computes the checkout totals without assigning an id.
    pub fn preview(&self, items: &[OrderItem]) -> Result<CheckoutSummary, OrderError> {
        let partition = self.validate(items)?;
        let (subtotal, total) = self.totals(items)?;

        let groups = partition
            .iter()
            .map(|group| {
                Ok(SummaryGroup {
                    seller: group.seller.clone(),
                    subtotal: subtotal_of(&group.items)?,
                    items: group.items.clone(),
                })
            })
            .collect::<Result<_, OrderError>>()?;

        Ok(CheckoutSummary {
            groups,
            item_count: items.len(),
            subtotal,
            shipping: self.shipping_fee,
            total,
        })
    }

    /// Assembles a new order with a fresh transaction id.
    ///
    /// Totals are always recomputed from the items.
    pub fn assemble(
        &self,
        user_id: UserId,
        items: Vec<OrderItem>,
        profile: Option<&UserProfile>,
        placed_at: DateTime<Utc>,
    ) -> Result<(Order, SellerPartition), OrderError> {
        self.assemble_with_id(TransactionId::generate(), user_id, items, profile, placed_at)
    }

    /// Assembles an order using a caller-chosen transaction id.
    pub fn assemble_with_id(
        &self,
        transaction_id: TransactionId,
        user_id: UserId,
        items: Vec<OrderItem>,
        profile: Option<&UserProfile>,
        placed_at: DateTime<Utc>,
    ) -> Result<(Order, SellerPartition), OrderError> {
        let partition = self.validate(&items)?;
        let (subtotal, total) = self.totals(&items)?;
        let timestamp = placed_at.to_rfc3339_opts(SecondsFormat::Millis, true);

        let order = Order {
            transaction_id,
            user_id,
            subtotal,
            shipping: self.shipping_fee,
            total,
            status: OrderStatus::buyer_initial(),
            created_at: timestamp.clone(),
            order_date: timestamp,
            customer_info: CustomerSnapshot::capture(profile),
            sellers: partition.sellers(),
            items,
        };

        Ok((order, partition))
    }
}

fn subtotal_of(items: &[OrderItem]) -> Result<Money, OrderError> {
    items
        .iter()
        .map(OrderItem::line_total)
        .collect::<Option<Vec<_>>>()
        .and_then(Money::checked_sum)
        .ok_or(OrderError::AmountOverflow)
}
