//! Orders: items, totals, status and assembly.

mod assembler;
mod partition;
mod status;
mod value_objects;

pub use assembler::{CheckoutSummary, DEFAULT_SHIPPING_FEE, Order, OrderAssembler, SummaryGroup};
pub use partition::{SellerGroup, SellerPartition};
pub use status::OrderStatus;
pub use value_objects::{
    CustomerSnapshot, Money, NOT_PROVIDED, OrderItem, ProductId, UserProfile,
};

use thiserror::Error;

/// Errors raised while validating or assembling an order.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The checkout selection is empty.
    #[error("Order has no items")]
    NoItems,

    /// An item has no product id.
    #[error("Item at position {position} has no product id")]
    MissingProductId { position: usize },

    /// An item has no seller.
    #[error("Item {product_id} has no seller")]
    MissingSeller { product_id: String },

    /// Invalid quantity.
    #[error("Invalid quantity for {product_id}: must be greater than 0")]
    InvalidQuantity { product_id: String },

    /// Invalid price.
    #[error("Invalid price for {product_id}: {price} (must not be negative)")]
    NegativePrice { product_id: String, price: Money },

    /// A line total or the order total does not fit in a `Money`.
    #[error("Order amount is too large")]
    AmountOverflow,
}
