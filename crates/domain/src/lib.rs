//! Domain layer for the storefront checkout.
//!
//! This crate provides the pure parts of order placement:
//! - Order items, money and the customer snapshot
//! - The order status state machine
//! - Seller partitioning and order assembly
//! - The persisted shapes of ledgers, carts and products

pub mod cart;
pub mod collections;
pub mod ledger;
pub mod order;
pub mod product;

pub use cart::{Cart, CartEntry};
pub use ledger::{BuyerLedger, SellerLedger};
pub use order::{
    CheckoutSummary, CustomerSnapshot, DEFAULT_SHIPPING_FEE, Money, NOT_PROVIDED, Order,
    OrderAssembler, OrderError, OrderItem, OrderStatus, ProductId, SellerGroup, SellerPartition,
    SummaryGroup, UserProfile,
};
pub use product::Product;
