//! Read-side views over the order ledgers.
//!
//! - [`PurchaseHistory`] lists a buyer's orders, optionally by status
//! - [`SellerDashboard`] counts and lists a seller's incoming orders

pub mod error;
pub mod purchase_history;
pub mod seller_dashboard;

pub use error::{Result, ViewError};
pub use purchase_history::PurchaseHistory;
pub use seller_dashboard::{SellerDashboard, StatusCounts};
