//! Order placement for the storefront.
//!
//! A checkout runs these steps in order:
//! 1. Validate the session and the selection
//! 2. Assemble the order and its seller partition
//! 3. Append the order to the buyer ledger
//! 4. Append each seller's projection to that seller's ledger
//! 5. Decrement product stock per item
//! 6. Remove the purchased items from the cart
//!
//! A failed write aborts the remaining steps. Nothing is compensated.

pub mod cart;
pub mod error;
pub mod ledger;
pub mod placement;
pub mod session;
pub mod steps;
pub mod stock;

pub use cart::{CartOutcome, CartPruner};
pub use error::{CheckoutError, GENERIC_FAILURE, USERNAME_REQUIRED};
pub use ledger::{LedgerWrite, LedgerWriter};
pub use placement::{OrderPlacement, PlaceOrder, PlacedOrder};
pub use session::{ProfileReader, Session, StoreProfileReader};
pub use stock::{StockLine, StockOutcome, StockReconciler, StockReport};
