//! Names of the placement steps, used in logs, metrics and errors.

/// Step name: read the buyer profile.
pub const STEP_READ_PROFILE: &str = "read_profile";

/// Step name: append the order to the buyer ledger.
pub const STEP_BUYER_LEDGER: &str = "buyer_ledger";

/// Step name: append the projections to the seller ledgers.
pub const STEP_SELLER_LEDGER: &str = "seller_ledger";

/// Step name: decrement product stock.
pub const STEP_STOCK: &str = "stock";

/// Step name: remove purchased items from the cart.
pub const STEP_CART: &str = "cart";
