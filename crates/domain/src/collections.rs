//! Names of the collections and fields the storefront persists.

/// Buyer ledgers, keyed by buyer username.
pub const BUYER_ORDERS: &str = "orders";

/// Seller ledgers, keyed by seller username.
pub const SELLER_ORDERS: &str = "sellerOrders";

/// Product catalog. Documents are looked up by their `productId` field.
pub const PRODUCTS: &str = "products";

/// Carts, keyed by buyer username.
pub const CARTS: &str = "cart";

/// User profiles, keyed by uid.
pub const USERS: &str = "users";

/// Ledger field holding the order list.
pub const ORDERS_FIELD: &str = "orders";

/// Cart field holding the entries.
pub const CART_PRODUCTS_FIELD: &str = "products";

/// Product field holding the integer stock counter.
pub const STOCK_FIELD: &str = "stock";

/// Product field holding the catalog identifier.
pub const PRODUCT_ID_FIELD: &str = "productId";

pub const CREATED_AT_FIELD: &str = "createdAt";
pub const UPDATED_AT_FIELD: &str = "updatedAt";
