//! Catalog product documents.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::order::ProductId;

/// A product document as far as checkout is concerned.
///
/// Only `stock` is written back; the remaining catalog fields are opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: ProductId,
    #[serde(default)]
    pub stock: i64,
    #[serde(flatten)]
    pub catalog: Map<String, Value>,
}

impl Product {
    /// Returns true if `quantity` units can be taken from stock.
    pub fn can_supply(&self, quantity: u32) -> bool {
        self.stock >= i64::from(quantity)
    }
}
