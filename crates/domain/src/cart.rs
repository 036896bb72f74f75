//! The buyer's shopping cart document.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::order::ProductId;

/// One line of a cart.
///
/// Only the product id is interpreted; every other field is carried through
/// untouched when the cart is rewritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    pub product_id: ProductId,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// The `cart/{buyer}` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub products: Vec<CartEntry>,
}

impl Cart {
    /// Returns the entries whose product was not purchased, in cart order.
    pub fn without(&self, purchased: &HashSet<ProductId>) -> Vec<CartEntry> {
        self.products
            .iter()
            .filter(|entry| !purchased.contains(&entry.product_id))
            .cloned()
            .collect()
    }
}
