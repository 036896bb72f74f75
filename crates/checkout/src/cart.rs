//! Cart pruning after checkout.

use std::collections::HashSet;

use common::Username;
use document_store::{DocumentPath, DocumentStore, DocumentStoreExt, WriteFields};
use domain::collections::{CART_PRODUCTS_FIELD, CARTS};
use domain::{Cart, ProductId};

use crate::error::{CheckoutError, Result};
use crate::steps::STEP_CART;

/// What happened to the buyer's cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "cart", rename_all = "snake_case")]
pub enum CartOutcome {
    /// The buyer has no cart document.
    NoCart,
    /// Purchased entries were removed; `remaining` entries are left.
    Updated { remaining: usize },
    /// Every entry was purchased and the cart document was deleted.
    Deleted,
}

/// Removes purchased products from the buyer's cart.
#[derive(Debug, Clone)]
pub struct CartPruner<S> {
    store: S,
}

impl<S: DocumentStore> CartPruner<S> {
    /// Creates a cart pruner over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Drops every cart entry whose product id is in `purchased`.
    ///
    /// An emptied cart is deleted. Cart entries keep any fields they carry.
    #[tracing::instrument(skip(self, purchased))]
    pub async fn prune(
        &self,
        buyer: &Username,
        purchased: &HashSet<ProductId>,
    ) -> Result<CartOutcome> {
        let path = DocumentPath::new(CARTS, buyer.as_str());

        let Some(cart) = self
            .store
            .get_as::<Cart>(&path)
            .await
            .map_err(CheckoutError::step(STEP_CART, &path))?
        else {
            return Ok(CartOutcome::NoCart);
        };

        let remaining = cart.without(purchased);
        if remaining.is_empty() {
            self.store
                .delete(&path)
                .await
                .map_err(CheckoutError::step(STEP_CART, &path))?;
            return Ok(CartOutcome::Deleted);
        }

        let count = remaining.len();
        let fields =
            WriteFields::new().value(CART_PRODUCTS_FIELD, serde_json::to_value(&remaining)?);
        self.store
            .update(&path, fields)
            .await
            .map_err(CheckoutError::step(STEP_CART, &path))?;
        Ok(CartOutcome::Updated { remaining: count })
    }
}

#[cfg(test)]
mod tests {
    use document_store::InMemoryDocumentStore;
    use serde_json::json;

    use super::*;

    fn purchased(ids: &[&str]) -> HashSet<ProductId> {
        ids.iter().map(|id| ProductId::new(*id)).collect()
    }

    async fn seed_cart(store: &InMemoryDocumentStore, products: serde_json::Value) {
        store
            .set(
                &DocumentPath::new(CARTS, "juan"),
                WriteFields::new()
                    .value(CART_PRODUCTS_FIELD, products)
                    .value("lastViewed", "rice"),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn removes_purchased_entries() {
        let store = InMemoryDocumentStore::new();
        seed_cart(
            &store,
            json!([
                {"productId": "rice", "quantity": 1},
                {"productId": "milk", "quantity": 2, "selected": false},
                {"productId": "eggs", "quantity": 1}
            ]),
        )
        .await;

        let outcome = CartPruner::new(store.clone())
            .prune(&Username::new("juan"), &purchased(&["rice", "eggs"]))
            .await
            .unwrap();
        assert_eq!(outcome, CartOutcome::Updated { remaining: 1 });

        let doc = store
            .get(&DocumentPath::new(CARTS, "juan"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            doc.get(CART_PRODUCTS_FIELD),
            Some(&json!([{"productId": "milk", "quantity": 2, "selected": false}]))
        );
        assert_eq!(doc.get("lastViewed"), Some(&json!("rice")));
    }

    #[tokio::test]
    async fn emptied_cart_is_deleted() {
        let store = InMemoryDocumentStore::new();
        seed_cart(&store, json!([{"productId": "rice"}, {"productId": "rice"}])).await;

        let outcome = CartPruner::new(store.clone())
            .prune(&Username::new("juan"), &purchased(&["rice"]))
            .await
            .unwrap();
        assert_eq!(outcome, CartOutcome::Deleted);
        assert!(!store.exists(&DocumentPath::new(CARTS, "juan")).await.unwrap());
    }

    #[tokio::test]
    async fn missing_cart_is_a_no_op() {
        let store = InMemoryDocumentStore::new();
        let outcome = CartPruner::new(store.clone())
            .prune(&Username::new("juan"), &purchased(&["rice"]))
            .await
            .unwrap();
        assert_eq!(outcome, CartOutcome::NoCart);
        assert_eq!(store.write_count().await, 0);
    }
}
