//! Integration tests for order assembly.
//!
//! These tests exercise the public surface the checkout flow relies on:
//! partitioning, totals and the persisted shapes of ledgers and carts.

use std::collections::HashSet;

use chrono::Utc;
use common::{UserId, Username};
use domain::{
    BuyerLedger, Cart, Money, Order, OrderAssembler, OrderError, OrderItem, OrderStatus,
    ProductId, SellerLedger, UserProfile,
};

fn item(product: &str, seller: &str, cents: i64, quantity: u32) -> OrderItem {
    OrderItem::new(product, product.to_uppercase(), seller, Money::from_cents(cents), quantity)
}

fn assemble(items: Vec<OrderItem>) -> (Order, domain::SellerPartition) {
    OrderAssembler::default()
        .assemble(UserId::new("uid-juan"), items, None, Utc::now())
        .unwrap()
}

mod assembly {
    use super::*;

    #[test]
    fn two_seller_order() {
        let (order, partition) = assemble(vec![
            item("rice", "ana", 25000, 1),
            item("eggs", "ben", 9000, 2),
        ]);

        assert_eq!(order.items.len(), 2);
        assert_eq!(partition.len(), 2);

        let projections: Vec<Order> = partition
            .iter()
            .map(|group| order.seller_projection(group))
            .collect();
        assert_eq!(projections[0].items.len(), 1);
        assert_eq!(projections[0].items[0].product_id, ProductId::new("rice"));
        assert_eq!(projections[1].items[0].product_id, ProductId::new("eggs"));
        assert!(projections.iter().all(|p| p.status == OrderStatus::Upcoming));
        assert_eq!(order.status, OrderStatus::ToPay);
    }

    #[test]
    fn sellers_equal_distinct_item_sellers() {
        let (order, _) = assemble(vec![
            item("a", "ana", 100, 1),
            item("b", "ana", 100, 1),
            item("c", "cara", 100, 1),
            item("d", "ben", 100, 1),
        ]);

        let expected: HashSet<Username> = order
            .items
            .iter()
            .map(|i| i.seller_username.clone())
            .collect();
        let actual: HashSet<Username> = order.sellers.iter().cloned().collect();
        assert_eq!(actual, expected);
        assert_eq!(order.sellers.len(), 3);
    }

    #[test]
    fn total_is_line_totals_plus_shipping() {
        let items = vec![item("a", "ana", 1999, 3), item("b", "ben", 50, 7)];
        let (order, _) = assemble(items.clone());

        let expected: i64 = items.iter().map(|i| i.price.cents() * i64::from(i.quantity)).sum();
        assert_eq!(order.subtotal.cents(), expected);
        assert_eq!(order.total.cents(), expected + 8000);
    }

    #[test]
    fn profile_username_does_not_leak_into_snapshot() {
        let profile = UserProfile {
            full_name: Some("Juan".into()),
            username: Some(Username::new("juan")),
            ..Default::default()
        };
        let (order, _) = OrderAssembler::default()
            .assemble(
                UserId::new("uid-juan"),
                vec![item("a", "ana", 100, 1)],
                Some(&profile),
                Utc::now(),
            )
            .unwrap();
        let json = serde_json::to_value(&order.customer_info).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 3);
    }

    #[test]
    fn blank_seller_is_a_validation_error() {
        let result = OrderAssembler::default().assemble(
            UserId::new("u"),
            vec![item("a", "", 100, 1)],
            None,
            Utc::now(),
        );
        assert!(matches!(result, Err(OrderError::MissingSeller { .. })));
    }
}

mod persisted_shapes {
    use super::*;

    #[test]
    fn ledgers_round_trip_through_json() {
        let (order, partition) = assemble(vec![item("rice", "ana", 100, 1)]);

        let buyer = BuyerLedger {
            user_id: order.user_id.clone(),
            username: Username::new("juan"),
            orders: vec![order.clone()],
            created_at: None,
            updated_at: None,
        };
        let json = serde_json::to_value(&buyer).unwrap();
        assert_eq!(json["orders"][0]["status"], "to_pay");
        let back: BuyerLedger = serde_json::from_value(json).unwrap();
        assert_eq!(back, buyer);

        let group = partition.iter().next().unwrap();
        let seller = SellerLedger {
            orders: vec![order.seller_projection(group)],
            ..Default::default()
        };
        assert_eq!(seller.count_with_status(OrderStatus::Upcoming), 1);
    }

    #[test]
    fn pruning_cart_by_order_product_ids() {
        let (order, _) = assemble(vec![item("rice", "ana", 100, 1), item("salt", "ana", 100, 1)]);
        let cart: Cart = serde_json::from_value(serde_json::json!({
            "products": [
                {"productId": "rice"},
                {"productId": "milk"},
                {"productId": "salt"}
            ]
        }))
        .unwrap();

        let purchased: HashSet<ProductId> = order.product_ids().into_iter().collect();
        let remaining = cart.without(&purchased);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].product_id, ProductId::new("milk"));
    }
}
