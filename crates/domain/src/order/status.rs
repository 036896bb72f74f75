//! Order status state machine.

use serde::{Deserialize, Serialize};

/// The status of an order as seen by one party.
///
/// Buyer and seller copies of the same order carry independent statuses.
/// The buyer copy starts at `to_pay`, each seller copy at `upcoming`; both
/// then converge on the fulfillment states driven by the seller.
///
/// ```text
/// to_pay ───┐
///           ├──► to_ship ──► shipped ──► completed
/// upcoming ─┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Buyer-facing initial state (cash on delivery, not yet paid).
    ToPay,

    /// Seller-facing initial state: a new incoming order.
    Upcoming,

    /// Accepted by the seller, awaiting dispatch.
    ToShip,

    /// Handed to delivery.
    Shipped,

    /// Delivered (terminal state).
    Completed,
}

impl OrderStatus {
    /// Status written to the buyer's copy of a new order.
    pub fn buyer_initial() -> Self {
        OrderStatus::ToPay
    }

    /// Status written to each seller's copy of a new order.
    pub fn seller_initial() -> Self {
        OrderStatus::Upcoming
    }

    /// Returns true if a fulfillment flow may move an order from `self` to `next`.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::ToPay, OrderStatus::ToShip)
                | (OrderStatus::Upcoming, OrderStatus::ToShip)
                | (OrderStatus::ToShip, OrderStatus::Shipped)
                | (OrderStatus::Shipped, OrderStatus::Completed)
        )
    }

    /// Returns true if this is a terminal state (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed)
    }

    /// Returns the persisted status name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::ToPay => "to_pay",
            OrderStatus::Upcoming => "upcoming",
            OrderStatus::ToShip => "to_ship",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "to_pay" => Ok(OrderStatus::ToPay),
            "upcoming" => Ok(OrderStatus::Upcoming),
            "to_ship" => Ok(OrderStatus::ToShip),
            "shipped" => Ok(OrderStatus::Shipped),
            "completed" => Ok(OrderStatus::Completed),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [OrderStatus; 5] = [
        OrderStatus::ToPay,
        OrderStatus::Upcoming,
        OrderStatus::ToShip,
        OrderStatus::Shipped,
        OrderStatus::Completed,
    ];

    #[test]
    fn test_initial_states_differ_per_party() {
        assert_eq!(OrderStatus::buyer_initial(), OrderStatus::ToPay);
        assert_eq!(OrderStatus::seller_initial(), OrderStatus::Upcoming);
    }

    #[test]
    fn test_upcoming_is_not_a_successor_of_to_pay() {
        assert!(!OrderStatus::ToPay.can_transition_to(OrderStatus::Upcoming));
        assert!(!OrderStatus::Upcoming.can_transition_to(OrderStatus::ToPay));
    }

    #[test]
    fn test_both_initial_states_lead_to_to_ship() {
        assert!(OrderStatus::ToPay.can_transition_to(OrderStatus::ToShip));
        assert!(OrderStatus::Upcoming.can_transition_to(OrderStatus::ToShip));
    }

    #[test]
    fn test_fulfillment_chain() {
        assert!(OrderStatus::ToShip.can_transition_to(OrderStatus::Shipped));
        assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Completed));
        assert!(!OrderStatus::ToShip.can_transition_to(OrderStatus::Completed));
    }

    #[test]
    fn test_completed_is_terminal() {
        for next in ALL {
            assert!(!OrderStatus::Completed.can_transition_to(next));
        }
        assert!(OrderStatus::Completed.is_terminal());
        assert!(!OrderStatus::Shipped.is_terminal());
    }

    #[test]
    fn test_persisted_names() {
        for status in ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!("cancelled".parse::<OrderStatus>().is_err());
    }
}
