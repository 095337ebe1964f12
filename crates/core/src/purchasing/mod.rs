//! Purchase order domain.
//!
//! Orders placed with suppliers share the totals arithmetic with sales
//! documents; what is specific here is the lifecycle, because delivery is
//! the accounting trigger (debit purchases, credit payable).

use serde::{Deserialize, Serialize};

/// Purchase order lifecycle status.
///
/// draft -> ordered -> delivered; cancelled is reachable while the goods
/// have not arrived. Delivered and cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Being drafted.
    Draft,
    /// Sent to the supplier.
    Ordered,
    /// Goods received; the order posts to the ledger.
    Delivered,
    /// Abandoned; no accounting effect.
    Cancelled,
}

impl OrderStatus {
    /// Returns the lowercase string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Ordered => "ordered",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns true if the status permits edits to the order body.
    #[must_use]
    pub const fn is_editable(self) -> bool {
        matches!(self, Self::Draft | Self::Ordered)
    }

    /// Checks whether a transition to `next` is legal.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Ordered)
                | (Self::Ordered, Self::Delivered)
                | (Self::Draft | Self::Ordered, Self::Cancelled)
        )
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
            "draft" => Ok(Self::Draft),
            "ordered" => Ok(Self::Ordered),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("Unknown order status: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[test]
    fn test_status_roundtrip() {
        for status in [
            OrderStatus::Draft,
            OrderStatus::Ordered,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::from_str(status.as_str()).unwrap(), status);
        }
    }

    #[rstest]
    #[case(OrderStatus::Draft, OrderStatus::Ordered, true)]
    #[case(OrderStatus::Ordered, OrderStatus::Delivered, true)]
    #[case(OrderStatus::Draft, OrderStatus::Cancelled, true)]
    #[case(OrderStatus::Ordered, OrderStatus::Cancelled, true)]
    #[case(OrderStatus::Draft, OrderStatus::Delivered, false)]
    #[case(OrderStatus::Delivered, OrderStatus::Cancelled, false)]
    #[case(OrderStatus::Delivered, OrderStatus::Ordered, false)]
    #[case(OrderStatus::Cancelled, OrderStatus::Ordered, false)]
    fn test_transitions(
        #[case] from: OrderStatus,
        #[case] to: OrderStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(from.can_transition_to(to), allowed);
    }

    #[test]
    fn test_editability() {
        assert!(OrderStatus::Draft.is_editable());
        assert!(OrderStatus::Ordered.is_editable());
        assert!(!OrderStatus::Delivered.is_editable());
        assert!(!OrderStatus::Cancelled.is_editable());
    }
}
