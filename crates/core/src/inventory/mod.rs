//! Inventory domain: stock movements, status, and reorder alerts.

pub mod alerts;

pub use alerts::{AlertLevel, AlertType, expiry_within_warning_window, should_raise_low_stock,
    should_resolve_low_stock};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inventory operation errors.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Outbound movement would drive the stock level negative.
    #[error("Insufficient stock: have {available}, requested {requested}")]
    InsufficientStock {
        /// Stock on hand.
        available: Decimal,
        /// Quantity requested.
        requested: Decimal,
    },

    /// Movement quantity must be positive for in/out movements.
    #[error("Movement quantity must be positive")]
    NonPositiveQuantity,
}

/// Direction of an inventory movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    /// Goods received.
    In,
    /// Goods consumed or shipped out.
    Out,
    /// Stock level corrected to an absolute count.
    Adjustment,
    /// Opening stock recorded at item creation.
    Initial,
}

impl MovementType {
    /// Returns the lowercase string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::Adjustment => "adjustment",
            Self::Initial => "initial",
        }
    }
}

impl std::str::FromStr for MovementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            "adjustment" => Ok(Self::Adjustment),
            "initial" => Ok(Self::Initial),
            other => Err(format!("Unknown movement type: {other}")),
        }
    }
}

/// What caused an inventory movement.
///
/// Only purchase-sourced receipts reach the ledger; the rest are stock
/// bookkeeping only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementSource {
    /// Goods received against a purchase order.
    Purchase,
    /// Kitchen/shop consumption.
    Consumption,
    /// Opening stock load.
    Initial,
    /// Manual correction.
    Manual,
}

impl MovementSource {
    /// Returns the lowercase string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::Consumption => "consumption",
            Self::Initial => "initial",
            Self::Manual => "manual",
        }
    }
}

impl std::str::FromStr for MovementSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "purchase" => Ok(Self::Purchase),
            "consumption" => Ok(Self::Consumption),
            "initial" => Ok(Self::Initial),
            "manual" => Ok(Self::Manual),
            other => Err(format!("Unknown movement source: {other}")),
        }
    }
}

/// Stock level relative to the item's reorder and optimal points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    /// At or below the reorder point.
    Low,
    /// At or above the optimal level.
    Optimal,
    /// Between the two thresholds.
    Normal,
}

/// Classifies a stock level.
///
/// The low check wins when the thresholds overlap (a conservative choice:
/// an item both "low" and "optimal" needs reordering).
#[must_use]
pub fn stock_status(current: Decimal, reorder_point: Decimal, optimal: Decimal) -> StockStatus {
    if current <= reorder_point {
        StockStatus::Low
    } else if current >= optimal {
        StockStatus::Optimal
    } else {
        StockStatus::Normal
    }
}

/// Applies a movement to a stock level, returning the new level.
///
/// - In: stock increases by the quantity.
/// - Out: stock decreases; going negative is rejected.
/// - Adjustment: stock becomes the quantity (an absolute recount).
/// - Initial: treated like an inbound receipt.
///
/// # Errors
///
/// Returns `InventoryError::NonPositiveQuantity` for in/out movements with
/// a non-positive quantity, and `InventoryError::InsufficientStock` when
/// an outbound movement exceeds the stock on hand.
pub fn apply_movement(
    current: Decimal,
    movement_type: MovementType,
    quantity: Decimal,
) -> Result<Decimal, InventoryError> {
    match movement_type {
        MovementType::In | MovementType::Initial => {
            if quantity <= Decimal::ZERO {
                return Err(InventoryError::NonPositiveQuantity);
            }
            Ok(current + quantity)
        }
        MovementType::Out => {
            if quantity <= Decimal::ZERO {
                return Err(InventoryError::NonPositiveQuantity);
            }
            let next = current - quantity;
            if next < Decimal::ZERO {
                return Err(InventoryError::InsufficientStock {
                    available: current,
                    requested: quantity,
                });
            }
            Ok(next)
        }
        MovementType::Adjustment => {
            if quantity < Decimal::ZERO {
                return Err(InventoryError::NonPositiveQuantity);
            }
            Ok(quantity)
        }
    }
}

/// Sign convention for stored movement quantities: outbound rows are
/// recorded negative so movement history sums to the stock delta.
#[must_use]
pub fn stored_quantity(movement_type: MovementType, quantity: Decimal) -> Decimal {
    match movement_type {
        MovementType::Out => -quantity.abs(),
        _ => quantity.abs(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_inbound_increases_stock() {
        assert_eq!(
            apply_movement(dec!(10), MovementType::In, dec!(4)).unwrap(),
            dec!(14)
        );
    }

    #[test]
    fn test_outbound_decreases_stock() {
        assert_eq!(
            apply_movement(dec!(10), MovementType::Out, dec!(4)).unwrap(),
            dec!(6)
        );
    }

    #[test]
    fn test_outbound_cannot_go_negative() {
        let err = apply_movement(dec!(3), MovementType::Out, dec!(4)).unwrap_err();
        assert!(matches!(
            err,
            InventoryError::InsufficientStock { available, requested }
                if available == dec!(3) && requested == dec!(4)
        ));
    }

    #[test]
    fn test_outbound_to_exactly_zero_is_fine() {
        assert_eq!(
            apply_movement(dec!(4), MovementType::Out, dec!(4)).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_adjustment_sets_absolute_level() {
        assert_eq!(
            apply_movement(dec!(10), MovementType::Adjustment, dec!(2)).unwrap(),
            dec!(2)
        );
    }

    #[test]
    fn test_zero_quantity_rejected() {
        assert!(apply_movement(dec!(10), MovementType::In, Decimal::ZERO).is_err());
        assert!(apply_movement(dec!(10), MovementType::Out, Decimal::ZERO).is_err());
    }

    #[test]
    fn test_stock_status_thresholds() {
        assert_eq!(stock_status(dec!(2), dec!(3), dec!(10)), StockStatus::Low);
        assert_eq!(stock_status(dec!(3), dec!(3), dec!(10)), StockStatus::Low);
        assert_eq!(
            stock_status(dec!(5), dec!(3), dec!(10)),
            StockStatus::Normal
        );
        assert_eq!(
            stock_status(dec!(10), dec!(3), dec!(10)),
            StockStatus::Optimal
        );
    }

    #[test]
    fn test_stored_quantity_sign() {
        assert_eq!(stored_quantity(MovementType::Out, dec!(5)), dec!(-5));
        assert_eq!(stored_quantity(MovementType::Out, dec!(-5)), dec!(-5));
        assert_eq!(stored_quantity(MovementType::In, dec!(5)), dec!(5));
        assert_eq!(stored_quantity(MovementType::Adjustment, dec!(5)), dec!(5));
    }
}
