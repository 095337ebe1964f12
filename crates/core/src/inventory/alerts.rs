//! Stock alert rules.
//!
//! Two alert kinds exist: low stock (at or below the reorder point) and
//! expiry warnings (expiry date within the next week). An alert a user has
//! manually dismissed is never re-raised; the dismissal resets when the
//! stock recovers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Days ahead within which an approaching expiry date raises a warning.
pub const EXPIRY_WARNING_DAYS: i64 = 7;

/// Kind of stock alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// Stock at or below the reorder point.
    LowStock,
    /// Expiry date approaching.
    ExpiryWarning,
}

impl AlertType {
    /// Returns the snake_case string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LowStock => "low_stock",
            Self::ExpiryWarning => "expiry_warning",
        }
    }
}

impl std::str::FromStr for AlertType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low_stock" => Ok(Self::LowStock),
            "expiry_warning" => Ok(Self::ExpiryWarning),
            other => Err(format!("Unknown alert type: {other}")),
        }
    }
}

/// Urgency level attached to an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    /// Needs attention soon.
    Warning,
    /// Needs attention now.
    Urgent,
}

impl AlertLevel {
    /// Returns the lowercase string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Urgent => "urgent",
        }
    }

    /// The level each alert type is raised at.
    #[must_use]
    pub const fn for_alert(alert_type: AlertType) -> Self {
        match alert_type {
            AlertType::LowStock => Self::Warning,
            AlertType::ExpiryWarning => Self::Urgent,
        }
    }
}

impl std::str::FromStr for AlertLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warning" => Ok(Self::Warning),
            "urgent" => Ok(Self::Urgent),
            other => Err(format!("Unknown alert level: {other}")),
        }
    }
}

/// Decides whether a low-stock alert should be raised.
///
/// Raised only when the stock is at or below the reorder point, no
/// unresolved low-stock alert already exists, and the user has not
/// manually dismissed one.
#[must_use]
pub fn should_raise_low_stock(
    current_stock: Decimal,
    reorder_point: Decimal,
    has_open_alert: bool,
    manually_dismissed: bool,
) -> bool {
    current_stock <= reorder_point && !has_open_alert && !manually_dismissed
}

/// Decides whether open low-stock alerts should auto-resolve.
///
/// Resolution happens when the stock recovers above the reorder point;
/// it also clears the manual-dismissal flag so a future dip alerts again.
#[must_use]
pub fn should_resolve_low_stock(
    current_stock: Decimal,
    reorder_point: Decimal,
    has_open_alert: bool,
) -> bool {
    current_stock > reorder_point && has_open_alert
}

/// Checks whether an expiry date falls inside the warning window
/// `[today, today + EXPIRY_WARNING_DAYS]`.
///
/// Already-expired items are outside the window; they are a disposal
/// problem, not a warning.
#[must_use]
pub fn expiry_within_warning_window(expiry_date: NaiveDate, today: NaiveDate) -> bool {
    let days_left = (expiry_date - today).num_days();
    (0..=EXPIRY_WARNING_DAYS).contains(&days_left)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_low_stock_raised_at_reorder_point() {
        assert!(should_raise_low_stock(dec!(3), dec!(3), false, false));
        assert!(should_raise_low_stock(dec!(1), dec!(3), false, false));
        assert!(!should_raise_low_stock(dec!(4), dec!(3), false, false));
    }

    #[test]
    fn test_open_alert_suppresses_duplicate() {
        assert!(!should_raise_low_stock(dec!(1), dec!(3), true, false));
    }

    #[test]
    fn test_dismissed_alert_never_reraised() {
        assert!(!should_raise_low_stock(dec!(1), dec!(3), false, true));
    }

    #[test]
    fn test_recovery_resolves_open_alert() {
        assert!(should_resolve_low_stock(dec!(5), dec!(3), true));
        assert!(!should_resolve_low_stock(dec!(3), dec!(3), true));
        assert!(!should_resolve_low_stock(dec!(5), dec!(3), false));
    }

    #[test]
    fn test_expiry_window() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();

        // Today and the edge of the window warn.
        assert!(expiry_within_warning_window(today, today));
        assert!(expiry_within_warning_window(
            today + chrono::Days::new(7),
            today
        ));

        // Beyond the window or already expired: no warning.
        assert!(!expiry_within_warning_window(
            today + chrono::Days::new(8),
            today
        ));
        assert!(!expiry_within_warning_window(
            today - chrono::Days::new(1),
            today
        ));
    }

    #[test]
    fn test_alert_levels() {
        assert_eq!(AlertLevel::for_alert(AlertType::LowStock), AlertLevel::Warning);
        assert_eq!(
            AlertLevel::for_alert(AlertType::ExpiryWarning),
            AlertLevel::Urgent
        );
    }
}
