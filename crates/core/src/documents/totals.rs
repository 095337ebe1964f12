//! Document totals arithmetic.
//!
//! Subtotal, tax, and total are always computed from the line items and
//! the tax settings; caller-supplied totals are never trusted. Tax amounts
//! round down to the whole currency unit, matching consumption-tax
//! practice.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How the tax rate applies to line amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxType {
    /// Line amounts exclude tax; tax is added on top.
    Exclusive,
    /// Line amounts already include tax; tax is carved out.
    Inclusive,
}

impl TaxType {
    /// Returns the lowercase string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exclusive => "exclusive",
            Self::Inclusive => "inclusive",
        }
    }
}

impl std::str::FromStr for TaxType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exclusive" => Ok(Self::Exclusive),
            "inclusive" => Ok(Self::Inclusive),
            other => Err(format!("Unknown tax type: {other}")),
        }
    }
}

/// A line item as supplied when creating or updating a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemInput {
    /// Item label.
    pub item_name: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Quantity ordered.
    pub quantity: Decimal,
    /// Price per unit.
    pub unit_price: Decimal,
}

impl LineItemInput {
    /// The line amount: quantity x unit price.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

/// Computed money fields for a document or purchase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTotals {
    /// Sum of line amounts.
    pub subtotal: Decimal,
    /// Tax portion, rounded down to the whole currency unit.
    pub tax_amount: Decimal,
    /// Amount owed.
    pub total_amount: Decimal,
}

/// Computes subtotal, tax, and total from line items.
///
/// `tax_rate` is a percentage (10 means 10%).
///
/// - Exclusive: tax = floor(subtotal x rate / 100), total = subtotal + tax.
/// - Inclusive: total = subtotal,
///   tax = subtotal - floor(subtotal x 100 / (100 + rate)).
#[must_use]
pub fn compute_totals(items: &[LineItemInput], tax_type: TaxType, tax_rate: Decimal) -> DocumentTotals {
    let subtotal: Decimal = items.iter().map(LineItemInput::amount).sum();
    let hundred = Decimal::ONE_HUNDRED;

    match tax_type {
        TaxType::Exclusive => {
            let tax_amount = (subtotal * tax_rate / hundred).floor();
            DocumentTotals {
                subtotal,
                tax_amount,
                total_amount: subtotal + tax_amount,
            }
        }
        TaxType::Inclusive => {
            let net = (subtotal * hundred / (hundred + tax_rate)).floor();
            DocumentTotals {
                subtotal,
                tax_amount: subtotal - net,
                total_amount: subtotal,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn items(pairs: &[(Decimal, Decimal)]) -> Vec<LineItemInput> {
        pairs
            .iter()
            .map(|&(quantity, unit_price)| LineItemInput {
                item_name: "item".to_string(),
                description: None,
                quantity,
                unit_price,
            })
            .collect()
    }

    #[test]
    fn test_exclusive_tax_rounds_down() {
        // 3 x 333 = 999; 10% = 99.9, floored to 99.
        let totals = compute_totals(
            &items(&[(dec!(3), dec!(333))]),
            TaxType::Exclusive,
            dec!(10),
        );
        assert_eq!(totals.subtotal, dec!(999));
        assert_eq!(totals.tax_amount, dec!(99));
        assert_eq!(totals.total_amount, dec!(1098));
    }

    #[test]
    fn test_inclusive_tax_carved_out() {
        // 1100 including 10%: net floor(1100 * 100 / 110) = 1000, tax 100.
        let totals = compute_totals(
            &items(&[(dec!(1), dec!(1100))]),
            TaxType::Inclusive,
            dec!(10),
        );
        assert_eq!(totals.subtotal, dec!(1100));
        assert_eq!(totals.tax_amount, dec!(100));
        assert_eq!(totals.total_amount, dec!(1100));
    }

    #[test]
    fn test_multiple_lines_sum() {
        let totals = compute_totals(
            &items(&[(dec!(2), dec!(500)), (dec!(4), dec!(250))]),
            TaxType::Exclusive,
            dec!(10),
        );
        assert_eq!(totals.subtotal, dec!(2000));
        assert_eq!(totals.tax_amount, dec!(200));
        assert_eq!(totals.total_amount, dec!(2200));
    }

    #[test]
    fn test_empty_items_are_zero() {
        let totals = compute_totals(&[], TaxType::Exclusive, dec!(10));
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.tax_amount, Decimal::ZERO);
        assert_eq!(totals.total_amount, Decimal::ZERO);
    }

    #[rstest]
    #[case(dec!(0), dec!(1000), dec!(0))]
    #[case(dec!(8), dec!(1000), dec!(80))]
    #[case(dec!(10), dec!(1005), dec!(100))] // 100.5 floors to 100
    fn test_exclusive_rates(
        #[case] rate: Decimal,
        #[case] price: Decimal,
        #[case] expected_tax: Decimal,
    ) {
        let totals = compute_totals(&items(&[(dec!(1), price)]), TaxType::Exclusive, rate);
        assert_eq!(totals.tax_amount, expected_tax);
    }
}
