//! Sales document domain.
//!
//! Documents cover the quotation / order / delivery-note / invoice flow.
//! Only invoices ever reach the ledger; the rest are paperwork. The status
//! machine and the totals arithmetic live here so the database layer never
//! has to trust caller-supplied amounts.

pub mod totals;

pub use totals::{DocumentTotals, LineItemInput, TaxType, compute_totals};

use serde::{Deserialize, Serialize};

/// Kind of sales document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Quotation sent to a customer.
    Quotation,
    /// Confirmed customer order.
    Order,
    /// Delivery note accompanying shipped goods.
    DeliveryNote,
    /// Invoice; the only kind with an accounting effect.
    Invoice,
}

impl DocumentType {
    /// Returns the snake_case string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quotation => "quotation",
            Self::Order => "order",
            Self::DeliveryNote => "delivery_note",
            Self::Invoice => "invoice",
        }
    }

    /// Initial letter used when generating document numbers.
    #[must_use]
    pub const fn number_prefix(self) -> char {
        match self {
            Self::Quotation => 'Q',
            Self::Order => 'O',
            Self::DeliveryNote => 'D',
            Self::Invoice => 'I',
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quotation" => Ok(Self::Quotation),
            "order" => Ok(Self::Order),
            "delivery_note" => Ok(Self::DeliveryNote),
            "invoice" => Ok(Self::Invoice),
            other => Err(format!("Unknown document type: {other}")),
        }
    }
}

/// Document lifecycle status.
///
/// draft -> issued -> paid; cancelled is reachable from draft and issued.
/// Paid and cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Being drafted; no accounting effect.
    Draft,
    /// Issued to the customer; invoices post revenue at this point.
    Issued,
    /// Payment received; terminal.
    Paid,
    /// Abandoned; terminal, no accounting effect.
    Cancelled,
}

impl DocumentStatus {
    /// Returns the lowercase string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Issued => "issued",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns true if an invoice in this status belongs on the ledger.
    #[must_use]
    pub const fn has_accounting_effect(self) -> bool {
        matches!(self, Self::Issued | Self::Paid)
    }

    /// Returns true if the status permits edits to the document body.
    #[must_use]
    pub const fn is_editable(self) -> bool {
        matches!(self, Self::Draft | Self::Issued)
    }

    /// Checks whether a transition to `next` is legal.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Issued)
                | (Self::Issued, Self::Paid)
                | (Self::Draft | Self::Issued, Self::Cancelled)
        )
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "issued" => Ok(Self::Issued),
            "paid" => Ok(Self::Paid),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("Unknown document status: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[test]
    fn test_type_roundtrip() {
        for ty in [
            DocumentType::Quotation,
            DocumentType::Order,
            DocumentType::DeliveryNote,
            DocumentType::Invoice,
        ] {
            assert_eq!(DocumentType::from_str(ty.as_str()).unwrap(), ty);
        }
    }

    #[test]
    fn test_number_prefixes() {
        assert_eq!(DocumentType::Quotation.number_prefix(), 'Q');
        assert_eq!(DocumentType::Invoice.number_prefix(), 'I');
    }

    #[rstest]
    #[case(DocumentStatus::Draft, DocumentStatus::Issued, true)]
    #[case(DocumentStatus::Issued, DocumentStatus::Paid, true)]
    #[case(DocumentStatus::Draft, DocumentStatus::Cancelled, true)]
    #[case(DocumentStatus::Issued, DocumentStatus::Cancelled, true)]
    #[case(DocumentStatus::Draft, DocumentStatus::Paid, false)]
    #[case(DocumentStatus::Paid, DocumentStatus::Issued, false)]
    #[case(DocumentStatus::Paid, DocumentStatus::Cancelled, false)]
    #[case(DocumentStatus::Cancelled, DocumentStatus::Issued, false)]
    #[case(DocumentStatus::Issued, DocumentStatus::Draft, false)]
    fn test_status_transitions(
        #[case] from: DocumentStatus,
        #[case] to: DocumentStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(from.can_transition_to(to), allowed);
    }

    #[test]
    fn test_accounting_effect() {
        assert!(!DocumentStatus::Draft.has_accounting_effect());
        assert!(DocumentStatus::Issued.has_accounting_effect());
        assert!(DocumentStatus::Paid.has_accounting_effect());
        assert!(!DocumentStatus::Cancelled.has_accounting_effect());
    }
}
