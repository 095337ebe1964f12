//! Journal entry domain types.

use chrono::{DateTime, FixedOffset, NaiveDate};
use kanjo_shared::types::{AccountId, AdminId, JournalEntryId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of source event an auto-generated entry is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// Sales document (invoice issued).
    Document,
    /// Payment received against a sales document.
    DocumentPayment,
    /// Purchase order delivered.
    PurchaseOrder,
    /// Inventory received from a purchase.
    InventoryMovement,
}

impl ReferenceKind {
    /// Returns the snake_case string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::DocumentPayment => "document_payment",
            Self::PurchaseOrder => "purchase_order",
            Self::InventoryMovement => "inventory_movement",
        }
    }
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReferenceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "document" => Ok(Self::Document),
            "document_payment" => Ok(Self::DocumentPayment),
            "purchase_order" => Ok(Self::PurchaseOrder),
            "inventory_movement" => Ok(Self::InventoryMovement),
            other => Err(format!("Unknown reference kind: {other}")),
        }
    }
}

/// Link from an auto-generated entry back to its source event.
///
/// Kind and id always travel together; a half-populated reference is
/// invalid at the storage boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryReference {
    /// The kind of source event.
    pub kind: ReferenceKind,
    /// The id of the source row.
    pub id: Uuid,
}

impl EntryReference {
    /// Creates a new reference tag.
    #[must_use]
    pub const fn new(kind: ReferenceKind, id: Uuid) -> Self {
        Self { kind, id }
    }
}

/// A single double-entry journal record.
///
/// Debits one account and credits another for a positive amount. Entries
/// carrying a reference are system-generated and owned by the posting
/// engine; entries without one are manual and user-owned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier, assigned on creation, immutable.
    pub id: JournalEntryId,
    /// The accounting date (the source document's effective date, which
    /// may differ from creation time).
    pub entry_date: NaiveDate,
    /// Free-text label.
    pub description: String,
    /// The debited account.
    pub debit_account_id: AccountId,
    /// The credited account. Must differ from the debit account.
    pub credit_account_id: AccountId,
    /// Positive monetary amount.
    pub amount: Decimal,
    /// Present on system-generated entries only.
    pub reference: Option<EntryReference>,
    /// Optional free text.
    pub notes: Option<String>,
    /// The administrator who caused the entry to exist.
    pub created_by: AdminId,
    /// Row creation timestamp.
    pub created_at: DateTime<FixedOffset>,
}

impl JournalEntry {
    /// Returns true if this entry was generated by the posting engine.
    ///
    /// System-generated entries must never be edited or deleted directly
    /// by a user.
    #[must_use]
    pub const fn is_system_generated(&self) -> bool {
        self.reference.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_reference_kind_roundtrip() {
        for kind in [
            ReferenceKind::Document,
            ReferenceKind::DocumentPayment,
            ReferenceKind::PurchaseOrder,
            ReferenceKind::InventoryMovement,
        ] {
            assert_eq!(ReferenceKind::from_str(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_reference_kind_rejected() {
        assert!(ReferenceKind::from_str("invoice").is_err());
        assert!(ReferenceKind::from_str("").is_err());
    }

    #[test]
    fn test_system_generated_flag() {
        let mut entry = JournalEntry {
            id: JournalEntryId::new(),
            entry_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            description: "manual".to_string(),
            debit_account_id: AccountId::new(),
            credit_account_id: AccountId::new(),
            amount: Decimal::ONE,
            reference: None,
            notes: None,
            created_by: AdminId::new(),
            created_at: chrono::Utc::now().into(),
        };
        assert!(!entry.is_system_generated());

        entry.reference = Some(EntryReference::new(
            ReferenceKind::Document,
            Uuid::new_v4(),
        ));
        assert!(entry.is_system_generated());
    }
}
