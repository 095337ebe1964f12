//! Input and planning types for ledger operations.

use chrono::NaiveDate;
use kanjo_shared::types::{AccountId, AdminId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entry::EntryReference;

/// Input for creating a manual journal entry.
///
/// Manual entries are typed in by an administrator and carry no source
/// reference. Validation happens before anything is written.
#[derive(Debug, Clone)]
pub struct ManualEntryInput {
    /// The accounting date.
    pub entry_date: NaiveDate,
    /// Free-text label.
    pub description: String,
    /// The account to debit.
    pub debit_account_id: AccountId,
    /// The account to credit.
    pub credit_account_id: AccountId,
    /// The amount (must be strictly positive).
    pub amount: Decimal,
    /// Optional free text.
    pub notes: Option<String>,
    /// The authenticated administrator creating the entry.
    pub created_by: AdminId,
}

/// A journal entry the posting planner has decided must exist.
///
/// Planned entries are pure data; the posting engine turns them into rows
/// inside a reconciliation transaction. Every plan satisfies the ledger
/// invariants: positive amount, distinct accounts, reference present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedEntry {
    /// The accounting date.
    pub entry_date: NaiveDate,
    /// Auto-generated label ("{counterparty} {event} ({number})").
    pub description: String,
    /// The account to debit.
    pub debit_account_id: AccountId,
    /// The account to credit.
    pub credit_account_id: AccountId,
    /// The amount.
    pub amount: Decimal,
    /// Tag linking the entry to its source event.
    pub reference: EntryReference,
    /// The administrator recorded as the entry's creator (the source
    /// document's owner).
    pub created_by: AdminId,
}
