//! Double-entry bookkeeping logic.
//!
//! This module implements the core ledger functionality:
//! - Journal entries (one debit account, one credit account, an amount)
//! - Reference tags linking auto entries to their source events
//! - Business rule validation for manual entries
//! - The auto-posting planner that derives the entry set a source
//!   document requires
//! - Error types for ledger operations

pub mod entry;
pub mod error;
pub mod posting;
pub mod types;
pub mod validation;

#[cfg(test)]
mod posting_props;

pub use entry::{EntryReference, JournalEntry, ReferenceKind};
pub use error::LedgerError;
pub use posting::{
    InvoiceSnapshot, MovementSnapshot, PurchaseOrderSnapshot, plan_for_invoice,
    plan_for_movement, plan_for_purchase_order,
};
pub use types::{ManualEntryInput, PlannedEntry};
pub use validation::{validate_can_delete, validate_manual_entry};
