//! Business rule validation for ledger operations.

use kanjo_shared::types::AccountId;
use rust_decimal::Decimal;

use super::entry::JournalEntry;
use super::error::LedgerError;
use super::types::ManualEntryInput;

/// Validates a manual journal entry before it is persisted.
///
/// Rules:
/// 1. The amount must be strictly positive.
/// 2. The debit and credit account must differ (a self-referencing entry
///    is meaningless in double-entry bookkeeping).
/// 3. Both accounts must exist in the registry.
///
/// The account check is injected so the function stays free of database
/// dependencies.
///
/// # Errors
///
/// Returns the first violated rule as a `LedgerError`; nothing is written
/// when validation fails.
pub fn validate_manual_entry<F>(
    input: &ManualEntryInput,
    account_exists: F,
) -> Result<(), LedgerError>
where
    F: Fn(AccountId) -> bool,
{
    if input.amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount);
    }
    if input.debit_account_id == input.credit_account_id {
        return Err(LedgerError::SameAccount);
    }
    for account_id in [input.debit_account_id, input.credit_account_id] {
        if !account_exists(account_id) {
            return Err(LedgerError::AccountNotFound(account_id));
        }
    }
    Ok(())
}

/// Validates that a journal entry may be deleted by a user.
///
/// Entries carrying a source reference are system-generated; they are
/// replaced or removed only through the posting engine (or when the source
/// document is deleted), never by a direct user action.
///
/// # Errors
///
/// Returns `LedgerError::SystemEntryProtected` for referenced entries.
pub fn validate_can_delete(entry: &JournalEntry) -> Result<(), LedgerError> {
    if entry.is_system_generated() {
        return Err(LedgerError::SystemEntryProtected(entry.id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::entry::{EntryReference, ReferenceKind};
    use chrono::NaiveDate;
    use kanjo_shared::types::{AdminId, JournalEntryId};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn make_input(amount: Decimal) -> ManualEntryInput {
        ManualEntryInput {
            entry_date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
            description: "Office supplies".to_string(),
            debit_account_id: AccountId::new(),
            credit_account_id: AccountId::new(),
            amount,
            notes: None,
            created_by: AdminId::new(),
        }
    }

    fn make_entry(reference: Option<EntryReference>) -> JournalEntry {
        JournalEntry {
            id: JournalEntryId::new(),
            entry_date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
            description: "entry".to_string(),
            debit_account_id: AccountId::new(),
            credit_account_id: AccountId::new(),
            amount: dec!(100),
            reference,
            notes: None,
            created_by: AdminId::new(),
            created_at: chrono::Utc::now().into(),
        }
    }

    #[test]
    fn test_valid_entry_passes() {
        let input = make_input(dec!(500));
        assert!(validate_manual_entry(&input, |_| true).is_ok());
    }

    #[test]
    fn test_zero_amount_rejected() {
        let input = make_input(Decimal::ZERO);
        assert!(matches!(
            validate_manual_entry(&input, |_| true),
            Err(LedgerError::NonPositiveAmount)
        ));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let input = make_input(dec!(-100));
        assert!(matches!(
            validate_manual_entry(&input, |_| true),
            Err(LedgerError::NonPositiveAmount)
        ));
    }

    #[test]
    fn test_same_account_rejected() {
        let mut input = make_input(dec!(100));
        input.credit_account_id = input.debit_account_id;
        assert!(matches!(
            validate_manual_entry(&input, |_| true),
            Err(LedgerError::SameAccount)
        ));
    }

    #[test]
    fn test_missing_account_rejected() {
        let input = make_input(dec!(100));
        let known = input.debit_account_id;
        let result = validate_manual_entry(&input, |id| id == known);
        assert!(matches!(result, Err(LedgerError::AccountNotFound(id)) if id == input.credit_account_id));
    }

    #[test]
    fn test_manual_entry_deletable() {
        let entry = make_entry(None);
        assert!(validate_can_delete(&entry).is_ok());
    }

    #[test]
    fn test_referenced_entry_protected() {
        for kind in [
            ReferenceKind::Document,
            ReferenceKind::DocumentPayment,
            ReferenceKind::PurchaseOrder,
            ReferenceKind::InventoryMovement,
        ] {
            let entry = make_entry(Some(EntryReference::new(kind, Uuid::new_v4())));
            assert!(matches!(
                validate_can_delete(&entry),
                Err(LedgerError::SystemEntryProtected(id)) if id == entry.id
            ));
        }
    }
}
