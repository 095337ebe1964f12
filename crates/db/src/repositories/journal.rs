//! Journal repository for ledger database operations.
//!
//! Manual entries are created and deleted here, guarded by the core
//! validation rules. System-generated entries are written only by the
//! posting engine; the delete path refuses to touch them.

use chrono::NaiveDate;
use kanjo_core::ledger::{
    EntryReference, JournalEntry, LedgerError, ManualEntryInput, ReferenceKind,
    validate_can_delete, validate_manual_entry,
};
use kanjo_shared::types::{AccountId, AdminId, JournalEntryId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use std::collections::HashSet;
use std::str::FromStr;

use crate::entities::{accounts, journal_entries};

/// Error types for journal operations.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    /// Validation or permission failure from the domain rules.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A stored row failed to convert to a domain value.
    #[error("Corrupt journal row: {0}")]
    InvalidRow(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Journal repository for ledger entry operations.
#[derive(Debug, Clone)]
pub struct JournalRepository {
    db: DatabaseConnection,
}

impl JournalRepository {
    /// Creates a new journal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists journal entries within an optional date window, newest
    /// first (entry date desc, then id desc; ids are time-ordered UUIDs,
    /// so the tiebreak is creation order).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt.
    pub async fn list(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<JournalEntry>, JournalError> {
        let mut query = journal_entries::Entity::find();

        if let Some(start) = start {
            query = query.filter(journal_entries::Column::EntryDate.gte(start));
        }
        if let Some(end) = end {
            query = query.filter(journal_entries::Column::EntryDate.lte(end));
        }

        let models = query
            .order_by_desc(journal_entries::Column::EntryDate)
            .order_by_desc(journal_entries::Column::Id)
            .all(&self.db)
            .await?;

        models.into_iter().map(entry_from_model).collect()
    }

    /// Creates a manual journal entry.
    ///
    /// Validates the amount, the debit/credit distinctness, and the
    /// existence of both accounts before anything is written.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::Ledger` on a validation failure; no row is
    /// written in that case.
    pub async fn create_manual(
        &self,
        input: ManualEntryInput,
    ) -> Result<JournalEntry, JournalError> {
        let known: HashSet<AccountId> = accounts::Entity::find()
            .filter(accounts::Column::Id.is_in([
                input.debit_account_id.into_inner(),
                input.credit_account_id.into_inner(),
            ]))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| AccountId::from_uuid(m.id))
            .collect();

        validate_manual_entry(&input, |id| known.contains(&id))?;

        let model = journal_entries::ActiveModel {
            id: Set(JournalEntryId::new().into_inner()),
            entry_date: Set(input.entry_date),
            description: Set(input.description),
            debit_account_id: Set(input.debit_account_id.into_inner()),
            credit_account_id: Set(input.credit_account_id.into_inner()),
            amount: Set(input.amount),
            reference_type: Set(None),
            reference_id: Set(None),
            notes: Set(input.notes),
            created_by: Set(input.created_by.into_inner()),
            created_at: Set(chrono::Utc::now().into()),
        };

        let model = model.insert(&self.db).await?;
        entry_from_model(model)
    }

    /// Deletes a manual journal entry.
    ///
    /// System-generated entries (those carrying a source reference) are
    /// protected: they are only replaced by the posting engine or removed
    /// with their source document.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::EntryNotFound` for unknown ids and
    /// `LedgerError::SystemEntryProtected` for referenced entries; the
    /// entry remains on the ledger in the latter case.
    pub async fn delete_manual(&self, id: JournalEntryId) -> Result<(), JournalError> {
        let model = journal_entries::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(LedgerError::EntryNotFound(id))?;

        let entry = entry_from_model(model)?;
        validate_can_delete(&entry)?;

        journal_entries::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await?;

        Ok(())
    }

    /// Finds a single entry by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is corrupt.
    pub async fn find_by_id(
        &self,
        id: JournalEntryId,
    ) -> Result<Option<JournalEntry>, JournalError> {
        let model = journal_entries::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?;

        model.map(entry_from_model).transpose()
    }
}

/// Converts a stored row to the domain entry type.
///
/// The reference pair must be both present or both absent; the schema
/// enforces this, so a half-populated pair is reported as corruption.
pub(crate) fn entry_from_model(
    model: journal_entries::Model,
) -> Result<JournalEntry, JournalError> {
    let reference = match (model.reference_type, model.reference_id) {
        (None, None) => None,
        (Some(kind), Some(id)) => {
            let kind = ReferenceKind::from_str(&kind).map_err(JournalError::InvalidRow)?;
            Some(EntryReference::new(kind, id))
        }
        _ => {
            return Err(JournalError::InvalidRow(format!(
                "journal entry {} has a half-populated reference pair",
                model.id
            )));
        }
    };

    Ok(JournalEntry {
        id: JournalEntryId::from_uuid(model.id),
        entry_date: model.entry_date,
        description: model.description,
        debit_account_id: AccountId::from_uuid(model.debit_account_id),
        credit_account_id: AccountId::from_uuid(model.credit_account_id),
        amount: model.amount,
        reference,
        notes: model.notes,
        created_by: AdminId::from_uuid(model.created_by),
        created_at: model.created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn model(
        reference_type: Option<&str>,
        reference_id: Option<Uuid>,
    ) -> journal_entries::Model {
        journal_entries::Model {
            id: Uuid::now_v7(),
            entry_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            description: "entry".to_string(),
            debit_account_id: Uuid::new_v4(),
            credit_account_id: Uuid::new_v4(),
            amount: dec!(100),
            reference_type: reference_type.map(str::to_string),
            reference_id,
            notes: None,
            created_by: Uuid::new_v4(),
            created_at: chrono::Utc::now().into(),
        }
    }

    #[test]
    fn test_manual_row_converts_without_reference() {
        let entry = entry_from_model(model(None, None)).unwrap();
        assert!(entry.reference.is_none());
        assert!(!entry.is_system_generated());
    }

    #[test]
    fn test_referenced_row_converts() {
        let source = Uuid::new_v4();
        let entry = entry_from_model(model(Some("purchase_order"), Some(source))).unwrap();

        let reference = entry.reference.unwrap();
        assert_eq!(reference.kind, ReferenceKind::PurchaseOrder);
        assert_eq!(reference.id, source);
    }

    #[test]
    fn test_half_populated_reference_is_corrupt() {
        assert!(matches!(
            entry_from_model(model(Some("document"), None)),
            Err(JournalError::InvalidRow(_))
        ));
        assert!(matches!(
            entry_from_model(model(None, Some(Uuid::new_v4()))),
            Err(JournalError::InvalidRow(_))
        ));
    }

    #[test]
    fn test_unknown_reference_kind_is_corrupt() {
        assert!(matches!(
            entry_from_model(model(Some("mystery"), Some(Uuid::new_v4()))),
            Err(JournalError::InvalidRow(_))
        ));
    }
}
