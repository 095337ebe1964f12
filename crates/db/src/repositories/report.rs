//! Report repository for financial statement queries.
//!
//! Loads accounts and date-filtered journal lines, then hands them to the
//! pure calculators in `kanjo-core::reports`. The trial balance considers
//! the active registry only; profit & loss and the balance sheet consider
//! every account, because entries referencing deactivated accounts remain
//! part of history.

use chrono::NaiveDate;
use kanjo_core::chart::AccountType;
use kanjo_core::reports::{
    AccountSummary, BalanceSheet, DateWindow, LedgerLine, ProfitAndLoss, StatementCalculator,
    TrialBalanceRow,
};
use kanjo_shared::types::AccountId;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use std::str::FromStr;

use crate::entities::{accounts, journal_entries};

/// Error types for report operations.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// A stored row failed to convert to a domain value.
    #[error("Corrupt row: {0}")]
    InvalidRow(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Report repository for statement queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Computes the trial balance over an optional date window.
    ///
    /// Active accounts only; rows with no activity are omitted; ordered
    /// by account code.
    ///
    /// # Errors
    ///
    /// Returns an error if the queries fail.
    pub async fn trial_balance(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<TrialBalanceRow>, ReportError> {
        let accounts = self.load_accounts(true).await?;
        let lines = self.load_lines(start, end).await?;

        Ok(StatementCalculator::trial_balance(
            &accounts,
            &lines,
            DateWindow::new(start, end),
        ))
    }

    /// Computes profit & loss over an optional date window.
    ///
    /// # Errors
    ///
    /// Returns an error if the queries fail.
    pub async fn profit_and_loss(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<ProfitAndLoss, ReportError> {
        let accounts = self.load_accounts(false).await?;
        let lines = self.load_lines(start, end).await?;

        Ok(StatementCalculator::profit_and_loss(
            &accounts,
            &lines,
            DateWindow::new(start, end),
        ))
    }

    /// Computes the balance sheet as of an optional date.
    ///
    /// The `balanced` flag and `difference` are carried through to the
    /// caller as data; a false flag is a data-integrity signal for a
    /// human, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the queries fail.
    pub async fn balance_sheet(
        &self,
        as_of: Option<NaiveDate>,
    ) -> Result<BalanceSheet, ReportError> {
        let accounts = self.load_accounts(false).await?;
        let lines = self.load_lines(None, as_of).await?;

        Ok(StatementCalculator::balance_sheet(&accounts, &lines, as_of))
    }

    async fn load_accounts(&self, active_only: bool) -> Result<Vec<AccountSummary>, ReportError> {
        let mut query = accounts::Entity::find().order_by_asc(accounts::Column::Code);

        if active_only {
            query = query.filter(accounts::Column::IsActive.eq(true));
        }

        query
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| {
                let account_type =
                    AccountType::from_str(&m.account_type).map_err(ReportError::InvalidRow)?;
                Ok(AccountSummary {
                    id: AccountId::from_uuid(m.id),
                    code: m.code,
                    name: m.name,
                    account_type,
                })
            })
            .collect()
    }

    async fn load_lines(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<LedgerLine>, ReportError> {
        let mut query = journal_entries::Entity::find();

        if let Some(start) = start {
            query = query.filter(journal_entries::Column::EntryDate.gte(start));
        }
        if let Some(end) = end {
            query = query.filter(journal_entries::Column::EntryDate.lte(end));
        }

        let lines = query
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| LedgerLine {
                entry_date: m.entry_date,
                debit_account_id: AccountId::from_uuid(m.debit_account_id),
                credit_account_id: AccountId::from_uuid(m.credit_account_id),
                amount: m.amount,
            })
            .collect();

        Ok(lines)
    }
}
