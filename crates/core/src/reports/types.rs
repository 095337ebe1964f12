//! Statement data types.

use chrono::NaiveDate;
use kanjo_shared::types::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::chart::AccountType;

/// The slice of an account a statement needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSummary {
    /// Account id.
    pub id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
}

/// The slice of a journal entry a statement needs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LedgerLine {
    /// Accounting date.
    pub entry_date: NaiveDate,
    /// The debited account.
    pub debit_account_id: AccountId,
    /// The credited account.
    pub credit_account_id: AccountId,
    /// Entry amount (positive).
    pub amount: Decimal,
}

/// An optional date window with inclusive, independently-open bounds.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DateWindow {
    /// Inclusive lower bound, open when absent.
    pub start: Option<NaiveDate>,
    /// Inclusive upper bound, open when absent.
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    /// Creates a window from optional bounds.
    #[must_use]
    pub const fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Window bounded only from above, for as-of statements.
    #[must_use]
    pub const fn until(end: Option<NaiveDate>) -> Self {
        Self { start: None, end }
    }

    /// Checks whether a date falls inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }
}

/// One trial balance row: an account's debit and credit activity over the
/// window. Accounts with no activity are omitted from the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Account id.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Sum of amounts where this account was the debit side.
    pub total_debit: Decimal,
    /// Sum of amounts where this account was the credit side.
    pub total_credit: Decimal,
}

/// Profit & loss statement over a window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProfitAndLoss {
    /// Amounts credited to revenue accounts.
    pub revenue: Decimal,
    /// Amounts debited to expense accounts.
    pub expenses: Decimal,
    /// revenue - expenses.
    pub net_income: Decimal,
}

/// Balance sheet as of a date.
///
/// Assets use the debit-normal sign convention; liabilities and equity are
/// credit-normal. Equity includes retained earnings (net income to date),
/// which is what makes the accounting identity hold for a well-formed
/// ledger. `balanced` is a data-integrity signal, not an error: a false
/// value means the ledger references misclassified or unknown accounts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// Net asset balance (debits - credits over asset accounts).
    pub assets: Decimal,
    /// Net liability balance (credits - debits over liability accounts).
    pub liabilities: Decimal,
    /// Net equity balance including retained earnings.
    pub equity: Decimal,
    /// Net income to date, folded into `equity`.
    pub retained_earnings: Decimal,
    /// Whether assets == liabilities + equity within tolerance.
    pub balanced: bool,
    /// assets - (liabilities + equity).
    pub difference: Decimal,
}
