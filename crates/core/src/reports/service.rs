//! Statement calculators.

use std::collections::HashMap;

use kanjo_shared::types::AccountId;
use rust_decimal::Decimal;

use crate::chart::AccountType;

use super::types::{
    AccountSummary, BalanceSheet, DateWindow, LedgerLine, ProfitAndLoss, TrialBalanceRow,
};

/// Tolerance for the balance sheet identity check, in currency units.
pub const BALANCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2); // 0.01

/// Pure statement computation over accounts and journal lines.
///
/// Callers supply the account set the statement should consider: the
/// active registry for the trial balance, the full registry (including
/// deactivated accounts, whose history stays valid) for profit & loss and
/// the balance sheet.
pub struct StatementCalculator;

impl StatementCalculator {
    /// Computes the trial balance over a window.
    ///
    /// Per account: total debits and total credits across the window.
    /// Accounts with no activity in the window are omitted. Rows come back
    /// ordered by account code.
    #[must_use]
    pub fn trial_balance(
        accounts: &[AccountSummary],
        lines: &[LedgerLine],
        window: DateWindow,
    ) -> Vec<TrialBalanceRow> {
        let totals = Self::accumulate(lines, window);

        let mut rows: Vec<TrialBalanceRow> = accounts
            .iter()
            .filter_map(|account| {
                let (total_debit, total_credit) = totals.get(&account.id).copied()?;
                if total_debit.is_zero() && total_credit.is_zero() {
                    return None;
                }
                Some(TrialBalanceRow {
                    account_id: account.id,
                    code: account.code.clone(),
                    name: account.name.clone(),
                    account_type: account.account_type,
                    total_debit,
                    total_credit,
                })
            })
            .collect();

        rows.sort_by(|a, b| a.code.cmp(&b.code));
        rows
    }

    /// Computes profit & loss over a window.
    ///
    /// Revenue sums amounts credited to revenue accounts; expenses sum
    /// amounts debited to expense accounts. Empty data yields zeros.
    #[must_use]
    pub fn profit_and_loss(
        accounts: &[AccountSummary],
        lines: &[LedgerLine],
        window: DateWindow,
    ) -> ProfitAndLoss {
        let types = Self::type_index(accounts);

        let mut revenue = Decimal::ZERO;
        let mut expenses = Decimal::ZERO;

        for line in lines.iter().filter(|l| window.contains(l.entry_date)) {
            if types.get(&line.credit_account_id) == Some(&AccountType::Revenue) {
                revenue += line.amount;
            }
            if types.get(&line.debit_account_id) == Some(&AccountType::Expense) {
                expenses += line.amount;
            }
        }

        ProfitAndLoss {
            revenue,
            expenses,
            net_income: revenue - expenses,
        }
    }

    /// Computes the balance sheet as of a date (all entries when absent).
    ///
    /// Assets are debit-normal; liabilities and equity credit-normal.
    /// Retained earnings (net income over the same entries) are folded
    /// into equity, so for a ledger whose entries all reference classified
    /// accounts the identity `assets == liabilities + equity` holds
    /// exactly. The identity is still checked and reported rather than
    /// trusted: a mismatch beyond `BALANCE_TOLERANCE` flags misclassified
    /// or unknown account references.
    #[must_use]
    pub fn balance_sheet(
        accounts: &[AccountSummary],
        lines: &[LedgerLine],
        as_of: Option<chrono::NaiveDate>,
    ) -> BalanceSheet {
        let window = DateWindow::until(as_of);
        let types = Self::type_index(accounts);

        let mut assets = Decimal::ZERO;
        let mut liabilities = Decimal::ZERO;
        let mut equity = Decimal::ZERO;

        for line in lines.iter().filter(|l| window.contains(l.entry_date)) {
            match types.get(&line.debit_account_id) {
                Some(AccountType::Asset) => assets += line.amount,
                Some(AccountType::Liability) => liabilities -= line.amount,
                Some(AccountType::Equity) => equity -= line.amount,
                _ => {}
            }
            match types.get(&line.credit_account_id) {
                Some(AccountType::Asset) => assets -= line.amount,
                Some(AccountType::Liability) => liabilities += line.amount,
                Some(AccountType::Equity) => equity += line.amount,
                _ => {}
            }
        }

        let retained_earnings = Self::profit_and_loss(accounts, lines, window).net_income;
        let equity_with_retained = equity + retained_earnings;

        let difference = assets - (liabilities + equity_with_retained);

        BalanceSheet {
            assets,
            liabilities,
            equity: equity_with_retained,
            retained_earnings,
            balanced: difference.abs() <= BALANCE_TOLERANCE,
            difference,
        }
    }

    /// Sums debit and credit activity per account over a window.
    fn accumulate(
        lines: &[LedgerLine],
        window: DateWindow,
    ) -> HashMap<AccountId, (Decimal, Decimal)> {
        let mut totals: HashMap<AccountId, (Decimal, Decimal)> = HashMap::new();

        for line in lines.iter().filter(|l| window.contains(l.entry_date)) {
            totals.entry(line.debit_account_id).or_default().0 += line.amount;
            totals.entry(line.credit_account_id).or_default().1 += line.amount;
        }

        totals
    }

    fn type_index(accounts: &[AccountSummary]) -> HashMap<AccountId, AccountType> {
        accounts.iter().map(|a| (a.id, a.account_type)).collect()
    }
}
