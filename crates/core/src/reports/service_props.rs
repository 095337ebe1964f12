//! Property tests for the statement calculators.

use chrono::NaiveDate;
use kanjo_shared::types::AccountId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::chart::AccountType;

use super::service::StatementCalculator;
use super::types::{AccountSummary, DateWindow, LedgerLine};

/// A fixed six-account chart; strategies pick entry endpoints from it.
fn chart() -> Vec<AccountSummary> {
    let types = [
        ("1000", "Cash", AccountType::Asset),
        ("1100", "Accounts receivable", AccountType::Asset),
        ("2000", "Accounts payable", AccountType::Liability),
        ("3000", "Capital", AccountType::Equity),
        ("4000", "Sales revenue", AccountType::Revenue),
        ("5000", "Purchases", AccountType::Expense),
    ];
    types
        .into_iter()
        .map(|(code, name, account_type)| AccountSummary {
            id: AccountId::new(),
            code: code.to_string(),
            name: name.to_string(),
            account_type,
        })
        .collect()
}

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u32..730).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .checked_add_days(chrono::Days::new(u64::from(offset)))
            .unwrap()
    })
}

/// Lines between distinct accounts of the fixed chart.
fn lines_strategy(accounts: Vec<AccountSummary>) -> impl Strategy<Value = Vec<LedgerLine>> {
    let n = accounts.len();
    prop::collection::vec(
        (0..n, 0..n, amount_strategy(), date_strategy()).prop_filter_map(
            "debit and credit must differ",
            move |(debit, credit, amount, entry_date)| {
                (debit != credit).then(|| LedgerLine {
                    entry_date,
                    debit_account_id: accounts[debit].id,
                    credit_account_id: accounts[credit].id,
                    amount,
                })
            },
        ),
        0..40,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// net_income always equals revenue - expenses, exactly.
    #[test]
    fn prop_profit_and_loss_additivity(
        lines in chart_lines(),
    ) {
        let (accounts, lines) = lines;
        let pnl = StatementCalculator::profit_and_loss(&accounts, &lines, DateWindow::default());
        prop_assert_eq!(pnl.net_income, pnl.revenue - pnl.expenses);
    }

    /// For any entry set confined to classified accounts the balance
    /// sheet identity holds exactly: every entry adds the same amount to
    /// both sides of the equation.
    #[test]
    fn prop_balance_sheet_identity(
        lines in chart_lines(),
        as_of in prop::option::of(date_strategy()),
    ) {
        let (accounts, lines) = lines;
        let sheet = StatementCalculator::balance_sheet(&accounts, &lines, as_of);
        prop_assert_eq!(sheet.difference, Decimal::ZERO);
        prop_assert!(sheet.balanced);
    }

    /// The trial balance's grand totals match: total debits equal total
    /// credits whenever every entry endpoint is a listed account.
    #[test]
    fn prop_trial_balance_totals_match(
        lines in chart_lines(),
    ) {
        let (accounts, lines) = lines;
        let rows = StatementCalculator::trial_balance(&accounts, &lines, DateWindow::default());

        let total_debit: Decimal = rows.iter().map(|r| r.total_debit).sum();
        let total_credit: Decimal = rows.iter().map(|r| r.total_credit).sum();
        prop_assert_eq!(total_debit, total_credit);
    }

    /// No trial balance row is all-zero, and every returned account saw
    /// activity inside the window.
    #[test]
    fn prop_trial_balance_omits_untouched(
        lines in chart_lines(),
        start in prop::option::of(date_strategy()),
        end in prop::option::of(date_strategy()),
    ) {
        let (accounts, lines) = lines;
        let window = DateWindow::new(start, end);
        let rows = StatementCalculator::trial_balance(&accounts, &lines, window);

        for row in &rows {
            prop_assert!(!(row.total_debit.is_zero() && row.total_credit.is_zero()));
            let touched = lines.iter().any(|l| {
                window.contains(l.entry_date)
                    && (l.debit_account_id == row.account_id
                        || l.credit_account_id == row.account_id)
            });
            prop_assert!(touched);
        }
    }

    /// Entries outside the window never affect profit & loss.
    #[test]
    fn prop_window_excludes_out_of_range(
        lines in chart_lines(),
    ) {
        let (accounts, lines) = lines;
        let cutoff = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let window = DateWindow::new(None, Some(cutoff));

        let filtered: Vec<LedgerLine> = lines
            .iter()
            .copied()
            .filter(|l| l.entry_date <= cutoff)
            .collect();

        let windowed = StatementCalculator::profit_and_loss(&accounts, &lines, window);
        let prefiltered =
            StatementCalculator::profit_and_loss(&accounts, &filtered, DateWindow::default());

        prop_assert_eq!(windowed.revenue, prefiltered.revenue);
        prop_assert_eq!(windowed.expenses, prefiltered.expenses);
    }
}

/// Strategy producing a chart together with lines over it.
fn chart_lines() -> impl Strategy<Value = (Vec<AccountSummary>, Vec<LedgerLine>)> {
    Just(chart()).prop_flat_map(|accounts| {
        let lines = lines_strategy(accounts.clone());
        (Just(accounts), lines)
    })
}
