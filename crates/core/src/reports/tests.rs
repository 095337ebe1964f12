//! Scenario tests for the statement calculators.

use chrono::NaiveDate;
use kanjo_shared::types::AccountId;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::chart::AccountType;

use super::service::StatementCalculator;
use super::types::{AccountSummary, DateWindow, LedgerLine};

struct Chart {
    cash: AccountId,
    receivable: AccountId,
    payable: AccountId,
    capital: AccountId,
    revenue: AccountId,
    purchases: AccountId,
    accounts: Vec<AccountSummary>,
}

fn chart() -> Chart {
    let cash = AccountId::new();
    let receivable = AccountId::new();
    let payable = AccountId::new();
    let capital = AccountId::new();
    let revenue = AccountId::new();
    let purchases = AccountId::new();

    let mk = |id, code: &str, name: &str, account_type| AccountSummary {
        id,
        code: code.to_string(),
        name: name.to_string(),
        account_type,
    };

    Chart {
        cash,
        receivable,
        payable,
        capital,
        revenue,
        purchases,
        accounts: vec![
            mk(cash, "1000", "Cash", AccountType::Asset),
            mk(receivable, "1100", "Accounts receivable", AccountType::Asset),
            mk(payable, "2000", "Accounts payable", AccountType::Liability),
            mk(capital, "3000", "Capital", AccountType::Equity),
            mk(revenue, "4000", "Sales revenue", AccountType::Revenue),
            mk(purchases, "5000", "Purchases", AccountType::Expense),
        ],
    }
}

fn line(date: (i32, u32, u32), debit: AccountId, credit: AccountId, amount: Decimal) -> LedgerLine {
    LedgerLine {
        entry_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        debit_account_id: debit,
        credit_account_id: credit,
        amount,
    }
}

#[test]
fn test_trial_balance_sums_both_sides() {
    let c = chart();
    let lines = vec![
        line((2026, 1, 10), c.receivable, c.revenue, dec!(11000)),
        line((2026, 1, 20), c.cash, c.receivable, dec!(11000)),
    ];

    let rows = StatementCalculator::trial_balance(&c.accounts, &lines, DateWindow::default());

    let receivable = rows.iter().find(|r| r.account_id == c.receivable).unwrap();
    assert_eq!(receivable.total_debit, dec!(11000));
    assert_eq!(receivable.total_credit, dec!(11000));

    let cash = rows.iter().find(|r| r.account_id == c.cash).unwrap();
    assert_eq!(cash.total_debit, dec!(11000));
    assert_eq!(cash.total_credit, Decimal::ZERO);
}

#[test]
fn test_trial_balance_omits_untouched_accounts() {
    let c = chart();
    let lines = vec![line((2026, 1, 10), c.receivable, c.revenue, dec!(5000))];

    let rows = StatementCalculator::trial_balance(&c.accounts, &lines, DateWindow::default());

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.account_id != c.payable));
    assert!(rows.iter().all(|r| r.account_id != c.cash));
}

#[test]
fn test_trial_balance_ordered_by_code() {
    let c = chart();
    let lines = vec![
        line((2026, 1, 10), c.purchases, c.payable, dec!(5500)),
        line((2026, 1, 11), c.receivable, c.revenue, dec!(11000)),
        line((2026, 1, 12), c.cash, c.receivable, dec!(11000)),
    ];

    let rows = StatementCalculator::trial_balance(&c.accounts, &lines, DateWindow::default());
    let codes: Vec<&str> = rows.iter().map(|r| r.code.as_str()).collect();

    assert_eq!(codes, vec!["1000", "1100", "2000", "4000", "5000"]);
}

#[test]
fn test_trial_balance_respects_window() {
    let c = chart();
    let lines = vec![
        line((2026, 1, 10), c.receivable, c.revenue, dec!(1000)),
        line((2026, 2, 10), c.receivable, c.revenue, dec!(2000)),
        line((2026, 3, 10), c.receivable, c.revenue, dec!(4000)),
    ];

    let window = DateWindow::new(
        NaiveDate::from_ymd_opt(2026, 2, 1),
        NaiveDate::from_ymd_opt(2026, 2, 28),
    );
    let rows = StatementCalculator::trial_balance(&c.accounts, &lines, window);

    let receivable = rows.iter().find(|r| r.account_id == c.receivable).unwrap();
    assert_eq!(receivable.total_debit, dec!(2000));
}

#[test]
fn test_profit_and_loss_additivity() {
    let c = chart();
    let lines = vec![
        line((2026, 1, 10), c.receivable, c.revenue, dec!(11000)),
        line((2026, 1, 15), c.purchases, c.payable, dec!(5500)),
        line((2026, 1, 20), c.purchases, c.cash, dec!(800)),
    ];

    let pnl = StatementCalculator::profit_and_loss(&c.accounts, &lines, DateWindow::default());

    assert_eq!(pnl.revenue, dec!(11000));
    assert_eq!(pnl.expenses, dec!(6300));
    assert_eq!(pnl.net_income, pnl.revenue - pnl.expenses);
}

#[test]
fn test_profit_and_loss_empty_ledger_is_zero() {
    let c = chart();
    let pnl = StatementCalculator::profit_and_loss(&c.accounts, &[], DateWindow::default());

    assert_eq!(pnl.revenue, Decimal::ZERO);
    assert_eq!(pnl.expenses, Decimal::ZERO);
    assert_eq!(pnl.net_income, Decimal::ZERO);
}

#[test]
fn test_balance_sheet_identity_after_invoice_and_delivery() {
    // One issued invoice (11000, receivable <- revenue) and one delivered
    // purchase order (5500, purchases <- payable).
    let c = chart();
    let lines = vec![
        line((2026, 1, 10), c.receivable, c.revenue, dec!(11000)),
        line((2026, 1, 15), c.purchases, c.payable, dec!(5500)),
    ];

    let sheet = StatementCalculator::balance_sheet(&c.accounts, &lines, None);

    assert_eq!(sheet.assets, dec!(11000));
    assert_eq!(sheet.liabilities, dec!(5500));
    assert_eq!(sheet.retained_earnings, dec!(5500));
    assert_eq!(sheet.equity, dec!(5500));
    assert!(sheet.balanced);
    assert!(sheet.difference.abs() <= super::service::BALANCE_TOLERANCE);
}

#[test]
fn test_balance_sheet_respects_as_of_date() {
    let c = chart();
    let lines = vec![
        line((2026, 1, 10), c.receivable, c.revenue, dec!(11000)),
        line((2026, 2, 10), c.cash, c.capital, dec!(500_000)),
    ];

    let sheet = StatementCalculator::balance_sheet(
        &c.accounts,
        &lines,
        NaiveDate::from_ymd_opt(2026, 1, 31),
    );

    // The February capital injection is out of scope.
    assert_eq!(sheet.assets, dec!(11000));
    assert_eq!(sheet.equity, dec!(11000));
    assert!(sheet.balanced);
}

#[test]
fn test_balance_sheet_flags_unknown_account_references() {
    let c = chart();
    // An entry crediting an account missing from the chart: the debit
    // side lands in assets with no matching credit anywhere.
    let lines = vec![line((2026, 1, 10), c.cash, AccountId::new(), dec!(999))];

    let sheet = StatementCalculator::balance_sheet(&c.accounts, &lines, None);

    assert!(!sheet.balanced);
    assert_eq!(sheet.difference, dec!(999));
}

#[test]
fn test_balance_sheet_empty_ledger_balances_at_zero() {
    let c = chart();
    let sheet = StatementCalculator::balance_sheet(&c.accounts, &[], None);

    assert_eq!(sheet.assets, Decimal::ZERO);
    assert_eq!(sheet.liabilities, Decimal::ZERO);
    assert_eq!(sheet.equity, Decimal::ZERO);
    assert!(sheet.balanced);
}

#[test]
fn test_liabilities_are_credit_normal() {
    let c = chart();
    // Deliver goods (liability up 5500), then pay half of it from cash.
    let lines = vec![
        line((2026, 1, 10), c.purchases, c.payable, dec!(5500)),
        line((2026, 1, 20), c.payable, c.cash, dec!(2750)),
    ];

    let sheet = StatementCalculator::balance_sheet(&c.accounts, &lines, None);

    assert_eq!(sheet.liabilities, dec!(2750));
    assert_eq!(sheet.assets, dec!(-2750));
    assert!(sheet.balanced);
}
