//! Chart of accounts domain types.
//!
//! The chart of accounts is the fixed list of accounts against which all
//! journal entries post. Accounts are identified by a short human-assigned
//! code; they are deactivated rather than deleted because journal entries
//! hold long-lived references to account identity.

pub mod roles;

pub use roles::{ChartRoles, ResolvedRoles, RoleError};

use chrono::{DateTime, FixedOffset};
use kanjo_shared::types::AccountId;
use serde::{Deserialize, Serialize};

/// Account classification.
///
/// Fixed at creation; never changes once the account exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Assets (cash, receivables, inventory).
    Asset,
    /// Liabilities (payables).
    Liability,
    /// Owner's equity.
    Equity,
    /// Revenue accounts.
    Revenue,
    /// Expense accounts.
    Expense,
}

impl AccountType {
    /// Returns true for accounts that carry a natural debit balance.
    ///
    /// Asset/Expense accounts increase on the debit side;
    /// Liability/Equity/Revenue accounts increase on the credit side.
    #[must_use]
    pub const fn is_debit_normal(self) -> bool {
        matches!(self, Self::Asset | Self::Expense)
    }

    /// Returns the lowercase string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asset" => Ok(Self::Asset),
            "liability" => Ok(Self::Liability),
            "equity" => Ok(Self::Equity),
            "revenue" => Ok(Self::Revenue),
            "expense" => Ok(Self::Expense),
            other => Err(format!("Unknown account type: {other}")),
        }
    }
}

/// A chart of accounts entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Short unique code (e.g., "1000"), human-assigned and stable.
    pub code: String,
    /// Display label.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Inactive accounts are excluded from registry listings but remain
    /// valid targets of historical entries.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<FixedOffset>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_debit_normal_classification() {
        assert!(AccountType::Asset.is_debit_normal());
        assert!(AccountType::Expense.is_debit_normal());
        assert!(!AccountType::Liability.is_debit_normal());
        assert!(!AccountType::Equity.is_debit_normal());
        assert!(!AccountType::Revenue.is_debit_normal());
    }

    #[test]
    fn test_account_type_roundtrip() {
        for ty in [
            AccountType::Asset,
            AccountType::Liability,
            AccountType::Equity,
            AccountType::Revenue,
            AccountType::Expense,
        ] {
            assert_eq!(AccountType::from_str(ty.as_str()).unwrap(), ty);
        }
    }

    #[test]
    fn test_unknown_account_type_rejected() {
        assert!(AccountType::from_str("contra").is_err());
        assert!(AccountType::from_str("Asset").is_err());
        assert!(AccountType::from_str("").is_err());
    }
}
