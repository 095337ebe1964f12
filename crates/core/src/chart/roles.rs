//! Well-known account roles for the auto-posting engine.
//!
//! The posting engine needs a handful of conventional accounts (cash,
//! receivable, revenue, payable, purchases, inventory asset). Rather than
//! scattering hardcoded codes through the engine, the roles are named in
//! configuration and resolved against the registry once, at composition
//! time. A role that does not resolve is a configuration error caught at
//! startup.

use kanjo_shared::config::ChartRolesConfig;
use kanjo_shared::types::AccountId;
use thiserror::Error;

/// Role resolution errors.
#[derive(Debug, Error)]
pub enum RoleError {
    /// No active account carries the configured code for a role.
    #[error("No account with code '{code}' for role '{role}'")]
    MissingAccount {
        /// The role name (e.g., "receivable").
        role: &'static str,
        /// The configured account code.
        code: String,
    },
}

/// Account codes for each role, as configured.
#[derive(Debug, Clone)]
pub struct ChartRoles {
    /// Cash on hand.
    pub cash: String,
    /// Accounts receivable.
    pub receivable: String,
    /// Inventory asset.
    pub inventory_asset: String,
    /// Accounts payable.
    pub payable: String,
    /// Sales revenue.
    pub revenue: String,
    /// Purchases expense.
    pub purchases: String,
}

impl From<ChartRolesConfig> for ChartRoles {
    fn from(cfg: ChartRolesConfig) -> Self {
        Self {
            cash: cfg.cash,
            receivable: cfg.receivable,
            inventory_asset: cfg.inventory_asset,
            payable: cfg.payable,
            revenue: cfg.revenue,
            purchases: cfg.purchases,
        }
    }
}

impl ChartRoles {
    /// Resolves each role's code to an account ID via the supplied lookup.
    ///
    /// The lookup is typically backed by the account registry
    /// (`find_by_code`). All roles must resolve; a missing account is a
    /// configuration error.
    ///
    /// # Errors
    ///
    /// Returns `RoleError::MissingAccount` naming the first role whose code
    /// has no matching account.
    pub fn resolve<F>(&self, lookup: F) -> Result<ResolvedRoles, RoleError>
    where
        F: Fn(&str) -> Option<AccountId>,
    {
        let resolve_one = |role: &'static str, code: &str| {
            lookup(code).ok_or_else(|| RoleError::MissingAccount {
                role,
                code: code.to_string(),
            })
        };

        Ok(ResolvedRoles {
            cash: resolve_one("cash", &self.cash)?,
            receivable: resolve_one("receivable", &self.receivable)?,
            inventory_asset: resolve_one("inventory_asset", &self.inventory_asset)?,
            payable: resolve_one("payable", &self.payable)?,
            revenue: resolve_one("revenue", &self.revenue)?,
            purchases: resolve_one("purchases", &self.purchases)?,
        })
    }
}

/// Role accounts resolved to IDs, ready for the posting planner.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedRoles {
    /// Cash on hand.
    pub cash: AccountId,
    /// Accounts receivable.
    pub receivable: AccountId,
    /// Inventory asset.
    pub inventory_asset: AccountId,
    /// Accounts payable.
    pub payable: AccountId,
    /// Sales revenue.
    pub revenue: AccountId,
    /// Purchases expense.
    pub purchases: AccountId,
}
