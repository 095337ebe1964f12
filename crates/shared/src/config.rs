//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Chart-of-accounts role mapping for the auto-posting engine.
    #[serde(default)]
    pub chart_roles: ChartRolesConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Account codes for the well-known roles the auto-posting engine depends on.
///
/// Each role names one account in the chart of accounts by code. The codes
/// are resolved to account IDs at composition time; a code that does not
/// resolve is a configuration error, not a silent runtime skip.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartRolesConfig {
    /// Cash on hand (asset).
    #[serde(default = "default_cash_code")]
    pub cash: String,
    /// Accounts receivable (asset).
    #[serde(default = "default_receivable_code")]
    pub receivable: String,
    /// Inventory asset.
    #[serde(default = "default_inventory_code")]
    pub inventory_asset: String,
    /// Accounts payable (liability).
    #[serde(default = "default_payable_code")]
    pub payable: String,
    /// Sales revenue.
    #[serde(default = "default_revenue_code")]
    pub revenue: String,
    /// Purchases expense.
    #[serde(default = "default_purchases_code")]
    pub purchases: String,
}

fn default_cash_code() -> String {
    "1000".to_string()
}

fn default_receivable_code() -> String {
    "1100".to_string()
}

fn default_inventory_code() -> String {
    "1200".to_string()
}

fn default_payable_code() -> String {
    "2000".to_string()
}

fn default_revenue_code() -> String {
    "4000".to_string()
}

fn default_purchases_code() -> String {
    "5000".to_string()
}

impl Default for ChartRolesConfig {
    fn default() -> Self {
        Self {
            cash: default_cash_code(),
            receivable: default_receivable_code(),
            inventory_asset: default_inventory_code(),
            payable: default_payable_code(),
            revenue: default_revenue_code(),
            purchases: default_purchases_code(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("KANJO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_chart_roles() {
        let roles = ChartRolesConfig::default();
        assert_eq!(roles.cash, "1000");
        assert_eq!(roles.receivable, "1100");
        assert_eq!(roles.inventory_asset, "1200");
        assert_eq!(roles.payable, "2000");
        assert_eq!(roles.revenue, "4000");
        assert_eq!(roles.purchases, "5000");
    }

    #[test]
    fn test_database_defaults() {
        assert_eq!(default_max_connections(), 10);
        assert_eq!(default_min_connections(), 1);
    }
}
