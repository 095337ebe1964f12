//! Account repository for chart of accounts database operations.

use kanjo_core::chart::{Account, AccountType, ChartRoles, ResolvedRoles, RoleError};
use kanjo_shared::types::AccountId;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use std::collections::HashMap;
use std::str::FromStr;

use crate::entities::accounts;

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account code already exists.
    #[error("Account code '{0}' already exists")]
    DuplicateCode(String),

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// A stored row failed to convert to a domain value.
    #[error("Corrupt account row: {0}")]
    InvalidRow(String),

    /// A chart role's code did not resolve to an account.
    #[error(transparent)]
    Role(#[from] RoleError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Account code (must be unique).
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account classification, fixed at creation.
    pub account_type: AccountType,
}

/// Account repository for chart of accounts operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new account with a unique code.
    ///
    /// # Errors
    ///
    /// Returns an error if the code already exists or the insert fails.
    pub async fn create(&self, input: CreateAccountInput) -> Result<Account, AccountError> {
        let existing = accounts::Entity::find()
            .filter(accounts::Column::Code.eq(&input.code))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(AccountError::DuplicateCode(input.code));
        }

        let model = accounts::ActiveModel {
            id: Set(AccountId::new().into_inner()),
            code: Set(input.code),
            name: Set(input.name),
            account_type: Set(input.account_type.as_str().to_string()),
            is_active: Set(true),
            created_at: Set(chrono::Utc::now().into()),
        };

        let model = model.insert(&self.db).await?;
        account_from_model(model)
    }

    /// Lists active accounts ordered by code ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_active(&self) -> Result<Vec<Account>, AccountError> {
        let models = accounts::Entity::find()
            .filter(accounts::Column::IsActive.eq(true))
            .order_by_asc(accounts::Column::Code)
            .all(&self.db)
            .await?;

        models.into_iter().map(account_from_model).collect()
    }

    /// Finds an account by its code, active or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Account>, AccountError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::Code.eq(code))
            .one(&self.db)
            .await?;

        model.map(account_from_model).transpose()
    }

    /// Finds an account by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountError> {
        let model = accounts::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?;

        model.map(account_from_model).transpose()
    }

    /// Deactivates an account (soft delete).
    ///
    /// Accounts are never hard-deleted: journal entries hold long-lived
    /// references to account identity, so history must stay resolvable.
    ///
    /// # Errors
    ///
    /// Returns an error if the account does not exist.
    pub async fn deactivate(&self, id: AccountId) -> Result<(), AccountError> {
        let model = accounts::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(AccountError::AccountNotFound(id))?;

        let mut active: accounts::ActiveModel = model.into();
        active.is_active = Set(false);
        active.update(&self.db).await?;

        Ok(())
    }

    /// Resolves the configured chart roles against the active registry.
    ///
    /// Called once at composition time; the resolved roles are what the
    /// posting engine runs with. A missing code is a configuration error
    /// surfaced here, not a silent skip at posting time.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Role` naming the first unresolvable role.
    pub async fn resolve_roles(&self, roles: &ChartRoles) -> Result<ResolvedRoles, AccountError> {
        let by_code: HashMap<String, AccountId> = accounts::Entity::find()
            .filter(accounts::Column::IsActive.eq(true))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| (m.code, AccountId::from_uuid(m.id)))
            .collect();

        Ok(roles.resolve(|code| by_code.get(code).copied())?)
    }
}

/// Converts a stored row to the domain account type.
pub(crate) fn account_from_model(model: accounts::Model) -> Result<Account, AccountError> {
    let account_type = AccountType::from_str(&model.account_type)
        .map_err(AccountError::InvalidRow)?;

    Ok(Account {
        id: AccountId::from_uuid(model.id),
        code: model.code,
        name: model.name,
        account_type,
        is_active: model.is_active,
        created_at: model.created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_account_from_model_parses_type() {
        let model = accounts::Model {
            id: Uuid::new_v4(),
            code: "1000".to_string(),
            name: "Cash".to_string(),
            account_type: "asset".to_string(),
            is_active: true,
            created_at: chrono::Utc::now().into(),
        };

        let account = account_from_model(model).unwrap();
        assert_eq!(account.account_type, AccountType::Asset);
        assert_eq!(account.code, "1000");
    }

    #[test]
    fn test_account_from_model_rejects_unknown_type() {
        let model = accounts::Model {
            id: Uuid::new_v4(),
            code: "9999".to_string(),
            name: "Mystery".to_string(),
            account_type: "contra".to_string(),
            is_active: true,
            created_at: chrono::Utc::now().into(),
        };

        assert!(matches!(
            account_from_model(model),
            Err(AccountError::InvalidRow(_))
        ));
    }
}
