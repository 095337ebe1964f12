//! Supplier registry repository.

use kanjo_shared::types::SupplierId;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set,
};

use crate::entities::suppliers;

/// Error types for supplier operations.
#[derive(Debug, thiserror::Error)]
pub enum SupplierError {
    /// Supplier not found.
    #[error("Supplier not found: {0}")]
    NotFound(SupplierId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating or updating a supplier.
#[derive(Debug, Clone)]
pub struct SupplierInput {
    /// Company or individual.
    pub supplier_type: String,
    /// Display name.
    pub name: String,
    /// Postal code.
    pub postal_code: Option<String>,
    /// Address.
    pub address: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Payment terms in days.
    pub payment_terms: i32,
    /// Bank name for transfers.
    pub bank_name: Option<String>,
    /// Bank branch name.
    pub branch_name: Option<String>,
    /// Bank account type.
    pub bank_account_type: Option<String>,
    /// Bank account number.
    pub bank_account_number: Option<String>,
    /// Bank account holder.
    pub bank_account_holder: Option<String>,
    /// Notes.
    pub notes: Option<String>,
}

/// Supplier registry repository.
#[derive(Debug, Clone)]
pub struct SupplierRepository {
    db: DatabaseConnection,
}

impl SupplierRepository {
    /// Creates a new supplier repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists suppliers newest-first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self) -> Result<Vec<suppliers::Model>, SupplierError> {
        let rows = suppliers::Entity::find()
            .order_by_desc(suppliers::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Finds a supplier by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_by_id(
        &self,
        id: SupplierId,
    ) -> Result<Option<suppliers::Model>, SupplierError> {
        let row = suppliers::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?;
        Ok(row)
    }

    /// Creates a supplier.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(&self, input: SupplierInput) -> Result<suppliers::Model, SupplierError> {
        let now = chrono::Utc::now().into();
        let model = suppliers::ActiveModel {
            id: Set(SupplierId::new().into_inner()),
            supplier_type: Set(input.supplier_type),
            name: Set(input.name),
            postal_code: Set(input.postal_code),
            address: Set(input.address),
            phone: Set(input.phone),
            email: Set(input.email),
            payment_terms: Set(input.payment_terms),
            bank_name: Set(input.bank_name),
            branch_name: Set(input.branch_name),
            bank_account_type: Set(input.bank_account_type),
            bank_account_number: Set(input.bank_account_number),
            bank_account_holder: Set(input.bank_account_holder),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(model.insert(&self.db).await?)
    }

    /// Updates a supplier.
    ///
    /// # Errors
    ///
    /// Returns `SupplierError::NotFound` for unknown ids.
    pub async fn update(
        &self,
        id: SupplierId,
        input: SupplierInput,
    ) -> Result<suppliers::Model, SupplierError> {
        let model = suppliers::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(SupplierError::NotFound(id))?;

        let mut active: suppliers::ActiveModel = model.into();
        active.supplier_type = Set(input.supplier_type);
        active.name = Set(input.name);
        active.postal_code = Set(input.postal_code);
        active.address = Set(input.address);
        active.phone = Set(input.phone);
        active.email = Set(input.email);
        active.payment_terms = Set(input.payment_terms);
        active.bank_name = Set(input.bank_name);
        active.branch_name = Set(input.branch_name);
        active.bank_account_type = Set(input.bank_account_type);
        active.bank_account_number = Set(input.bank_account_number);
        active.bank_account_holder = Set(input.bank_account_holder);
        active.notes = Set(input.notes);
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Deletes a supplier. Suppliers referenced by purchase orders or
    /// inventory items are kept (the foreign keys restrict the delete).
    ///
    /// # Errors
    ///
    /// Returns `SupplierError::NotFound` for unknown ids.
    pub async fn delete(&self, id: SupplierId) -> Result<(), SupplierError> {
        let model = suppliers::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(SupplierError::NotFound(id))?;

        suppliers::Entity::delete_by_id(model.id)
            .exec(&self.db)
            .await?;

        Ok(())
    }
}
