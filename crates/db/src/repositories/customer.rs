//! Customer registry repository.

use kanjo_shared::types::CustomerId;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set,
};

use crate::entities::customers;

/// Error types for customer operations.
#[derive(Debug, thiserror::Error)]
pub enum CustomerError {
    /// Customer not found.
    #[error("Customer not found: {0}")]
    NotFound(CustomerId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating or updating a customer.
#[derive(Debug, Clone)]
pub struct CustomerInput {
    /// Company or individual.
    pub customer_type: String,
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
    /// Notes.
    pub notes: Option<String>,
}

/// Customer registry repository.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    db: DatabaseConnection,
}

impl CustomerRepository {
    /// Creates a new customer repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists customers newest-first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self) -> Result<Vec<customers::Model>, CustomerError> {
        let rows = customers::Entity::find()
            .order_by_desc(customers::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Finds a customer by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_by_id(
        &self,
        id: CustomerId,
    ) -> Result<Option<customers::Model>, CustomerError> {
        let row = customers::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?;
        Ok(row)
    }

    /// Creates a customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(&self, input: CustomerInput) -> Result<customers::Model, CustomerError> {
        let now = chrono::Utc::now().into();
        let model = customers::ActiveModel {
            id: Set(CustomerId::new().into_inner()),
            customer_type: Set(input.customer_type),
            name: Set(input.name),
            postal_code: Set(input.postal_code),
            address: Set(input.address),
            phone: Set(input.phone),
            email: Set(input.email),
            payment_terms: Set(input.payment_terms),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(model.insert(&self.db).await?)
    }

    /// Updates a customer.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::NotFound` for unknown ids.
    pub async fn update(
        &self,
        id: CustomerId,
        input: CustomerInput,
    ) -> Result<customers::Model, CustomerError> {
        let model = customers::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(CustomerError::NotFound(id))?;

        let mut active: customers::ActiveModel = model.into();
        active.customer_type = Set(input.customer_type);
        active.name = Set(input.name);
        active.postal_code = Set(input.postal_code);
        active.address = Set(input.address);
        active.phone = Set(input.phone);
        active.email = Set(input.email);
        active.payment_terms = Set(input.payment_terms);
        active.notes = Set(input.notes);
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Deletes a customer. Customers referenced by documents are kept
    /// (the foreign key restricts the delete).
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::NotFound` for unknown ids.
    pub async fn delete(&self, id: CustomerId) -> Result<(), CustomerError> {
        let model = customers::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(CustomerError::NotFound(id))?;

        customers::Entity::delete_by_id(model.id)
            .exec(&self.db)
            .await?;

        Ok(())
    }
}
