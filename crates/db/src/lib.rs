//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the back-office schema
//! - Repository abstractions for data access
//! - The posting engine that keeps the ledger reconciled with source
//!   documents
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    AccountRepository, CustomerRepository, DocumentRepository, InventoryRepository,
    JournalRepository, PostingEngine, PurchaseOrderRepository, ReportRepository,
    SupplierRepository,
};

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
