//! Inventory repository: items, movements, and stock alerts.
//!
//! Recording a movement updates the item's stock level and the movement
//! history in one transaction, then re-checks alerts and (for purchase
//! receipts) posts the receipt to the ledger.

use chrono::NaiveDate;
use kanjo_core::inventory::{
    AlertLevel, AlertType, InventoryError, MovementSource, MovementType, StockStatus,
    apply_movement, expiry_within_warning_window, should_raise_low_stock,
    should_resolve_low_stock, stock_status, stored_quantity,
};
use kanjo_shared::types::{AdminId, AlertId, InventoryItemId, MovementId, SupplierId};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{inventory_items, inventory_movements, stock_alerts};

use super::posting::PostingEngine;

/// Error types for inventory operations.
#[derive(Debug, thiserror::Error)]
pub enum InventoryRepoError {
    /// Item not found.
    #[error("Inventory item not found: {0}")]
    ItemNotFound(InventoryItemId),

    /// Alert not found.
    #[error("Stock alert not found: {0}")]
    AlertNotFound(AlertId),

    /// Stock rule violation from the domain layer.
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an inventory item.
#[derive(Debug, Clone)]
pub struct CreateItemInput {
    /// Item label.
    pub item_name: String,
    /// Category (produce, meat, seasoning, ...).
    pub category: String,
    /// Preferred supplier, if any.
    pub supplier_id: Option<SupplierId>,
    /// Unit of measure.
    pub unit: String,
    /// Opening stock; recorded as an initial movement when positive.
    pub current_stock: Decimal,
    /// Reorder threshold.
    pub reorder_point: Decimal,
    /// Optimal stock level.
    pub optimal_stock: Decimal,
    /// Cost per unit.
    pub unit_cost: Decimal,
    /// Expiry date, if perishable.
    pub expiry_date: Option<NaiveDate>,
    /// Storage location.
    pub storage_location: Option<String>,
    /// Notes.
    pub notes: Option<String>,
    /// The administrator creating the item.
    pub created_by: AdminId,
}

/// Input for updating an inventory item.
///
/// Stock levels are not edited here; they change only through movements.
#[derive(Debug, Clone)]
pub struct UpdateItemInput {
    /// Item label.
    pub item_name: String,
    /// Category.
    pub category: String,
    /// Preferred supplier, if any.
    pub supplier_id: Option<SupplierId>,
    /// Unit of measure.
    pub unit: String,
    /// Reorder threshold.
    pub reorder_point: Decimal,
    /// Optimal stock level.
    pub optimal_stock: Decimal,
    /// Cost per unit.
    pub unit_cost: Decimal,
    /// Expiry date, if perishable.
    pub expiry_date: Option<NaiveDate>,
    /// Storage location.
    pub storage_location: Option<String>,
    /// Notes.
    pub notes: Option<String>,
}

/// Filter options for listing inventory.
#[derive(Debug, Clone, Default)]
pub struct InventoryFilter {
    /// Filter by category.
    pub category: Option<String>,
    /// Filter by supplier.
    pub supplier_id: Option<SupplierId>,
    /// Only items at or below their reorder point.
    pub low_stock_only: bool,
}

/// An item with its computed stock status.
#[derive(Debug, Clone)]
pub struct ItemWithStatus {
    /// The item row.
    pub item: inventory_items::Model,
    /// Stock level relative to the thresholds.
    pub stock_status: StockStatus,
}

/// Input for recording an inventory movement.
#[derive(Debug, Clone)]
pub struct RecordMovementInput {
    /// Direction of the movement.
    pub movement_type: MovementType,
    /// Quantity (positive; adjustment passes the absolute count).
    pub quantity: Decimal,
    /// Cost per unit; defaults to the item's unit cost when absent.
    pub unit_cost: Option<Decimal>,
    /// What caused the movement.
    pub source: Option<MovementSource>,
    /// The causing row (e.g. the purchase order), when known.
    pub source_id: Option<Uuid>,
    /// Notes.
    pub notes: Option<String>,
    /// Who performed the movement.
    pub performed_by: AdminId,
}

/// Inventory repository.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    db: DatabaseConnection,
    poster: PostingEngine,
}

impl InventoryRepository {
    /// Creates a new inventory repository wired to the posting engine.
    #[must_use]
    pub const fn new(db: DatabaseConnection, poster: PostingEngine) -> Self {
        Self { db, poster }
    }

    /// Lists items ordered by name, with computed stock status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        filter: InventoryFilter,
    ) -> Result<Vec<ItemWithStatus>, InventoryRepoError> {
        let mut query =
            inventory_items::Entity::find().order_by_asc(inventory_items::Column::ItemName);

        if let Some(category) = filter.category {
            query = query.filter(inventory_items::Column::Category.eq(category));
        }
        if let Some(supplier_id) = filter.supplier_id {
            query = query
                .filter(inventory_items::Column::SupplierId.eq(supplier_id.into_inner()));
        }

        let items = query.all(&self.db).await?;

        Ok(items
            .into_iter()
            .map(|item| ItemWithStatus {
                stock_status: stock_status(
                    item.current_stock,
                    item.reorder_point,
                    item.optimal_stock,
                ),
                item,
            })
            .filter(|entry| {
                !filter.low_stock_only || entry.stock_status == StockStatus::Low
            })
            .collect())
    }

    /// Fetches an item with its recent movement history (newest first,
    /// capped at 50).
    ///
    /// # Errors
    ///
    /// Returns `InventoryRepoError::ItemNotFound` for unknown ids.
    pub async fn get(
        &self,
        id: InventoryItemId,
    ) -> Result<(inventory_items::Model, Vec<inventory_movements::Model>), InventoryRepoError>
    {
        let item = self.find_item(id).await?;

        let movements = item
            .find_related(inventory_movements::Entity)
            .order_by_desc(inventory_movements::Column::PerformedAt)
            .limit(50)
            .all(&self.db)
            .await?;

        Ok((item, movements))
    }

    /// Creates an item; positive opening stock is recorded as an initial
    /// movement in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(
        &self,
        input: CreateItemInput,
    ) -> Result<inventory_items::Model, InventoryRepoError> {
        let id = InventoryItemId::new();
        let now = chrono::Utc::now();

        let txn = self.db.begin().await?;

        let item = inventory_items::ActiveModel {
            id: Set(id.into_inner()),
            item_name: Set(input.item_name),
            category: Set(input.category),
            supplier_id: Set(input.supplier_id.map(SupplierId::into_inner)),
            unit: Set(input.unit),
            current_stock: Set(input.current_stock),
            reorder_point: Set(input.reorder_point),
            optimal_stock: Set(input.optimal_stock),
            unit_cost: Set(input.unit_cost),
            expiry_date: Set(input.expiry_date),
            storage_location: Set(input.storage_location),
            notes: Set(input.notes),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        let item = item.insert(&txn).await?;

        if input.current_stock > Decimal::ZERO {
            let movement = inventory_movements::ActiveModel {
                id: Set(MovementId::new().into_inner()),
                inventory_item_id: Set(id.into_inner()),
                movement_type: Set(MovementType::Initial.as_str().to_string()),
                quantity: Set(input.current_stock),
                unit_cost: Set(item.unit_cost),
                source: Set(Some(MovementSource::Initial.as_str().to_string())),
                source_id: Set(None),
                notes: Set(Some("Opening stock".to_string())),
                performed_by: Set(input.created_by.into_inner()),
                performed_at: Set(now.into()),
            };
            movement.insert(&txn).await?;
        }

        txn.commit().await?;

        self.check_alerts(id).await?;

        Ok(item)
    }

    /// Updates an item's descriptive fields and thresholds.
    ///
    /// # Errors
    ///
    /// Returns `InventoryRepoError::ItemNotFound` for unknown ids.
    pub async fn update(
        &self,
        id: InventoryItemId,
        input: UpdateItemInput,
    ) -> Result<inventory_items::Model, InventoryRepoError> {
        let item = self.find_item(id).await?;

        let mut active: inventory_items::ActiveModel = item.into();
        active.item_name = Set(input.item_name);
        active.category = Set(input.category);
        active.supplier_id = Set(input.supplier_id.map(SupplierId::into_inner));
        active.unit = Set(input.unit);
        active.reorder_point = Set(input.reorder_point);
        active.optimal_stock = Set(input.optimal_stock);
        active.unit_cost = Set(input.unit_cost);
        active.expiry_date = Set(input.expiry_date);
        active.storage_location = Set(input.storage_location);
        active.notes = Set(input.notes);
        active.updated_at = Set(chrono::Utc::now().into());
        let item = active.update(&self.db).await?;

        self.check_alerts(id).await?;

        Ok(item)
    }

    /// Deletes an item; movements and alerts cascade.
    ///
    /// # Errors
    ///
    /// Returns `InventoryRepoError::ItemNotFound` for unknown ids.
    pub async fn delete(&self, id: InventoryItemId) -> Result<(), InventoryRepoError> {
        let item = self.find_item(id).await?;
        inventory_items::Entity::delete_by_id(item.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// Records a stock movement: updates the level, appends history,
    /// re-checks alerts, and posts purchase receipts to the ledger.
    ///
    /// # Errors
    ///
    /// Returns `InventoryRepoError::Inventory` when the movement violates
    /// the stock rules (nothing is written), and
    /// `InventoryRepoError::ItemNotFound` for unknown ids.
    pub async fn record_movement(
        &self,
        id: InventoryItemId,
        input: RecordMovementInput,
    ) -> Result<(inventory_movements::Model, Decimal), InventoryRepoError> {
        let item = self.find_item(id).await?;

        let new_stock = apply_movement(item.current_stock, input.movement_type, input.quantity)?;
        let unit_cost = input.unit_cost.unwrap_or(item.unit_cost);
        let movement_id = MovementId::new();

        let txn = self.db.begin().await?;

        let mut active: inventory_items::ActiveModel = item.into();
        active.current_stock = Set(new_stock);
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&txn).await?;

        let movement = inventory_movements::ActiveModel {
            id: Set(movement_id.into_inner()),
            inventory_item_id: Set(id.into_inner()),
            movement_type: Set(input.movement_type.as_str().to_string()),
            quantity: Set(stored_quantity(input.movement_type, input.quantity)),
            unit_cost: Set(unit_cost),
            source: Set(input.source.map(|s| s.as_str().to_string())),
            source_id: Set(input.source_id),
            notes: Set(input.notes),
            performed_by: Set(input.performed_by.into_inner()),
            performed_at: Set(chrono::Utc::now().into()),
        };
        let movement = movement.insert(&txn).await?;

        txn.commit().await?;

        self.check_alerts(id).await?;
        self.poster.post_for_movement(movement_id).await;

        Ok((movement, new_stock))
    }

    /// Lists alerts, optionally filtered by resolution state, most
    /// urgent and newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_alerts(
        &self,
        is_resolved: Option<bool>,
    ) -> Result<Vec<stock_alerts::Model>, InventoryRepoError> {
        let mut query = stock_alerts::Entity::find();

        if let Some(resolved) = is_resolved {
            query = query.filter(stock_alerts::Column::IsResolved.eq(resolved));
        }

        let alerts = query
            .order_by_desc(stock_alerts::Column::AlertLevel)
            .order_by_desc(stock_alerts::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(alerts)
    }

    /// Marks an alert resolved.
    ///
    /// # Errors
    ///
    /// Returns `InventoryRepoError::AlertNotFound` for unknown ids.
    pub async fn resolve_alert(
        &self,
        id: AlertId,
        resolved_by: AdminId,
    ) -> Result<(), InventoryRepoError> {
        self.close_alert(id, resolved_by, false).await
    }

    /// Dismisses an alert by hand. Dismissed alerts are never re-raised
    /// until the stock recovers above the reorder point.
    ///
    /// # Errors
    ///
    /// Returns `InventoryRepoError::AlertNotFound` for unknown ids.
    pub async fn dismiss_alert(
        &self,
        id: AlertId,
        dismissed_by: AdminId,
    ) -> Result<(), InventoryRepoError> {
        self.close_alert(id, dismissed_by, true).await
    }

    async fn close_alert(
        &self,
        id: AlertId,
        by: AdminId,
        manually_dismissed: bool,
    ) -> Result<(), InventoryRepoError> {
        let alert = stock_alerts::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(InventoryRepoError::AlertNotFound(id))?;

        let mut active: stock_alerts::ActiveModel = alert.into();
        active.is_resolved = Set(true);
        active.manually_dismissed = Set(manually_dismissed);
        active.resolved_at = Set(Some(chrono::Utc::now().into()));
        active.resolved_by = Set(Some(by.into_inner()));
        active.update(&self.db).await?;

        Ok(())
    }

    /// Re-evaluates the alert state for an item after a stock or
    /// threshold change.
    async fn check_alerts(&self, id: InventoryItemId) -> Result<(), InventoryRepoError> {
        let item = self.find_item(id).await?;

        let alerts = stock_alerts::Entity::find()
            .filter(stock_alerts::Column::InventoryItemId.eq(id.into_inner()))
            .all(&self.db)
            .await?;

        let open_low_stock = |a: &stock_alerts::Model| {
            a.alert_type == AlertType::LowStock.as_str() && !a.is_resolved
        };
        let has_open_low = alerts.iter().any(open_low_stock);
        let dismissed_low = alerts.iter().any(|a| {
            a.alert_type == AlertType::LowStock.as_str() && a.manually_dismissed
        });
        let has_open_expiry = alerts
            .iter()
            .any(|a| a.alert_type == AlertType::ExpiryWarning.as_str() && !a.is_resolved);
        let dismissed_expiry = alerts.iter().any(|a| {
            a.alert_type == AlertType::ExpiryWarning.as_str() && a.manually_dismissed
        });

        if should_raise_low_stock(
            item.current_stock,
            item.reorder_point,
            has_open_low,
            dismissed_low,
        ) {
            let message = format!(
                "{} is at or below its reorder point ({}{}); current stock: {}{}",
                item.item_name, item.reorder_point, item.unit, item.current_stock, item.unit
            );
            self.insert_alert(id, AlertType::LowStock, &message).await?;
        } else if should_resolve_low_stock(item.current_stock, item.reorder_point, has_open_low)
        {
            // Recovery also clears the manual-dismissal flag so a future
            // dip alerts again.
            let open: Vec<Uuid> = alerts
                .iter()
                .filter(|a| open_low_stock(a))
                .map(|a| a.id)
                .collect();

            for alert_id in open {
                let alert = stock_alerts::Entity::find_by_id(alert_id)
                    .one(&self.db)
                    .await?;
                if let Some(alert) = alert {
                    let mut active: stock_alerts::ActiveModel = alert.into();
                    active.is_resolved = Set(true);
                    active.manually_dismissed = Set(false);
                    active.resolved_at = Set(Some(chrono::Utc::now().into()));
                    active.update(&self.db).await?;
                }
            }
        }

        if let Some(expiry_date) = item.expiry_date
            && !has_open_expiry
            && !dismissed_expiry
            && expiry_within_warning_window(expiry_date, chrono::Utc::now().date_naive())
        {
            let message = format!("{} expires soon ({expiry_date})", item.item_name);
            self.insert_alert(id, AlertType::ExpiryWarning, &message)
                .await?;
        }

        Ok(())
    }

    async fn insert_alert(
        &self,
        item_id: InventoryItemId,
        alert_type: AlertType,
        message: &str,
    ) -> Result<(), InventoryRepoError> {
        let alert = stock_alerts::ActiveModel {
            id: Set(AlertId::new().into_inner()),
            inventory_item_id: Set(item_id.into_inner()),
            alert_type: Set(alert_type.as_str().to_string()),
            alert_level: Set(AlertLevel::for_alert(alert_type).as_str().to_string()),
            message: Set(message.to_string()),
            is_resolved: Set(false),
            manually_dismissed: Set(false),
            resolved_at: Set(None),
            resolved_by: Set(None),
            created_at: Set(chrono::Utc::now().into()),
        };
        alert.insert(&self.db).await?;

        Ok(())
    }

    async fn find_item(
        &self,
        id: InventoryItemId,
    ) -> Result<inventory_items::Model, InventoryRepoError> {
        inventory_items::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(InventoryRepoError::ItemNotFound(id))
    }
}
