//! Purchase order repository.
//!
//! Orders share the totals arithmetic with sales documents. Delivery is
//! the accounting trigger: recording it stamps the actual delivery date
//! and reconciles the ledger (debit purchases, credit payable).

use chrono::NaiveDate;
use kanjo_core::documents::{LineItemInput, TaxType, compute_totals};
use kanjo_core::purchasing::OrderStatus;
use kanjo_shared::types::{AdminId, PurchaseOrderId, SupplierId};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::str::FromStr;
use uuid::Uuid;

use crate::entities::{purchase_order_items, purchase_orders, suppliers};

use super::posting::PostingEngine;

/// Error types for purchase order operations.
#[derive(Debug, thiserror::Error)]
pub enum PurchaseOrderError {
    /// Order not found.
    #[error("Purchase order not found: {0}")]
    NotFound(PurchaseOrderId),

    /// Supplier not found.
    #[error("Supplier not found: {0}")]
    SupplierNotFound(SupplierId),

    /// Illegal status transition.
    #[error("Cannot move order from '{from}' to '{to}'")]
    InvalidTransition {
        /// Current status.
        from: OrderStatus,
        /// Requested status.
        to: OrderStatus,
    },

    /// Delivered and cancelled orders cannot be edited.
    #[error("Order in status '{0}' cannot be edited")]
    NotEditable(OrderStatus),

    /// An order needs at least one line item.
    #[error("Order must have at least one line item")]
    NoItems,

    /// A stored row failed to convert to a domain value.
    #[error("Corrupt order row: {0}")]
    InvalidRow(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a purchase order.
#[derive(Debug, Clone)]
pub struct CreateOrderInput {
    /// The supplier the order goes to.
    pub supplier_id: SupplierId,
    /// Date the order is placed.
    pub order_date: NaiveDate,
    /// Expected delivery date, if known.
    pub expected_delivery_date: Option<NaiveDate>,
    /// Tax treatment.
    pub tax_type: TaxType,
    /// Tax rate in percent.
    pub tax_rate: Decimal,
    /// Line items (at least one).
    pub items: Vec<LineItemInput>,
    /// Optional notes.
    pub notes: Option<String>,
    /// The administrator creating the order.
    pub created_by: AdminId,
}

/// Input for updating an order; items are replaced wholesale and totals
/// recomputed.
#[derive(Debug, Clone)]
pub struct UpdateOrderInput {
    /// The supplier the order goes to.
    pub supplier_id: SupplierId,
    /// Date the order is placed.
    pub order_date: NaiveDate,
    /// Expected delivery date, if known.
    pub expected_delivery_date: Option<NaiveDate>,
    /// Replacement line items (at least one).
    pub items: Vec<LineItemInput>,
    /// Optional notes.
    pub notes: Option<String>,
}

/// An order listed with its supplier's name.
#[derive(Debug, Clone)]
pub struct OrderWithSupplier {
    /// The order row.
    pub order: purchase_orders::Model,
    /// Supplier display name.
    pub supplier_name: String,
}

/// An order with its line items.
#[derive(Debug, Clone)]
pub struct OrderWithItems {
    /// The order row.
    pub order: purchase_orders::Model,
    /// Its line items.
    pub items: Vec<purchase_order_items::Model>,
}

/// Purchase order repository.
#[derive(Debug, Clone)]
pub struct PurchaseOrderRepository {
    db: DatabaseConnection,
    poster: PostingEngine,
}

impl PurchaseOrderRepository {
    /// Creates a new purchase order repository wired to the posting
    /// engine.
    #[must_use]
    pub const fn new(db: DatabaseConnection, poster: PostingEngine) -> Self {
        Self { db, poster }
    }

    /// Lists orders newest-first with supplier names.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self) -> Result<Vec<OrderWithSupplier>, PurchaseOrderError> {
        let rows = purchase_orders::Entity::find()
            .find_also_related(suppliers::Entity)
            .order_by_desc(purchase_orders::Column::OrderDate)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(order, supplier)| OrderWithSupplier {
                order,
                supplier_name: supplier
                    .map_or_else(|| "Unknown supplier".to_string(), |s| s.name),
            })
            .collect())
    }

    /// Fetches an order with its line items.
    ///
    /// # Errors
    ///
    /// Returns `PurchaseOrderError::NotFound` for unknown ids.
    pub async fn get(&self, id: PurchaseOrderId) -> Result<OrderWithItems, PurchaseOrderError> {
        let order = purchase_orders::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(PurchaseOrderError::NotFound(id))?;

        let items = order
            .find_related(purchase_order_items::Entity)
            .all(&self.db)
            .await?;

        Ok(OrderWithItems { order, items })
    }

    /// Creates an order in draft status with a generated `PO{yymm}-{seq}`
    /// number.
    ///
    /// # Errors
    ///
    /// Returns an error if the supplier is unknown or no items are given.
    pub async fn create(
        &self,
        input: CreateOrderInput,
    ) -> Result<OrderWithItems, PurchaseOrderError> {
        if input.items.is_empty() {
            return Err(PurchaseOrderError::NoItems);
        }

        suppliers::Entity::find_by_id(input.supplier_id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(PurchaseOrderError::SupplierNotFound(input.supplier_id))?;

        let totals = compute_totals(&input.items, input.tax_type, input.tax_rate);
        let order_number = self.next_order_number(input.order_date).await?;

        let id = PurchaseOrderId::new();
        let now = chrono::Utc::now().into();

        let txn = self.db.begin().await?;

        let order = purchase_orders::ActiveModel {
            id: Set(id.into_inner()),
            order_number: Set(order_number),
            supplier_id: Set(input.supplier_id.into_inner()),
            order_date: Set(input.order_date),
            expected_delivery_date: Set(input.expected_delivery_date),
            actual_delivery_date: Set(None),
            status: Set(OrderStatus::Draft.as_str().to_string()),
            tax_type: Set(input.tax_type.as_str().to_string()),
            tax_rate: Set(input.tax_rate),
            subtotal: Set(totals.subtotal),
            tax_amount: Set(totals.tax_amount),
            total_amount: Set(totals.total_amount),
            notes: Set(input.notes),
            created_by: Set(input.created_by.into_inner()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        order.insert(&txn).await?;

        insert_items(&txn, id.into_inner(), &input.items).await?;

        txn.commit().await?;

        self.poster.post_for_purchase_order(id).await;

        self.get(id).await
    }

    /// Updates an order, replacing its items and recomputing totals.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown ids, non-editable statuses, or an
    /// empty item list.
    pub async fn update(
        &self,
        id: PurchaseOrderId,
        input: UpdateOrderInput,
    ) -> Result<OrderWithItems, PurchaseOrderError> {
        if input.items.is_empty() {
            return Err(PurchaseOrderError::NoItems);
        }

        let order = purchase_orders::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(PurchaseOrderError::NotFound(id))?;

        let status = parse_status(&order.status)?;
        if !status.is_editable() {
            return Err(PurchaseOrderError::NotEditable(status));
        }

        suppliers::Entity::find_by_id(input.supplier_id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(PurchaseOrderError::SupplierNotFound(input.supplier_id))?;

        let (subtotal, tax_amount, total_amount) = {
            let tax_type = TaxType::from_str(&order.tax_type)
                .map_err(PurchaseOrderError::InvalidRow)?;
            let totals = compute_totals(&input.items, tax_type, order.tax_rate);
            (totals.subtotal, totals.tax_amount, totals.total_amount)
        };

        let txn = self.db.begin().await?;

        let mut active: purchase_orders::ActiveModel = order.into();
        active.supplier_id = Set(input.supplier_id.into_inner());
        active.order_date = Set(input.order_date);
        active.expected_delivery_date = Set(input.expected_delivery_date);
        active.subtotal = Set(subtotal);
        active.tax_amount = Set(tax_amount);
        active.total_amount = Set(total_amount);
        active.notes = Set(input.notes);
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&txn).await?;

        purchase_order_items::Entity::delete_many()
            .filter(purchase_order_items::Column::PurchaseOrderId.eq(id.into_inner()))
            .exec(&txn)
            .await?;
        insert_items(&txn, id.into_inner(), &input.items).await?;

        txn.commit().await?;

        self.poster.post_for_purchase_order(id).await;

        self.get(id).await
    }

    /// Moves an order to a new status along the legal transitions.
    ///
    /// Delivery goes through [`Self::record_delivery`], which stamps the
    /// delivery date.
    ///
    /// # Errors
    ///
    /// Returns `PurchaseOrderError::InvalidTransition` for illegal moves.
    pub async fn set_status(
        &self,
        id: PurchaseOrderId,
        next: OrderStatus,
    ) -> Result<purchase_orders::Model, PurchaseOrderError> {
        let order = purchase_orders::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(PurchaseOrderError::NotFound(id))?;

        let current = parse_status(&order.status)?;
        if !current.can_transition_to(next) {
            return Err(PurchaseOrderError::InvalidTransition {
                from: current,
                to: next,
            });
        }

        let mut active: purchase_orders::ActiveModel = order.into();
        active.status = Set(next.as_str().to_string());
        if next == OrderStatus::Delivered {
            active.actual_delivery_date = Set(Some(chrono::Utc::now().date_naive()));
        }
        active.updated_at = Set(chrono::Utc::now().into());
        let order = active.update(&self.db).await?;

        self.poster.post_for_purchase_order(id).await;

        Ok(order)
    }

    /// Records delivery of an ordered purchase: stamps the actual
    /// delivery date and moves the order to delivered, which posts it to
    /// the ledger dated at that delivery.
    ///
    /// # Errors
    ///
    /// Returns `PurchaseOrderError::InvalidTransition` unless the order
    /// is currently ordered.
    pub async fn record_delivery(
        &self,
        id: PurchaseOrderId,
        actual_delivery_date: NaiveDate,
    ) -> Result<purchase_orders::Model, PurchaseOrderError> {
        let order = purchase_orders::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(PurchaseOrderError::NotFound(id))?;

        let current = parse_status(&order.status)?;
        if !current.can_transition_to(OrderStatus::Delivered) {
            return Err(PurchaseOrderError::InvalidTransition {
                from: current,
                to: OrderStatus::Delivered,
            });
        }

        let mut active: purchase_orders::ActiveModel = order.into();
        active.status = Set(OrderStatus::Delivered.as_str().to_string());
        active.actual_delivery_date = Set(Some(actual_delivery_date));
        active.updated_at = Set(chrono::Utc::now().into());
        let order = active.update(&self.db).await?;

        self.poster.post_for_purchase_order(id).await;

        Ok(order)
    }

    /// Deletes an order, its items, and its auto-generated journal entry,
    /// in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `PurchaseOrderError::NotFound` for unknown ids.
    pub async fn delete(&self, id: PurchaseOrderId) -> Result<(), PurchaseOrderError> {
        let order = purchase_orders::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(PurchaseOrderError::NotFound(id))?;

        let txn = self.db.begin().await?;

        PostingEngine::remove_for_order(&txn, id).await?;
        purchase_order_items::Entity::delete_many()
            .filter(purchase_order_items::Column::PurchaseOrderId.eq(id.into_inner()))
            .exec(&txn)
            .await?;
        purchase_orders::Entity::delete_by_id(order.id).exec(&txn).await?;

        txn.commit().await?;

        Ok(())
    }

    /// Generates the next order number for a month: `PO{yymm}-{seq}`.
    async fn next_order_number(
        &self,
        order_date: NaiveDate,
    ) -> Result<String, PurchaseOrderError> {
        let prefix = format!("PO{}", order_date.format("%y%m"));

        let existing = purchase_orders::Entity::find()
            .filter(purchase_orders::Column::OrderNumber.starts_with(&prefix))
            .count(&self.db)
            .await?;

        Ok(format!("{prefix}-{:04}", existing + 1))
    }
}

fn parse_status(raw: &str) -> Result<OrderStatus, PurchaseOrderError> {
    OrderStatus::from_str(raw).map_err(PurchaseOrderError::InvalidRow)
}

async fn insert_items<C: ConnectionTrait>(
    conn: &C,
    purchase_order_id: Uuid,
    items: &[LineItemInput],
) -> Result<(), DbErr> {
    for item in items {
        let model = purchase_order_items::ActiveModel {
            id: Set(Uuid::now_v7()),
            purchase_order_id: Set(purchase_order_id),
            item_name: Set(item.item_name.clone()),
            description: Set(item.description.clone()),
            quantity: Set(item.quantity),
            unit_price: Set(item.unit_price),
            amount: Set(item.amount()),
        };
        model.insert(conn).await?;
    }

    Ok(())
}
