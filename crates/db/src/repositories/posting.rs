//! The posting engine: keeps the auto-generated slice of the journal
//! reconciled with source documents.
//!
//! Each `post_for_*` call is a full reconciliation, not an incremental
//! patch: delete every entry tagged with the source's reference, then
//! insert the set the planner derives from current source state. Delete
//! and insert run in one database transaction, so observers never see a
//! half-reconciled ledger and re-firing the same event is idempotent.
//!
//! Failure policy: posting is best-effort. The business operation that
//! triggered it (issuing an invoice, recording a delivery) must never
//! fail because bookkeeping did, so every error is caught here, logged,
//! and swallowed.

use kanjo_core::chart::ResolvedRoles;
use kanjo_core::documents::{DocumentStatus, DocumentType};
use kanjo_core::inventory::{MovementSource, MovementType};
use kanjo_core::ledger::{
    InvoiceSnapshot, MovementSnapshot, PlannedEntry, PurchaseOrderSnapshot, ReferenceKind,
    plan_for_invoice, plan_for_movement, plan_for_purchase_order,
    posting::invoice_reference_kinds,
};
use kanjo_core::purchasing::OrderStatus;
use kanjo_shared::types::{
    AdminId, DocumentId, InventoryItemId, JournalEntryId, MovementId, PurchaseOrderId,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use std::str::FromStr;
use uuid::Uuid;

use crate::entities::{
    customers, documents, inventory_items, inventory_movements, journal_entries,
    purchase_orders, suppliers,
};

/// Internal posting failures. These never escape `post_for_*`; they are
/// logged and swallowed per the best-effort policy.
#[derive(Debug, thiserror::Error)]
pub enum PostingError {
    /// A stored row failed to convert to a planner snapshot.
    #[error("Corrupt source row: {0}")]
    InvalidRow(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// The auto-posting engine.
///
/// Holds the connection and the role accounts resolved at startup.
/// Source-document repositories call into it after every mutation.
#[derive(Debug, Clone)]
pub struct PostingEngine {
    db: DatabaseConnection,
    roles: ResolvedRoles,
}

impl PostingEngine {
    /// Creates a posting engine from a connection and resolved roles.
    #[must_use]
    pub const fn new(db: DatabaseConnection, roles: ResolvedRoles) -> Self {
        Self { db, roles }
    }

    /// Reconciles the ledger with a sales document.
    ///
    /// Deletes all entries tagged (document | document_payment, id), then
    /// inserts what the planner derives: nothing for drafts, quotations,
    /// or cancelled documents; a revenue entry for issued invoices; a
    /// payment entry on top once a payment date is recorded.
    pub async fn post_for_invoice(&self, document_id: DocumentId) {
        if let Err(error) = self.try_post_invoice(document_id).await {
            tracing::warn!(
                %document_id,
                %error,
                "auto-posting for invoice failed; ledger left stale"
            );
        }
    }

    /// Reconciles the ledger with a purchase order.
    pub async fn post_for_purchase_order(&self, order_id: PurchaseOrderId) {
        if let Err(error) = self.try_post_purchase_order(order_id).await {
            tracing::warn!(
                %order_id,
                %error,
                "auto-posting for purchase order failed; ledger left stale"
            );
        }
    }

    /// Posts an inventory receipt to the ledger.
    ///
    /// Movement rows are created once and never re-fired, so there is no
    /// prior reconciliation delete: only purchase-sourced inbound
    /// movements insert an entry.
    pub async fn post_for_movement(&self, movement_id: MovementId) {
        if let Err(error) = self.try_post_movement(movement_id).await {
            tracing::warn!(
                %movement_id,
                %error,
                "auto-posting for inventory movement failed; ledger left stale"
            );
        }
    }

    /// Removes all auto entries for a deleted sales document.
    ///
    /// Unlike `post_for_*`, this is part of the user-facing delete
    /// operation and runs on the caller's transaction; errors propagate.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn remove_for_document<C: ConnectionTrait>(
        conn: &C,
        document_id: DocumentId,
    ) -> Result<(), DbErr> {
        delete_for_reference(conn, &invoice_reference_kinds(), document_id.into_inner()).await
    }

    /// Removes the auto entry for a deleted purchase order.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn remove_for_order<C: ConnectionTrait>(
        conn: &C,
        order_id: PurchaseOrderId,
    ) -> Result<(), DbErr> {
        delete_for_reference(conn, &[ReferenceKind::PurchaseOrder], order_id.into_inner()).await
    }

    async fn try_post_invoice(&self, document_id: DocumentId) -> Result<(), PostingError> {
        let Some(doc) = documents::Entity::find_by_id(document_id.into_inner())
            .one(&self.db)
            .await?
        else {
            return Ok(());
        };

        let customer_name = customers::Entity::find_by_id(doc.customer_id)
            .one(&self.db)
            .await?
            .map_or_else(|| "Unknown customer".to_string(), |c| c.name);

        let snapshot = InvoiceSnapshot {
            id: document_id,
            document_type: DocumentType::from_str(&doc.document_type)
                .map_err(PostingError::InvalidRow)?,
            document_number: doc.document_number,
            customer_name,
            issue_date: doc.issue_date,
            payment_date: doc.payment_date,
            status: DocumentStatus::from_str(&doc.status).map_err(PostingError::InvalidRow)?,
            total_amount: doc.total_amount,
            created_by: AdminId::from_uuid(doc.created_by),
        };

        let plan = plan_for_invoice(&snapshot, &self.roles);

        let txn = self.db.begin().await?;
        delete_for_reference(&txn, &invoice_reference_kinds(), document_id.into_inner()).await?;
        insert_planned(&txn, &plan).await?;
        txn.commit().await?;

        Ok(())
    }

    async fn try_post_purchase_order(
        &self,
        order_id: PurchaseOrderId,
    ) -> Result<(), PostingError> {
        let Some(order) = purchase_orders::Entity::find_by_id(order_id.into_inner())
            .one(&self.db)
            .await?
        else {
            return Ok(());
        };

        let supplier_name = suppliers::Entity::find_by_id(order.supplier_id)
            .one(&self.db)
            .await?
            .map_or_else(|| "Unknown supplier".to_string(), |s| s.name);

        let snapshot = PurchaseOrderSnapshot {
            id: order_id,
            order_number: order.order_number,
            supplier_name,
            order_date: order.order_date,
            expected_delivery_date: order.expected_delivery_date,
            actual_delivery_date: order.actual_delivery_date,
            status: OrderStatus::from_str(&order.status).map_err(PostingError::InvalidRow)?,
            total_amount: order.total_amount,
            created_by: AdminId::from_uuid(order.created_by),
        };

        let plan = plan_for_purchase_order(&snapshot, &self.roles);

        let txn = self.db.begin().await?;
        delete_for_reference(&txn, &[ReferenceKind::PurchaseOrder], order_id.into_inner())
            .await?;
        insert_planned(&txn, &plan).await?;
        txn.commit().await?;

        Ok(())
    }

    async fn try_post_movement(&self, movement_id: MovementId) -> Result<(), PostingError> {
        let Some(movement) = inventory_movements::Entity::find_by_id(movement_id.into_inner())
            .one(&self.db)
            .await?
        else {
            return Ok(());
        };

        let item_name = inventory_items::Entity::find_by_id(movement.inventory_item_id)
            .one(&self.db)
            .await?
            .map_or_else(|| "Unknown item".to_string(), |i| i.item_name);

        let source = movement
            .source
            .as_deref()
            .map(MovementSource::from_str)
            .transpose()
            .map_err(PostingError::InvalidRow)?;

        let snapshot = MovementSnapshot {
            id: movement_id,
            inventory_item_id: InventoryItemId::from_uuid(movement.inventory_item_id),
            item_name,
            movement_type: MovementType::from_str(&movement.movement_type)
                .map_err(PostingError::InvalidRow)?,
            source,
            quantity: movement.quantity,
            unit_cost: movement.unit_cost,
            performed_at: movement.performed_at,
            performed_by: AdminId::from_uuid(movement.performed_by),
        };

        let plan = plan_for_movement(&snapshot, &self.roles);
        insert_planned(&self.db, &plan).await?;

        Ok(())
    }
}

/// Deletes every journal entry tagged with the given reference kinds and
/// source id.
async fn delete_for_reference<C: ConnectionTrait>(
    conn: &C,
    kinds: &[ReferenceKind],
    reference_id: Uuid,
) -> Result<(), DbErr> {
    let kind_strings: Vec<&str> = kinds.iter().map(|k| k.as_str()).collect();

    journal_entries::Entity::delete_many()
        .filter(journal_entries::Column::ReferenceType.is_in(kind_strings))
        .filter(journal_entries::Column::ReferenceId.eq(reference_id))
        .exec(conn)
        .await?;

    Ok(())
}

/// Inserts planned entries as journal rows.
async fn insert_planned<C: ConnectionTrait>(
    conn: &C,
    plan: &[PlannedEntry],
) -> Result<(), DbErr> {
    for entry in plan {
        let model = journal_entries::ActiveModel {
            id: Set(JournalEntryId::new().into_inner()),
            entry_date: Set(entry.entry_date),
            description: Set(entry.description.clone()),
            debit_account_id: Set(entry.debit_account_id.into_inner()),
            credit_account_id: Set(entry.credit_account_id.into_inner()),
            amount: Set(entry.amount),
            reference_type: Set(Some(entry.reference.kind.as_str().to_string())),
            reference_id: Set(Some(entry.reference.id)),
            notes: Set(None),
            created_by: Set(entry.created_by.into_inner()),
            created_at: Set(chrono::Utc::now().into()),
        };

        model.insert(conn).await?;
    }

    Ok(())
}
