//! Document repository for the quotation / order / delivery-note /
//! invoice flow.
//!
//! Totals are always recomputed from the line items; statuses move only
//! along the legal transitions. Every mutation of an invoice re-triggers
//! ledger reconciliation through the posting engine.

use chrono::NaiveDate;
use kanjo_core::documents::{
    DocumentStatus, DocumentType, LineItemInput, TaxType, compute_totals,
};
use kanjo_shared::types::{AdminId, CustomerId, DocumentId};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::str::FromStr;
use uuid::Uuid;

use crate::entities::{customers, document_items, documents};

use super::posting::PostingEngine;

/// Error types for document operations.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Document not found.
    #[error("Document not found: {0}")]
    NotFound(DocumentId),

    /// Customer not found.
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    /// Illegal status transition.
    #[error("Cannot move document from '{from}' to '{to}'")]
    InvalidTransition {
        /// Current status.
        from: DocumentStatus,
        /// Requested status.
        to: DocumentStatus,
    },

    /// Paid and cancelled documents cannot be edited.
    #[error("Document in status '{0}' cannot be edited")]
    NotEditable(DocumentStatus),

    /// Marking a document paid goes through `record_payment`, which
    /// carries the payment date.
    #[error("Use record_payment to mark a document paid")]
    PaymentDateRequired,

    /// A document needs at least one line item.
    #[error("Document must have at least one line item")]
    NoItems,

    /// A stored row failed to convert to a domain value.
    #[error("Corrupt document row: {0}")]
    InvalidRow(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a document.
#[derive(Debug, Clone)]
pub struct CreateDocumentInput {
    /// Document kind.
    pub document_type: DocumentType,
    /// The customer the document addresses.
    pub customer_id: CustomerId,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Tax treatment.
    pub tax_type: TaxType,
    /// Tax rate in percent.
    pub tax_rate: Decimal,
    /// Line items (at least one).
    pub items: Vec<LineItemInput>,
    /// Optional notes.
    pub notes: Option<String>,
    /// The administrator creating the document.
    pub created_by: AdminId,
}

/// Input for updating a document; items are replaced wholesale and
/// totals recomputed.
#[derive(Debug, Clone)]
pub struct UpdateDocumentInput {
    /// The customer the document addresses.
    pub customer_id: CustomerId,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Tax treatment.
    pub tax_type: TaxType,
    /// Tax rate in percent.
    pub tax_rate: Decimal,
    /// Replacement line items (at least one).
    pub items: Vec<LineItemInput>,
    /// Optional notes.
    pub notes: Option<String>,
}

/// A document listed with its customer's name.
#[derive(Debug, Clone)]
pub struct DocumentWithCustomer {
    /// The document row.
    pub document: documents::Model,
    /// Customer display name.
    pub customer_name: String,
}

/// A document with its line items.
#[derive(Debug, Clone)]
pub struct DocumentWithItems {
    /// The document row.
    pub document: documents::Model,
    /// Its line items.
    pub items: Vec<document_items::Model>,
}

/// Document repository.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    db: DatabaseConnection,
    poster: PostingEngine,
}

impl DocumentRepository {
    /// Creates a new document repository wired to the posting engine.
    #[must_use]
    pub const fn new(db: DatabaseConnection, poster: PostingEngine) -> Self {
        Self { db, poster }
    }

    /// Lists documents newest-first with customer names.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self) -> Result<Vec<DocumentWithCustomer>, DocumentError> {
        let rows = documents::Entity::find()
            .find_also_related(customers::Entity)
            .order_by_desc(documents::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(document, customer)| DocumentWithCustomer {
                document,
                customer_name: customer
                    .map_or_else(|| "Unknown customer".to_string(), |c| c.name),
            })
            .collect())
    }

    /// Fetches a document with its line items.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::NotFound` for unknown ids.
    pub async fn get(&self, id: DocumentId) -> Result<DocumentWithItems, DocumentError> {
        let document = documents::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(DocumentError::NotFound(id))?;

        let items = document
            .find_related(document_items::Entity)
            .all(&self.db)
            .await?;

        Ok(DocumentWithItems { document, items })
    }

    /// Creates a document in draft status.
    ///
    /// Totals are computed from the items; the document number is
    /// generated as `{type initial}{yymm}-{sequence}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the customer is unknown or no items are given.
    pub async fn create(
        &self,
        input: CreateDocumentInput,
    ) -> Result<DocumentWithItems, DocumentError> {
        if input.items.is_empty() {
            return Err(DocumentError::NoItems);
        }

        customers::Entity::find_by_id(input.customer_id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(DocumentError::CustomerNotFound(input.customer_id))?;

        let totals = compute_totals(&input.items, input.tax_type, input.tax_rate);
        let document_number = self
            .next_document_number(input.document_type, input.issue_date)
            .await?;

        let id = DocumentId::new();
        let now = chrono::Utc::now().into();

        let txn = self.db.begin().await?;

        let document = documents::ActiveModel {
            id: Set(id.into_inner()),
            document_number: Set(document_number),
            document_type: Set(input.document_type.as_str().to_string()),
            customer_id: Set(input.customer_id.into_inner()),
            issue_date: Set(input.issue_date),
            due_date: Set(input.due_date),
            payment_date: Set(None),
            status: Set(DocumentStatus::Draft.as_str().to_string()),
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
        document.insert(&txn).await?;

        insert_items(&txn, id.into_inner(), &input.items).await?;

        txn.commit().await?;

        // A draft plans nothing, but the engine owns that decision.
        self.poster.post_for_invoice(id).await;

        self.get(id).await
    }

    /// Updates a document, replacing its items and recomputing totals.
    ///
    /// Allowed while the document is draft or issued; an issued invoice
    /// re-posts with the new amounts.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown ids, non-editable statuses, or an
    /// empty item list.
    pub async fn update(
        &self,
        id: DocumentId,
        input: UpdateDocumentInput,
    ) -> Result<DocumentWithItems, DocumentError> {
        if input.items.is_empty() {
            return Err(DocumentError::NoItems);
        }

        let document = documents::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(DocumentError::NotFound(id))?;

        let status = parse_status(&document.status)?;
        if !status.is_editable() {
            return Err(DocumentError::NotEditable(status));
        }

        customers::Entity::find_by_id(input.customer_id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(DocumentError::CustomerNotFound(input.customer_id))?;

        let totals = compute_totals(&input.items, input.tax_type, input.tax_rate);

        let txn = self.db.begin().await?;

        let mut active: documents::ActiveModel = document.into();
        active.customer_id = Set(input.customer_id.into_inner());
        active.issue_date = Set(input.issue_date);
        active.due_date = Set(input.due_date);
        active.tax_type = Set(input.tax_type.as_str().to_string());
        active.tax_rate = Set(input.tax_rate);
        active.subtotal = Set(totals.subtotal);
        active.tax_amount = Set(totals.tax_amount);
        active.total_amount = Set(totals.total_amount);
        active.notes = Set(input.notes);
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&txn).await?;

        document_items::Entity::delete_many()
            .filter(document_items::Column::DocumentId.eq(id.into_inner()))
            .exec(&txn)
            .await?;
        insert_items(&txn, id.into_inner(), &input.items).await?;

        txn.commit().await?;

        self.poster.post_for_invoice(id).await;

        self.get(id).await
    }

    /// Moves a document to a new status along the legal transitions.
    ///
    /// Issuing an invoice posts it to the ledger; cancelling an issued
    /// invoice removes its entries (the reconciliation finds an empty
    /// plan). Marking paid goes through [`Self::record_payment`].
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::InvalidTransition` for illegal moves.
    pub async fn set_status(
        &self,
        id: DocumentId,
        next: DocumentStatus,
    ) -> Result<documents::Model, DocumentError> {
        if next == DocumentStatus::Paid {
            return Err(DocumentError::PaymentDateRequired);
        }

        let document = documents::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(DocumentError::NotFound(id))?;

        let current = parse_status(&document.status)?;
        if !current.can_transition_to(next) {
            return Err(DocumentError::InvalidTransition {
                from: current,
                to: next,
            });
        }

        let mut active: documents::ActiveModel = document.into();
        active.status = Set(next.as_str().to_string());
        active.updated_at = Set(chrono::Utc::now().into());
        let document = active.update(&self.db).await?;

        self.poster.post_for_invoice(id).await;

        Ok(document)
    }

    /// Records payment of an issued invoice: sets the payment date and
    /// moves the document to paid. The reconciliation adds the cash
    /// receipt entry dated at payment.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::InvalidTransition` unless the document is
    /// currently issued.
    pub async fn record_payment(
        &self,
        id: DocumentId,
        payment_date: NaiveDate,
    ) -> Result<documents::Model, DocumentError> {
        let document = documents::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(DocumentError::NotFound(id))?;

        let current = parse_status(&document.status)?;
        if !current.can_transition_to(DocumentStatus::Paid) {
            return Err(DocumentError::InvalidTransition {
                from: current,
                to: DocumentStatus::Paid,
            });
        }

        let mut active: documents::ActiveModel = document.into();
        active.status = Set(DocumentStatus::Paid.as_str().to_string());
        active.payment_date = Set(Some(payment_date));
        active.updated_at = Set(chrono::Utc::now().into());
        let document = active.update(&self.db).await?;

        self.poster.post_for_invoice(id).await;

        Ok(document)
    }

    /// Deletes a document, its items, and its auto-generated journal
    /// entries, in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::NotFound` for unknown ids.
    pub async fn delete(&self, id: DocumentId) -> Result<(), DocumentError> {
        let document = documents::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(DocumentError::NotFound(id))?;

        let txn = self.db.begin().await?;

        PostingEngine::remove_for_document(&txn, id).await?;
        document_items::Entity::delete_many()
            .filter(document_items::Column::DocumentId.eq(id.into_inner()))
            .exec(&txn)
            .await?;
        documents::Entity::delete_by_id(document.id).exec(&txn).await?;

        txn.commit().await?;

        Ok(())
    }

    /// Generates the next document number for a type and month:
    /// `{initial}{yymm}-{sequence}`.
    async fn next_document_number(
        &self,
        document_type: DocumentType,
        issue_date: NaiveDate,
    ) -> Result<String, DocumentError> {
        let prefix = format!(
            "{}{}",
            document_type.number_prefix(),
            issue_date.format("%y%m")
        );

        let existing = documents::Entity::find()
            .filter(documents::Column::DocumentNumber.starts_with(&prefix))
            .count(&self.db)
            .await?;

        Ok(format!("{prefix}-{:04}", existing + 1))
    }
}

fn parse_status(raw: &str) -> Result<DocumentStatus, DocumentError> {
    DocumentStatus::from_str(raw).map_err(DocumentError::InvalidRow)
}

async fn insert_items<C: ConnectionTrait>(
    conn: &C,
    document_id: Uuid,
    items: &[LineItemInput],
) -> Result<(), DbErr> {
    for item in items {
        let model = document_items::ActiveModel {
            id: Set(Uuid::now_v7()),
            document_id: Set(document_id),
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
