//! Auto-posting planner.
//!
//! Pure functions that derive, from a source-document snapshot and the
//! resolved role accounts, the set of journal entries that must exist for
//! that source. The posting engine in the database layer reconciles the
//! ledger against the plan (delete all entries tagged with the source's
//! reference, insert the plan) inside one transaction, so re-firing the
//! same event is idempotent.
//!
//! Planners never fail: an ineligible source (draft invoice, quotation,
//! outbound movement) simply plans nothing. Zero-amount entries are
//! dropped rather than planned, keeping the positive-amount ledger
//! invariant intact.

use chrono::{DateTime, FixedOffset, NaiveDate};
use kanjo_shared::types::{AdminId, DocumentId, InventoryItemId, MovementId, PurchaseOrderId};
use rust_decimal::Decimal;

use crate::chart::ResolvedRoles;
use crate::documents::{DocumentStatus, DocumentType};
use crate::inventory::{MovementSource, MovementType};
use crate::purchasing::OrderStatus;

use super::entry::{EntryReference, ReferenceKind};
use super::types::PlannedEntry;

/// The slice of a sales document the planner needs.
#[derive(Debug, Clone)]
pub struct InvoiceSnapshot {
    /// Document id.
    pub id: DocumentId,
    /// Document kind; only invoices have an accounting effect.
    pub document_type: DocumentType,
    /// Document number, used in the entry description.
    pub document_number: String,
    /// Customer display name, used in the entry description.
    pub customer_name: String,
    /// Issue date; accounting date of the revenue entry.
    pub issue_date: NaiveDate,
    /// Payment date; set once the invoice is paid.
    pub payment_date: Option<NaiveDate>,
    /// Lifecycle status.
    pub status: DocumentStatus,
    /// Tax-inclusive total.
    pub total_amount: Decimal,
    /// Owner of the document, recorded on generated entries.
    pub created_by: AdminId,
}

/// The slice of a purchase order the planner needs.
#[derive(Debug, Clone)]
pub struct PurchaseOrderSnapshot {
    /// Order id.
    pub id: PurchaseOrderId,
    /// Order number, used in the entry description.
    pub order_number: String,
    /// Supplier display name, used in the entry description.
    pub supplier_name: String,
    /// Date the order was placed.
    pub order_date: NaiveDate,
    /// Expected delivery date, if known.
    pub expected_delivery_date: Option<NaiveDate>,
    /// Actual delivery date, once delivered.
    pub actual_delivery_date: Option<NaiveDate>,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Tax-inclusive total.
    pub total_amount: Decimal,
    /// Owner of the order, recorded on generated entries.
    pub created_by: AdminId,
}

/// The slice of an inventory movement the planner needs.
#[derive(Debug, Clone)]
pub struct MovementSnapshot {
    /// Movement id.
    pub id: MovementId,
    /// The inventory item moved.
    pub inventory_item_id: InventoryItemId,
    /// Item display name, used in the entry description.
    pub item_name: String,
    /// Direction of the movement.
    pub movement_type: MovementType,
    /// What caused the movement, when recorded.
    pub source: Option<MovementSource>,
    /// Quantity moved (positive for inbound).
    pub quantity: Decimal,
    /// Cost per unit at the time of the movement.
    pub unit_cost: Decimal,
    /// When the movement was performed.
    pub performed_at: DateTime<FixedOffset>,
    /// Who performed the movement.
    pub performed_by: AdminId,
}

/// Plans the entries an invoice must have on the ledger.
///
/// A quotation, order, or delivery note plans nothing; so does an invoice
/// that is not yet issued (or has been cancelled). An issued invoice plans
/// one receivable/revenue entry dated at issue; a paid invoice additionally
/// plans a cash/receivable entry dated at payment.
#[must_use]
pub fn plan_for_invoice(doc: &InvoiceSnapshot, roles: &ResolvedRoles) -> Vec<PlannedEntry> {
    if doc.document_type != DocumentType::Invoice {
        return Vec::new();
    }
    if !doc.status.has_accounting_effect() {
        return Vec::new();
    }
    if doc.total_amount <= Decimal::ZERO {
        return Vec::new();
    }

    let mut plan = vec![PlannedEntry {
        entry_date: doc.issue_date,
        description: format!("{} sales ({})", doc.customer_name, doc.document_number),
        debit_account_id: roles.receivable,
        credit_account_id: roles.revenue,
        amount: doc.total_amount,
        reference: EntryReference::new(ReferenceKind::Document, doc.id.into_inner()),
        created_by: doc.created_by,
    }];

    if let Some(payment_date) = doc.payment_date {
        plan.push(PlannedEntry {
            entry_date: payment_date,
            description: format!(
                "{} payment received ({})",
                doc.customer_name, doc.document_number
            ),
            debit_account_id: roles.cash,
            credit_account_id: roles.receivable,
            amount: doc.total_amount,
            reference: EntryReference::new(ReferenceKind::DocumentPayment, doc.id.into_inner()),
            created_by: doc.created_by,
        });
    }

    plan
}

/// Plans the entry a purchase order must have on the ledger.
///
/// Only delivered orders post. The accounting date prefers the actual
/// delivery date, then the expected delivery date, then the order date.
#[must_use]
pub fn plan_for_purchase_order(
    order: &PurchaseOrderSnapshot,
    roles: &ResolvedRoles,
) -> Vec<PlannedEntry> {
    if order.status != OrderStatus::Delivered {
        return Vec::new();
    }
    if order.total_amount <= Decimal::ZERO {
        return Vec::new();
    }

    let entry_date = delivery_entry_date(order);

    vec![PlannedEntry {
        entry_date,
        description: format!("{} purchase ({})", order.supplier_name, order.order_number),
        debit_account_id: roles.purchases,
        credit_account_id: roles.payable,
        amount: order.total_amount,
        reference: EntryReference::new(ReferenceKind::PurchaseOrder, order.id.into_inner()),
        created_by: order.created_by,
    }]
}

/// Accounting date for a delivered order: actual, then expected, then
/// order date.
#[must_use]
pub fn delivery_entry_date(order: &PurchaseOrderSnapshot) -> NaiveDate {
    order
        .actual_delivery_date
        .or(order.expected_delivery_date)
        .unwrap_or(order.order_date)
}

/// Plans the entry an inventory movement must have on the ledger.
///
/// Only inbound movements caused by a purchase post (manual adjustments,
/// opening stock, and outbound consumption never touch the ledger). The
/// amount is quantity x unit cost; a zero-valued receipt plans nothing.
#[must_use]
pub fn plan_for_movement(movement: &MovementSnapshot, roles: &ResolvedRoles) -> Vec<PlannedEntry> {
    if movement.movement_type != MovementType::In {
        return Vec::new();
    }
    if movement.source != Some(MovementSource::Purchase) {
        return Vec::new();
    }

    let amount = movement.quantity * movement.unit_cost;
    if amount <= Decimal::ZERO {
        return Vec::new();
    }

    vec![PlannedEntry {
        entry_date: movement.performed_at.date_naive(),
        description: format!("{} stock received", movement.item_name),
        debit_account_id: roles.inventory_asset,
        credit_account_id: roles.purchases,
        amount,
        reference: EntryReference::new(
            ReferenceKind::InventoryMovement,
            movement.id.into_inner(),
        ),
        created_by: movement.performed_by,
    }]
}

/// Reference kinds the invoice reconciliation owns.
///
/// Both the issue entry and the payment entry are replaced together when
/// an invoice re-posts.
#[must_use]
pub const fn invoice_reference_kinds() -> [ReferenceKind; 2] {
    [ReferenceKind::Document, ReferenceKind::DocumentPayment]
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanjo_shared::types::AccountId;
    use rust_decimal_macros::dec;

    fn test_roles() -> ResolvedRoles {
        ResolvedRoles {
            cash: AccountId::new(),
            receivable: AccountId::new(),
            inventory_asset: AccountId::new(),
            payable: AccountId::new(),
            revenue: AccountId::new(),
            purchases: AccountId::new(),
        }
    }

    fn invoice(status: DocumentStatus, payment_date: Option<NaiveDate>) -> InvoiceSnapshot {
        InvoiceSnapshot {
            id: DocumentId::new(),
            document_type: DocumentType::Invoice,
            document_number: "I2602-0001".to_string(),
            customer_name: "Marble Noodle Bar".to_string(),
            issue_date: NaiveDate::from_ymd_opt(2026, 2, 5).unwrap(),
            payment_date,
            status,
            total_amount: dec!(11000),
            created_by: AdminId::new(),
        }
    }

    fn order(status: OrderStatus) -> PurchaseOrderSnapshot {
        PurchaseOrderSnapshot {
            id: PurchaseOrderId::new(),
            order_number: "PO2602-0001".to_string(),
            supplier_name: "Harbor Produce".to_string(),
            order_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            expected_delivery_date: Some(NaiveDate::from_ymd_opt(2026, 2, 3).unwrap()),
            actual_delivery_date: Some(NaiveDate::from_ymd_opt(2026, 2, 4).unwrap()),
            status,
            total_amount: dec!(5500),
            created_by: AdminId::new(),
        }
    }

    fn movement(
        movement_type: MovementType,
        source: Option<MovementSource>,
    ) -> MovementSnapshot {
        MovementSnapshot {
            id: MovementId::new(),
            inventory_item_id: InventoryItemId::new(),
            item_name: "Pork belly".to_string(),
            movement_type,
            source,
            quantity: dec!(12),
            unit_cost: dec!(1800),
            performed_at: chrono::Utc::now().into(),
            performed_by: AdminId::new(),
        }
    }

    #[test]
    fn test_issued_invoice_plans_revenue_entry() {
        let roles = test_roles();
        let plan = plan_for_invoice(&invoice(DocumentStatus::Issued, None), &roles);

        assert_eq!(plan.len(), 1);
        let entry = &plan[0];
        assert_eq!(entry.debit_account_id, roles.receivable);
        assert_eq!(entry.credit_account_id, roles.revenue);
        assert_eq!(entry.amount, dec!(11000));
        assert_eq!(entry.reference.kind, ReferenceKind::Document);
        assert_eq!(entry.description, "Marble Noodle Bar sales (I2602-0001)");
    }

    #[test]
    fn test_paid_invoice_plans_payment_entry_too() {
        let roles = test_roles();
        let paid_on = NaiveDate::from_ymd_opt(2026, 2, 20).unwrap();
        let plan = plan_for_invoice(&invoice(DocumentStatus::Paid, Some(paid_on)), &roles);

        assert_eq!(plan.len(), 2);
        let payment = &plan[1];
        assert_eq!(payment.debit_account_id, roles.cash);
        assert_eq!(payment.credit_account_id, roles.receivable);
        assert_eq!(payment.entry_date, paid_on);
        assert_eq!(payment.reference.kind, ReferenceKind::DocumentPayment);
    }

    #[test]
    fn test_draft_invoice_plans_nothing() {
        let plan = plan_for_invoice(&invoice(DocumentStatus::Draft, None), &test_roles());
        assert!(plan.is_empty());
    }

    #[test]
    fn test_cancelled_invoice_plans_nothing() {
        let plan = plan_for_invoice(&invoice(DocumentStatus::Cancelled, None), &test_roles());
        assert!(plan.is_empty());
    }

    #[test]
    fn test_quotation_plans_nothing() {
        let mut doc = invoice(DocumentStatus::Issued, None);
        doc.document_type = DocumentType::Quotation;
        assert!(plan_for_invoice(&doc, &test_roles()).is_empty());
    }

    #[test]
    fn test_zero_total_invoice_plans_nothing() {
        let mut doc = invoice(DocumentStatus::Issued, None);
        doc.total_amount = Decimal::ZERO;
        assert!(plan_for_invoice(&doc, &test_roles()).is_empty());
    }

    #[test]
    fn test_delivered_order_plans_purchase_entry() {
        let roles = test_roles();
        let plan = plan_for_purchase_order(&order(OrderStatus::Delivered), &roles);

        assert_eq!(plan.len(), 1);
        let entry = &plan[0];
        assert_eq!(entry.debit_account_id, roles.purchases);
        assert_eq!(entry.credit_account_id, roles.payable);
        assert_eq!(entry.amount, dec!(5500));
        assert_eq!(entry.reference.kind, ReferenceKind::PurchaseOrder);
    }

    #[test]
    fn test_undelivered_order_plans_nothing() {
        for status in [OrderStatus::Draft, OrderStatus::Ordered, OrderStatus::Cancelled] {
            assert!(plan_for_purchase_order(&order(status), &test_roles()).is_empty());
        }
    }

    #[test]
    fn test_entry_date_prefers_actual_delivery() {
        let po = order(OrderStatus::Delivered);
        assert_eq!(delivery_entry_date(&po), po.actual_delivery_date.unwrap());

        let mut po = order(OrderStatus::Delivered);
        po.actual_delivery_date = None;
        assert_eq!(delivery_entry_date(&po), po.expected_delivery_date.unwrap());

        let mut po = order(OrderStatus::Delivered);
        po.actual_delivery_date = None;
        po.expected_delivery_date = None;
        assert_eq!(delivery_entry_date(&po), po.order_date);
    }

    #[test]
    fn test_purchase_receipt_plans_inventory_entry() {
        let roles = test_roles();
        let plan = plan_for_movement(
            &movement(MovementType::In, Some(MovementSource::Purchase)),
            &roles,
        );

        assert_eq!(plan.len(), 1);
        let entry = &plan[0];
        assert_eq!(entry.debit_account_id, roles.inventory_asset);
        assert_eq!(entry.credit_account_id, roles.purchases);
        assert_eq!(entry.amount, dec!(21600)); // 12 x 1800
        assert_eq!(entry.reference.kind, ReferenceKind::InventoryMovement);
    }

    #[test]
    fn test_outbound_movement_never_posts() {
        let plan = plan_for_movement(
            &movement(MovementType::Out, Some(MovementSource::Purchase)),
            &test_roles(),
        );
        assert!(plan.is_empty());
    }

    #[test]
    fn test_non_purchase_receipt_never_posts() {
        for source in [
            None,
            Some(MovementSource::Initial),
            Some(MovementSource::Consumption),
            Some(MovementSource::Manual),
        ] {
            let plan = plan_for_movement(&movement(MovementType::In, source), &test_roles());
            assert!(plan.is_empty());
        }
    }

    #[test]
    fn test_zero_cost_receipt_plans_nothing() {
        let mut mv = movement(MovementType::In, Some(MovementSource::Purchase));
        mv.unit_cost = Decimal::ZERO;
        assert!(plan_for_movement(&mv, &test_roles()).is_empty());
    }
}
