//! Initial database migration.
//!
//! Creates the registries (customers, suppliers), the chart of accounts,
//! the journal, source documents (sales documents, purchase orders), and
//! the inventory tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // Registries
        db.execute_unprepared(CUSTOMERS_SQL).await?;
        db.execute_unprepared(SUPPLIERS_SQL).await?;

        // Bookkeeping
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(JOURNAL_ENTRIES_SQL).await?;

        // Source documents
        db.execute_unprepared(DOCUMENTS_SQL).await?;
        db.execute_unprepared(DOCUMENT_ITEMS_SQL).await?;
        db.execute_unprepared(PURCHASE_ORDERS_SQL).await?;
        db.execute_unprepared(PURCHASE_ORDER_ITEMS_SQL).await?;

        // Inventory
        db.execute_unprepared(INVENTORY_ITEMS_SQL).await?;
        db.execute_unprepared(INVENTORY_MOVEMENTS_SQL).await?;
        db.execute_unprepared(STOCK_ALERTS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(
            "DROP TABLE IF EXISTS stock_alerts, inventory_movements, inventory_items, \
             purchase_order_items, purchase_orders, document_items, documents, \
             journal_entries, accounts, suppliers, customers CASCADE;",
        )
        .await?;

        Ok(())
    }
}

const CUSTOMERS_SQL: &str = r"
CREATE TABLE customers (
    id UUID PRIMARY KEY,
    customer_type TEXT NOT NULL CHECK (customer_type IN ('company', 'individual')),
    name TEXT NOT NULL,
    postal_code TEXT,
    address TEXT,
    phone TEXT,
    email TEXT,
    payment_terms INTEGER NOT NULL DEFAULT 30,
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const SUPPLIERS_SQL: &str = r"
CREATE TABLE suppliers (
    id UUID PRIMARY KEY,
    supplier_type TEXT NOT NULL CHECK (supplier_type IN ('company', 'individual')),
    name TEXT NOT NULL,
    postal_code TEXT,
    address TEXT,
    phone TEXT,
    email TEXT,
    payment_terms INTEGER NOT NULL DEFAULT 30,
    bank_name TEXT,
    branch_name TEXT,
    bank_account_type TEXT,
    bank_account_number TEXT,
    bank_account_holder TEXT,
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY,
    code TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    account_type TEXT NOT NULL
        CHECK (account_type IN ('asset', 'liability', 'equity', 'revenue', 'expense')),
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const JOURNAL_ENTRIES_SQL: &str = r"
CREATE TABLE journal_entries (
    id UUID PRIMARY KEY,
    entry_date DATE NOT NULL,
    description TEXT NOT NULL,
    debit_account_id UUID NOT NULL REFERENCES accounts (id),
    credit_account_id UUID NOT NULL REFERENCES accounts (id),
    amount NUMERIC(14, 2) NOT NULL CHECK (amount > 0),
    reference_type TEXT
        CHECK (reference_type IN ('document', 'document_payment', 'purchase_order', 'inventory_movement')),
    reference_id UUID,
    notes TEXT,
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CHECK (debit_account_id <> credit_account_id),
    CHECK ((reference_type IS NULL) = (reference_id IS NULL))
);

CREATE INDEX idx_journal_entries_entry_date ON journal_entries (entry_date);
CREATE INDEX idx_journal_entries_reference ON journal_entries (reference_type, reference_id);
";

const DOCUMENTS_SQL: &str = r"
CREATE TABLE documents (
    id UUID PRIMARY KEY,
    document_number TEXT NOT NULL UNIQUE,
    document_type TEXT NOT NULL
        CHECK (document_type IN ('quotation', 'order', 'delivery_note', 'invoice')),
    customer_id UUID NOT NULL REFERENCES customers (id),
    issue_date DATE NOT NULL,
    due_date DATE,
    payment_date DATE,
    status TEXT NOT NULL DEFAULT 'draft'
        CHECK (status IN ('draft', 'issued', 'paid', 'cancelled')),
    tax_type TEXT NOT NULL DEFAULT 'exclusive' CHECK (tax_type IN ('exclusive', 'inclusive')),
    tax_rate NUMERIC(5, 2) NOT NULL DEFAULT 10,
    subtotal NUMERIC(14, 2) NOT NULL DEFAULT 0,
    tax_amount NUMERIC(14, 2) NOT NULL DEFAULT 0,
    total_amount NUMERIC(14, 2) NOT NULL DEFAULT 0,
    notes TEXT,
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_documents_customer ON documents (customer_id);
CREATE INDEX idx_documents_status ON documents (status);
";

const DOCUMENT_ITEMS_SQL: &str = r"
CREATE TABLE document_items (
    id UUID PRIMARY KEY,
    document_id UUID NOT NULL REFERENCES documents (id) ON DELETE CASCADE,
    item_name TEXT NOT NULL,
    description TEXT,
    quantity NUMERIC(14, 3) NOT NULL,
    unit_price NUMERIC(14, 2) NOT NULL,
    amount NUMERIC(14, 2) NOT NULL
);

CREATE INDEX idx_document_items_document ON document_items (document_id);
";

const PURCHASE_ORDERS_SQL: &str = r"
CREATE TABLE purchase_orders (
    id UUID PRIMARY KEY,
    order_number TEXT NOT NULL UNIQUE,
    supplier_id UUID NOT NULL REFERENCES suppliers (id),
    order_date DATE NOT NULL,
    expected_delivery_date DATE,
    actual_delivery_date DATE,
    status TEXT NOT NULL DEFAULT 'draft'
        CHECK (status IN ('draft', 'ordered', 'delivered', 'cancelled')),
    tax_type TEXT NOT NULL DEFAULT 'exclusive' CHECK (tax_type IN ('exclusive', 'inclusive')),
    tax_rate NUMERIC(5, 2) NOT NULL DEFAULT 10,
    subtotal NUMERIC(14, 2) NOT NULL DEFAULT 0,
    tax_amount NUMERIC(14, 2) NOT NULL DEFAULT 0,
    total_amount NUMERIC(14, 2) NOT NULL DEFAULT 0,
    notes TEXT,
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_purchase_orders_supplier ON purchase_orders (supplier_id);
CREATE INDEX idx_purchase_orders_status ON purchase_orders (status);
";

const PURCHASE_ORDER_ITEMS_SQL: &str = r"
CREATE TABLE purchase_order_items (
    id UUID PRIMARY KEY,
    purchase_order_id UUID NOT NULL REFERENCES purchase_orders (id) ON DELETE CASCADE,
    item_name TEXT NOT NULL,
    description TEXT,
    quantity NUMERIC(14, 3) NOT NULL,
    unit_price NUMERIC(14, 2) NOT NULL,
    amount NUMERIC(14, 2) NOT NULL
);

CREATE INDEX idx_purchase_order_items_order ON purchase_order_items (purchase_order_id);
";

const INVENTORY_ITEMS_SQL: &str = r"
CREATE TABLE inventory_items (
    id UUID PRIMARY KEY,
    item_name TEXT NOT NULL,
    category TEXT NOT NULL,
    supplier_id UUID REFERENCES suppliers (id),
    unit TEXT NOT NULL DEFAULT 'pieces',
    current_stock NUMERIC(14, 3) NOT NULL DEFAULT 0 CHECK (current_stock >= 0),
    reorder_point NUMERIC(14, 3) NOT NULL DEFAULT 0,
    optimal_stock NUMERIC(14, 3) NOT NULL DEFAULT 0,
    unit_cost NUMERIC(14, 2) NOT NULL DEFAULT 0,
    expiry_date DATE,
    storage_location TEXT,
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_inventory_items_category ON inventory_items (category);
";

const INVENTORY_MOVEMENTS_SQL: &str = r"
CREATE TABLE inventory_movements (
    id UUID PRIMARY KEY,
    inventory_item_id UUID NOT NULL REFERENCES inventory_items (id) ON DELETE CASCADE,
    movement_type TEXT NOT NULL
        CHECK (movement_type IN ('in', 'out', 'adjustment', 'initial')),
    quantity NUMERIC(14, 3) NOT NULL,
    unit_cost NUMERIC(14, 2) NOT NULL DEFAULT 0,
    source TEXT CHECK (source IN ('purchase', 'consumption', 'initial', 'manual')),
    source_id UUID,
    notes TEXT,
    performed_by UUID NOT NULL,
    performed_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_inventory_movements_item ON inventory_movements (inventory_item_id);
";

const STOCK_ALERTS_SQL: &str = r"
CREATE TABLE stock_alerts (
    id UUID PRIMARY KEY,
    inventory_item_id UUID NOT NULL REFERENCES inventory_items (id) ON DELETE CASCADE,
    alert_type TEXT NOT NULL CHECK (alert_type IN ('low_stock', 'expiry_warning')),
    alert_level TEXT NOT NULL DEFAULT 'warning' CHECK (alert_level IN ('warning', 'urgent')),
    message TEXT NOT NULL,
    is_resolved BOOLEAN NOT NULL DEFAULT FALSE,
    manually_dismissed BOOLEAN NOT NULL DEFAULT FALSE,
    resolved_at TIMESTAMPTZ,
    resolved_by UUID,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_stock_alerts_item ON stock_alerts (inventory_item_id);
";
