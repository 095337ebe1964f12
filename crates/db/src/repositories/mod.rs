//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. The posting engine lives here too: source-document
//! repositories call into it after every mutation so the ledger stays
//! reconciled.

pub mod account;
pub mod customer;
pub mod document;
pub mod inventory;
pub mod journal;
pub mod posting;
pub mod purchase_order;
pub mod report;
pub mod supplier;

pub use account::{AccountError, AccountRepository, CreateAccountInput};
pub use customer::{CustomerError, CustomerInput, CustomerRepository};
pub use document::{
    CreateDocumentInput, DocumentError, DocumentRepository, DocumentWithCustomer,
    DocumentWithItems, UpdateDocumentInput,
};
pub use inventory::{
    CreateItemInput, InventoryFilter, InventoryRepository, InventoryRepoError, ItemWithStatus,
    RecordMovementInput, UpdateItemInput,
};
pub use journal::{JournalError, JournalRepository};
pub use posting::{PostingEngine, PostingError};
pub use purchase_order::{
    CreateOrderInput, OrderWithItems, OrderWithSupplier, PurchaseOrderError,
    PurchaseOrderRepository, UpdateOrderInput,
};
pub use report::{ReportError, ReportRepository};
pub use supplier::{SupplierError, SupplierInput, SupplierRepository};
