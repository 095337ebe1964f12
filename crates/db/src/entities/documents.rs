//! `SeaORM` Entity for the documents table (quotations, orders, delivery
//! notes, invoices).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub document_number: String,
    pub document_type: String,
    pub customer_id: Uuid,
    pub issue_date: Date,
    pub due_date: Option<Date>,
    pub payment_date: Option<Date>,
    pub status: String,
    pub tax_type: String,
    pub tax_rate: Decimal,
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
    pub notes: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customers::Entity",
        from = "Column::CustomerId",
        to = "super::customers::Column::Id"
    )]
    Customers,
    #[sea_orm(has_many = "super::document_items::Entity")]
    DocumentItems,
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customers.def()
    }
}

impl Related<super::document_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DocumentItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
