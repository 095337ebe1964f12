//! `SeaORM` Entity for the inventory_items table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub item_name: String,
    pub category: String,
    pub supplier_id: Option<Uuid>,
    /// Unit of measure (kg, L, pieces).
    pub unit: String,
    pub current_stock: Decimal,
    pub reorder_point: Decimal,
    pub optimal_stock: Decimal,
    pub unit_cost: Decimal,
    pub expiry_date: Option<Date>,
    pub storage_location: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::suppliers::Entity",
        from = "Column::SupplierId",
        to = "super::suppliers::Column::Id"
    )]
    Suppliers,
    #[sea_orm(has_many = "super::inventory_movements::Entity")]
    InventoryMovements,
    #[sea_orm(has_many = "super::stock_alerts::Entity")]
    StockAlerts,
}

impl Related<super::suppliers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Suppliers.def()
    }
}

impl Related<super::inventory_movements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryMovements.def()
    }
}

impl Related<super::stock_alerts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockAlerts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
