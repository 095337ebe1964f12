//! `SeaORM` Entity for the inventory_movements table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_movements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub inventory_item_id: Uuid,
    pub movement_type: String,
    /// Stored with the outbound sign convention: negative for out.
    pub quantity: Decimal,
    pub unit_cost: Decimal,
    /// What caused the movement (purchase, consumption, initial, manual).
    pub source: Option<String>,
    /// The causing row (e.g. the purchase order) when known.
    pub source_id: Option<Uuid>,
    pub notes: Option<String>,
    pub performed_by: Uuid,
    pub performed_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::inventory_items::Entity",
        from = "Column::InventoryItemId",
        to = "super::inventory_items::Column::Id",
        on_delete = "Cascade"
    )]
    InventoryItems,
}

impl Related<super::inventory_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
