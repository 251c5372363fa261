use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pantry_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub uid: String,
    pub name: String,
    pub category: Option<String>,
    pub is_archived: bool,
    pub expiry_date: Option<Date>,
    pub added_at: Option<DateTimeWithTimeZone>,
    pub is_perishable_no_expiry: bool,
    #[sea_orm(column_type = "Double", nullable)]
    pub quantity_value: Option<f64>,
    pub quantity_unit: Option<String>,
    pub quantity_note: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
