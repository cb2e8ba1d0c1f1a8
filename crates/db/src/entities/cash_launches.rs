//! `SeaORM` Entity for cash_launches table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "cash_launches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub reference_date: Date,
    #[sea_orm(column_name = "type", column_type = "Char(Some(1))")]
    pub entry_type: String,
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub value: Decimal,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
