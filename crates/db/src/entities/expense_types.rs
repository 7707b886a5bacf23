//! `SeaORM` Entity for expense_types table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "expense_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::expense_codes::Entity")]
    ExpenseCodes,
}

impl Related<super::expense_codes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExpenseCodes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
