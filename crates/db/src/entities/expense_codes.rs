//! `SeaORM` Entity for expense_codes table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "expense_codes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub expense_type_id: Option<Uuid>,
    pub code: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::expense_types::Entity",
        from = "Column::ExpenseTypeId",
        to = "super::expense_types::Column::Id"
    )]
    ExpenseTypes,
}

impl Related<super::expense_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExpenseTypes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
