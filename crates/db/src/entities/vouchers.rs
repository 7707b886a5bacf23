//! `SeaORM` Entity for vouchers table.
//!
//! The counterparty is polymorphic: `entity_type` names the referenced table
//! and `entity_id` the row. Either may be missing on legacy rows. Expense
//! vouchers carry their expense code in `expense_code_id`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::VoucherKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "vouchers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub kind: VoucherKind,
    pub posted_at: DateTimeWithTimeZone,
    pub entity_type: Option<String>,
    pub entity_id: Option<Uuid>,
    pub expense_code_id: Option<Uuid>,
    pub channel_type: Option<String>,
    pub channel_id: Option<Uuid>,
    #[sea_orm(column_type = "Decimal(Some((18, 4)))")]
    pub amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 4)))")]
    pub tax: Decimal,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::companies::Entity",
        from = "Column::CompanyId",
        to = "super::companies::Column::Id"
    )]
    Companies,
}

impl Related<super::companies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Companies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
