//! `SeaORM` Entity for invoices table.
//!
//! Sales and purchase invoices and their returns share one table; `kind`
//! tells them apart. `lines` holds the ordered item lines as JSON.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::InvoiceKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub kind: InvoiceKind,
    pub posted_at: DateTimeWithTimeZone,
    pub party_id: Option<Uuid>,
    pub payment_method: String,
    pub payment_target_type: Option<String>,
    pub payment_target_id: Option<Uuid>,
    pub is_split: bool,
    pub split_safe_id: Option<Uuid>,
    #[sea_orm(column_type = "Decimal(Some((18, 4)))", nullable)]
    pub split_cash_amount: Option<Decimal>,
    pub split_bank_id: Option<Uuid>,
    #[sea_orm(column_type = "Decimal(Some((18, 4)))", nullable)]
    pub split_bank_amount: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((18, 4)))")]
    pub subtotal: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 4)))")]
    pub discount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 4)))")]
    pub tax: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 4)))")]
    pub net: Decimal,
    #[sea_orm(column_type = "JsonBinary")]
    pub lines: Json,
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
