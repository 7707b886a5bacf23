//! `SeaORM` entities of the ledger schema.

pub mod companies;
pub mod expense_codes;
pub mod expense_types;
pub mod internal_transfers;
pub mod invoices;
pub mod items;
pub mod monetary_accounts;
pub mod sea_orm_active_enums;
pub mod store_items;
pub mod store_movements;
pub mod vouchers;
