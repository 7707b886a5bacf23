//! Postgres enum types of the ledger schema.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Monetary account family (`account_kind`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_kind")]
pub enum AccountKind {
    /// Cash safe.
    #[sea_orm(string_value = "safe")]
    Safe,
    /// Bank account.
    #[sea_orm(string_value = "bank")]
    Bank,
    /// Customer.
    #[sea_orm(string_value = "customer")]
    Customer,
    /// Supplier.
    #[sea_orm(string_value = "supplier")]
    Supplier,
    /// Other receivable.
    #[sea_orm(string_value = "receivable_account")]
    ReceivableAccount,
    /// Other payable.
    #[sea_orm(string_value = "payable_account")]
    PayableAccount,
    /// Partner current account.
    #[sea_orm(string_value = "current_account")]
    CurrentAccount,
}

/// Invoice-like document kind (`invoice_kind`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "invoice_kind")]
pub enum InvoiceKind {
    /// Sales invoice.
    #[sea_orm(string_value = "sales_invoice")]
    SalesInvoice,
    /// Purchase invoice.
    #[sea_orm(string_value = "purchase_invoice")]
    PurchaseInvoice,
    /// Sales return.
    #[sea_orm(string_value = "sales_return")]
    SalesReturn,
    /// Purchase return.
    #[sea_orm(string_value = "purchase_return")]
    PurchaseReturn,
}

/// Cash voucher kind (`voucher_kind`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "voucher_kind")]
pub enum VoucherKind {
    /// Receipt voucher.
    #[sea_orm(string_value = "receipt")]
    Receipt,
    /// Payment voucher.
    #[sea_orm(string_value = "payment")]
    Payment,
}

/// Store movement kind (`store_movement_kind`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "store_movement_kind")]
pub enum StoreMovementKind {
    /// Goods received.
    #[sea_orm(string_value = "receipt")]
    Receipt,
    /// Goods issued.
    #[sea_orm(string_value = "issue")]
    Issue,
    /// Goods moved between stores.
    #[sea_orm(string_value = "transfer")]
    Transfer,
}
