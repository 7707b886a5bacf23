//! Decoding of ledger rows into engine records.
//!
//! Rows written by older clients use loose spellings for polymorphic type
//! columns and JSON line keys; decoding accepts the known aliases and rejects
//! anything else as [`StoreError::Decode`].

use chrono::{DateTime, FixedOffset, Utc};
use mizan_core::ledger::{
    self, Channel, ChannelKind, Company, Counterparty, ExpenseCode, ExpenseType,
    InternalTransfer, InvoiceLine, InvoiceRecord, Item, ItemType, MonetaryAccount, MovementLine,
    PaymentMethod, SplitPayment, StoreItem, StoreMovement, Voucher,
};
use mizan_core::store::StoreError;
use rust_decimal::Decimal;
use sea_orm::DbErr;
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::{
    companies, expense_codes, expense_types, internal_transfers, invoices, items,
    monetary_accounts, sea_orm_active_enums as db, store_items, store_movements, vouchers,
};

/// Maps a database failure to a store failure.
pub(crate) fn query_error(err: DbErr) -> StoreError {
    StoreError::Query(err.to_string())
}

fn utc(at: DateTime<FixedOffset>) -> DateTime<Utc> {
    at.with_timezone(&Utc)
}

impl From<ledger::AccountKind> for db::AccountKind {
    fn from(kind: ledger::AccountKind) -> Self {
        match kind {
            ledger::AccountKind::Safe => Self::Safe,
            ledger::AccountKind::Bank => Self::Bank,
            ledger::AccountKind::Customer => Self::Customer,
            ledger::AccountKind::Supplier => Self::Supplier,
            ledger::AccountKind::ReceivableAccount => Self::ReceivableAccount,
            ledger::AccountKind::PayableAccount => Self::PayableAccount,
            ledger::AccountKind::CurrentAccount => Self::CurrentAccount,
        }
    }
}

impl From<db::AccountKind> for ledger::AccountKind {
    fn from(kind: db::AccountKind) -> Self {
        match kind {
            db::AccountKind::Safe => Self::Safe,
            db::AccountKind::Bank => Self::Bank,
            db::AccountKind::Customer => Self::Customer,
            db::AccountKind::Supplier => Self::Supplier,
            db::AccountKind::ReceivableAccount => Self::ReceivableAccount,
            db::AccountKind::PayableAccount => Self::PayableAccount,
            db::AccountKind::CurrentAccount => Self::CurrentAccount,
        }
    }
}

impl From<ledger::InvoiceKind> for db::InvoiceKind {
    fn from(kind: ledger::InvoiceKind) -> Self {
        match kind {
            ledger::InvoiceKind::SalesInvoice => Self::SalesInvoice,
            ledger::InvoiceKind::PurchaseInvoice => Self::PurchaseInvoice,
            ledger::InvoiceKind::SalesReturn => Self::SalesReturn,
            ledger::InvoiceKind::PurchaseReturn => Self::PurchaseReturn,
        }
    }
}

impl From<db::InvoiceKind> for ledger::InvoiceKind {
    fn from(kind: db::InvoiceKind) -> Self {
        match kind {
            db::InvoiceKind::SalesInvoice => Self::SalesInvoice,
            db::InvoiceKind::PurchaseInvoice => Self::PurchaseInvoice,
            db::InvoiceKind::SalesReturn => Self::SalesReturn,
            db::InvoiceKind::PurchaseReturn => Self::PurchaseReturn,
        }
    }
}

impl From<ledger::VoucherKind> for db::VoucherKind {
    fn from(kind: ledger::VoucherKind) -> Self {
        match kind {
            ledger::VoucherKind::Receipt => Self::Receipt,
            ledger::VoucherKind::Payment => Self::Payment,
        }
    }
}

impl From<db::VoucherKind> for ledger::VoucherKind {
    fn from(kind: db::VoucherKind) -> Self {
        match kind {
            db::VoucherKind::Receipt => Self::Receipt,
            db::VoucherKind::Payment => Self::Payment,
        }
    }
}

impl From<ledger::StoreMovementKind> for db::StoreMovementKind {
    fn from(kind: ledger::StoreMovementKind) -> Self {
        match kind {
            ledger::StoreMovementKind::Receipt => Self::Receipt,
            ledger::StoreMovementKind::Issue => Self::Issue,
            ledger::StoreMovementKind::Transfer => Self::Transfer,
        }
    }
}

impl From<db::StoreMovementKind> for ledger::StoreMovementKind {
    fn from(kind: db::StoreMovementKind) -> Self {
        match kind {
            db::StoreMovementKind::Receipt => Self::Receipt,
            db::StoreMovementKind::Issue => Self::Issue,
            db::StoreMovementKind::Transfer => Self::Transfer,
        }
    }
}

/// Decodes a `(type, id)` column pair into a safe or bank reference.
///
/// A missing half means the record does not settle through a channel.
pub fn channel(kind: Option<&str>, id: Option<Uuid>) -> Result<Option<Channel>, StoreError> {
    let (Some(kind), Some(id)) = (kind, id) else {
        return Ok(None);
    };
    let kind: ChannelKind = kind.parse().map_err(StoreError::Decode)?;
    Ok(Some(Channel {
        kind,
        id: id.into(),
    }))
}

/// Decodes a voucher's polymorphic counterparty.
///
/// Expense vouchers resolve to their expense code, preferring the dedicated
/// `expense_code_id` column over `entity_id`. Missing or unrecognised
/// references decode to [`Counterparty::Unassigned`].
pub fn counterparty(
    entity_type: Option<&str>,
    entity_id: Option<Uuid>,
    expense_code_id: Option<Uuid>,
) -> Counterparty {
    let Some(entity_type) = entity_type else {
        return Counterparty::Unassigned;
    };
    let entity_type = entity_type.trim().to_lowercase().replace('-', "_");

    if matches!(
        entity_type.as_str(),
        "expense" | "expenses" | "expense_type" | "expense_types" | "expense_code" | "expense_codes"
    ) {
        return expense_code_id
            .or(entity_id)
            .map_or(Counterparty::Unassigned, |id| Counterparty::ExpenseCode(id.into()));
    }

    let Some(id) = entity_id else {
        return Counterparty::Unassigned;
    };
    match entity_type.as_str() {
        "customer" | "customers" => Counterparty::Customer(id.into()),
        "supplier" | "suppliers" | "vendor" => Counterparty::Supplier(id.into()),
        "current_account" | "current_accounts" | "partner" => {
            Counterparty::CurrentAccount(id.into())
        }
        "receivable" | "receivable_account" | "receivable_accounts" => {
            Counterparty::Receivable(id.into())
        }
        "payable" | "payable_account" | "payable_accounts" => Counterparty::Payable(id.into()),
        "revenue" | "revenue_code" | "revenue_codes" => Counterparty::RevenueCode(id.into()),
        _ => Counterparty::Unassigned,
    }
}

#[derive(Debug, Deserialize)]
struct RawInvoiceLine {
    #[serde(alias = "code", alias = "itemCode")]
    item_code: String,
    #[serde(alias = "qty")]
    quantity: Decimal,
    #[serde(alias = "price", alias = "unitPrice")]
    unit_price: Decimal,
}

#[derive(Debug, Deserialize)]
struct RawMovementLine {
    #[serde(alias = "itemId")]
    item_id: Uuid,
    #[serde(alias = "qty")]
    quantity: Decimal,
}

/// Decodes the JSON line array of an invoice.
pub fn invoice_lines(lines: &serde_json::Value) -> Result<Vec<InvoiceLine>, StoreError> {
    if lines.is_null() {
        return Ok(Vec::new());
    }
    let raw = Vec::<RawInvoiceLine>::deserialize(lines)
        .map_err(|e| StoreError::Decode(format!("invoice lines: {e}")))?;
    Ok(raw
        .into_iter()
        .map(|line| InvoiceLine {
            item_code: line.item_code,
            quantity: line.quantity,
            unit_price: line.unit_price,
        })
        .collect())
}

/// Decodes the JSON line array of a store movement.
pub fn movement_lines(lines: &serde_json::Value) -> Result<Vec<MovementLine>, StoreError> {
    if lines.is_null() {
        return Ok(Vec::new());
    }
    let raw = Vec::<RawMovementLine>::deserialize(lines)
        .map_err(|e| StoreError::Decode(format!("movement lines: {e}")))?;
    Ok(raw
        .into_iter()
        .map(|line| MovementLine {
            item_id: line.item_id.into(),
            quantity: line.quantity,
        })
        .collect())
}

/// Decodes an item classification; anything but `STOCKED` is not stock.
pub fn item_type(raw: &str) -> ItemType {
    if raw.trim().eq_ignore_ascii_case("stocked") {
        ItemType::Stocked
    } else {
        ItemType::NonStocked
    }
}

pub(crate) fn company(row: companies::Model) -> Company {
    Company {
        id: row.id.into(),
        name: row.name,
        currency: row.currency,
        capital: row.capital,
        vat_enabled: row.vat_enabled,
        vat_rate: row.vat_rate,
    }
}

pub(crate) fn account(row: monetary_accounts::Model) -> MonetaryAccount {
    MonetaryAccount {
        id: row.id.into(),
        company_id: row.company_id.into(),
        kind: row.kind.into(),
        code: row.code,
        name: row.name,
        opening_balance: row.opening_balance,
    }
}

pub(crate) fn invoice(row: invoices::Model) -> Result<InvoiceRecord, StoreError> {
    let payment_method: PaymentMethod = row
        .payment_method
        .parse()
        .map_err(|e| StoreError::Decode(format!("invoice {}: {e}", row.id)))?;
    let split = row.is_split.then(|| SplitPayment {
        safe_id: row.split_safe_id.map(Into::into),
        cash_amount: row.split_cash_amount.unwrap_or_default(),
        bank_id: row.split_bank_id.map(Into::into),
        bank_amount: row.split_bank_amount.unwrap_or_default(),
    });

    Ok(InvoiceRecord {
        id: row.id.into(),
        company_id: row.company_id.into(),
        kind: row.kind.into(),
        date: utc(row.posted_at),
        party_id: row.party_id.map(Into::into),
        payment_method,
        payment_target: channel(row.payment_target_type.as_deref(), row.payment_target_id)?,
        split,
        subtotal: row.subtotal,
        discount: row.discount,
        tax: row.tax,
        net: row.net,
        lines: invoice_lines(&row.lines)?,
    })
}

pub(crate) fn voucher(row: vouchers::Model) -> Result<Voucher, StoreError> {
    Ok(Voucher {
        id: row.id.into(),
        company_id: row.company_id.into(),
        kind: row.kind.into(),
        date: utc(row.posted_at),
        counterparty: counterparty(
            row.entity_type.as_deref(),
            row.entity_id,
            row.expense_code_id,
        ),
        channel: channel(row.channel_type.as_deref(), row.channel_id)?,
        amount: row.amount,
        tax: row.tax,
    })
}

pub(crate) fn transfer(row: internal_transfers::Model) -> Result<InternalTransfer, StoreError> {
    Ok(InternalTransfer {
        id: row.id.into(),
        company_id: row.company_id.into(),
        date: utc(row.posted_at),
        from: channel(row.from_type.as_deref(), row.from_id)?,
        to: channel(row.to_type.as_deref(), row.to_id)?,
        amount: row.amount,
    })
}

pub(crate) fn item(row: items::Model) -> Item {
    Item {
        id: row.id.into(),
        company_id: row.company_id.into(),
        code: row.code,
        name: row.name,
        item_type: item_type(&row.item_type),
        purchase_price: row.purchase_price,
    }
}

pub(crate) fn store_item(row: store_items::Model) -> StoreItem {
    StoreItem {
        item_id: row.item_id.into(),
        store_id: row.store_id.into(),
        opening_quantity: row.opening_quantity,
    }
}

pub(crate) fn store_movement(row: store_movements::Model) -> Result<StoreMovement, StoreError> {
    Ok(StoreMovement {
        id: row.id.into(),
        company_id: row.company_id.into(),
        kind: row.kind.into(),
        date: utc(row.posted_at),
        from_store: row.from_store_id.map(Into::into),
        to_store: row.to_store_id.map(Into::into),
        lines: movement_lines(&row.lines)?,
    })
}

pub(crate) fn expense_type(row: expense_types::Model) -> ExpenseType {
    ExpenseType {
        id: row.id.into(),
        company_id: row.company_id.into(),
        name: row.name,
    }
}

pub(crate) fn expense_code(row: expense_codes::Model) -> ExpenseCode {
    ExpenseCode {
        id: row.id.into(),
        company_id: row.company_id.into(),
        expense_type_id: row.expense_type_id.map(Into::into),
        code: row.code,
        name: row.name,
    }
}
