//! Data-access seam of the aggregation engine.
//!
//! The engine reads ledger records exclusively through [`LedgerStore`]. The
//! Postgres implementation lives in `mizan-db`; [`memory::InMemoryLedgerStore`]
//! backs tests and local tooling.

pub mod memory;

use async_trait::async_trait;
use mizan_shared::types::CompanyId;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::ledger::{
    AccountKind, Company, DateWindow, ExpenseCode, ExpenseType, InternalTransfer, InvoiceAmount,
    InvoiceKind, InvoiceRecord, Item, MonetaryAccount, StoreItem, StoreMovement,
    StoreMovementKind, Voucher, VoucherKind,
};

pub use memory::InMemoryLedgerStore;

/// Errors raised by a ledger store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying query failed.
    #[error("Ledger query failed: {0}")]
    Query(String),

    /// A stored row could not be decoded into a ledger record.
    #[error("Malformed ledger record: {0}")]
    Decode(String),
}

/// Read-only access to a company's ledger records.
///
/// Every list query is scoped by company and returns records ordered by date
/// ascending. Missing rows are never an error: empty lists and zero sums are.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Looks up a company by ID.
    async fn company(&self, company: CompanyId) -> Result<Option<Company>, StoreError>;

    /// Lists the company's accounts of one kind.
    async fn accounts(
        &self,
        company: CompanyId,
        kind: AccountKind,
    ) -> Result<Vec<MonetaryAccount>, StoreError>;

    /// Lists invoice-like records of one kind dated inside `window`.
    async fn invoices(
        &self,
        company: CompanyId,
        kind: InvoiceKind,
        window: DateWindow,
    ) -> Result<Vec<InvoiceRecord>, StoreError>;

    /// Sums one numeric column over invoice-like records dated inside `window`.
    async fn sum_invoices(
        &self,
        company: CompanyId,
        kind: InvoiceKind,
        amount: InvoiceAmount,
        window: DateWindow,
    ) -> Result<Decimal, StoreError> {
        Ok(self
            .invoices(company, kind, window)
            .await?
            .iter()
            .map(|record| record.amount(amount))
            .sum())
    }

    /// Lists vouchers of one kind dated inside `window`.
    async fn vouchers(
        &self,
        company: CompanyId,
        kind: VoucherKind,
        window: DateWindow,
    ) -> Result<Vec<Voucher>, StoreError>;

    /// Lists internal transfers dated inside `window`.
    async fn transfers(
        &self,
        company: CompanyId,
        window: DateWindow,
    ) -> Result<Vec<InternalTransfer>, StoreError>;

    /// Lists the company's stocked items.
    async fn stocked_items(&self, company: CompanyId) -> Result<Vec<Item>, StoreError>;

    /// Lists per-store opening quantities of the company's items.
    async fn store_items(&self, company: CompanyId) -> Result<Vec<StoreItem>, StoreError>;

    /// Lists store movement vouchers of one kind dated inside `window`.
    async fn store_movements(
        &self,
        company: CompanyId,
        kind: StoreMovementKind,
        window: DateWindow,
    ) -> Result<Vec<StoreMovement>, StoreError>;

    /// Lists the company's expense types in registration order.
    async fn expense_types(&self, company: CompanyId) -> Result<Vec<ExpenseType>, StoreError>;

    /// Lists the company's expense codes.
    async fn expense_codes(&self, company: CompanyId) -> Result<Vec<ExpenseCode>, StoreError>;
}
