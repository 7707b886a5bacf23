//! In-memory ledger store.

use std::collections::HashSet;

use async_trait::async_trait;
use mizan_shared::types::CompanyId;

use super::{LedgerStore, StoreError};
use crate::ledger::{
    AccountKind, Company, DateWindow, ExpenseCode, ExpenseType, InternalTransfer, InvoiceKind,
    InvoiceRecord, Item, ItemType, MonetaryAccount, StoreItem, StoreMovement, StoreMovementKind,
    Voucher, VoucherKind,
};

/// Ledger store holding every record in memory.
///
/// Records are loaded up front and never change while the store is shared, so
/// queries need no locking. Ties on equal dates keep insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedgerStore {
    companies: Vec<Company>,
    accounts: Vec<MonetaryAccount>,
    invoices: Vec<InvoiceRecord>,
    vouchers: Vec<Voucher>,
    transfers: Vec<InternalTransfer>,
    items: Vec<Item>,
    store_items: Vec<StoreItem>,
    movements: Vec<StoreMovement>,
    expense_types: Vec<ExpenseType>,
    expense_codes: Vec<ExpenseCode>,
}

impl InMemoryLedgerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a company.
    pub fn add_company(&mut self, company: Company) -> &mut Self {
        self.companies.push(company);
        self
    }

    /// Adds a monetary account.
    pub fn add_account(&mut self, account: MonetaryAccount) -> &mut Self {
        self.accounts.push(account);
        self
    }

    /// Adds an invoice-like record.
    pub fn add_invoice(&mut self, invoice: InvoiceRecord) -> &mut Self {
        self.invoices.push(invoice);
        self
    }

    /// Adds a receipt or payment voucher.
    pub fn add_voucher(&mut self, voucher: Voucher) -> &mut Self {
        self.vouchers.push(voucher);
        self
    }

    /// Adds an internal transfer.
    pub fn add_transfer(&mut self, transfer: InternalTransfer) -> &mut Self {
        self.transfers.push(transfer);
        self
    }

    /// Adds an inventory item.
    pub fn add_item(&mut self, item: Item) -> &mut Self {
        self.items.push(item);
        self
    }

    /// Adds a per-store opening quantity.
    pub fn add_store_item(&mut self, store_item: StoreItem) -> &mut Self {
        self.store_items.push(store_item);
        self
    }

    /// Adds a store movement voucher.
    pub fn add_movement(&mut self, movement: StoreMovement) -> &mut Self {
        self.movements.push(movement);
        self
    }

    /// Adds an expense type.
    pub fn add_expense_type(&mut self, expense_type: ExpenseType) -> &mut Self {
        self.expense_types.push(expense_type);
        self
    }

    /// Adds an expense code.
    pub fn add_expense_code(&mut self, expense_code: ExpenseCode) -> &mut Self {
        self.expense_codes.push(expense_code);
        self
    }
}

/// Filters dated records and returns them ordered by date (stable).
fn dated<T: Clone>(
    records: &[T],
    keep: impl Fn(&T) -> bool,
    date: impl Fn(&T) -> chrono::DateTime<chrono::Utc>,
    window: DateWindow,
) -> Vec<T> {
    let mut out: Vec<T> = records
        .iter()
        .filter(|record| keep(record) && window.contains(date(record)))
        .cloned()
        .collect();
    out.sort_by_key(|record| date(record));
    out
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn company(&self, company: CompanyId) -> Result<Option<Company>, StoreError> {
        Ok(self.companies.iter().find(|c| c.id == company).cloned())
    }

    async fn accounts(
        &self,
        company: CompanyId,
        kind: AccountKind,
    ) -> Result<Vec<MonetaryAccount>, StoreError> {
        Ok(self
            .accounts
            .iter()
            .filter(|a| a.company_id == company && a.kind == kind)
            .cloned()
            .collect())
    }

    async fn invoices(
        &self,
        company: CompanyId,
        kind: InvoiceKind,
        window: DateWindow,
    ) -> Result<Vec<InvoiceRecord>, StoreError> {
        Ok(dated(
            &self.invoices,
            |r| r.company_id == company && r.kind == kind,
            |r| r.date,
            window,
        ))
    }

    async fn vouchers(
        &self,
        company: CompanyId,
        kind: VoucherKind,
        window: DateWindow,
    ) -> Result<Vec<Voucher>, StoreError> {
        Ok(dated(
            &self.vouchers,
            |v| v.company_id == company && v.kind == kind,
            |v| v.date,
            window,
        ))
    }

    async fn transfers(
        &self,
        company: CompanyId,
        window: DateWindow,
    ) -> Result<Vec<InternalTransfer>, StoreError> {
        Ok(dated(
            &self.transfers,
            |t| t.company_id == company,
            |t| t.date,
            window,
        ))
    }

    async fn stocked_items(&self, company: CompanyId) -> Result<Vec<Item>, StoreError> {
        Ok(self
            .items
            .iter()
            .filter(|i| i.company_id == company && i.item_type == ItemType::Stocked)
            .cloned()
            .collect())
    }

    async fn store_items(&self, company: CompanyId) -> Result<Vec<StoreItem>, StoreError> {
        let owned: HashSet<_> = self
            .items
            .iter()
            .filter(|i| i.company_id == company)
            .map(|i| i.id)
            .collect();
        Ok(self
            .store_items
            .iter()
            .filter(|s| owned.contains(&s.item_id))
            .cloned()
            .collect())
    }

    async fn store_movements(
        &self,
        company: CompanyId,
        kind: StoreMovementKind,
        window: DateWindow,
    ) -> Result<Vec<StoreMovement>, StoreError> {
        Ok(dated(
            &self.movements,
            |m| m.company_id == company && m.kind == kind,
            |m| m.date,
            window,
        ))
    }

    async fn expense_types(&self, company: CompanyId) -> Result<Vec<ExpenseType>, StoreError> {
        Ok(self
            .expense_types
            .iter()
            .filter(|t| t.company_id == company)
            .cloned()
            .collect())
    }

    async fn expense_codes(&self, company: CompanyId) -> Result<Vec<ExpenseCode>, StoreError> {
        Ok(self
            .expense_codes
            .iter()
            .filter(|c| c.company_id == company)
            .cloned()
            .collect())
    }
}
