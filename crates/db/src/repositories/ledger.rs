//! Postgres-backed ledger store.
//!
//! Implements [`LedgerStore`] over the ledger tables. Every list is scoped by
//! company, filtered by the requested date window and ordered by posting date
//! (ties by ID) so replays are deterministic.

use async_trait::async_trait;
use mizan_core::ledger::{
    AccountKind, Company, DateWindow, ExpenseCode, ExpenseType, InternalTransfer, InvoiceAmount,
    InvoiceKind, InvoiceRecord, Item, ItemType, MonetaryAccount, StoreItem, StoreMovement,
    StoreMovementKind, UpperBound, Voucher, VoucherKind,
};
use mizan_core::store::{LedgerStore, StoreError};
use mizan_shared::types::CompanyId;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityName, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
};
use uuid::Uuid;

use super::ledger_rows::{self as rows, query_error};
use crate::entities::{
    companies, expense_codes, expense_types, internal_transfers, invoices, items,
    monetary_accounts, sea_orm_active_enums as db, store_items, store_movements, vouchers,
};

/// Ledger store reading the Postgres ledger tables.
#[derive(Debug)]
pub struct SeaLedgerStore {
    db: DatabaseConnection,
}

impl SeaLedgerStore {
    /// Creates a new ledger store.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the underlying connection.
    #[must_use]
    pub fn into_inner(self) -> DatabaseConnection {
        self.db
    }

    /// Runs `select` and decodes every row.
    async fn fetch<E, T, F>(&self, select: Select<E>, decode: F) -> Result<Vec<T>, StoreError>
    where
        E: EntityTrait,
        F: Fn(E::Model) -> Result<T, StoreError>,
    {
        let rows = select.all(&self.db).await.map_err(query_error)?;
        tracing::trace!(
            table = E::default().table_name(),
            rows = rows.len(),
            "ledger rows loaded"
        );
        rows.into_iter().map(decode).collect()
    }
}

/// Restricts `column` to the timestamps inside `window`.
pub fn window_condition<C: ColumnTrait>(column: C, window: DateWindow) -> Condition {
    let mut condition = Condition::all();
    if let Some(from) = window.from {
        condition = condition.add(column.gte(from));
    }
    match window.to {
        UpperBound::Through(until) => condition.add(column.lte(until)),
        UpperBound::Before(until) => condition.add(column.lt(until)),
        UpperBound::Open => condition,
    }
}

fn invoice_column(amount: InvoiceAmount) -> invoices::Column {
    match amount {
        InvoiceAmount::Subtotal => invoices::Column::Subtotal,
        InvoiceAmount::Discount => invoices::Column::Discount,
        InvoiceAmount::Tax => invoices::Column::Tax,
        InvoiceAmount::Net => invoices::Column::Net,
    }
}

fn company_invoices(
    company: CompanyId,
    kind: InvoiceKind,
    window: DateWindow,
) -> Select<invoices::Entity> {
    invoices::Entity::find()
        .filter(invoices::Column::CompanyId.eq(company.into_inner()))
        .filter(invoices::Column::Kind.eq(db::InvoiceKind::from(kind)))
        .filter(window_condition(invoices::Column::PostedAt, window))
}

#[async_trait]
impl LedgerStore for SeaLedgerStore {
    async fn company(&self, company: CompanyId) -> Result<Option<Company>, StoreError> {
        let row = companies::Entity::find_by_id(company.into_inner())
            .one(&self.db)
            .await
            .map_err(query_error)?;
        Ok(row.map(rows::company))
    }

    async fn accounts(
        &self,
        company: CompanyId,
        kind: AccountKind,
    ) -> Result<Vec<MonetaryAccount>, StoreError> {
        let select = monetary_accounts::Entity::find()
            .filter(monetary_accounts::Column::CompanyId.eq(company.into_inner()))
            .filter(monetary_accounts::Column::Kind.eq(db::AccountKind::from(kind)))
            .order_by_asc(monetary_accounts::Column::Code)
            .order_by_asc(monetary_accounts::Column::Id);
        self.fetch(select, |row| Ok(rows::account(row))).await
    }

    async fn invoices(
        &self,
        company: CompanyId,
        kind: InvoiceKind,
        window: DateWindow,
    ) -> Result<Vec<InvoiceRecord>, StoreError> {
        let select = company_invoices(company, kind, window)
            .order_by_asc(invoices::Column::PostedAt)
            .order_by_asc(invoices::Column::Id);
        self.fetch(select, rows::invoice).await
    }

    async fn sum_invoices(
        &self,
        company: CompanyId,
        kind: InvoiceKind,
        amount: InvoiceAmount,
        window: DateWindow,
    ) -> Result<Decimal, StoreError> {
        let total: Option<Option<Decimal>> = company_invoices(company, kind, window)
            .select_only()
            .column_as(invoice_column(amount).sum(), "total")
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(query_error)?;
        Ok(total.flatten().unwrap_or_default())
    }

    async fn vouchers(
        &self,
        company: CompanyId,
        kind: VoucherKind,
        window: DateWindow,
    ) -> Result<Vec<Voucher>, StoreError> {
        let select = vouchers::Entity::find()
            .filter(vouchers::Column::CompanyId.eq(company.into_inner()))
            .filter(vouchers::Column::Kind.eq(db::VoucherKind::from(kind)))
            .filter(window_condition(vouchers::Column::PostedAt, window))
            .order_by_asc(vouchers::Column::PostedAt)
            .order_by_asc(vouchers::Column::Id);
        self.fetch(select, rows::voucher).await
    }

    async fn transfers(
        &self,
        company: CompanyId,
        window: DateWindow,
    ) -> Result<Vec<InternalTransfer>, StoreError> {
        let select = internal_transfers::Entity::find()
            .filter(internal_transfers::Column::CompanyId.eq(company.into_inner()))
            .filter(window_condition(internal_transfers::Column::PostedAt, window))
            .order_by_asc(internal_transfers::Column::PostedAt)
            .order_by_asc(internal_transfers::Column::Id);
        self.fetch(select, rows::transfer).await
    }

    async fn stocked_items(&self, company: CompanyId) -> Result<Vec<Item>, StoreError> {
        // Legacy rows spell the classification in mixed case.
        let select = items::Entity::find()
            .filter(items::Column::CompanyId.eq(company.into_inner()))
            .order_by_asc(items::Column::Code);
        let mut items = self.fetch(select, |row| Ok(rows::item(row))).await?;
        items.retain(|item| item.item_type == ItemType::Stocked);
        Ok(items)
    }

    async fn store_items(&self, company: CompanyId) -> Result<Vec<StoreItem>, StoreError> {
        let item_ids: Vec<Uuid> = items::Entity::find()
            .filter(items::Column::CompanyId.eq(company.into_inner()))
            .select_only()
            .column(items::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(query_error)?;

        if item_ids.is_empty() {
            return Ok(vec![]);
        }

        let select = store_items::Entity::find()
            .filter(store_items::Column::ItemId.is_in(item_ids))
            .order_by_asc(store_items::Column::ItemId)
            .order_by_asc(store_items::Column::StoreId);
        self.fetch(select, |row| Ok(rows::store_item(row))).await
    }

    async fn store_movements(
        &self,
        company: CompanyId,
        kind: StoreMovementKind,
        window: DateWindow,
    ) -> Result<Vec<StoreMovement>, StoreError> {
        let select = store_movements::Entity::find()
            .filter(store_movements::Column::CompanyId.eq(company.into_inner()))
            .filter(store_movements::Column::Kind.eq(db::StoreMovementKind::from(kind)))
            .filter(window_condition(store_movements::Column::PostedAt, window))
            .order_by_asc(store_movements::Column::PostedAt)
            .order_by_asc(store_movements::Column::Id);
        self.fetch(select, rows::store_movement).await
    }

    async fn expense_types(&self, company: CompanyId) -> Result<Vec<ExpenseType>, StoreError> {
        let select = expense_types::Entity::find()
            .filter(expense_types::Column::CompanyId.eq(company.into_inner()))
            .order_by_asc(expense_types::Column::CreatedAt)
            .order_by_asc(expense_types::Column::Id);
        self.fetch(select, |row| Ok(rows::expense_type(row))).await
    }

    async fn expense_codes(&self, company: CompanyId) -> Result<Vec<ExpenseCode>, StoreError> {
        let select = expense_codes::Entity::find()
            .filter(expense_codes::Column::CompanyId.eq(company.into_inner()))
            .order_by_asc(expense_codes::Column::Code);
        self.fetch(select, |row| Ok(rows::expense_code(row))).await
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
