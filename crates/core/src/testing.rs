//! Ledger fixtures shared by the engine's unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use mizan_shared::types::{
    AccountId, CompanyId, ExpenseCodeId, ExpenseTypeId, ItemId, RecordId, StoreId,
};
use rust_decimal::Decimal;

use crate::ledger::{
    AccountKind, Channel, Company, Counterparty, DateWindow, ExpenseCode, ExpenseType,
    InternalTransfer, InvoiceKind, InvoiceLine, InvoiceRecord, Item, ItemType, MonetaryAccount,
    MovementLine, PaymentMethod, SplitPayment, StoreItem, StoreMovement, StoreMovementKind,
    Voucher, VoucherKind,
};
use crate::store::{InMemoryLedgerStore, LedgerStore, StoreError};

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

pub fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    at(y, m, d, 12, 0, 0)
}

/// One company's ledger under construction.
pub struct Fixture {
    pub company: CompanyId,
    pub store_id: StoreId,
    pub store: InMemoryLedgerStore,
}

impl Fixture {
    /// A company with the given capital, reporting in USD.
    pub fn new(capital: Decimal) -> Self {
        let mut fixture = Self::without_company();
        fixture.store.add_company(Company {
            id: fixture.company,
            name: "Acme Trading".to_string(),
            currency: "USD".to_string(),
            capital,
            vat_enabled: true,
            vat_rate: Decimal::new(15, 2),
        });
        fixture
    }

    /// A ledger whose company row is missing.
    pub fn without_company() -> Self {
        Self {
            company: CompanyId::new(),
            store_id: StoreId::new(),
            store: InMemoryLedgerStore::new(),
        }
    }

    pub fn account(&mut self, kind: AccountKind, code: &str, opening: Decimal) -> AccountId {
        let id = AccountId::new();
        self.store.add_account(MonetaryAccount {
            id,
            company_id: self.company,
            kind,
            code: code.to_string(),
            name: format!("{kind} {code}"),
            opening_balance: opening,
        });
        id
    }

    pub fn item(&mut self, code: &str, fallback: Option<Decimal>, opening: Decimal) -> ItemId {
        let id = ItemId::new();
        self.store.add_item(Item {
            id,
            company_id: self.company,
            code: code.to_string(),
            name: format!("Item {code}"),
            item_type: ItemType::Stocked,
            purchase_price: fallback,
        });
        self.store.add_store_item(StoreItem {
            item_id: id,
            store_id: self.store_id,
            opening_quantity: opening,
        });
        id
    }

    pub fn service_item(&mut self, code: &str) -> ItemId {
        let id = ItemId::new();
        self.store.add_item(Item {
            id,
            company_id: self.company,
            code: code.to_string(),
            name: format!("Service {code}"),
            item_type: ItemType::NonStocked,
            purchase_price: Some(Decimal::ONE_HUNDRED),
        });
        id
    }

    pub fn expense_type(&mut self, name: &str) -> ExpenseTypeId {
        let id = ExpenseTypeId::new();
        self.store.add_expense_type(ExpenseType {
            id,
            company_id: self.company,
            name: name.to_string(),
        });
        id
    }

    pub fn expense_code(
        &mut self,
        expense_type: Option<ExpenseTypeId>,
        code: &str,
    ) -> ExpenseCodeId {
        let id = ExpenseCodeId::new();
        self.store.add_expense_code(ExpenseCode {
            id,
            company_id: self.company,
            expense_type_id: expense_type,
            code: code.to_string(),
            name: format!("Expense {code}"),
        });
        id
    }

    #[allow(clippy::too_many_arguments)]
    fn invoice(
        &mut self,
        kind: InvoiceKind,
        date: DateTime<Utc>,
        party: Option<AccountId>,
        payment_method: PaymentMethod,
        payment_target: Option<Channel>,
        split: Option<SplitPayment>,
        amounts: (Decimal, Decimal, Decimal),
        lines: &[(&str, Decimal, Decimal)],
    ) -> RecordId {
        let (subtotal, discount, tax) = amounts;
        let id = RecordId::new();
        self.store.add_invoice(InvoiceRecord {
            id,
            company_id: self.company,
            kind,
            date,
            party_id: party,
            payment_method,
            payment_target,
            split,
            subtotal,
            discount,
            tax,
            net: subtotal - discount + tax,
            lines: lines
                .iter()
                .map(|(code, quantity, unit_price)| InvoiceLine {
                    item_code: (*code).to_string(),
                    quantity: *quantity,
                    unit_price: *unit_price,
                })
                .collect(),
        });
        id
    }

    /// Cash document settled through `channel`; amounts are (subtotal, discount, tax).
    pub fn cash_invoice(
        &mut self,
        kind: InvoiceKind,
        date: DateTime<Utc>,
        channel: Channel,
        amounts: (Decimal, Decimal, Decimal),
        lines: &[(&str, Decimal, Decimal)],
    ) -> RecordId {
        self.invoice(
            kind,
            date,
            None,
            PaymentMethod::Cash,
            Some(channel),
            None,
            amounts,
            lines,
        )
    }

    /// Credit document charged to `party`; amounts are (subtotal, discount, tax).
    pub fn credit_invoice(
        &mut self,
        kind: InvoiceKind,
        date: DateTime<Utc>,
        party: AccountId,
        amounts: (Decimal, Decimal, Decimal),
        lines: &[(&str, Decimal, Decimal)],
    ) -> RecordId {
        self.invoice(
            kind,
            date,
            Some(party),
            PaymentMethod::Credit,
            None,
            None,
            amounts,
            lines,
        )
    }

    /// Split cash document; the two fragments must add up to the net amount.
    #[allow(clippy::too_many_arguments)]
    pub fn split_invoice(
        &mut self,
        kind: InvoiceKind,
        date: DateTime<Utc>,
        safe: AccountId,
        cash_amount: Decimal,
        bank: AccountId,
        bank_amount: Decimal,
        amounts: (Decimal, Decimal, Decimal),
        lines: &[(&str, Decimal, Decimal)],
    ) -> RecordId {
        self.invoice(
            kind,
            date,
            None,
            PaymentMethod::Cash,
            Some(Channel::safe(safe)),
            Some(SplitPayment {
                safe_id: Some(safe),
                cash_amount,
                bank_id: Some(bank),
                bank_amount,
            }),
            amounts,
            lines,
        )
    }

    pub fn voucher(
        &mut self,
        kind: VoucherKind,
        date: DateTime<Utc>,
        counterparty: Counterparty,
        channel: Channel,
        amount: Decimal,
        tax: Decimal,
    ) -> RecordId {
        let id = RecordId::new();
        self.store.add_voucher(Voucher {
            id,
            company_id: self.company,
            kind,
            date,
            counterparty,
            channel: Some(channel),
            amount,
            tax,
        });
        id
    }

    pub fn transfer(
        &mut self,
        date: DateTime<Utc>,
        from: Channel,
        to: Channel,
        amount: Decimal,
    ) -> RecordId {
        let id = RecordId::new();
        self.store.add_transfer(InternalTransfer {
            id,
            company_id: self.company,
            date,
            from: Some(from),
            to: Some(to),
            amount,
        });
        id
    }

    pub fn movement(
        &mut self,
        kind: StoreMovementKind,
        date: DateTime<Utc>,
        stores: (Option<StoreId>, Option<StoreId>),
        lines: &[(ItemId, Decimal)],
    ) -> RecordId {
        let id = RecordId::new();
        self.store.add_movement(StoreMovement {
            id,
            company_id: self.company,
            kind,
            date,
            from_store: stores.0,
            to_store: stores.1,
            lines: lines
                .iter()
                .map(|(item_id, quantity)| MovementLine {
                    item_id: *item_id,
                    quantity: *quantity,
                })
                .collect(),
        });
        id
    }

    pub fn shared(self) -> Arc<InMemoryLedgerStore> {
        Arc::new(self.store)
    }
}

/// Store whose every read fails.
pub struct FailingStore;

fn failure<T>() -> Result<T, StoreError> {
    Err(StoreError::Query("connection reset".to_string()))
}

#[async_trait]
impl LedgerStore for FailingStore {
    async fn company(&self, _: CompanyId) -> Result<Option<Company>, StoreError> {
        failure()
    }

    async fn accounts(
        &self,
        _: CompanyId,
        _: AccountKind,
    ) -> Result<Vec<MonetaryAccount>, StoreError> {
        failure()
    }

    async fn invoices(
        &self,
        _: CompanyId,
        _: InvoiceKind,
        _: DateWindow,
    ) -> Result<Vec<InvoiceRecord>, StoreError> {
        failure()
    }

    async fn vouchers(
        &self,
        _: CompanyId,
        _: VoucherKind,
        _: DateWindow,
    ) -> Result<Vec<Voucher>, StoreError> {
        failure()
    }

    async fn transfers(
        &self,
        _: CompanyId,
        _: DateWindow,
    ) -> Result<Vec<InternalTransfer>, StoreError> {
        failure()
    }

    async fn stocked_items(&self, _: CompanyId) -> Result<Vec<Item>, StoreError> {
        failure()
    }

    async fn store_items(&self, _: CompanyId) -> Result<Vec<StoreItem>, StoreError> {
        failure()
    }

    async fn store_movements(
        &self,
        _: CompanyId,
        _: StoreMovementKind,
        _: DateWindow,
    ) -> Result<Vec<StoreMovement>, StoreError> {
        failure()
    }

    async fn expense_types(&self, _: CompanyId) -> Result<Vec<ExpenseType>, StoreError> {
        failure()
    }

    async fn expense_codes(&self, _: CompanyId) -> Result<Vec<ExpenseCode>, StoreError> {
        failure()
    }
}
