//! Tests for the Postgres ledger store against a mock connection.

use std::collections::BTreeMap;

use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
use mizan_core::ledger::{
    AccountKind, Channel, Counterparty, DateWindow, InvoiceAmount, InvoiceKind, PaymentMethod,
    VoucherKind,
};
use mizan_core::store::{LedgerStore, StoreError};
use mizan_shared::types::{CompanyId, ItemId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{DatabaseBackend, DbErr, EntityTrait, MockDatabase, QueryFilter, QueryTrait, Value};
use serde_json::json;
use uuid::Uuid;

use super::{SeaLedgerStore, window_condition};
use crate::entities::{
    companies, invoices, items, monetary_accounts, sea_orm_active_enums as db, store_items,
    vouchers,
};

fn riyadh_noon(y: i32, m: u32, d: u32) -> DateTimeWithTimeZone {
    FixedOffset::east_opt(3 * 3600)
        .unwrap()
        .with_ymd_and_hms(y, m, d, 12, 0, 0)
        .unwrap()
}

fn invoice_row(company: Uuid) -> invoices::Model {
    invoices::Model {
        id: Uuid::new_v4(),
        company_id: company,
        kind: db::InvoiceKind::SalesInvoice,
        posted_at: riyadh_noon(2024, 3, 1),
        party_id: None,
        payment_method: "cash".to_string(),
        payment_target_type: Some("bank".to_string()),
        payment_target_id: Some(Uuid::new_v4()),
        is_split: false,
        split_safe_id: None,
        split_cash_amount: None,
        split_bank_id: None,
        split_bank_amount: None,
        subtotal: dec!(100),
        discount: dec!(10),
        tax: dec!(13.5),
        net: dec!(103.5),
        lines: json!([{"code": "A1", "qty": "2", "price": "50"}]),
        created_at: riyadh_noon(2024, 3, 1),
    }
}

fn voucher_row(company: Uuid, entity_type: Option<&str>) -> vouchers::Model {
    vouchers::Model {
        id: Uuid::new_v4(),
        company_id: company,
        kind: db::VoucherKind::Payment,
        posted_at: riyadh_noon(2024, 3, 2),
        entity_type: entity_type.map(str::to_string),
        entity_id: Some(Uuid::new_v4()),
        expense_code_id: None,
        channel_type: Some("safe".to_string()),
        channel_id: Some(Uuid::new_v4()),
        amount: dec!(115),
        tax: dec!(15),
        created_at: riyadh_noon(2024, 3, 2),
    }
}

fn item_row(company: Uuid, code: &str, item_type: &str) -> items::Model {
    items::Model {
        id: Uuid::new_v4(),
        company_id: company,
        code: code.to_string(),
        name: format!("Item {code}"),
        item_type: item_type.to_string(),
        purchase_price: Some(dec!(12.5)),
        created_at: riyadh_noon(2024, 1, 1),
    }
}

fn march() -> DateWindow {
    DateWindow::period(
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
    )
}

#[tokio::test]
async fn test_company_row_maps_to_profile_fields() {
    let id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![companies::Model {
            id,
            name: "Gulf Traders".to_string(),
            currency: "KWD".to_string(),
            capital: dec!(250000),
            vat_enabled: true,
            vat_rate: dec!(15),
            created_at: riyadh_noon(2023, 1, 1),
        }]])
        .into_connection();
    let store = SeaLedgerStore::new(db);

    let company = store.company(CompanyId::from(id)).await.unwrap().unwrap();

    assert_eq!(company.currency, "KWD");
    assert_eq!(company.capital, dec!(250000));
}

#[tokio::test]
async fn test_missing_company_is_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<companies::Model>::new()])
        .into_connection();
    let store = SeaLedgerStore::new(db);

    assert!(store.company(CompanyId::new()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_accounts_keep_natural_opening_balance() {
    let company = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![monetary_accounts::Model {
            id: Uuid::new_v4(),
            company_id: company,
            kind: db::AccountKind::Supplier,
            code: "V-001".to_string(),
            name: "Main supplier".to_string(),
            opening_balance: dec!(900),
            created_at: riyadh_noon(2023, 1, 1),
        }]])
        .into_connection();
    let store = SeaLedgerStore::new(db);

    let accounts = store
        .accounts(CompanyId::from(company), AccountKind::Supplier)
        .await
        .unwrap();

    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].kind, AccountKind::Supplier);
    assert_eq!(accounts[0].opening_balance, dec!(900));
}

#[tokio::test]
async fn test_invoice_rows_decode_to_utc_records() {
    let company = Uuid::new_v4();
    let row = invoice_row(company);
    let bank = row.payment_target_id.unwrap();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row]])
        .into_connection();
    let store = SeaLedgerStore::new(db);

    let records = store
        .invoices(CompanyId::from(company), InvoiceKind::SalesInvoice, march())
        .await
        .unwrap();

    let record = &records[0];
    assert_eq!(record.date, Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap());
    assert_eq!(record.payment_method, PaymentMethod::Cash);
    assert_eq!(record.payment_target, Some(Channel::bank(bank.into())));
    assert_eq!(record.lines[0].item_code, "A1");
    assert_eq!(record.lines[0].quantity, dec!(2));
    assert_eq!(record.settlements(), vec![(Channel::bank(bank.into()), dec!(103.5))]);
}

#[tokio::test]
async fn test_split_invoice_settles_both_fragments() {
    let company = Uuid::new_v4();
    let safe = Uuid::new_v4();
    let bank = Uuid::new_v4();
    let row = invoices::Model {
        is_split: true,
        split_safe_id: Some(safe),
        split_cash_amount: Some(dec!(3.5)),
        split_bank_id: Some(bank),
        split_bank_amount: Some(dec!(100)),
        ..invoice_row(company)
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row]])
        .into_connection();
    let store = SeaLedgerStore::new(db);

    let records = store
        .invoices(CompanyId::from(company), InvoiceKind::SalesInvoice, march())
        .await
        .unwrap();

    assert_eq!(
        records[0].settlements(),
        vec![
            (Channel::safe(safe.into()), dec!(3.5)),
            (Channel::bank(bank.into()), dec!(100)),
        ]
    );
}

#[tokio::test]
async fn test_voucher_counterparty_and_channel() {
    let company = Uuid::new_v4();
    let expense = voucher_row(company, Some("expense_code"));
    let orphan = voucher_row(company, None);
    let expense_id = expense.entity_id.unwrap();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![expense, orphan]])
        .into_connection();
    let store = SeaLedgerStore::new(db);

    let vouchers = store
        .vouchers(CompanyId::from(company), VoucherKind::Payment, march())
        .await
        .unwrap();

    assert_eq!(vouchers[0].counterparty, Counterparty::ExpenseCode(expense_id.into()));
    assert_eq!(vouchers[0].recoverable_tax(), dec!(15));
    assert_eq!(vouchers[1].counterparty, Counterparty::Unassigned);
    assert_eq!(vouchers[1].recoverable_tax(), Decimal::ZERO);
    assert!(vouchers.iter().all(|v| v.channel.is_some()));
}

#[tokio::test]
async fn test_expense_type_voucher_uses_expense_code_column() {
    let company = Uuid::new_v4();
    let code = Uuid::new_v4();
    let mut row = voucher_row(company, Some("expense-Type"));
    row.expense_code_id = Some(code);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row]])
        .into_connection();
    let store = SeaLedgerStore::new(db);

    let vouchers = store
        .vouchers(CompanyId::from(company), VoucherKind::Payment, march())
        .await
        .unwrap();

    assert_eq!(vouchers[0].counterparty, Counterparty::ExpenseCode(code.into()));
    assert_eq!(vouchers[0].recoverable_tax(), dec!(15));
}

#[tokio::test]
async fn test_sum_invoices_reads_sql_total() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![BTreeMap::from([("total", Value::from(dec!(431.25)))])]])
        .into_connection();
    let store = SeaLedgerStore::new(db);

    let total = store
        .sum_invoices(CompanyId::new(), InvoiceKind::SalesInvoice, InvoiceAmount::Tax, march())
        .await
        .unwrap();

    assert_eq!(total, dec!(431.25));
    let log = format!("{:?}", store.into_inner().into_transaction_log());
    assert!(log.contains("SUM"), "{log}");
    assert!(log.contains("\"tax\""), "{log}");
}

#[tokio::test]
async fn test_sum_over_no_rows_is_zero() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![BTreeMap::from([(
            "total",
            Value::from(Option::<Decimal>::None),
        )])]])
        .into_connection();
    let store = SeaLedgerStore::new(db);

    let total = store
        .sum_invoices(CompanyId::new(), InvoiceKind::PurchaseReturn, InvoiceAmount::Net, march())
        .await
        .unwrap();

    assert_eq!(total, Decimal::ZERO);
}

#[tokio::test]
async fn test_stocked_items_skip_other_classifications() {
    let company = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            item_row(company, "A1", "STOCKED"),
            item_row(company, "B2", "SERVICE"),
            item_row(company, "C3", "stocked"),
        ]])
        .into_connection();
    let store = SeaLedgerStore::new(db);

    let items = store.stocked_items(CompanyId::from(company)).await.unwrap();

    let codes: Vec<&str> = items.iter().map(|i| i.code.as_str()).collect();
    assert_eq!(codes, ["A1", "C3"]);
}

#[tokio::test]
async fn test_store_items_without_company_items_is_empty() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
        .into_connection();
    let store = SeaLedgerStore::new(db);

    let rows = store.store_items(CompanyId::new()).await.unwrap();

    assert!(rows.is_empty());
    assert_eq!(store.into_inner().into_transaction_log().len(), 1);
}

#[tokio::test]
async fn test_store_items_are_scoped_through_company_items() {
    let item = Uuid::new_v4();
    let store_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![BTreeMap::from([("id", Value::from(item))])]])
        .append_query_results([vec![store_items::Model {
            id: Uuid::new_v4(),
            item_id: item,
            store_id,
            opening_quantity: dec!(40),
        }]])
        .into_connection();
    let store = SeaLedgerStore::new(db);

    let rows = store.store_items(CompanyId::new()).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].item_id, ItemId::from(item));
    assert_eq!(rows[0].opening_quantity, dec!(40));
}

#[tokio::test]
async fn test_query_failure_maps_to_store_error() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("connection reset".to_string())])
        .into_connection();
    let store = SeaLedgerStore::new(db);

    let result = store.expense_types(CompanyId::new()).await;

    assert!(matches!(
        result,
        Err(StoreError::Query(message)) if message.contains("connection reset")
    ));
}

#[tokio::test]
async fn test_malformed_lines_are_decode_errors() {
    let company = Uuid::new_v4();
    let row = invoices::Model {
        lines: json!({"code": "A1"}),
        ..invoice_row(company)
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row]])
        .into_connection();
    let store = SeaLedgerStore::new(db);

    let result = store
        .invoices(CompanyId::from(company), InvoiceKind::SalesInvoice, march())
        .await;

    assert!(matches!(result, Err(StoreError::Decode(_))));
}

#[test]
fn test_window_condition_bounds() {
    let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let sql = |window| {
        invoices::Entity::find()
            .filter(window_condition(invoices::Column::PostedAt, window))
            .build(DatabaseBackend::Postgres)
            .to_string()
    };

    let through = sql(DateWindow::through(day));
    assert!(through.contains("\"posted_at\" <="), "{through}");
    assert!(!through.contains(">="), "{through}");

    let before = sql(DateWindow::before(day));
    assert!(before.contains("\"posted_at\" <"), "{before}");
    assert!(!before.contains("<="), "{before}");

    let period = sql(DateWindow::period(day, day));
    assert!(period.contains("\"posted_at\" >="), "{period}");
    assert!(period.contains("\"posted_at\" <="), "{period}");

    let all = sql(DateWindow::all());
    assert!(!all.contains("posted_at\" <"), "{all}");
}
