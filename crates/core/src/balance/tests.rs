//! Account balance tests.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{AccountBalanceCalculator, Flow, VatCalculator};
use crate::ledger::{
    AccountKind, Channel, Counterparty, DateWindow, InvoiceKind, VoucherKind,
};
use crate::testing::{FailingStore, Fixture, at, day, noon};
use mizan_shared::types::{CompanyId, ExpenseCodeId};

const NO_LINES: &[(&str, Decimal, Decimal)] = &[];

#[tokio::test]
async fn test_safe_opening_period_and_closing() {
    let mut ledger = Fixture::new(Decimal::ZERO);
    let safe = ledger.account(AccountKind::Safe, "S1", dec!(1000));
    let customer = ledger.account(AccountKind::Customer, "C1", Decimal::ZERO);
    ledger.voucher(
        VoucherKind::Receipt,
        noon(2024, 1, 15),
        Counterparty::Customer(customer),
        Channel::safe(safe),
        dec!(500),
        Decimal::ZERO,
    );
    ledger.voucher(
        VoucherKind::Payment,
        noon(2024, 2, 10),
        Counterparty::Unassigned,
        Channel::safe(safe),
        dec!(200),
        Decimal::ZERO,
    );
    let company = ledger.company;
    let store = ledger.shared();

    let movements = AccountBalanceCalculator::new(store.as_ref())
        .compute_kind(company, AccountKind::Safe, day(2024, 2, 1), day(2024, 2, 29))
        .await
        .unwrap();

    assert_eq!(movements.len(), 1);
    let safe_movement = &movements[0];
    assert_eq!(safe_movement.opening, dec!(1500));
    assert_eq!(safe_movement.period_debit, Decimal::ZERO);
    assert_eq!(safe_movement.period_credit, dec!(200));
    assert_eq!(safe_movement.closing, dec!(1300));
}

#[tokio::test]
async fn test_start_and_end_day_boundaries() {
    let mut ledger = Fixture::new(Decimal::ZERO);
    let bank = ledger.account(AccountKind::Bank, "B1", Decimal::ZERO);
    let receive = |ledger: &mut Fixture, date, amount| {
        ledger.voucher(
            VoucherKind::Receipt,
            date,
            Counterparty::Unassigned,
            Channel::bank(bank),
            amount,
            Decimal::ZERO,
        );
    };
    receive(&mut ledger, at(2024, 2, 29, 23, 59, 59), dec!(1));
    receive(&mut ledger, at(2024, 3, 1, 0, 0, 0), dec!(10));
    receive(&mut ledger, at(2024, 3, 31, 23, 59, 59), dec!(100));
    receive(&mut ledger, at(2024, 4, 1, 0, 0, 0), dec!(1000));
    let company = ledger.company;
    let store = ledger.shared();

    let movements = AccountBalanceCalculator::new(store.as_ref())
        .compute_kind(company, AccountKind::Bank, day(2024, 3, 1), day(2024, 3, 31))
        .await
        .unwrap();

    assert_eq!(movements[0].opening, dec!(1));
    assert_eq!(movements[0].period_debit, dec!(110));
    assert_eq!(movements[0].closing, dec!(111));
}

#[tokio::test]
async fn test_split_payment_touches_only_safe_and_bank() {
    let mut ledger = Fixture::new(Decimal::ZERO);
    let safe = ledger.account(AccountKind::Safe, "S1", Decimal::ZERO);
    let bank = ledger.account(AccountKind::Bank, "B1", Decimal::ZERO);
    ledger.account(AccountKind::Customer, "C1", Decimal::ZERO);
    ledger.split_invoice(
        InvoiceKind::SalesInvoice,
        noon(2024, 1, 10),
        safe,
        dec!(30),
        bank,
        dec!(70),
        (dec!(100), Decimal::ZERO, Decimal::ZERO),
        NO_LINES,
    );
    let company = ledger.company;
    let store = ledger.shared();
    let calculator = AccountBalanceCalculator::new(store.as_ref());

    let mut touched = Decimal::ZERO;
    for kind in AccountKind::ALL {
        let movements = calculator
            .compute_kind(company, kind, day(2024, 1, 1), day(2024, 1, 31))
            .await
            .unwrap();
        for movement in movements {
            let expected = match kind {
                AccountKind::Safe => dec!(30),
                AccountKind::Bank => dec!(70),
                _ => Decimal::ZERO,
            };
            assert_eq!(movement.period_debit, expected, "{kind}");
            assert_eq!(movement.period_credit, Decimal::ZERO, "{kind}");
            touched += movement.period_debit;
        }
    }
    assert_eq!(touched, dec!(100));
}

#[tokio::test]
async fn test_supplier_is_credit_normal() {
    let mut ledger = Fixture::new(Decimal::ZERO);
    let supplier = ledger.account(AccountKind::Supplier, "V1", dec!(100));
    let safe = ledger.account(AccountKind::Safe, "S1", dec!(1000));
    ledger.credit_invoice(
        InvoiceKind::PurchaseInvoice,
        noon(2024, 1, 5),
        supplier,
        (dec!(400), Decimal::ZERO, dec!(60)),
        NO_LINES,
    );
    ledger.credit_invoice(
        InvoiceKind::PurchaseReturn,
        noon(2024, 1, 6),
        supplier,
        (dec!(40), Decimal::ZERO, dec!(6)),
        NO_LINES,
    );
    ledger.voucher(
        VoucherKind::Payment,
        noon(2024, 1, 7),
        Counterparty::Supplier(supplier),
        Channel::safe(safe),
        dec!(300),
        Decimal::ZERO,
    );
    let company = ledger.company;
    let store = ledger.shared();

    let movements = AccountBalanceCalculator::new(store.as_ref())
        .compute_kind(company, AccountKind::Supplier, day(2024, 1, 1), day(2024, 1, 31))
        .await
        .unwrap();

    let movement = &movements[0];
    assert_eq!(movement.opening, dec!(100));
    assert_eq!(movement.period_credit, dec!(460));
    assert_eq!(movement.period_debit, dec!(346));
    assert_eq!(movement.closing, dec!(214));
    assert_eq!(movement.signed_closing(), dec!(-214));
}

#[tokio::test]
async fn test_customer_credit_sales_returns_and_receipts() {
    let mut ledger = Fixture::new(Decimal::ZERO);
    let customer = ledger.account(AccountKind::Customer, "C1", dec!(50));
    let bank = ledger.account(AccountKind::Bank, "B1", Decimal::ZERO);
    ledger.credit_invoice(
        InvoiceKind::SalesInvoice,
        noon(2024, 1, 5),
        customer,
        (dec!(200), dec!(20), dec!(27)),
        NO_LINES,
    );
    ledger.credit_invoice(
        InvoiceKind::SalesReturn,
        noon(2024, 1, 6),
        customer,
        (dec!(20), Decimal::ZERO, dec!(3)),
        NO_LINES,
    );
    ledger.voucher(
        VoucherKind::Receipt,
        noon(2024, 1, 7),
        Counterparty::Customer(customer),
        Channel::bank(bank),
        dec!(100),
        Decimal::ZERO,
    );
    // A cash sale never touches the customer account.
    ledger.cash_invoice(
        InvoiceKind::SalesInvoice,
        noon(2024, 1, 8),
        Channel::bank(bank),
        (dec!(10), Decimal::ZERO, Decimal::ZERO),
        NO_LINES,
    );
    let company = ledger.company;
    let store = ledger.shared();

    let movements = AccountBalanceCalculator::new(store.as_ref())
        .compute_kind(company, AccountKind::Customer, day(2024, 1, 1), day(2024, 1, 31))
        .await
        .unwrap();

    assert_eq!(movements[0].period_debit, dec!(207));
    assert_eq!(movements[0].period_credit, dec!(123));
    assert_eq!(movements[0].closing, dec!(134));
}

#[tokio::test]
async fn test_transfer_moves_between_channels() {
    let mut ledger = Fixture::new(Decimal::ZERO);
    let safe = ledger.account(AccountKind::Safe, "S1", dec!(500));
    let bank = ledger.account(AccountKind::Bank, "B1", Decimal::ZERO);
    ledger.transfer(noon(2024, 1, 3), Channel::safe(safe), Channel::bank(bank), dec!(200));
    let company = ledger.company;
    let store = ledger.shared();
    let calculator = AccountBalanceCalculator::new(store.as_ref());

    let (safes, banks) = futures::try_join!(
        calculator.compute_kind(company, AccountKind::Safe, day(2024, 1, 1), day(2024, 1, 31)),
        calculator.compute_kind(company, AccountKind::Bank, day(2024, 1, 1), day(2024, 1, 31)),
    )
    .unwrap();

    assert_eq!(safes[0].closing, dec!(300));
    assert_eq!(banks[0].closing, dec!(200));
}

#[tokio::test]
async fn test_partner_and_other_accounts_follow_vouchers() {
    let mut ledger = Fixture::new(Decimal::ZERO);
    let safe = ledger.account(AccountKind::Safe, "S1", Decimal::ZERO);
    let partner = ledger.account(AccountKind::CurrentAccount, "P1", Decimal::ZERO);
    let receivable = ledger.account(AccountKind::ReceivableAccount, "R1", Decimal::ZERO);
    ledger.voucher(
        VoucherKind::Receipt,
        noon(2024, 1, 3),
        Counterparty::CurrentAccount(partner),
        Channel::safe(safe),
        dec!(1000),
        Decimal::ZERO,
    );
    ledger.voucher(
        VoucherKind::Payment,
        noon(2024, 1, 4),
        Counterparty::Receivable(receivable),
        Channel::safe(safe),
        dec!(250),
        Decimal::ZERO,
    );
    let company = ledger.company;
    let store = ledger.shared();
    let calculator = AccountBalanceCalculator::new(store.as_ref());
    let (start, end) = (day(2024, 1, 1), day(2024, 1, 31));

    let partners = calculator
        .compute_kind(company, AccountKind::CurrentAccount, start, end)
        .await
        .unwrap();
    let receivables = calculator
        .compute_kind(company, AccountKind::ReceivableAccount, start, end)
        .await
        .unwrap();

    assert_eq!(partners[0].closing, dec!(1000));
    assert_eq!(partners[0].signed_closing(), dec!(-1000));
    assert_eq!(receivables[0].closing, dec!(250));
}

#[tokio::test]
async fn test_statement_running_balance() {
    let mut ledger = Fixture::new(Decimal::ZERO);
    let safe = ledger.account(AccountKind::Safe, "S1", dec!(100));
    let supplier = ledger.account(AccountKind::Supplier, "V1", Decimal::ZERO);
    ledger.cash_invoice(
        InvoiceKind::SalesInvoice,
        noon(2024, 1, 2),
        Channel::safe(safe),
        (dec!(50), Decimal::ZERO, Decimal::ZERO),
        NO_LINES,
    );
    ledger.cash_invoice(
        InvoiceKind::PurchaseInvoice,
        noon(2024, 1, 3),
        Channel::safe(safe),
        (dec!(30), Decimal::ZERO, Decimal::ZERO),
        NO_LINES,
    );
    ledger.voucher(
        VoucherKind::Payment,
        noon(2024, 1, 4),
        Counterparty::Supplier(supplier),
        Channel::safe(safe),
        dec!(20),
        Decimal::ZERO,
    );
    let company = ledger.company;
    let store = ledger.shared();
    let account = crate::ledger::MonetaryAccount {
        id: safe,
        company_id: company,
        kind: AccountKind::Safe,
        code: "S1".to_string(),
        name: "safe S1".to_string(),
        opening_balance: dec!(100),
    };

    let statement = AccountBalanceCalculator::new(store.as_ref())
        .statement(&account, day(2024, 1, 3), day(2024, 1, 31))
        .await
        .unwrap();

    assert_eq!(statement.movement.opening, dec!(150));
    assert_eq!(statement.lines.len(), 2);
    assert_eq!(statement.lines[0].flow, Flow::PurchaseSettlement);
    assert_eq!(statement.lines[0].balance, dec!(120));
    assert_eq!(statement.lines[1].flow, Flow::PaymentOutOf);
    assert_eq!(statement.lines[1].balance, dec!(100));
    assert_eq!(statement.movement.closing, dec!(100));
}

#[tokio::test]
async fn test_account_without_activity_keeps_opening() {
    let mut ledger = Fixture::new(Decimal::ZERO);
    ledger.account(AccountKind::PayableAccount, "L1", dec!(75));
    let company = ledger.company;
    let store = ledger.shared();

    let movements = AccountBalanceCalculator::new(store.as_ref())
        .compute_kind(company, AccountKind::PayableAccount, day(2024, 1, 1), day(2024, 1, 31))
        .await
        .unwrap();

    assert_eq!(movements[0].opening, dec!(75));
    assert_eq!(movements[0].closing, dec!(75));
}

#[tokio::test]
async fn test_vat_summary_includes_expense_voucher_tax() {
    let mut ledger = Fixture::new(Decimal::ZERO);
    let safe = ledger.account(AccountKind::Safe, "S1", Decimal::ZERO);
    ledger.cash_invoice(
        InvoiceKind::SalesInvoice,
        noon(2024, 1, 2),
        Channel::safe(safe),
        (dec!(1000), Decimal::ZERO, dec!(150)),
        NO_LINES,
    );
    ledger.cash_invoice(
        InvoiceKind::PurchaseInvoice,
        noon(2024, 1, 3),
        Channel::safe(safe),
        (dec!(400), Decimal::ZERO, dec!(60)),
        NO_LINES,
    );
    ledger.voucher(
        VoucherKind::Payment,
        noon(2024, 1, 4),
        Counterparty::ExpenseCode(ExpenseCodeId::new()),
        Channel::safe(safe),
        dec!(115),
        dec!(15),
    );
    let company = ledger.company;
    let store = ledger.shared();

    let summary = VatCalculator::new(store.as_ref())
        .summary(company, DateWindow::through(day(2024, 1, 31)))
        .await
        .unwrap();

    assert_eq!(summary.output(), dec!(150));
    assert_eq!(summary.input(), dec!(75));
    assert_eq!(summary.net_payable(), dec!(75));
}

#[tokio::test]
async fn test_store_failure_propagates() {
    let calculator = AccountBalanceCalculator::new(&FailingStore);
    let result = calculator
        .compute_kind(CompanyId::new(), AccountKind::Safe, day(2024, 1, 1), day(2024, 1, 31))
        .await;
    assert!(result.is_err());
}

proptest! {
    /// Statement and batched movements agree, and closing follows the natural sign rule.
    #[test]
    fn test_closing_equals_opening_plus_natural_net(
        opening in -500i64..500,
        receipts in proptest::collection::vec((1u32..28, 1i64..300), 0..8),
        payments in proptest::collection::vec((1u32..28, 1i64..300), 0..8),
        credit_normal in any::<bool>(),
    ) {
        let kind = if credit_normal { AccountKind::Supplier } else { AccountKind::Customer };
        let mut ledger = Fixture::new(Decimal::ZERO);
        let safe = ledger.account(AccountKind::Safe, "S1", Decimal::ZERO);
        let account = ledger.account(kind, "A1", Decimal::from(opening));
        let party = if credit_normal {
            Counterparty::Supplier(account)
        } else {
            Counterparty::Customer(account)
        };
        for (d, amount) in &receipts {
            ledger.voucher(
                VoucherKind::Receipt,
                noon(2024, 1, *d),
                party,
                Channel::safe(safe),
                Decimal::from(*amount),
                Decimal::ZERO,
            );
        }
        for (d, amount) in &payments {
            ledger.voucher(
                VoucherKind::Payment,
                noon(2024, 1, *d),
                party,
                Channel::safe(safe),
                Decimal::from(*amount),
                Decimal::ZERO,
            );
        }
        let company = ledger.company;
        let record = crate::ledger::MonetaryAccount {
            id: account,
            company_id: company,
            kind,
            code: "A1".to_string(),
            name: format!("{kind} A1"),
            opening_balance: Decimal::from(opening),
        };
        let store = ledger.shared();
        let calculator = AccountBalanceCalculator::new(store.as_ref());

        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let (start, end) = (day(2024, 1, 10), day(2024, 1, 20));
        let batched = runtime.block_on(calculator.compute_kind(company, kind, start, end)).unwrap();
        let single = runtime.block_on(calculator.compute(&record, start, end)).unwrap();

        prop_assert_eq!(&batched[0], &single);
        let natural = kind
            .normal_side()
            .from_debit_positive(single.period_debit - single.period_credit);
        prop_assert_eq!(single.closing, single.opening + natural);
    }
}
