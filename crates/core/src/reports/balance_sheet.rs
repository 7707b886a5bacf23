//! Balance sheet assembly.

use chrono::NaiveDate;
use futures::future::try_join_all;
use mizan_shared::types::CompanyId;
use rust_decimal::Decimal;

use super::context::CompanyProfile;
use super::income_statement::EarningsSplit;
use super::types::BalanceSheetResult;
use crate::balance::{AccountBalanceCalculator, AccountMovement, VatCalculator, VatSummary};
use crate::ledger::{AccountKind, DateWindow};
use crate::store::{LedgerStore, StoreError};

/// Closing balances of every account kind, natural sign, in `AccountKind::ALL` order.
pub(crate) async fn closing_by_kind<S: LedgerStore + ?Sized>(
    store: &S,
    company: CompanyId,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<(AccountKind, Vec<AccountMovement>)>, StoreError> {
    let calculator = AccountBalanceCalculator::new(store);
    let movements = try_join_all(
        AccountKind::ALL.map(|kind| calculator.compute_kind(company, kind, start, end)),
    )
    .await?;
    Ok(AccountKind::ALL.into_iter().zip(movements).collect())
}

/// Builds the balance sheet as of `end`.
pub fn assemble(
    start: NaiveDate,
    end: NaiveDate,
    profile: CompanyProfile,
    balances: &[(AccountKind, Vec<AccountMovement>)],
    vat: &VatSummary,
    earnings: &EarningsSplit,
    tolerance: Decimal,
) -> BalanceSheetResult {
    let closing = |kind: AccountKind| -> Decimal {
        balances
            .iter()
            .filter(|(k, _)| *k == kind)
            .flat_map(|(_, movements)| movements.iter().map(|m| m.closing))
            .sum()
    };

    let cash_in_safes = closing(AccountKind::Safe);
    let cash_in_banks = closing(AccountKind::Bank);
    let customers = closing(AccountKind::Customer);
    let other_receivables = closing(AccountKind::ReceivableAccount);
    let inventory = earnings.period.ending_inventory;
    let total_assets = cash_in_safes + cash_in_banks + customers + other_receivables + inventory;

    let suppliers = closing(AccountKind::Supplier);
    let other_payables = closing(AccountKind::PayableAccount);
    let vat_payable = vat.net_payable();
    let total_liabilities = suppliers + other_payables + vat_payable;

    let partners = closing(AccountKind::CurrentAccount);
    let retained_earnings_brought_forward = earnings.brought_forward.net_profit;
    let period_net_profit = earnings.period.net_profit;
    let retained_earnings = earnings.retained_earnings();
    let total_equity = profile.capital + partners + retained_earnings;

    let total_liabilities_and_equity = total_liabilities + total_equity;
    let difference = total_assets - total_liabilities_and_equity;

    BalanceSheetResult {
        report_type: "balance_sheet".to_string(),
        start_date: start,
        as_of: end,
        currency: profile.currency,
        cash_in_safes,
        cash_in_banks,
        customers,
        other_receivables,
        inventory,
        total_assets,
        suppliers,
        other_payables,
        vat_payable,
        total_liabilities,
        capital: profile.capital,
        partners,
        retained_earnings_brought_forward,
        period_net_profit,
        retained_earnings,
        total_equity,
        total_liabilities_and_equity,
        difference,
        is_balanced: difference.abs() <= tolerance,
    }
}

/// Loads and assembles the balance sheet as of `end`.
pub async fn load<S: LedgerStore + ?Sized>(
    store: &S,
    company: CompanyId,
    start: NaiveDate,
    end: NaiveDate,
    profile: CompanyProfile,
    tolerance: Decimal,
) -> Result<BalanceSheetResult, StoreError> {
    let vat_calculator = VatCalculator::new(store);
    let (balances, vat, earnings) = futures::try_join!(
        closing_by_kind(store, company, start, end),
        vat_calculator.summary(company, DateWindow::through(end)),
        EarningsSplit::load(store, company, start, end, &profile.currency),
    )?;

    let sheet = assemble(start, end, profile, &balances, &vat, &earnings, tolerance);
    if !sheet.is_balanced {
        tracing::warn!(
            %company,
            as_of = %end,
            difference = %sheet.difference,
            "balance sheet does not balance"
        );
    }
    Ok(sheet)
}
