//! Income statement assembly.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use mizan_shared::types::CompanyId;
use rust_decimal::Decimal;

use super::activity::PeriodActivity;
use super::types::IncomeStatementResult;
use crate::inventory::InventoryValuator;
use crate::ledger::{DateWindow, day_before, ledger_epoch};
use crate::store::{LedgerStore, StoreError};

/// Builds the income statement of `[start, end]` from its inputs.
#[must_use]
pub fn assemble(
    start: NaiveDate,
    end: NaiveDate,
    currency: String,
    activity: &PeriodActivity,
    beginning_inventory: Decimal,
    ending_inventory: Decimal,
) -> IncomeStatementResult {
    let total_sales = activity.sales.subtotal;
    let total_sales_returns = activity.sales_returns.subtotal;
    let net_sales = total_sales - total_sales_returns;

    let total_purchases = activity.purchases.subtotal;
    let total_purchase_returns = activity.purchase_returns.subtotal;
    let net_purchases = total_purchases - total_purchase_returns;

    let cogs = beginning_inventory + net_purchases - ending_inventory;
    let gross_profit = net_sales - cogs;

    let mut expenses_by_type: BTreeMap<String, Decimal> = BTreeMap::new();
    for line in &activity.expenses {
        *expenses_by_type.entry(line.name.clone()).or_default() += line.amount();
    }
    let uncategorized = activity.uncategorized.amount();
    if !uncategorized.is_zero() {
        *expenses_by_type
            .entry(activity.uncategorized.name.clone())
            .or_default() += uncategorized;
    }
    let total_expenses: Decimal = expenses_by_type.values().copied().sum();

    let other_revenue = activity.other_revenue();
    let net_sales_discounts = activity.net_sales_discounts();
    let net_purchase_discounts = activity.net_purchase_discounts();
    let net_profit = gross_profit - total_expenses + other_revenue - net_sales_discounts
        + net_purchase_discounts;

    IncomeStatementResult {
        report_type: "income_statement".to_string(),
        start_date: start,
        end_date: end,
        currency,
        total_sales,
        total_sales_returns,
        net_sales,
        beginning_inventory,
        total_purchases,
        total_purchase_returns,
        net_purchases,
        ending_inventory,
        cogs,
        gross_profit,
        expenses_by_type,
        total_expenses,
        other_revenue,
        net_sales_discounts,
        net_purchase_discounts,
        net_profit,
    }
}

/// Loads and assembles the income statement of `[start, end]`.
pub async fn load<S: LedgerStore + ?Sized>(
    store: &S,
    company: CompanyId,
    start: NaiveDate,
    end: NaiveDate,
    currency: String,
) -> Result<IncomeStatementResult, StoreError> {
    let valuator = InventoryValuator::new(store);
    let (activity, beginning, ending) = futures::try_join!(
        PeriodActivity::load(store, company, DateWindow::period(start, end)),
        valuator.valuate(company, day_before(start), false),
        valuator.valuate(company, end, false),
    )?;

    Ok(assemble(start, end, currency, &activity, beginning, ending))
}

/// Cumulative earnings split at the start of a reporting period.
#[derive(Debug, Clone)]
pub struct EarningsSplit {
    /// Income statement from the ledger epoch to the day before the period.
    pub brought_forward: IncomeStatementResult,
    /// Activity of the period itself.
    pub period_activity: PeriodActivity,
    /// Income statement of the period.
    pub period: IncomeStatementResult,
}

impl EarningsSplit {
    /// Loads both statements, valuing inventory once per boundary date.
    pub async fn load<S: LedgerStore + ?Sized>(
        store: &S,
        company: CompanyId,
        start: NaiveDate,
        end: NaiveDate,
        currency: &str,
    ) -> Result<Self, StoreError> {
        let epoch = ledger_epoch();
        let last_closed = day_before(start);
        let valuator = InventoryValuator::new(store);

        let (earlier, period_activity, at_epoch, at_start, at_end) = futures::try_join!(
            PeriodActivity::load(store, company, DateWindow::period(epoch, last_closed)),
            PeriodActivity::load(store, company, DateWindow::period(start, end)),
            valuator.valuate(company, day_before(epoch), false),
            valuator.valuate(company, last_closed, false),
            valuator.valuate(company, end, false),
        )?;

        let brought_forward =
            assemble(epoch, last_closed, currency.to_string(), &earlier, at_epoch, at_start);
        let period = assemble(
            start,
            end,
            currency.to_string(),
            &period_activity,
            at_start,
            at_end,
        );

        Ok(Self {
            brought_forward,
            period_activity,
            period,
        })
    }

    /// Cumulative net profit through the period end.
    #[must_use]
    pub fn retained_earnings(&self) -> Decimal {
        self.brought_forward.net_profit + self.period.net_profit
    }
}
