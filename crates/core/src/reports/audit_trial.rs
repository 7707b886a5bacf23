//! Audit trial balance assembly.
//!
//! Real accounts carry their replayed balances; nominal accounts (revenue,
//! cost and expense lines) start every period at zero. The inventory movement
//! of the period is offset by the change-in-inventory line, and retained
//! earnings open with the cumulative profit of every earlier period.

use chrono::NaiveDate;
use mizan_shared::types::CompanyId;
use rust_decimal::Decimal;

use super::activity::PeriodActivity;
use super::balance_sheet::closing_by_kind;
use super::context::CompanyProfile;
use super::income_statement::EarningsSplit;
use super::types::{AuditTrialResult, TrialBalanceEntry, TrialBalanceTotals};
use crate::balance::{AccountMovement, VatCalculator, VatSummary};
use crate::ledger::{AccountKind, DateWindow, day_before};
use crate::store::{LedgerStore, StoreError};

/// First code assigned to registered expense types.
pub const FIRST_EXPENSE_CODE: u32 = 5200;

/// Code of the bucket for expenses without a resolvable type; kept clear of
/// the expense type range.
pub const UNCATEGORIZED_CODE: u32 = 5900;

/// Splits a debit-positive balance into its debit and credit columns.
fn split(signed: Decimal) -> (Decimal, Decimal) {
    if signed > Decimal::ZERO {
        (signed, Decimal::ZERO)
    } else {
        (Decimal::ZERO, signed.abs())
    }
}

impl TrialBalanceEntry {
    /// Entry with a debit-positive opening balance and gross period movement.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        opening: Decimal,
        period_debit: Decimal,
        period_credit: Decimal,
    ) -> Self {
        let (opening_debit, opening_credit) = split(opening);
        let (closing_debit, closing_credit) = split(opening + period_debit - period_credit);
        Self {
            code: code.into(),
            name: name.into(),
            opening_debit,
            opening_credit,
            period_debit,
            period_credit,
            closing_debit,
            closing_credit,
        }
    }

    /// Nominal entry: zero opening, period movement only.
    #[must_use]
    pub fn nominal(
        code: impl Into<String>,
        name: impl Into<String>,
        period_debit: Decimal,
        period_credit: Decimal,
    ) -> Self {
        Self::new(code, name, Decimal::ZERO, period_debit, period_credit)
    }

    /// Entry whose balance does not move inside the period.
    #[must_use]
    pub fn fixed(code: impl Into<String>, name: impl Into<String>, signed: Decimal) -> Self {
        Self::new(code, name, signed, Decimal::ZERO, Decimal::ZERO)
    }

    /// Entry with a debit-positive opening and closing balance.
    #[must_use]
    pub fn between(
        code: impl Into<String>,
        name: impl Into<String>,
        opening: Decimal,
        closing: Decimal,
    ) -> Self {
        let (period_debit, period_credit) = split(closing - opening);
        Self::new(code, name, opening, period_debit, period_credit)
    }

    fn is_zero(&self) -> bool {
        [
            self.opening_debit,
            self.opening_credit,
            self.period_debit,
            self.period_credit,
        ]
        .iter()
        .all(Decimal::is_zero)
    }
}

impl TrialBalanceTotals {
    /// Sums every column and flags each balanced pair.
    #[must_use]
    pub fn from_entries(entries: &[TrialBalanceEntry]) -> Self {
        let mut totals = entries.iter().fold(Self::default(), |mut acc, e| {
            acc.opening_debit += e.opening_debit;
            acc.opening_credit += e.opening_credit;
            acc.period_debit += e.period_debit;
            acc.period_credit += e.period_credit;
            acc.closing_debit += e.closing_debit;
            acc.closing_credit += e.closing_credit;
            acc
        });
        totals.opening_balanced = totals.opening_debit == totals.opening_credit;
        totals.period_balanced = totals.period_debit == totals.period_credit;
        totals.closing_balanced = totals.closing_debit == totals.closing_credit;
        totals.is_balanced =
            totals.opening_balanced && totals.period_balanced && totals.closing_balanced;
        totals
    }
}

/// Control account entry aggregating every account of one kind.
fn control_entry(kind: AccountKind, movements: &[AccountMovement]) -> TrialBalanceEntry {
    let opening: Decimal = movements.iter().map(AccountMovement::signed_opening).sum();
    let debit: Decimal = movements.iter().map(|m| m.period_debit).sum();
    let credit: Decimal = movements.iter().map(|m| m.period_credit).sum();
    TrialBalanceEntry::new(kind.trial_code(), kind.trial_name(), opening, debit, credit)
}

/// Inputs of an audit trial balance.
pub struct TrialInputs<'a> {
    /// Replayed balances per account kind.
    pub balances: &'a [(AccountKind, Vec<AccountMovement>)],
    /// VAT flows before the period.
    pub vat_before: &'a VatSummary,
    /// VAT flows inside the period.
    pub vat_period: &'a VatSummary,
    /// Earnings before and inside the period.
    pub earnings: &'a EarningsSplit,
    /// Company capital.
    pub capital: Decimal,
}

/// Builds the trial balance entries, ordered by code.
#[must_use]
pub fn entries(inputs: &TrialInputs<'_>) -> Vec<TrialBalanceEntry> {
    let TrialInputs {
        balances,
        vat_before,
        vat_period,
        earnings,
        capital,
    } = inputs;
    let activity: &PeriodActivity = &earnings.period_activity;
    let control = |kind: AccountKind| {
        let movements = balances
            .iter()
            .find(|(k, _)| *k == kind)
            .map_or(&[][..], |(_, m)| m.as_slice());
        control_entry(kind, movements)
    };

    let beginning_inventory = earnings.period.beginning_inventory;
    let ending_inventory = earnings.period.ending_inventory;
    let inventory_change = ending_inventory - beginning_inventory;
    let (stock_decrease, stock_increase) = split(-inventory_change);

    let mut entries = vec![
        control(AccountKind::Safe),
        control(AccountKind::Bank),
        control(AccountKind::Customer),
        control(AccountKind::ReceivableAccount),
        TrialBalanceEntry::between("1301", "Inventory", beginning_inventory, ending_inventory),
        control(AccountKind::Supplier),
        control(AccountKind::PayableAccount),
        TrialBalanceEntry::new(
            "2201",
            "VAT",
            -vat_before.net_payable(),
            vat_period.debits(),
            vat_period.credits(),
        ),
        TrialBalanceEntry::fixed("3101", "Capital", -*capital),
        control(AccountKind::CurrentAccount),
        TrialBalanceEntry::fixed(
            "3301",
            "Retained Earnings",
            -earnings.brought_forward.net_profit,
        ),
        TrialBalanceEntry::nominal("4101", "Sales", Decimal::ZERO, activity.sales.subtotal),
        TrialBalanceEntry::nominal(
            "4102",
            "Sales Returns",
            activity.sales_returns.subtotal,
            Decimal::ZERO,
        ),
        TrialBalanceEntry::nominal(
            "4103",
            "Sales Discounts",
            activity.sales.discount,
            activity.sales_returns.discount,
        ),
        TrialBalanceEntry::nominal(
            "4201",
            "Other Revenue",
            activity.other_revenue_refunded,
            activity.other_revenue_received,
        ),
        TrialBalanceEntry::nominal("5101", "Purchases", activity.purchases.subtotal, Decimal::ZERO),
        TrialBalanceEntry::nominal(
            "5102",
            "Purchase Returns",
            Decimal::ZERO,
            activity.purchase_returns.subtotal,
        ),
        TrialBalanceEntry::nominal(
            "5103",
            "Purchase Discounts",
            activity.purchase_returns.discount,
            activity.purchases.discount,
        ),
        TrialBalanceEntry::nominal(
            "5104",
            "Change in Inventory",
            stock_decrease,
            stock_increase,
        ),
    ];

    entries.extend((FIRST_EXPENSE_CODE..).zip(&activity.expenses).map(|(code, line)| {
        TrialBalanceEntry::nominal(code.to_string(), line.name.clone(), line.paid, line.refunded)
    }));

    let uncategorized = TrialBalanceEntry::nominal(
        UNCATEGORIZED_CODE.to_string(),
        activity.uncategorized.name.clone(),
        activity.uncategorized.paid,
        activity.uncategorized.refunded,
    );
    if !uncategorized.is_zero() {
        entries.push(uncategorized);
    }

    entries
}

/// Loads and assembles the audit trial balance of `[start, end]`.
pub async fn load<S: LedgerStore + ?Sized>(
    store: &S,
    company: CompanyId,
    start: NaiveDate,
    end: NaiveDate,
    profile: CompanyProfile,
) -> Result<AuditTrialResult, StoreError> {
    let vat = VatCalculator::new(store);
    let (balances, vat_before, vat_period, earnings) = futures::try_join!(
        closing_by_kind(store, company, start, end),
        vat.summary(company, DateWindow::through(day_before(start))),
        vat.summary(company, DateWindow::period(start, end)),
        EarningsSplit::load(store, company, start, end, &profile.currency),
    )?;

    let entries = entries(&TrialInputs {
        balances: &balances,
        vat_before: &vat_before,
        vat_period: &vat_period,
        earnings: &earnings,
        capital: profile.capital,
    });
    let totals = TrialBalanceTotals::from_entries(&entries);
    if !totals.is_balanced {
        tracing::warn!(
            %company,
            %start,
            %end,
            opening = %(totals.opening_debit - totals.opening_credit),
            period = %(totals.period_debit - totals.period_credit),
            "audit trial balance does not balance"
        );
    }

    Ok(AuditTrialResult {
        report_type: "audit_trial".to_string(),
        start_date: start,
        end_date: end,
        currency: profile.currency,
        entries,
        totals,
    })
}
