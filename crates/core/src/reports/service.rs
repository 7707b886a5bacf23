//! Report generation service.

use std::sync::Arc;

use chrono::NaiveDate;
use mizan_shared::ReportsConfig;
use mizan_shared::types::{AccountId, CompanyId};
use rust_decimal::Decimal;
use tracing::instrument;

use super::context::CompanyProfile;
use super::error::ReportError;
use super::types::{
    AccountBalancesResult, AccountStatementResult, AuditTrialResult, BalanceSheetResult,
    IncomeStatementResult, InventoryValuationResult, VatReport,
};
use super::{audit_trial, balance_sheet, income_statement};
use crate::balance::{AccountBalanceCalculator, VatCalculator};
use crate::inventory::InventoryValuator;
use crate::ledger::{AccountKind, DateWindow};
use crate::store::LedgerStore;

/// Service for generating financial reports.
///
/// Every operation is read-only and request scoped; calling one twice against
/// an unchanged store yields identical results.
pub struct ReportService<S: LedgerStore + ?Sized> {
    store: Arc<S>,
    settings: ReportsConfig,
}

impl<S: LedgerStore + ?Sized> Clone for ReportService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            settings: self.settings.clone(),
        }
    }
}

impl<S: LedgerStore + ?Sized> ReportService<S> {
    /// Creates a service over `store`.
    #[must_use]
    pub fn new(store: Arc<S>, settings: ReportsConfig) -> Self {
        Self { store, settings }
    }

    /// Report settings in effect.
    #[must_use]
    pub fn settings(&self) -> &ReportsConfig {
        &self.settings
    }

    fn check_range(start: NaiveDate, end: NaiveDate) -> Result<(), ReportError> {
        if start > end {
            return Err(ReportError::InvalidDateRange { start, end });
        }
        Ok(())
    }

    async fn profile(&self, company: CompanyId) -> Result<CompanyProfile, ReportError> {
        Ok(CompanyProfile::load(self.store.as_ref(), company, &self.settings).await?)
    }

    /// Generates the income statement of `[start, end]`.
    #[instrument(skip(self), err)]
    pub async fn income_statement(
        &self,
        company: CompanyId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<IncomeStatementResult, ReportError> {
        Self::check_range(start, end)?;
        let profile = self.profile(company).await?;
        let store = self.store.as_ref();
        Ok(income_statement::load(store, company, start, end, profile.currency).await?)
    }

    /// Generates the balance sheet as of `end`, reporting the profit of
    /// `[start, end]` apart from earlier retained earnings.
    #[instrument(skip(self), err)]
    pub async fn balance_sheet(
        &self,
        company: CompanyId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<BalanceSheetResult, ReportError> {
        Self::check_range(start, end)?;
        let profile = self.profile(company).await?;
        Ok(balance_sheet::load(
            self.store.as_ref(),
            company,
            start,
            end,
            profile,
            self.settings.balance_tolerance,
        )
        .await?)
    }

    /// Generates the audit trial balance of `[start, end]`.
    #[instrument(skip(self), err)]
    pub async fn audit_trial(
        &self,
        company: CompanyId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<AuditTrialResult, ReportError> {
        Self::check_range(start, end)?;
        let profile = self.profile(company).await?;
        Ok(audit_trial::load(self.store.as_ref(), company, start, end, profile).await?)
    }

    /// Balances of every account of `kind` over `[start, end]`.
    #[instrument(skip(self), err)]
    pub async fn account_balances(
        &self,
        company: CompanyId,
        kind: AccountKind,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<AccountBalancesResult, ReportError> {
        Self::check_range(start, end)?;
        let calculator = AccountBalanceCalculator::new(self.store.as_ref());
        let (profile, accounts) = futures::try_join!(
            self.profile(company),
            async {
                Ok::<_, ReportError>(calculator.compute_kind(company, kind, start, end).await?)
            },
        )?;

        let sum = |f: fn(&crate::balance::AccountMovement) -> Decimal| -> Decimal {
            accounts.iter().map(f).sum()
        };
        Ok(AccountBalancesResult {
            kind,
            start_date: start,
            end_date: end,
            currency: profile.currency,
            total_opening: sum(|m| m.opening),
            total_period_debit: sum(|m| m.period_debit),
            total_period_credit: sum(|m| m.period_credit),
            total_closing: sum(|m| m.closing),
            accounts,
        })
    }

    /// Statement of one account over `[start, end]`.
    #[instrument(skip(self), err)]
    pub async fn account_statement(
        &self,
        company: CompanyId,
        kind: AccountKind,
        account_id: AccountId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<AccountStatementResult, ReportError> {
        Self::check_range(start, end)?;
        let (profile, accounts) = futures::try_join!(self.profile(company), async {
            Ok::<_, ReportError>(self.store.accounts(company, kind).await?)
        })?;
        let account = accounts
            .into_iter()
            .find(|account| account.id == account_id)
            .ok_or(ReportError::AccountNotFound {
                kind,
                id: account_id,
            })?;

        let statement = AccountBalanceCalculator::new(self.store.as_ref())
            .statement(&account, start, end)
            .await?;
        Ok(AccountStatementResult {
            start_date: start,
            end_date: end,
            currency: profile.currency,
            statement,
        })
    }

    /// Inventory valuation detail at the end of `date`.
    #[instrument(skip(self), err)]
    pub async fn inventory_valuation(
        &self,
        company: CompanyId,
        date: NaiveDate,
    ) -> Result<InventoryValuationResult, ReportError> {
        let valuator = InventoryValuator::new(self.store.as_ref());
        let (profile, items) = futures::try_join!(self.profile(company), async {
            Ok::<_, ReportError>(valuator.positions(company, date, false).await?)
        })?;

        Ok(InventoryValuationResult {
            date,
            currency: profile.currency,
            total: items.iter().map(|item| item.value).sum(),
            oversold_items: items.iter().filter(|item| item.oversold).count(),
            items,
        })
    }

    /// VAT collected and paid over `[start, end]`.
    #[instrument(skip(self), err)]
    pub async fn vat_summary(
        &self,
        company: CompanyId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<VatReport, ReportError> {
        Self::check_range(start, end)?;
        let vat = VatCalculator::new(self.store.as_ref());
        let (profile, summary) = futures::try_join!(self.profile(company), async {
            Ok::<_, ReportError>(vat.summary(company, DateWindow::period(start, end)).await?)
        })?;

        Ok(VatReport {
            start_date: start,
            end_date: end,
            currency: profile.currency,
            output: summary.output(),
            input: summary.input(),
            net_payable: summary.net_payable(),
            summary,
        })
    }
}
