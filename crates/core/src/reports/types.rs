//! Report data types.
//!
//! Every result serializes with camelCase field names and money as decimal
//! strings.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::balance::{AccountMovement, AccountStatement, VatSummary};
use crate::inventory::ItemPosition;
use crate::ledger::AccountKind;

/// Income statement report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatementResult {
    /// Report type identifier.
    pub report_type: String,
    /// Period start date.
    pub start_date: NaiveDate,
    /// Period end date.
    pub end_date: NaiveDate,
    /// Currency code.
    pub currency: String,
    /// Sales invoice subtotals.
    pub total_sales: Decimal,
    /// Sales return subtotals.
    pub total_sales_returns: Decimal,
    /// Sales less returns.
    pub net_sales: Decimal,
    /// Inventory valued the day before the period.
    pub beginning_inventory: Decimal,
    /// Purchase invoice subtotals.
    pub total_purchases: Decimal,
    /// Purchase return subtotals.
    pub total_purchase_returns: Decimal,
    /// Purchases less returns.
    pub net_purchases: Decimal,
    /// Inventory valued at the period end.
    pub ending_inventory: Decimal,
    /// Cost of goods sold.
    pub cogs: Decimal,
    /// Net sales less COGS.
    pub gross_profit: Decimal,
    /// Expenses per expense type name.
    pub expenses_by_type: BTreeMap<String, Decimal>,
    /// Sum of `expenses_by_type`.
    pub total_expenses: Decimal,
    /// Receipts less payments against revenue codes and unassigned receipts.
    pub other_revenue: Decimal,
    /// Discounts granted on sales less those reversed by returns.
    pub net_sales_discounts: Decimal,
    /// Discounts received on purchases less those reversed by returns.
    pub net_purchase_discounts: Decimal,
    /// Net profit (negative for a loss).
    pub net_profit: Decimal,
}

/// Balance sheet report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetResult {
    /// Report type identifier.
    pub report_type: String,
    /// Start of the period whose profit is reported separately.
    pub start_date: NaiveDate,
    /// As of date.
    pub as_of: NaiveDate,
    /// Currency code.
    pub currency: String,
    /// Cash held in safes.
    pub cash_in_safes: Decimal,
    /// Cash held in banks.
    pub cash_in_banks: Decimal,
    /// Customer receivables.
    pub customers: Decimal,
    /// Other receivables.
    pub other_receivables: Decimal,
    /// Inventory at `as_of`.
    pub inventory: Decimal,
    /// Sum of assets.
    pub total_assets: Decimal,
    /// Supplier payables.
    pub suppliers: Decimal,
    /// Other payables.
    pub other_payables: Decimal,
    /// Net VAT owed (negative when reclaimable).
    pub vat_payable: Decimal,
    /// Sum of liabilities.
    pub total_liabilities: Decimal,
    /// Paid-in capital.
    pub capital: Decimal,
    /// Partners' current accounts.
    pub partners: Decimal,
    /// Net profit from the ledger epoch up to the day before `start_date`.
    pub retained_earnings_brought_forward: Decimal,
    /// Net profit of `[start_date, as_of]`.
    pub period_net_profit: Decimal,
    /// Cumulative net profit up to `as_of`.
    pub retained_earnings: Decimal,
    /// Sum of equity.
    pub total_equity: Decimal,
    /// Liabilities plus equity.
    pub total_liabilities_and_equity: Decimal,
    /// Assets less liabilities and equity.
    pub difference: Decimal,
    /// Whether `difference` is within tolerance.
    pub is_balanced: bool,
}

/// One line of the audit trial balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalanceEntry {
    /// Chart-of-accounts code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Opening debit balance.
    pub opening_debit: Decimal,
    /// Opening credit balance.
    pub opening_credit: Decimal,
    /// Period debits.
    pub period_debit: Decimal,
    /// Period credits.
    pub period_credit: Decimal,
    /// Closing debit balance.
    pub closing_debit: Decimal,
    /// Closing credit balance.
    pub closing_credit: Decimal,
}

/// Column totals of the audit trial balance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalanceTotals {
    /// Total opening debit.
    pub opening_debit: Decimal,
    /// Total opening credit.
    pub opening_credit: Decimal,
    /// Total period debit.
    pub period_debit: Decimal,
    /// Total period credit.
    pub period_credit: Decimal,
    /// Total closing debit.
    pub closing_debit: Decimal,
    /// Total closing credit.
    pub closing_credit: Decimal,
    /// Whether opening debits equal opening credits.
    pub opening_balanced: bool,
    /// Whether period debits equal period credits.
    pub period_balanced: bool,
    /// Whether closing debits equal closing credits.
    pub closing_balanced: bool,
    /// Whether every column pair balances.
    pub is_balanced: bool,
}

/// Audit trial balance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditTrialResult {
    /// Report type identifier.
    pub report_type: String,
    /// Period start date.
    pub start_date: NaiveDate,
    /// Period end date.
    pub end_date: NaiveDate,
    /// Currency code.
    pub currency: String,
    /// Entries ordered by code.
    pub entries: Vec<TrialBalanceEntry>,
    /// Column totals.
    pub totals: TrialBalanceTotals,
}

/// Balances of every account of one kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalancesResult {
    /// Account kind.
    pub kind: AccountKind,
    /// Period start date.
    pub start_date: NaiveDate,
    /// Period end date.
    pub end_date: NaiveDate,
    /// Currency code.
    pub currency: String,
    /// One movement per account.
    pub accounts: Vec<AccountMovement>,
    /// Sum of openings.
    pub total_opening: Decimal,
    /// Sum of period debits.
    pub total_period_debit: Decimal,
    /// Sum of period credits.
    pub total_period_credit: Decimal,
    /// Sum of closings.
    pub total_closing: Decimal,
}

/// Statement of one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStatementResult {
    /// Period start date.
    pub start_date: NaiveDate,
    /// Period end date.
    pub end_date: NaiveDate,
    /// Currency code.
    pub currency: String,
    /// Movement and dated lines.
    #[serde(flatten)]
    pub statement: AccountStatement,
}

/// Inventory valuation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryValuationResult {
    /// Valuation date.
    pub date: NaiveDate,
    /// Currency code.
    pub currency: String,
    /// Sum of item values.
    pub total: Decimal,
    /// Number of items whose stock went negative.
    pub oversold_items: usize,
    /// Per-item detail.
    pub items: Vec<ItemPosition>,
}

/// VAT report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VatReport {
    /// Period start date.
    pub start_date: NaiveDate,
    /// Period end date.
    pub end_date: NaiveDate,
    /// Currency code.
    pub currency: String,
    /// Tax flows.
    #[serde(flatten)]
    pub summary: VatSummary,
    /// Net output tax.
    pub output: Decimal,
    /// Net input tax.
    pub input: Decimal,
    /// Output less input.
    pub net_payable: Decimal,
}
