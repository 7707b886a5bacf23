//! Financial report routes.
//!
//! Every route is a read: it replays the company's ledger through the report
//! service and renders the result as camelCase JSON with money as decimal
//! strings.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use chrono::NaiveDate;
use mizan_core::ledger::AccountKind;
use mizan_core::reports::{
    AccountBalancesResult, AccountStatementResult, AuditTrialResult, BalanceSheetResult,
    IncomeStatementResult, InventoryValuationResult, VatReport,
};
use mizan_shared::types::{AccountId, CompanyId};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;

/// Wire format of every date parameter.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Creates report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/companies/{company_id}/reports/income-statement",
            get(get_income_statement),
        )
        .route(
            "/companies/{company_id}/reports/balance-sheet",
            get(get_balance_sheet),
        )
        .route(
            "/companies/{company_id}/reports/audit-trial",
            get(get_audit_trial),
        )
        .route(
            "/companies/{company_id}/reports/account-balances",
            get(get_account_balances),
        )
        .route(
            "/companies/{company_id}/reports/accounts/{kind}/{account_id}/statement",
            get(get_account_statement),
        )
        .route(
            "/companies/{company_id}/reports/inventory-valuation",
            get(get_inventory_valuation),
        )
        .route("/companies/{company_id}/reports/vat", get(get_vat_summary))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for period reports.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodQuery {
    /// First day of the period (YYYY-MM-DD).
    pub start_date: Option<String>,
    /// Last day of the period (YYYY-MM-DD), inclusive.
    pub end_date: Option<String>,
}

impl PeriodQuery {
    fn range(&self) -> Result<(NaiveDate, NaiveDate), ApiError> {
        Ok((
            parse_date("startDate", self.start_date.as_deref())?,
            parse_date("endDate", self.end_date.as_deref())?,
        ))
    }
}

/// Query parameters for the account balances report.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalancesQuery {
    /// Account kind (`safe`, `bank`, `customer`, ...).
    pub kind: Option<String>,
    /// First day of the period (YYYY-MM-DD).
    pub start_date: Option<String>,
    /// Last day of the period (YYYY-MM-DD), inclusive.
    pub end_date: Option<String>,
}

/// Query parameters for the inventory valuation.
#[derive(Debug, Default, Deserialize)]
pub struct ValuationQuery {
    /// Valuation date (YYYY-MM-DD); stock is valued at the end of that day.
    pub date: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

async fn get_income_statement(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<IncomeStatementResult>, ApiError> {
    let (start, end) = query.range()?;
    let report = state
        .reports
        .income_statement(CompanyId::from_uuid(company_id), start, end)
        .await?;
    Ok(Json(report))
}

async fn get_balance_sheet(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<BalanceSheetResult>, ApiError> {
    let (start, end) = query.range()?;
    let report = state
        .reports
        .balance_sheet(CompanyId::from_uuid(company_id), start, end)
        .await?;
    if !report.is_balanced {
        debug!(
            %company_id,
            difference = %report.difference,
            "Balance sheet does not balance"
        );
    }
    Ok(Json(report))
}

async fn get_audit_trial(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<AuditTrialResult>, ApiError> {
    let (start, end) = query.range()?;
    let report = state
        .reports
        .audit_trial(CompanyId::from_uuid(company_id), start, end)
        .await?;
    Ok(Json(report))
}

async fn get_account_balances(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Query(query): Query<AccountBalancesQuery>,
) -> Result<Json<AccountBalancesResult>, ApiError> {
    let kind = parse_kind(
        query
            .kind
            .as_deref()
            .ok_or_else(|| ApiError::validation("kind is required"))?,
    )?;
    let start = parse_date("startDate", query.start_date.as_deref())?;
    let end = parse_date("endDate", query.end_date.as_deref())?;

    let report = state
        .reports
        .account_balances(CompanyId::from_uuid(company_id), kind, start, end)
        .await?;
    Ok(Json(report))
}

async fn get_account_statement(
    State(state): State<AppState>,
    Path((company_id, kind, account_id)): Path<(Uuid, String, Uuid)>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<AccountStatementResult>, ApiError> {
    let kind = parse_kind(&kind)?;
    let (start, end) = query.range()?;
    let report = state
        .reports
        .account_statement(
            CompanyId::from_uuid(company_id),
            kind,
            AccountId::from_uuid(account_id),
            start,
            end,
        )
        .await?;
    Ok(Json(report))
}

async fn get_inventory_valuation(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Query(query): Query<ValuationQuery>,
) -> Result<Json<InventoryValuationResult>, ApiError> {
    let date = parse_date("date", query.date.as_deref())?;
    let report = state
        .reports
        .inventory_valuation(CompanyId::from_uuid(company_id), date)
        .await?;
    Ok(Json(report))
}

async fn get_vat_summary(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<VatReport>, ApiError> {
    let (start, end) = query.range()?;
    let report = state
        .reports
        .vat_summary(CompanyId::from_uuid(company_id), start, end)
        .await?;
    Ok(Json(report))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Parses a required `YYYY-MM-DD` parameter.
fn parse_date(field: &str, value: Option<&str>) -> Result<NaiveDate, ApiError> {
    let value = value.ok_or_else(|| ApiError::validation(format!("{field} is required")))?;
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        ApiError::validation(format!("{field} must be a YYYY-MM-DD date, got '{value}'"))
    })
}

fn parse_kind(value: &str) -> Result<AccountKind, ApiError> {
    value.parse().map_err(ApiError::validation)
}

#[cfg(test)]
#[path = "reports_tests.rs"]
mod tests;
