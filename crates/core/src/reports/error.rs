//! Report error types.

use chrono::NaiveDate;
use mizan_shared::AppError;
use mizan_shared::types::AccountId;
use thiserror::Error;

use crate::ledger::AccountKind;
use crate::store::StoreError;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Account not found.
    #[error("{kind} account not found: {id}")]
    AccountNotFound {
        /// Kind the account was looked up as.
        kind: AccountKind,
        /// Account ID.
        id: AccountId,
    },

    /// The ledger store failed; no partial report is produced.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::InvalidDateRange { .. } => Self::Validation(err.to_string()),
            ReportError::AccountNotFound { .. } => Self::NotFound(err.to_string()),
            ReportError::Store(inner) => Self::Database(inner.to_string()),
        }
    }
}
