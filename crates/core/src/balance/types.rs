//! Account balance result types.

use chrono::{DateTime, Utc};
use mizan_shared::types::{AccountId, RecordId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::flows::Flow;
use crate::ledger::{AccountKind, MonetaryAccount};

/// Opening, period movement and closing of one account.
///
/// `opening` and `closing` are expressed in the account's natural sign
/// (positive = balance on its normal side); `period_debit` and `period_credit`
/// are gross sums of postings on each side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMovement {
    /// Account ID.
    pub account_id: AccountId,
    /// Account kind.
    pub kind: AccountKind,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Balance before the period.
    pub opening: Decimal,
    /// Debits inside the period.
    pub period_debit: Decimal,
    /// Credits inside the period.
    pub period_credit: Decimal,
    /// Balance at the end of the period.
    pub closing: Decimal,
}

impl AccountMovement {
    /// A movement with no activity: opening and closing equal the stored opening balance.
    #[must_use]
    pub fn idle(account: &MonetaryAccount) -> Self {
        Self {
            account_id: account.id,
            kind: account.kind,
            code: account.code.clone(),
            name: account.name.clone(),
            opening: account.opening_balance,
            period_debit: Decimal::ZERO,
            period_credit: Decimal::ZERO,
            closing: account.opening_balance,
        }
    }

    /// Opening balance with debits positive.
    #[must_use]
    pub fn signed_opening(&self) -> Decimal {
        self.kind.normal_side().to_debit_positive(self.opening)
    }

    /// Closing balance with debits positive.
    #[must_use]
    pub fn signed_closing(&self) -> Decimal {
        self.kind.normal_side().to_debit_positive(self.closing)
    }
}

/// One posting on an account statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementLine {
    /// Originating record.
    pub record_id: RecordId,
    /// Record date.
    pub date: DateTime<Utc>,
    /// Activity category.
    pub flow: Flow,
    /// Debit amount (zero for credits).
    pub debit: Decimal,
    /// Credit amount (zero for debits).
    pub credit: Decimal,
    /// Running balance after this line, natural sign.
    pub balance: Decimal,
}

/// Dated activity of one account over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStatement {
    /// Summary of the period.
    pub movement: AccountMovement,
    /// Period postings in date order.
    pub lines: Vec<StatementLine>,
}
