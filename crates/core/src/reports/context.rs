//! Company facts every report needs.

use mizan_shared::ReportsConfig;
use mizan_shared::types::CompanyId;
use rust_decimal::Decimal;
use tracing::warn;

use crate::store::{LedgerStore, StoreError};

/// Currency and capital of the reporting company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyProfile {
    /// Reporting currency.
    pub currency: String,
    /// Paid-in capital.
    pub capital: Decimal,
}

impl CompanyProfile {
    /// Loads the profile, degrading to the configured fallback currency and
    /// zero capital when the company row is missing.
    pub async fn load<S: LedgerStore + ?Sized>(
        store: &S,
        company: CompanyId,
        settings: &ReportsConfig,
    ) -> Result<Self, StoreError> {
        Ok(match store.company(company).await? {
            Some(row) => Self {
                currency: row.currency,
                capital: row.capital,
            },
            None => {
                warn!(
                    %company,
                    fallback = %settings.fallback_currency,
                    "company not found, reporting with fallback currency and zero capital"
                );
                Self {
                    currency: settings.fallback_currency.clone(),
                    capital: Decimal::ZERO,
                }
            }
        })
    }
}
