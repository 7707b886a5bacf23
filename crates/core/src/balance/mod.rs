//! Account balance calculation.
//!
//! One parameterized calculator serves every monetary account kind. Which
//! records touch an account, and on which side, is described by the posting
//! table in [`flows`].

pub mod calculator;
pub mod flows;
pub mod types;
pub mod vat;

#[cfg(test)]
mod tests;

pub use calculator::AccountBalanceCalculator;
pub use flows::{Flow, FlowSource, Posting};
pub use types::{AccountMovement, AccountStatement, StatementLine};
pub use vat::{VatCalculator, VatSummary};
