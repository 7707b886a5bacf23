//! Core business logic for Mizan.
//!
//! This crate contains the point-in-time aggregation engine with ZERO web or
//! database dependencies. Ledger records are read through the
//! [`store::LedgerStore`] trait; every figure is recomputed from history.
//!
//! # Modules
//!
//! - `ledger` - Read-only ledger records, vocabularies and date windows
//! - `store` - Data-access seam and the in-memory store
//! - `inventory` - Last-purchase-price inventory valuation
//! - `balance` - Account balances driven by a declarative posting table
//! - `reports` - Income statement, balance sheet and audit trial balance

pub mod balance;
pub mod inventory;
pub mod ledger;
pub mod reports;
pub mod store;

#[cfg(test)]
mod testing;
