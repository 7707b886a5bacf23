//! Financial report generation.
//!
//! This module assembles point-in-time reports from the inventory valuator
//! and the account balance calculator:
//! - Income Statement
//! - Balance Sheet
//! - Audit Trial Balance
//! - Account balances and statements, inventory valuation, VAT summary

pub mod activity;
pub mod audit_trial;
pub mod balance_sheet;
pub mod context;
pub mod error;
pub mod income_statement;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
