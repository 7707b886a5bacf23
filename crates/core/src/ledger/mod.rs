//! Ledger records and the vocabulary used to query them.
//!
//! This module defines:
//! - Closed vocabularies (account kinds, invoice kinds, sides)
//! - Read-only transactional records (invoices, vouchers, transfers, stock)
//! - Date windows with normalized day boundaries

pub mod kinds;
pub mod records;
pub mod window;

pub use kinds::{
    AccountKind, ChannelKind, InvoiceAmount, InvoiceKind, ItemType, PaymentMethod, Side,
    StoreMovementKind, VoucherKind,
};
pub use records::{
    Channel, Company, Counterparty, ExpenseCode, ExpenseType, InternalTransfer, InvoiceLine,
    InvoiceRecord, Item, MonetaryAccount, MovementLine, SplitPayment, StoreItem, StoreMovement,
    Voucher,
};
pub use window::{DateWindow, UpperBound, day_before, end_of_day, ledger_epoch, start_of_day};
