//! Closed vocabularies used by ledger records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Side of a double-entry movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Debit side.
    Debit,
    /// Credit side.
    Credit,
}

impl Side {
    /// Converts a balance expressed on this normal side into a debit-positive value.
    ///
    /// Debit-normal balances are already debit-positive; credit-normal balances flip sign.
    #[must_use]
    pub fn to_debit_positive(self, natural: Decimal) -> Decimal {
        match self {
            Self::Debit => natural,
            Self::Credit => -natural,
        }
    }

    /// Converts a debit-positive value into a balance on this normal side.
    #[must_use]
    pub fn from_debit_positive(self, signed: Decimal) -> Decimal {
        // The conversion is its own inverse.
        self.to_debit_positive(signed)
    }
}

/// Monetary account families that carry a running balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccountKind {
    /// Cash safe (till).
    Safe,
    /// Bank account.
    Bank,
    /// Customer (trade receivable).
    Customer,
    /// Supplier (trade payable).
    Supplier,
    /// Other receivable account.
    ReceivableAccount,
    /// Other payable account.
    PayableAccount,
    /// Partner current account.
    CurrentAccount,
}

impl AccountKind {
    /// Every account kind, in chart-of-accounts order.
    pub const ALL: [Self; 7] = [
        Self::Safe,
        Self::Bank,
        Self::Customer,
        Self::ReceivableAccount,
        Self::Supplier,
        Self::PayableAccount,
        Self::CurrentAccount,
    ];

    /// Side on which increases of this account are recorded.
    #[must_use]
    pub const fn normal_side(self) -> Side {
        match self {
            Self::Safe | Self::Bank | Self::Customer | Self::ReceivableAccount => Side::Debit,
            Self::Supplier | Self::PayableAccount | Self::CurrentAccount => Side::Credit,
        }
    }

    /// Trial-balance control account code.
    #[must_use]
    pub const fn trial_code(self) -> &'static str {
        match self {
            Self::Safe => "1101",
            Self::Bank => "1102",
            Self::Customer => "1201",
            Self::ReceivableAccount => "1202",
            Self::Supplier => "2101",
            Self::PayableAccount => "2102",
            Self::CurrentAccount => "3201",
        }
    }

    /// Trial-balance control account name.
    #[must_use]
    pub const fn trial_name(self) -> &'static str {
        match self {
            Self::Safe => "Cash in Safes",
            Self::Bank => "Cash in Banks",
            Self::Customer => "Customers",
            Self::ReceivableAccount => "Other Receivables",
            Self::Supplier => "Suppliers",
            Self::PayableAccount => "Other Payables",
            Self::CurrentAccount => "Partners Current Accounts",
        }
    }

    /// Wire name used in URLs and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Bank => "bank",
            Self::Customer => "customer",
            Self::Supplier => "supplier",
            Self::ReceivableAccount => "receivable-account",
            Self::PayableAccount => "payable-account",
            Self::CurrentAccount => "current-account",
        }
    }
}

impl std::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AccountKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "safe" => Ok(Self::Safe),
            "bank" => Ok(Self::Bank),
            "customer" => Ok(Self::Customer),
            "supplier" => Ok(Self::Supplier),
            "receivable" | "receivable-account" => Ok(Self::ReceivableAccount),
            "payable" | "payable-account" => Ok(Self::PayableAccount),
            "current" | "current-account" | "partner" => Ok(Self::CurrentAccount),
            _ => Err(format!("Unknown account kind: {s}")),
        }
    }
}

/// Cash channel a record settles through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    /// Cash safe.
    Safe,
    /// Bank account.
    Bank,
}

impl ChannelKind {
    /// Account kind holding the channel's balance.
    #[must_use]
    pub const fn account_kind(self) -> AccountKind {
        match self {
            Self::Safe => AccountKind::Safe,
            Self::Bank => AccountKind::Bank,
        }
    }
}

impl std::str::FromStr for ChannelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "safe" | "cash" => Ok(Self::Safe),
            "bank" => Ok(Self::Bank),
            _ => Err(format!("Unknown payment channel: {s}")),
        }
    }
}

/// Invoice-like documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvoiceKind {
    /// Sales invoice.
    SalesInvoice,
    /// Purchase invoice.
    PurchaseInvoice,
    /// Sales return.
    SalesReturn,
    /// Purchase return.
    PurchaseReturn,
}

impl InvoiceKind {
    /// Every invoice kind.
    pub const ALL: [Self; 4] = [
        Self::SalesInvoice,
        Self::PurchaseInvoice,
        Self::SalesReturn,
        Self::PurchaseReturn,
    ];

    /// Whether the document's lines add stock (`true`) or remove it (`false`).
    #[must_use]
    pub const fn adds_stock(self) -> bool {
        matches!(self, Self::PurchaseInvoice | Self::SalesReturn)
    }

    /// Account kind of the document's party.
    #[must_use]
    pub const fn party_kind(self) -> AccountKind {
        match self {
            Self::SalesInvoice | Self::SalesReturn => AccountKind::Customer,
            Self::PurchaseInvoice | Self::PurchaseReturn => AccountKind::Supplier,
        }
    }
}

/// Numeric invoice columns that can be aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvoiceAmount {
    /// Amount before discount and tax.
    Subtotal,
    /// Document-level discount.
    Discount,
    /// VAT.
    Tax,
    /// Settled amount (`subtotal - discount + tax`).
    Net,
}

/// Settlement method of an invoice-like document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Settled immediately through a safe or bank.
    Cash,
    /// Charged to the party's account.
    Credit,
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "credit" => Ok(Self::Credit),
            _ => Err(format!("Unknown payment method: {s}")),
        }
    }
}

/// Cash vouchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoucherKind {
    /// Money received into a safe or bank.
    Receipt,
    /// Money paid out of a safe or bank.
    Payment,
}

/// Store (warehouse) movement vouchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreMovementKind {
    /// Goods received into a store.
    Receipt,
    /// Goods issued from a store.
    Issue,
    /// Goods moved between stores.
    Transfer,
}

/// Inventory item classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemType {
    /// Physically stocked; participates in valuation.
    Stocked,
    /// Services and other non-stock items.
    NonStocked,
}

impl ItemType {
    /// Parses the stored type column; anything but `STOCKED` is non-stock.
    #[must_use]
    pub fn from_column(value: &str) -> Self {
        if value.eq_ignore_ascii_case("STOCKED") {
            Self::Stocked
        } else {
            Self::NonStocked
        }
    }
}
