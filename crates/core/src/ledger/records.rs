//! Read-only ledger records consumed by the aggregation engine.
//!
//! These records are owned by the transactional modules; the engine never
//! creates or mutates them.

use chrono::{DateTime, Utc};
use mizan_shared::types::{
    AccountId, CompanyId, ExpenseCodeId, ExpenseTypeId, ItemId, RecordId, RevenueCodeId, StoreId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::kinds::{
    AccountKind, ChannelKind, InvoiceAmount, InvoiceKind, ItemType, PaymentMethod,
    StoreMovementKind, VoucherKind,
};

/// Company (tenant) settings relevant to reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Company ID.
    pub id: CompanyId,
    /// Display name.
    pub name: String,
    /// Reporting currency code.
    pub currency: String,
    /// Paid-in capital.
    pub capital: Decimal,
    /// Whether the company is VAT registered.
    pub vat_enabled: bool,
    /// Standard VAT rate in percent.
    pub vat_rate: Decimal,
}

/// Any account-like entity with an opening balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonetaryAccount {
    /// Account ID.
    pub id: AccountId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Account family.
    pub kind: AccountKind,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Balance before any transactional record, on the kind's normal side.
    pub opening_balance: Decimal,
}

/// A safe or bank reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Channel {
    /// Safe or bank.
    pub kind: ChannelKind,
    /// Safe or bank ID.
    pub id: AccountId,
}

impl Channel {
    /// Creates a safe channel.
    #[must_use]
    pub const fn safe(id: AccountId) -> Self {
        Self {
            kind: ChannelKind::Safe,
            id,
        }
    }

    /// Creates a bank channel.
    #[must_use]
    pub const fn bank(id: AccountId) -> Self {
        Self {
            kind: ChannelKind::Bank,
            id,
        }
    }
}

/// Split settlement between a safe and a bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitPayment {
    /// Safe receiving/paying the cash fragment.
    pub safe_id: Option<AccountId>,
    /// Cash fragment.
    pub cash_amount: Decimal,
    /// Bank receiving/paying the bank fragment.
    pub bank_id: Option<AccountId>,
    /// Bank fragment.
    pub bank_amount: Decimal,
}

/// One invoice line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    /// Item code.
    pub item_code: String,
    /// Quantity.
    pub quantity: Decimal,
    /// Unit price.
    pub unit_price: Decimal,
}

/// Sales/purchase invoice or return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Record ID.
    pub id: RecordId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Document kind.
    pub kind: InvoiceKind,
    /// Posting date.
    pub date: DateTime<Utc>,
    /// Customer (sales side) or supplier (purchase side).
    pub party_id: Option<AccountId>,
    /// Settlement method.
    pub payment_method: PaymentMethod,
    /// Safe or bank for non-split cash documents.
    pub payment_target: Option<Channel>,
    /// Split settlement, when the document is split.
    pub split: Option<SplitPayment>,
    /// Amount before discount and tax.
    pub subtotal: Decimal,
    /// Document discount.
    pub discount: Decimal,
    /// VAT.
    pub tax: Decimal,
    /// Settled amount.
    pub net: Decimal,
    /// Ordered lines.
    pub lines: Vec<InvoiceLine>,
}

impl InvoiceRecord {
    /// Returns the requested numeric column.
    #[must_use]
    pub fn amount(&self, amount: InvoiceAmount) -> Decimal {
        match amount {
            InvoiceAmount::Subtotal => self.subtotal,
            InvoiceAmount::Discount => self.discount,
            InvoiceAmount::Tax => self.tax,
            InvoiceAmount::Net => self.net,
        }
    }

    /// Cash settlements of the document: each safe/bank it moves money through.
    ///
    /// Split documents contribute only their fragments; non-split cash documents
    /// settle the full net amount through the payment target; credit documents
    /// settle nothing.
    #[must_use]
    pub fn settlements(&self) -> Vec<(Channel, Decimal)> {
        if let Some(split) = &self.split {
            let mut out = Vec::with_capacity(2);
            if let Some(safe_id) = split.safe_id {
                out.push((Channel::safe(safe_id), split.cash_amount));
            }
            if let Some(bank_id) = split.bank_id {
                out.push((Channel::bank(bank_id), split.bank_amount));
            }
            return out;
        }

        match (self.payment_method, self.payment_target) {
            (PaymentMethod::Cash, Some(target)) => vec![(target, self.net)],
            _ => Vec::new(),
        }
    }

    /// Party charged when the document is on credit.
    #[must_use]
    pub fn credit_party(&self) -> Option<AccountId> {
        match self.payment_method {
            PaymentMethod::Credit if self.split.is_none() => self.party_id,
            _ => None,
        }
    }
}

/// Target of a cash voucher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "kebab-case")]
pub enum Counterparty {
    /// Customer account.
    Customer(AccountId),
    /// Supplier account.
    Supplier(AccountId),
    /// Partner current account.
    CurrentAccount(AccountId),
    /// Other receivable account.
    Receivable(AccountId),
    /// Other payable account.
    Payable(AccountId),
    /// Expense code (rolls up to an expense type).
    ExpenseCode(ExpenseCodeId),
    /// Revenue code (other revenue).
    RevenueCode(RevenueCodeId),
    /// Counterparty missing or not recognised.
    Unassigned,
}

impl Counterparty {
    /// Monetary account referenced by the counterparty, if any.
    #[must_use]
    pub const fn account(self) -> Option<(AccountKind, AccountId)> {
        match self {
            Self::Customer(id) => Some((AccountKind::Customer, id)),
            Self::Supplier(id) => Some((AccountKind::Supplier, id)),
            Self::CurrentAccount(id) => Some((AccountKind::CurrentAccount, id)),
            Self::Receivable(id) => Some((AccountKind::ReceivableAccount, id)),
            Self::Payable(id) => Some((AccountKind::PayableAccount, id)),
            Self::ExpenseCode(_) | Self::RevenueCode(_) | Self::Unassigned => None,
        }
    }
}

/// Receipt or payment voucher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voucher {
    /// Record ID.
    pub id: RecordId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Receipt or payment.
    pub kind: VoucherKind,
    /// Posting date.
    pub date: DateTime<Utc>,
    /// Who the money came from / went to.
    pub counterparty: Counterparty,
    /// Safe or bank the money moved through.
    pub channel: Option<Channel>,
    /// Gross amount moved (unsigned).
    pub amount: Decimal,
    /// Recoverable VAT included in `amount` (expense vouchers only).
    pub tax: Decimal,
}

impl Voucher {
    /// VAT carried by the voucher; only expense vouchers carry recoverable tax.
    #[must_use]
    pub fn recoverable_tax(&self) -> Decimal {
        match self.counterparty {
            Counterparty::ExpenseCode(_) => self.tax,
            _ => Decimal::ZERO,
        }
    }
}

/// Money moved between two safes/banks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalTransfer {
    /// Record ID.
    pub id: RecordId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Posting date.
    pub date: DateTime<Utc>,
    /// Source channel.
    pub from: Option<Channel>,
    /// Destination channel.
    pub to: Option<Channel>,
    /// Amount moved.
    pub amount: Decimal,
}

/// Inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Item ID.
    pub id: ItemId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Item code referenced by invoice lines.
    pub code: String,
    /// Item name.
    pub name: String,
    /// Classification.
    pub item_type: ItemType,
    /// Static purchase price used when no purchase history exists.
    pub purchase_price: Option<Decimal>,
}

/// Per-store opening quantity of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreItem {
    /// Item.
    pub item_id: ItemId,
    /// Store.
    pub store_id: StoreId,
    /// Quantity on hand at ledger inception.
    pub opening_quantity: Decimal,
}

/// One line of a store movement voucher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementLine {
    /// Item.
    pub item_id: ItemId,
    /// Quantity moved.
    pub quantity: Decimal,
}

/// Store receipt, issue or transfer voucher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreMovement {
    /// Record ID.
    pub id: RecordId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Movement kind.
    pub kind: StoreMovementKind,
    /// Posting date.
    pub date: DateTime<Utc>,
    /// Store goods leave (issues, outgoing side of transfers).
    pub from_store: Option<StoreId>,
    /// Store goods enter (receipts, incoming side of transfers).
    pub to_store: Option<StoreId>,
    /// Lines.
    pub lines: Vec<MovementLine>,
}

impl StoreMovement {
    /// Company-wide quantity multiplier applied to every line.
    ///
    /// Receipts add, issues subtract; a transfer adds on its incoming side and
    /// subtracts on its outgoing side, so a store-to-store transfer nets to zero.
    #[must_use]
    pub fn quantity_factor(&self) -> Decimal {
        match self.kind {
            StoreMovementKind::Receipt => Decimal::ONE,
            StoreMovementKind::Issue => Decimal::NEGATIVE_ONE,
            StoreMovementKind::Transfer => {
                let incoming = if self.to_store.is_some() {
                    Decimal::ONE
                } else {
                    Decimal::ZERO
                };
                let outgoing = if self.from_store.is_some() {
                    Decimal::ONE
                } else {
                    Decimal::ZERO
                };
                incoming - outgoing
            }
        }
    }
}

/// Expense grouping shown on the income statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseType {
    /// Expense type ID.
    pub id: ExpenseTypeId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Display name.
    pub name: String,
}

/// Expense code referenced by payment vouchers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseCode {
    /// Expense code ID.
    pub id: ExpenseCodeId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Parent expense type.
    pub expense_type_id: Option<ExpenseTypeId>,
    /// Code.
    pub code: String,
    /// Name.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn invoice(method: PaymentMethod) -> InvoiceRecord {
        InvoiceRecord {
            id: RecordId::new(),
            company_id: CompanyId::new(),
            kind: InvoiceKind::SalesInvoice,
            date: Utc::now(),
            party_id: Some(AccountId::new()),
            payment_method: method,
            payment_target: None,
            split: None,
            subtotal: dec!(100),
            discount: dec!(0),
            tax: dec!(15),
            net: dec!(115),
            lines: Vec::new(),
        }
    }

    #[test]
    fn test_cash_invoice_settles_net_through_target() {
        let safe = AccountId::new();
        let mut record = invoice(PaymentMethod::Cash);
        record.payment_target = Some(Channel::safe(safe));

        assert_eq!(record.settlements(), vec![(Channel::safe(safe), dec!(115))]);
        assert_eq!(record.credit_party(), None);
    }

    #[test]
    fn test_split_invoice_settles_fragments_only() {
        let safe = AccountId::new();
        let bank = AccountId::new();
        let mut record = invoice(PaymentMethod::Cash);
        record.payment_target = Some(Channel::safe(safe));
        record.split = Some(SplitPayment {
            safe_id: Some(safe),
            cash_amount: dec!(30),
            bank_id: Some(bank),
            bank_amount: dec!(70),
        });

        assert_eq!(
            record.settlements(),
            vec![
                (Channel::safe(safe), dec!(30)),
                (Channel::bank(bank), dec!(70)),
            ]
        );
    }

    #[test]
    fn test_credit_invoice_charges_party() {
        let record = invoice(PaymentMethod::Credit);
        assert!(record.settlements().is_empty());
        assert_eq!(record.credit_party(), record.party_id);
    }

    #[test]
    fn test_cash_invoice_without_target_settles_nothing() {
        assert!(invoice(PaymentMethod::Cash).settlements().is_empty());
    }

    #[test]
    fn test_transfer_between_stores_nets_to_zero() {
        let movement = StoreMovement {
            id: RecordId::new(),
            company_id: CompanyId::new(),
            kind: StoreMovementKind::Transfer,
            date: Utc::now(),
            from_store: Some(StoreId::new()),
            to_store: Some(StoreId::new()),
            lines: Vec::new(),
        };
        assert_eq!(movement.quantity_factor(), Decimal::ZERO);
    }

    #[test]
    fn test_only_expense_vouchers_carry_tax() {
        let mut voucher = Voucher {
            id: RecordId::new(),
            company_id: CompanyId::new(),
            kind: VoucherKind::Payment,
            date: Utc::now(),
            counterparty: Counterparty::ExpenseCode(ExpenseCodeId::new()),
            channel: None,
            amount: dec!(115),
            tax: dec!(15),
        };
        assert_eq!(voucher.recoverable_tax(), dec!(15));

        voucher.counterparty = Counterparty::Supplier(AccountId::new());
        assert_eq!(voucher.recoverable_tax(), Decimal::ZERO);
    }
}
