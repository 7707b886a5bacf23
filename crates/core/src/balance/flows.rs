//! Declarative posting table.
//!
//! Every ledger record that moves money is described by one or more [`Flow`]s.
//! [`Flow::side`] states, per account kind, whether the flow debits or credits
//! the linked account; [`Flow::postings`] extracts the linked accounts and
//! amounts from the fetched records.

use chrono::{DateTime, Utc};
use mizan_shared::types::{AccountId, RecordId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{
    AccountKind, Channel, InternalTransfer, InvoiceKind, InvoiceRecord, Side, Voucher, VoucherKind,
};

/// A category of ledger activity that touches a monetary account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Flow {
    /// Receipt voucher paid into a safe or bank.
    ReceiptInto,
    /// Payment voucher paid out of a safe or bank.
    PaymentOutOf,
    /// Internal transfer arriving at a safe or bank.
    TransferIn,
    /// Internal transfer leaving a safe or bank.
    TransferOut,
    /// Cash sales invoice settled through a safe or bank.
    SaleSettlement,
    /// Cash sales return refunded from a safe or bank.
    SalesReturnSettlement,
    /// Cash purchase invoice paid from a safe or bank.
    PurchaseSettlement,
    /// Cash purchase return refunded into a safe or bank.
    PurchaseReturnSettlement,
    /// Sales invoice charged to a customer.
    CreditSale,
    /// Sales return credited to a customer.
    CreditSalesReturn,
    /// Purchase invoice owed to a supplier.
    CreditPurchase,
    /// Purchase return charged back to a supplier.
    CreditPurchaseReturn,
    /// Receipt voucher collected from a counterparty account.
    ReceiptFromParty,
    /// Payment voucher paid to a counterparty account.
    PaymentToParty,
}

/// Record family a flow is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowSource {
    /// Invoice-like documents of one kind.
    Invoice(InvoiceKind),
    /// Vouchers of one kind.
    Voucher(VoucherKind),
    /// Internal transfers.
    Transfer,
}

impl Flow {
    /// Every flow.
    pub const ALL: [Self; 14] = [
        Self::ReceiptInto,
        Self::PaymentOutOf,
        Self::TransferIn,
        Self::TransferOut,
        Self::SaleSettlement,
        Self::SalesReturnSettlement,
        Self::PurchaseSettlement,
        Self::PurchaseReturnSettlement,
        Self::CreditSale,
        Self::CreditSalesReturn,
        Self::CreditPurchase,
        Self::CreditPurchaseReturn,
        Self::ReceiptFromParty,
        Self::PaymentToParty,
    ];

    /// Side on which this flow posts to an account of `kind`, if it touches it at all.
    #[must_use]
    pub const fn side(self, kind: AccountKind) -> Option<Side> {
        use AccountKind as K;

        let channel = matches!(kind, K::Safe | K::Bank);
        match self {
            Self::ReceiptInto
            | Self::TransferIn
            | Self::SaleSettlement
            | Self::PurchaseReturnSettlement
                if channel =>
            {
                Some(Side::Debit)
            }
            Self::PaymentOutOf
            | Self::TransferOut
            | Self::PurchaseSettlement
            | Self::SalesReturnSettlement
                if channel =>
            {
                Some(Side::Credit)
            }
            Self::CreditSale => match kind {
                K::Customer => Some(Side::Debit),
                _ => None,
            },
            Self::CreditSalesReturn => match kind {
                K::Customer => Some(Side::Credit),
                _ => None,
            },
            Self::CreditPurchase => match kind {
                K::Supplier => Some(Side::Credit),
                _ => None,
            },
            Self::CreditPurchaseReturn => match kind {
                K::Supplier => Some(Side::Debit),
                _ => None,
            },
            Self::ReceiptFromParty if !channel => Some(Side::Credit),
            Self::PaymentToParty if !channel => Some(Side::Debit),
            _ => None,
        }
    }

    /// Record family the flow is read from.
    #[must_use]
    pub const fn source(self) -> FlowSource {
        match self {
            Self::ReceiptInto | Self::ReceiptFromParty => FlowSource::Voucher(VoucherKind::Receipt),
            Self::PaymentOutOf | Self::PaymentToParty => FlowSource::Voucher(VoucherKind::Payment),
            Self::TransferIn | Self::TransferOut => FlowSource::Transfer,
            Self::SaleSettlement | Self::CreditSale => {
                FlowSource::Invoice(InvoiceKind::SalesInvoice)
            }
            Self::SalesReturnSettlement | Self::CreditSalesReturn => {
                FlowSource::Invoice(InvoiceKind::SalesReturn)
            }
            Self::PurchaseSettlement | Self::CreditPurchase => {
                FlowSource::Invoice(InvoiceKind::PurchaseInvoice)
            }
            Self::PurchaseReturnSettlement | Self::CreditPurchaseReturn => {
                FlowSource::Invoice(InvoiceKind::PurchaseReturn)
            }
        }
    }

    /// Flows touching accounts of `kind`, with their side.
    #[must_use]
    pub fn table(kind: AccountKind) -> Vec<(Self, Side)> {
        Self::ALL
            .into_iter()
            .filter_map(|flow| flow.side(kind).map(|side| (flow, side)))
            .collect()
    }

    /// Postings of this flow onto accounts of `kind` found in `records`.
    ///
    /// `kind` must be one this flow touches; see [`Flow::side`].
    pub fn postings(self, kind: AccountKind, records: &FlowRecords<'_>, out: &mut Vec<Posting>) {
        let Some(side) = self.side(kind) else {
            return;
        };
        let mut push = |record_id, date, account_id, amount| {
            out.push(Posting {
                record_id,
                date,
                flow: self,
                account_id,
                side,
                amount,
            });
        };
        let on_channel = |channel: Option<Channel>| {
            channel
                .filter(|c| c.kind.account_kind() == kind)
                .map(|c| c.id)
        };

        match self.source() {
            FlowSource::Invoice(_) if self.is_settlement() => {
                for invoice in records.invoices {
                    for (channel, amount) in invoice.settlements() {
                        if let Some(id) = on_channel(Some(channel)) {
                            push(invoice.id, invoice.date, id, amount);
                        }
                    }
                }
            }
            FlowSource::Invoice(_) => {
                for invoice in records.invoices {
                    if let Some(party) = invoice.credit_party() {
                        push(invoice.id, invoice.date, party, invoice.net);
                    }
                }
            }
            FlowSource::Voucher(_) if matches!(self, Self::ReceiptInto | Self::PaymentOutOf) => {
                for voucher in records.vouchers {
                    if let Some(id) = on_channel(voucher.channel) {
                        push(voucher.id, voucher.date, id, voucher.amount);
                    }
                }
            }
            FlowSource::Voucher(_) => {
                for voucher in records.vouchers {
                    if let Some((party_kind, id)) = voucher.counterparty.account()
                        && party_kind == kind
                    {
                        push(voucher.id, voucher.date, id, voucher.amount);
                    }
                }
            }
            FlowSource::Transfer => {
                for transfer in records.transfers {
                    let end = if self == Self::TransferIn {
                        transfer.to
                    } else {
                        transfer.from
                    };
                    if let Some(id) = on_channel(end) {
                        push(transfer.id, transfer.date, id, transfer.amount);
                    }
                }
            }
        }
    }

    const fn is_settlement(self) -> bool {
        matches!(
            self,
            Self::SaleSettlement
                | Self::SalesReturnSettlement
                | Self::PurchaseSettlement
                | Self::PurchaseReturnSettlement
        )
    }
}

/// Records of a flow's source family.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowRecords<'r> {
    /// Invoice-like documents.
    pub invoices: &'r [InvoiceRecord],
    /// Vouchers.
    pub vouchers: &'r [Voucher],
    /// Internal transfers.
    pub transfers: &'r [InternalTransfer],
}

/// One side of a record's effect on a single account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    /// Originating record.
    pub record_id: RecordId,
    /// Record date.
    pub date: DateTime<Utc>,
    /// Flow the posting belongs to.
    pub flow: Flow,
    /// Account touched.
    pub account_id: AccountId,
    /// Side posted.
    pub side: Side,
    /// Unsigned amount.
    pub amount: Decimal,
}
