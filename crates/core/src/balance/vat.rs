//! VAT payable derived from invoice and expense voucher tax.
//!
//! VAT has no account table of its own: output tax comes from sales documents,
//! input tax from purchase documents and the recoverable tax carried by
//! expense vouchers.

use mizan_shared::types::CompanyId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{DateWindow, InvoiceAmount, InvoiceKind, Voucher, VoucherKind};
use crate::store::{LedgerStore, StoreError};

/// Tax collected and paid over a window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VatSummary {
    /// Tax on sales invoices.
    pub output_tax: Decimal,
    /// Tax reversed by sales returns.
    pub output_returns_tax: Decimal,
    /// Tax on purchase invoices.
    pub input_tax: Decimal,
    /// Tax reversed by purchase returns.
    pub input_returns_tax: Decimal,
    /// Recoverable tax on expense payments.
    pub expense_input_tax: Decimal,
    /// Tax reversed by expense refunds.
    pub expense_refund_tax: Decimal,
}

impl VatSummary {
    /// Net output tax.
    #[must_use]
    pub fn output(&self) -> Decimal {
        self.output_tax - self.output_returns_tax
    }

    /// Net input tax.
    #[must_use]
    pub fn input(&self) -> Decimal {
        self.input_tax - self.input_returns_tax + self.expense_input_tax - self.expense_refund_tax
    }

    /// Tax owed to the authority (negative when reclaimable).
    #[must_use]
    pub fn net_payable(&self) -> Decimal {
        self.output() - self.input()
    }

    /// Postings that decrease the liability.
    #[must_use]
    pub fn debits(&self) -> Decimal {
        self.output_returns_tax + self.input_tax + self.expense_input_tax
    }

    /// Postings that increase the liability.
    #[must_use]
    pub fn credits(&self) -> Decimal {
        self.output_tax + self.input_returns_tax + self.expense_refund_tax
    }
}

/// Sums VAT flows from the store.
pub struct VatCalculator<'a, S: LedgerStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: LedgerStore + ?Sized> VatCalculator<'a, S> {
    /// Creates a calculator reading from `store`.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// VAT flows of records dated inside `window`.
    ///
    /// # Errors
    ///
    /// Returns the store error if any read fails.
    pub async fn summary(
        &self,
        company: CompanyId,
        window: DateWindow,
    ) -> Result<VatSummary, StoreError> {
        let tax = |kind| self.store.sum_invoices(company, kind, InvoiceAmount::Tax, window);
        let (output_tax, output_returns_tax, input_tax, input_returns_tax, payments, receipts) =
            futures::try_join!(
                tax(InvoiceKind::SalesInvoice),
                tax(InvoiceKind::SalesReturn),
                tax(InvoiceKind::PurchaseInvoice),
                tax(InvoiceKind::PurchaseReturn),
                self.store.vouchers(company, VoucherKind::Payment, window),
                self.store.vouchers(company, VoucherKind::Receipt, window),
            )?;

        Ok(VatSummary {
            output_tax,
            output_returns_tax,
            input_tax,
            input_returns_tax,
            expense_input_tax: payments.iter().map(Voucher::recoverable_tax).sum(),
            expense_refund_tax: receipts.iter().map(Voucher::recoverable_tax).sum(),
        })
    }
}
