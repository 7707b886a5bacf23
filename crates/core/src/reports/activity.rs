//! Revenue and expense activity of a window.
//!
//! Both the income statement and the nominal lines of the audit trial balance
//! are derived from [`PeriodActivity`], so the two reports cannot disagree.

use std::collections::HashMap;

use mizan_shared::types::{CompanyId, ExpenseTypeId};
use rust_decimal::Decimal;

use crate::ledger::{Counterparty, DateWindow, InvoiceAmount, InvoiceKind, Voucher, VoucherKind};
use crate::store::{LedgerStore, StoreError};

/// Name of the bucket collecting expenses without a resolvable type.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Gross activity of one expense bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseLine {
    /// Expense type name.
    pub name: String,
    /// Payments, net of recoverable tax.
    pub paid: Decimal,
    /// Refunds received, net of recoverable tax.
    pub refunded: Decimal,
}

impl ExpenseLine {
    /// Net expense.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.paid - self.refunded
    }
}

/// Invoice column sums of one document kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentTotals {
    /// Subtotals.
    pub subtotal: Decimal,
    /// Discounts.
    pub discount: Decimal,
}

/// Sums feeding the profit and loss lines of a window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodActivity {
    /// Sales invoices.
    pub sales: DocumentTotals,
    /// Sales returns.
    pub sales_returns: DocumentTotals,
    /// Purchase invoices.
    pub purchases: DocumentTotals,
    /// Purchase returns.
    pub purchase_returns: DocumentTotals,
    /// One line per registered expense type, in registration order.
    pub expenses: Vec<ExpenseLine>,
    /// Expenses whose code or type cannot be resolved.
    pub uncategorized: ExpenseLine,
    /// Receipts against revenue codes and unassigned receipts.
    pub other_revenue_received: Decimal,
    /// Payments against revenue codes.
    pub other_revenue_refunded: Decimal,
}

impl PeriodActivity {
    /// Loads the activity of records dated inside `window`.
    pub async fn load<S: LedgerStore + ?Sized>(
        store: &S,
        company: CompanyId,
        window: DateWindow,
    ) -> Result<Self, StoreError> {
        let totals = move |kind| async move {
            let (subtotal, discount) = futures::try_join!(
                store.sum_invoices(company, kind, InvoiceAmount::Subtotal, window),
                store.sum_invoices(company, kind, InvoiceAmount::Discount, window),
            )?;
            Ok::<_, StoreError>(DocumentTotals { subtotal, discount })
        };

        let (sales, sales_returns, purchases, purchase_returns, types, codes, payments, receipts) =
            futures::try_join!(
                totals(InvoiceKind::SalesInvoice),
                totals(InvoiceKind::SalesReturn),
                totals(InvoiceKind::PurchaseInvoice),
                totals(InvoiceKind::PurchaseReturn),
                store.expense_types(company),
                store.expense_codes(company),
                store.vouchers(company, VoucherKind::Payment, window),
                store.vouchers(company, VoucherKind::Receipt, window),
            )?;

        let mut activity = Self {
            sales,
            sales_returns,
            purchases,
            purchase_returns,
            expenses: types
                .iter()
                .map(|t| ExpenseLine {
                    name: t.name.clone(),
                    ..ExpenseLine::default()
                })
                .collect(),
            uncategorized: ExpenseLine {
                name: UNCATEGORIZED.to_string(),
                ..ExpenseLine::default()
            },
            ..Self::default()
        };

        let line_of_type: HashMap<ExpenseTypeId, usize> =
            types.iter().enumerate().map(|(i, t)| (t.id, i)).collect();
        let line_of_code: HashMap<_, usize> = codes
            .iter()
            .filter_map(|code| {
                let line = line_of_type.get(&code.expense_type_id?)?;
                Some((code.id, *line))
            })
            .collect();

        for voucher in &payments {
            match voucher.counterparty {
                Counterparty::ExpenseCode(code) => {
                    activity.expense_line(line_of_code.get(&code)).paid += net_of_tax(voucher);
                }
                Counterparty::Unassigned => activity.uncategorized.paid += voucher.amount,
                Counterparty::RevenueCode(_) => activity.other_revenue_refunded += voucher.amount,
                _ => {}
            }
        }
        for voucher in &receipts {
            match voucher.counterparty {
                Counterparty::ExpenseCode(code) => {
                    activity.expense_line(line_of_code.get(&code)).refunded += net_of_tax(voucher);
                }
                Counterparty::RevenueCode(_) | Counterparty::Unassigned => {
                    activity.other_revenue_received += voucher.amount;
                }
                _ => {}
            }
        }

        Ok(activity)
    }

    fn expense_line(&mut self, line: Option<&usize>) -> &mut ExpenseLine {
        match line {
            Some(&i) => &mut self.expenses[i],
            None => &mut self.uncategorized,
        }
    }

    /// Net other revenue.
    #[must_use]
    pub fn other_revenue(&self) -> Decimal {
        self.other_revenue_received - self.other_revenue_refunded
    }

    /// Sales discounts less those reversed by returns.
    #[must_use]
    pub fn net_sales_discounts(&self) -> Decimal {
        self.sales.discount - self.sales_returns.discount
    }

    /// Purchase discounts less those reversed by returns.
    #[must_use]
    pub fn net_purchase_discounts(&self) -> Decimal {
        self.purchases.discount - self.purchase_returns.discount
    }
}

fn net_of_tax(voucher: &Voucher) -> Decimal {
    voucher.amount - voucher.recoverable_tax()
}
