//! Last-purchase-price lookup.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::ledger::InvoiceRecord;

/// Purchase prices indexed by item code and invoice date.
///
/// Each purchase invoice contributes at most one price per item code: the unit
/// price of its first line carrying that code.
#[derive(Debug, Default)]
pub struct PriceHistory {
    by_code: HashMap<String, Vec<(DateTime<Utc>, Decimal)>>,
}

impl PriceHistory {
    /// Indexes purchase invoices. Input order breaks ties between invoices
    /// sharing a timestamp; later entries win.
    #[must_use]
    pub fn from_purchases<'r>(purchases: impl IntoIterator<Item = &'r InvoiceRecord>) -> Self {
        let mut by_code: HashMap<String, Vec<(DateTime<Utc>, Decimal)>> = HashMap::new();

        for invoice in purchases {
            let mut seen: Vec<&str> = Vec::new();
            for line in &invoice.lines {
                if seen.contains(&line.item_code.as_str()) {
                    continue;
                }
                seen.push(&line.item_code);
                by_code
                    .entry(line.item_code.clone())
                    .or_default()
                    .push((invoice.date, line.unit_price));
            }
        }

        for prices in by_code.values_mut() {
            prices.sort_by_key(|(date, _)| *date);
        }

        Self { by_code }
    }

    /// Unit price on the most recent purchase of `code` dated at or before `at`.
    #[must_use]
    pub fn last_price(&self, code: &str, at: DateTime<Utc>) -> Option<Decimal> {
        let prices = self.by_code.get(code)?;
        let idx = prices.partition_point(|(date, _)| *date <= at);
        idx.checked_sub(1).map(|i| prices[i].1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{InvoiceKind, InvoiceLine, PaymentMethod};
    use chrono::TimeZone;
    use mizan_shared::types::{CompanyId, RecordId};
    use rust_decimal_macros::dec;

    fn purchase(day: u32, lines: &[(&str, Decimal)]) -> InvoiceRecord {
        InvoiceRecord {
            id: RecordId::new(),
            company_id: CompanyId::new(),
            kind: InvoiceKind::PurchaseInvoice,
            date: Utc.with_ymd_and_hms(2024, 1, day, 10, 0, 0).unwrap(),
            party_id: None,
            payment_method: PaymentMethod::Credit,
            payment_target: None,
            split: None,
            subtotal: Decimal::ZERO,
            discount: Decimal::ZERO,
            tax: Decimal::ZERO,
            net: Decimal::ZERO,
            lines: lines
                .iter()
                .map(|(code, price)| InvoiceLine {
                    item_code: (*code).to_string(),
                    quantity: Decimal::ONE,
                    unit_price: *price,
                })
                .collect(),
        }
    }

    #[test]
    fn test_last_price_picks_latest_purchase_on_or_before_date() {
        let history = PriceHistory::from_purchases(&[
            purchase(5, &[("A", dec!(10))]),
            purchase(20, &[("A", dec!(12))]),
        ]);

        let at = |day| Utc.with_ymd_and_hms(2024, 1, day, 23, 0, 0).unwrap();
        assert_eq!(history.last_price("A", at(4)), None);
        assert_eq!(history.last_price("A", at(5)), Some(dec!(10)));
        assert_eq!(history.last_price("A", at(19)), Some(dec!(10)));
        assert_eq!(history.last_price("A", at(20)), Some(dec!(12)));
    }

    #[test]
    fn test_first_matching_line_wins_within_invoice() {
        let history = PriceHistory::from_purchases(&[purchase(
            5,
            &[("A", dec!(10)), ("B", dec!(3)), ("A", dec!(99))],
        )]);
        let at = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();

        assert_eq!(history.last_price("A", at), Some(dec!(10)));
        assert_eq!(history.last_price("B", at), Some(dec!(3)));
        assert_eq!(history.last_price("C", at), None);
    }

    #[test]
    fn test_same_timestamp_later_invoice_wins() {
        let history = PriceHistory::from_purchases(&[
            purchase(5, &[("A", dec!(10))]),
            purchase(5, &[("A", dec!(11))]),
        ]);
        let at = Utc.with_ymd_and_hms(2024, 1, 6, 0, 0, 0).unwrap();

        assert_eq!(history.last_price("A", at), Some(dec!(11)));
    }
}
