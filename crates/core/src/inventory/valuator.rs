//! Point-in-time inventory valuation.

use std::collections::HashMap;

use chrono::NaiveDate;
use futures::future::try_join_all;
use mizan_shared::types::{CompanyId, ItemId};
use rust_decimal::Decimal;

use super::price::PriceHistory;
use super::types::{ItemPosition, PriceSource};
use crate::ledger::{DateWindow, InvoiceKind, InvoiceRecord, StoreMovement, StoreMovementKind};
use crate::store::{LedgerStore, StoreError};

const MOVEMENT_KINDS: [StoreMovementKind; 3] = [
    StoreMovementKind::Receipt,
    StoreMovementKind::Issue,
    StoreMovementKind::Transfer,
];

/// Values stocked items at a date using their last purchase price.
pub struct InventoryValuator<'a, S: LedgerStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: LedgerStore + ?Sized> InventoryValuator<'a, S> {
    /// Creates a valuator reading from `store`.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Total inventory value at `target`.
    ///
    /// With `exclude_target_date` the quantities stop before `target` begins;
    /// prices always include purchases dated on `target`.
    ///
    /// # Errors
    ///
    /// Returns the store error if any read fails.
    pub async fn valuate(
        &self,
        company: CompanyId,
        target: NaiveDate,
        exclude_target_date: bool,
    ) -> Result<Decimal, StoreError> {
        let total = self
            .positions(company, target, exclude_target_date)
            .await?
            .iter()
            .map(|position| position.value)
            .sum();
        tracing::debug!(%company, %target, exclude_target_date, %total, "inventory valuated");
        Ok(total)
    }

    /// Per-item valuation detail at `target`, in the store's item order.
    ///
    /// # Errors
    ///
    /// Returns the store error if any read fails.
    pub async fn positions(
        &self,
        company: CompanyId,
        target: NaiveDate,
        exclude_target_date: bool,
    ) -> Result<Vec<ItemPosition>, StoreError> {
        let priced_until = DateWindow::through(target);
        let counted_until = if exclude_target_date {
            DateWindow::before(target)
        } else {
            priced_until
        };

        let store = self.store;
        let (items, store_items, invoices, movements) = futures::try_join!(
            store.stocked_items(company),
            store.store_items(company),
            try_join_all(
                InvoiceKind::ALL.map(|kind| store.invoices(company, kind, priced_until))
            ),
            try_join_all(
                MOVEMENT_KINDS.map(|kind| store.store_movements(company, kind, counted_until))
            ),
        )?;

        let mut opening: HashMap<ItemId, Decimal> = HashMap::new();
        for store_item in &store_items {
            *opening.entry(store_item.item_id).or_default() += store_item.opening_quantity;
        }

        let by_code = invoice_quantities(invoices.iter().flatten(), counted_until);
        let by_item = movement_quantities(movements.iter().flatten());

        let prices = PriceHistory::from_purchases(
            invoices
                .iter()
                .flatten()
                .filter(|record| record.kind == InvoiceKind::PurchaseInvoice),
        );
        let price_at = crate::ledger::end_of_day(target);

        let positions = items
            .into_iter()
            .map(|item| {
                let raw_quantity = opening.get(&item.id).copied().unwrap_or_default()
                    + by_code.get(item.code.as_str()).copied().unwrap_or_default()
                    + by_item.get(&item.id).copied().unwrap_or_default();
                let oversold = raw_quantity < Decimal::ZERO;
                if oversold {
                    tracing::warn!(
                        %company,
                        item = %item.code,
                        quantity = %raw_quantity,
                        %target,
                        "negative stock clamped to zero"
                    );
                }
                let quantity = raw_quantity.max(Decimal::ZERO);

                let (unit_price, price_source) = if quantity > Decimal::ZERO {
                    match (prices.last_price(&item.code, price_at), item.purchase_price) {
                        (Some(price), _) => (price, PriceSource::LastPurchase),
                        (None, Some(price)) => (price, PriceSource::ItemPrice),
                        (None, None) => (Decimal::ZERO, PriceSource::Unpriced),
                    }
                } else {
                    (Decimal::ZERO, PriceSource::Unpriced)
                };

                ItemPosition {
                    item_id: item.id,
                    code: item.code,
                    name: item.name,
                    raw_quantity,
                    quantity,
                    unit_price,
                    price_source,
                    value: quantity * unit_price,
                    oversold,
                }
            })
            .collect();

        Ok(positions)
    }
}

/// Net quantity per item code from invoice lines inside `window`.
fn invoice_quantities<'r>(
    records: impl Iterator<Item = &'r InvoiceRecord>,
    window: DateWindow,
) -> HashMap<&'r str, Decimal> {
    let mut quantities: HashMap<&str, Decimal> = HashMap::new();
    for record in records.filter(|record| window.contains(record.date)) {
        let sign = if record.kind.adds_stock() {
            Decimal::ONE
        } else {
            Decimal::NEGATIVE_ONE
        };
        for line in &record.lines {
            *quantities.entry(line.item_code.as_str()).or_default() += sign * line.quantity;
        }
    }
    quantities
}

/// Net quantity per item from store movement lines.
fn movement_quantities<'r>(
    movements: impl Iterator<Item = &'r StoreMovement>,
) -> HashMap<ItemId, Decimal> {
    let mut quantities: HashMap<ItemId, Decimal> = HashMap::new();
    for movement in movements {
        let factor = movement.quantity_factor();
        for line in &movement.lines {
            *quantities.entry(line.item_id).or_default() += factor * line.quantity;
        }
    }
    quantities
}
