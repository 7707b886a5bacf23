//! Inventory valuation result types.

use mizan_shared::types::ItemId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Where an item's unit price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriceSource {
    /// Most recent purchase invoice line on or before the valuation date.
    LastPurchase,
    /// The item's own fallback purchase price.
    ItemPrice,
    /// No price available, or nothing on hand to price.
    Unpriced,
}

/// Valuation detail of one stocked item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPosition {
    /// Item ID.
    pub item_id: ItemId,
    /// Item code.
    pub code: String,
    /// Item name.
    pub name: String,
    /// Quantity before clamping; negative when more was sold than recorded.
    pub raw_quantity: Decimal,
    /// Quantity valued (never negative).
    pub quantity: Decimal,
    /// Unit price applied.
    pub unit_price: Decimal,
    /// Origin of `unit_price`.
    pub price_source: PriceSource,
    /// `quantity * unit_price`.
    pub value: Decimal,
    /// Whether the raw quantity was negative.
    pub oversold: bool,
}
