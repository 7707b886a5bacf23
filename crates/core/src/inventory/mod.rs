//! Inventory valuation.
//!
//! Quantities are replayed from opening store quantities, invoice lines and
//! store movements; each item is priced at its last purchase price, falling
//! back to the item's own purchase price.

pub mod price;
pub mod types;
pub mod valuator;


pub use price::PriceHistory;
pub use types::{ItemPosition, PriceSource};
pub use valuator::InventoryValuator;
