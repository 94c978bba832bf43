//! # Domain Types
//!
//! The receipt document as it arrives from callers.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Receipt                            Item                                │
//! │  ─────────────                      ─────────────                       │
//! │  retailer       "Target"            shortDescription "Mountain Dew"     │
//! │  purchaseDate   "2022-01-01"        price            "6.49"             │
//! │  purchaseTime   "13:01"                                                 │
//! │  items          [Item, ...]                                             │
//! │  total          "35.35"                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every field is kept as the caller sent it. Parsing into dates, times and
//! [`crate::Money`] happens inside the rules, so a bad field only costs the
//! points of the rule that reads it.

use serde::{Deserialize, Serialize};

/// A points total. Never negative.
pub type Points = u32;

// =============================================================================
// Receipt
// =============================================================================

/// A purchase submitted for scoring.
///
/// Missing fields decode as empty strings / an empty item list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Receipt {
    /// Retailer or store name.
    pub retailer: String,

    /// Purchase date, `YYYY-MM-DD`.
    pub purchase_date: String,

    /// Purchase time, 24-hour `HH:MM`.
    pub purchase_time: String,

    /// Line items in receipt order.
    pub items: Vec<Item>,

    /// Total paid, decimal string.
    pub total: String,
}

// =============================================================================
// Item
// =============================================================================

/// A single line on a receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Item {
    /// Short product description.
    pub short_description: String,

    /// Item price, decimal string.
    pub price: String,
}

impl Item {
    /// Convenience constructor, mostly for tests and fixtures.
    pub fn new(short_description: impl Into<String>, price: impl Into<String>) -> Self {
        Item {
            short_description: short_description.into(),
            price: price.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
