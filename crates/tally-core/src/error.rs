//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── MoneyParseError   - A decimal string is not a money amount        │
//! │  └── CalculationError  - A sub-rule could not parse its input          │
//! │                                                                         │
//! │  tally-api errors (in app)                                             │
//! │  └── ApiError          - What the HTTP caller sees                     │
//! │                                                                         │
//! │  CalculationError is NEVER converted into ApiError: it only flags      │
//! │  the receipt and is logged. The caller still gets a 200.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Money Parse Error
// =============================================================================

/// Failure to read a decimal string as [`crate::Money`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    /// Nothing to parse.
    #[error("amount is empty")]
    Empty,

    /// Not of the form `[-+]D[.D][e[-+]D]`.
    #[error("'{0}' is not a decimal amount")]
    InvalidFormat(String),

    /// More than 37 significant digits or 18 decimal places.
    #[error("'{0}' is out of range")]
    OutOfRange(String),
}

// =============================================================================
// Calculation Error
// =============================================================================

/// A sub-rule could not parse the field it scores.
///
/// The sub-rule contributes 0 for the affected part and the receipt is
/// flagged; the other sub-rules are unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculationError {
    /// `total` is not a money amount.
    #[error("invalid total '{value}': {source}")]
    InvalidTotal {
        value: String,
        #[source]
        source: MoneyParseError,
    },

    /// An item price is not a money amount.
    #[error("invalid price '{value}' for item {index}: {source}")]
    InvalidItemPrice {
        index: usize,
        value: String,
        #[source]
        source: MoneyParseError,
    },

    /// `purchaseDate` is not `YYYY-MM-DD`.
    #[error("invalid purchase date '{value}': {reason}")]
    InvalidPurchaseDate { value: String, reason: String },

    /// `purchaseTime` is not `HH:MM`.
    #[error("invalid purchase time '{value}': {reason}")]
    InvalidPurchaseTime { value: String, reason: String },
}

impl CalculationError {
    /// Name of the receipt field that failed to parse.
    pub fn field(&self) -> &'static str {
        match self {
            CalculationError::InvalidTotal { .. } => "total",
            CalculationError::InvalidItemPrice { .. } => "items.price",
            CalculationError::InvalidPurchaseDate { .. } => "purchaseDate",
            CalculationError::InvalidPurchaseTime { .. } => "purchaseTime",
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
