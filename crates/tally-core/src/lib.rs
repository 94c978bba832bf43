//! # tally-core: Pure Rule Engine for Tally
//!
//! This crate scores receipts. It is a pure function of receipt data to a
//! points total, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    tally-api (axum)                             │   │
//! │  │    POST /receipts/process        GET /receipts/{id}/points      │   │
//! │  └───────────────┬─────────────────────────────────┬───────────────┘   │
//! │                  │ calculate_points()              │ get()              │
//! │  ┌───────────────▼─────────────────┐   ┌───────────▼───────────────┐   │
//! │  │     ★ tally-core (THIS CRATE) ★ │   │       tally-store         │   │
//! │  │                                 │   │                           │   │
//! │  │  types  money  rules  error     │   │  id → points              │   │
//! │  └─────────────────────────────────┘   └───────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - The receipt document (Receipt, Item)
//! - [`money`] - Exact decimal amounts as scaled integers
//! - [`rules`] - The four scoring rules and their composition
//! - [`error`] - Parse and calculation errors
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same receipt = same score
//! 2. **No I/O**: no logging sinks, clocks, storage or network here
//! 3. **Integer Money**: amounts are scaled integers, divisibility checks are exact
//! 4. **Partial Failure**: a bad field costs its own rule's points, nothing more
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::{calculate_points, Item, Receipt};
//!
//! let receipt = Receipt {
//!     retailer: "M&M Corner Market".to_string(),
//!     purchase_date: "2022-03-20".to_string(),
//!     purchase_time: "14:33".to_string(),
//!     items: vec![Item::new("Gatorade", "2.25"); 4],
//!     total: "9.00".to_string(),
//! };
//!
//! let card = calculate_points(&receipt);
//! assert_eq!(card.points, 109);
//! assert!(!card.had_error());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod rules;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CalculationError, MoneyParseError};
pub use money::Money;
pub use rules::{calculate_points, PointsBreakdown, RuleOutcome, Scorecard};
pub use types::*;
