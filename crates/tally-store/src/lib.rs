//! # tally-store: Receipt Points Store for Tally
//!
//! Keeps the identifier → points mapping produced by scoring receipts.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Data Flow                                  │
//! │                                                                         │
//! │  POST /receipts/process ──► calculate_points() ──► put(id, points)     │
//! │                                                        │                │
//! │  GET /receipts/{id}/points ─────────────────────► get(id)              │
//! │                                                        │                │
//! │  ┌─────────────────────────────────────────────────────▼───────────┐   │
//! │  │                     tally-store (THIS CRATE)                    │   │
//! │  │   PointsRepository (trait) ◄── InMemoryPointsStore              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`repository`] - The repository trait and its in-memory implementation
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! use tally_store::{InMemoryPointsStore, PointsRepository};
//!
//! let store = InMemoryPointsStore::new();
//! store.put("7fb1377b-b223-49d9-a31a-5a02701dd310", 28).unwrap();
//!
//! assert_eq!(store.get("7fb1377b-b223-49d9-a31a-5a02701dd310").unwrap(), Some(28));
//! assert_eq!(store.get("unknown").unwrap(), None);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use repository::{InMemoryPointsStore, PointsRepository};
