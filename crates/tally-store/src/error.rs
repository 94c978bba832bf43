//! # Store Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  std::sync::PoisonError                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError::Internal (tally-api) → 500                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A missing id is not an error: `get` returns `Ok(None)`.

use std::sync::PoisonError;

use thiserror::Error;

/// Store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A writer panicked while holding the lock.
    #[error("points store lock poisoned")]
    LockPoisoned,
}

impl<T> From<PoisonError<T>> for StoreError {
    fn from(_: PoisonError<T>) -> Self {
        StoreError::LockPoisoned
    }
}

/// Convenience type alias for store results.
pub type StoreResult<T> = Result<T, StoreError>;
