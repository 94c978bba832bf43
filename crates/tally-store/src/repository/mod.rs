//! # Repository Module
//!
//! The seam between HTTP handlers and wherever points are kept.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Handler                                                                │
//! │       │  store.put(&id, 28)        store.get(&id) → Some(28)           │
//! │       ▼                                                                 │
//! │  dyn PointsRepository                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  InMemoryPointsStore (RwLock<HashMap<String, Points>>)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`InMemoryPointsStore`] - process-lifetime map, no eviction

pub mod memory;

pub use memory::InMemoryPointsStore;

use tally_core::Points;

use crate::error::StoreResult;

/// Receipt id → points mapping.
///
/// Ids are assigned by the caller of [`put`](PointsRepository::put) after
/// scoring; the repository never generates them.
pub trait PointsRepository: Send + Sync {
    /// Inserts the points for `id`, replacing any previous value.
    fn put(&self, id: &str, points: Points) -> StoreResult<()>;

    /// Looks up the points for `id`.
    fn get(&self, id: &str) -> StoreResult<Option<Points>>;

    /// Number of stored receipts.
    fn len(&self) -> StoreResult<usize>;

    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}
