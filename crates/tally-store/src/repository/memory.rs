//! # In-Memory Points Store
//!
//! ## Thread Safety
//! The map is wrapped in `RwLock` because:
//! 1. Handlers run on any runtime worker thread
//! 2. Each `put` is a single insert under the write lock, so readers never
//!    observe a partial write
//! 3. Lookups only take the read lock and can run in parallel
//!
//! Nothing is persisted: the mapping lives as long as the process.

use std::collections::HashMap;
use std::sync::RwLock;

use tally_core::Points;
use tracing::debug;

use super::PointsRepository;
use crate::error::StoreResult;

/// Process-lifetime receipt points.
#[derive(Debug, Default)]
pub struct InMemoryPointsStore {
    points: RwLock<HashMap<String, Points>>,
}

impl InMemoryPointsStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PointsRepository for InMemoryPointsStore {
    fn put(&self, id: &str, points: Points) -> StoreResult<()> {
        let mut map = self.points.write()?;
        if map.insert(id.to_string(), points).is_some() {
            debug!(id, points, "Replaced stored points");
        }
        Ok(())
    }

    fn get(&self, id: &str) -> StoreResult<Option<Points>> {
        let map = self.points.read()?;
        Ok(map.get(id).copied())
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.points.read()?.len())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
