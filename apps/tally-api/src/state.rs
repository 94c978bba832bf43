//! Application state for the API server

use std::sync::Arc;

use tally_store::{InMemoryPointsStore, PointsRepository};

use crate::auth::AuthConfig;

/// Shared by every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Receipt id → points
    pub store: Arc<dyn PointsRepository>,
    pub auth: Arc<AuthConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn PointsRepository>, auth: AuthConfig) -> Self {
        Self {
            store,
            auth: Arc::new(auth),
        }
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory(auth: AuthConfig) -> Self {
        Self::new(Arc::new(InMemoryPointsStore::new()), auth)
    }
}
