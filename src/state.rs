use std::sync::Arc;

use crate::store::ArtifactStore;

/// Shared application state
///
/// The artifact store is immutable after startup, so handlers share it
/// through an `Arc` without any lock.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ArtifactStore>,
}

impl AppState {
    /// Wraps a loaded artifact store for sharing across handlers
    pub fn new(store: ArtifactStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
