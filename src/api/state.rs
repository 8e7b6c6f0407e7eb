use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::services::snapshot::Snapshot;

/// Shared application state
///
/// The current snapshot sits behind an `RwLock` so a reload can swap it
/// atomically; readers clone the inner `Arc` and keep serving from their
/// copy even while a reload is in flight.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    snapshot: Arc<RwLock<Arc<Snapshot>>>,
}

impl AppState {
    /// Creates state around the snapshot produced by the initial load
    pub fn new(config: Config, snapshot: Snapshot) -> Self {
        Self {
            config: Arc::new(config),
            snapshot: Arc::new(RwLock::new(Arc::new(snapshot))),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current snapshot
    pub async fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.read().await.clone()
    }

    /// Installs the snapshot produced by a successful reload
    pub async fn replace_snapshot(&self, snapshot: Snapshot) {
        *self.snapshot.write().await = Arc::new(snapshot);
    }
}
