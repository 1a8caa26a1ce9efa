use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::models::{PendingCheckout, RepositoryResult};

/// Storage for checkout intents parked across an authentication detour.
///
/// `take` is consuming: once a pending checkout is resumed it is gone, so a
/// stale handle cannot replay the dispatch.
#[async_trait]
pub trait PendingCheckoutStore: Send + Sync {
    /// Park a pending checkout under its handle
    async fn save(&self, pending: PendingCheckout) -> RepositoryResult<()>;

    /// Remove and return the pending checkout for a handle, if present
    async fn take(&self, pending_id: &Uuid) -> RepositoryResult<Option<PendingCheckout>>;

    /// Check whether a handle is currently parked
    async fn contains(&self, pending_id: &Uuid) -> RepositoryResult<bool>;
}

/// In-memory implementation of [`PendingCheckoutStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryPendingCheckoutStore {
    storage: Arc<RwLock<HashMap<Uuid, PendingCheckout>>>,
}

impl InMemoryPendingCheckoutStore {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl PendingCheckoutStore for InMemoryPendingCheckoutStore {
    #[instrument(skip(self, pending), fields(pending_id = %pending.pending_id, item_count = pending.intent.items.len()))]
    async fn save(&self, pending: PendingCheckout) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        storage.insert(pending.pending_id, pending);
        info!("Pending checkout parked");
        Ok(())
    }

    #[instrument(skip(self), fields(pending_id = %pending_id))]
    async fn take(&self, pending_id: &Uuid) -> RepositoryResult<Option<PendingCheckout>> {
        let mut storage = self.storage.write().await;
        Ok(storage.remove(pending_id))
    }

    #[instrument(skip(self), fields(pending_id = %pending_id))]
    async fn contains(&self, pending_id: &Uuid) -> RepositoryResult<bool> {
        let storage = self.storage.read().await;
        Ok(storage.contains_key(pending_id))
    }
}
