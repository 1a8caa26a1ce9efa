use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::models::{Cart, RepositoryResult};

/// Trait defining the interface for cart persistence.
///
/// The cart service is the sole mutator of cart contents; everything behind
/// this trait only stores and returns whole carts. Concurrent writers at the
/// persistence boundary resolve last-write-wins.
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Find a cart by session ID
    async fn find_cart(&self, session_id: &str) -> RepositoryResult<Option<Cart>>;

    /// Save a cart (create or update)
    async fn save_cart(&self, cart: Cart) -> RepositoryResult<Cart>;

    /// Delete a cart
    async fn delete_cart(&self, session_id: &str) -> RepositoryResult<()>;

    /// Check if a cart exists for a session
    async fn cart_exists(&self, session_id: &str) -> RepositoryResult<bool>;
}

/// In-memory implementation of [`CartRepository`].
///
/// Uses a thread-safe `HashMap` keyed by session id. The production
/// persistence backend lives outside this crate; this implementation backs
/// tests and single-process deployments.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCartRepository {
    storage: Arc<RwLock<HashMap<String, Cart>>>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of carts currently stored
    pub async fn len(&self) -> usize {
        self.storage.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    #[instrument(skip(self), fields(session_id = %session_id))]
    async fn find_cart(&self, session_id: &str) -> RepositoryResult<Option<Cart>> {
        let storage = self.storage.read().await;
        Ok(storage.get(session_id).cloned())
    }

    #[instrument(skip(self, cart), fields(session_id = %cart.session_id, item_count = cart.items.len()))]
    async fn save_cart(&self, cart: Cart) -> RepositoryResult<Cart> {
        let mut storage = self.storage.write().await;
        storage.insert(cart.session_id.clone(), cart.clone());
        info!("Cart saved");
        Ok(cart)
    }

    #[instrument(skip(self), fields(session_id = %session_id))]
    async fn delete_cart(&self, session_id: &str) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        storage.remove(session_id);
        info!("Cart deleted");
        Ok(())
    }

    #[instrument(skip(self), fields(session_id = %session_id))]
    async fn cart_exists(&self, session_id: &str) -> RepositoryResult<bool> {
        let storage = self.storage.read().await;
        Ok(storage.contains_key(session_id))
    }
}
