//! # In-Memory Token Store
//!
//! In-memory implementation of [`TokenStore`].

use crate::infrastructure::persistence::traits::{StoreResult, TokenStore};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Token store backed by a shared in-process slot.
///
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTokenStore {
    slot: Arc<RwLock<Option<String>>>,
}

impl InMemoryTokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `token`.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Some(token.into()))),
        }
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn load(&self) -> StoreResult<Option<String>> {
        Ok(self.slot.read().await.clone())
    }

    async fn save(&self, token: &str) -> StoreResult<()> {
        *self.slot.write().await = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> StoreResult<()> {
        *self.slot.write().await = None;
        Ok(())
    }
}
