//! # Token Store Trait
//!
//! Port for keeping the session's bearer token between calls.
//!
//! The token is an opaque string; stores do not inspect or validate it.
//!
//! # Examples
//!
//! ```ignore
//! use menu_finder::infrastructure::persistence::traits::TokenStore;
//!
//! async fn logged_in(store: &impl TokenStore) -> bool {
//!     store.load().await.ok().flatten().is_some()
//! }
//! ```

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for token store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("token storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for token store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Key-value slot holding the session token.
#[async_trait]
pub trait TokenStore: Send + Sync + fmt::Debug {
    /// Returns the stored token, if any.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the storage cannot be read.
    async fn load(&self) -> StoreResult<Option<String>>;

    /// Replaces the stored token.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the storage cannot be written.
    async fn save(&self, token: &str) -> StoreResult<()>;

    /// Removes the stored token. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the storage cannot be written.
    async fn clear(&self) -> StoreResult<()>;
}
