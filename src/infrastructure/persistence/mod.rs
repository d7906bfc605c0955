//! # Persistence Layer
//!
//! Storage for the session token.
//!
//! - [`TokenStore`]: port
//! - `in_memory`: process-local store
//! - `file_token_store`: file-backed store for the CLI

pub mod file_token_store;
pub mod in_memory;
pub mod traits;

pub use file_token_store::FileTokenStore;
pub use in_memory::InMemoryTokenStore;
pub use traits::{StoreError, StoreResult, TokenStore};
