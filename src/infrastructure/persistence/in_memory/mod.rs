//! # In-Memory Stores
//!
//! Process-local implementations, used by tests and short-lived sessions.

pub mod token_store;

pub use token_store::InMemoryTokenStore;
