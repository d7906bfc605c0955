//! # Use Cases
//!
//! - [`LoadSessionUseCase`]: builds the initial view state

pub mod load_session;

pub use load_session::LoadSessionUseCase;
