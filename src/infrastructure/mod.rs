//! # Infrastructure Layer
//!
//! Adapters to the outside world.
//!
//! - `api`: REST client for restaurants, menus and accounts
//! - `location`: user position providers
//! - `persistence`: session token storage

pub mod api;
pub mod location;
pub mod persistence;
