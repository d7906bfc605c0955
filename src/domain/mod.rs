//! # Domain Layer
//!
//! Restaurants, menus and the pure computations over them.

pub mod entities;
pub mod services;
pub mod value_objects;
