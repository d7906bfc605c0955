//! # Restaurant API
//!
//! HTTP access to the restaurant service.
//!
//! - [`RestaurantDirectory`], [`MenuProvider`]: ports used by the application layer
//! - [`RestaurantApiClient`]: REST implementation of both
//! - [`AuthClient`]: login, registration and profile
//! - [`HttpClient`]: shared `reqwest` wrapper

pub mod auth_client;
pub mod dto;
pub mod error;
pub mod http_client;
pub mod restaurant_client;
pub mod traits;

pub use auth_client::{AuthClient, AuthError, AuthResult};
pub use dto::{LoginResponse, UserProfile};
pub use error::{ApiError, ApiResult};
pub use http_client::HttpClient;
pub use restaurant_client::{MenuEndpoint, RestaurantApiClient};
pub use traits::{MenuProvider, RestaurantDirectory};
