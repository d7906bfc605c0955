//! # Account Client
//!
//! Login, registration and profile lookup against the restaurant API.
//!
//! The bearer token returned by login is kept in a [`TokenStore`]; every
//! authenticated call reads it from there. A 401 or 403 on the current-user
//! endpoint clears the stored token.
//!
//! # Examples
//!
//! ```ignore
//! use menu_finder::infrastructure::api::auth_client::AuthClient;
//! use menu_finder::infrastructure::persistence::InMemoryTokenStore;
//! use std::sync::Arc;
//!
//! let auth = AuthClient::new(http, Arc::new(InMemoryTokenStore::new()));
//! auth.login("alice", "secret").await?;
//! let me = auth.current_user().await?;
//! ```

use crate::infrastructure::api::dto::{
    AvailabilityResponse, CreateUserRequest, CreateUserResponse, LoginRequest, LoginResponse,
    UserProfile,
};
use crate::infrastructure::api::error::ApiError;
use crate::infrastructure::api::http_client::HttpClient;
use crate::infrastructure::persistence::traits::{StoreError, TokenStore};
use std::sync::Arc;
use thiserror::Error;

/// Error type for account operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The token store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// No token is stored.
    #[error("no auth token found")]
    NotLoggedIn,

    /// A required field was blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

impl AuthError {
    /// Returns true if the server rejected the credentials or token.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api(ApiError::Authentication { .. }))
    }
}

/// Result type for account operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Client for the account endpoints.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: HttpClient,
    tokens: Arc<dyn TokenStore>,
}

impl AuthClient {
    /// Creates a client storing tokens in `tokens`.
    #[must_use]
    pub fn new(http: HttpClient, tokens: Arc<dyn TokenStore>) -> Self {
        Self { http, tokens }
    }

    /// Logs in and stores the returned token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Api` with the server's message when the
    /// credentials are rejected.
    pub async fn login(&self, username: &str, password: &str) -> AuthResult<LoginResponse> {
        let response: LoginResponse = self
            .http
            .post("api/v1/auth/login", &LoginRequest { username, password })
            .await?;

        match response.token.as_deref() {
            Some(token) => {
                self.tokens.save(token).await?;
                tracing::info!(username, "logged in");
            }
            None => tracing::warn!(username, "login response carried no token"),
        }
        Ok(response)
    }

    /// Forgets the stored token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if the token cannot be removed.
    pub async fn logout(&self) -> AuthResult<()> {
        self.tokens.clear().await?;
        Ok(())
    }

    /// Returns true if a token is stored.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if the store cannot be read.
    pub async fn is_logged_in(&self) -> AuthResult<bool> {
        Ok(self.tokens.load().await?.is_some())
    }

    /// Checks whether `username` is free.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Api` if the request fails.
    pub async fn check_availability(&self, username: &str) -> AuthResult<bool> {
        let response: AvailabilityResponse = self
            .http
            .get_with_params("api/v1/users/available", &[username])
            .await?;
        Ok(response.available)
    }

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Api` with the server's message on failure.
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> AuthResult<CreateUserResponse> {
        let response = self
            .http
            .post(
                "api/v1/users",
                &CreateUserRequest {
                    username,
                    password,
                    email,
                },
            )
            .await?;
        Ok(response)
    }

    /// Creates an account and logs into it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` if any field is blank, otherwise the
    /// errors of [`AuthClient::create_user`] and [`AuthClient::login`].
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> AuthResult<LoginResponse> {
        for (field, value) in [("username", username), ("email", email), ("password", password)] {
            if value.trim().is_empty() {
                return Err(AuthError::MissingField(field));
            }
        }
        self.create_user(username, password, email).await?;
        self.login(username, password).await
    }

    /// Fetches the profile of the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotLoggedIn` without a token. A rejected token is
    /// cleared from the store and reported as `AuthError::Api`.
    pub async fn current_user(&self) -> AuthResult<UserProfile> {
        let token = self.tokens.load().await?.ok_or(AuthError::NotLoggedIn)?;

        match self
            .http
            .get_with_bearer::<UserProfile>("api/v1/users/token", &token)
            .await
        {
            Ok(user) => Ok(user),
            Err(e @ ApiError::Authentication { .. }) => {
                tracing::warn!(error = %e, "stored token rejected, logging out");
                self.tokens.clear().await?;
                Err(e.into())
            }
            Err(e) => Err(e.into()),
        }
    }
}
