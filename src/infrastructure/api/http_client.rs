//! # HTTP Client
//!
//! Thin wrapper over `reqwest` for the restaurant API.
//!
//! Provides:
//! - Base URL resolution for relative endpoint paths
//! - A request timeout
//! - JSON bodies in both directions
//! - Mapping of transport failures and HTTP statuses to [`ApiError`]
//!
//! # Examples
//!
//! ```ignore
//! use menu_finder::infrastructure::api::http_client::HttpClient;
//!
//! let client = HttpClient::new("https://media2.edu.metropolia.fi/restaurant/", 5000)?;
//! let restaurants: serde_json::Value = client.get("api/v1/restaurants").await?;
//! ```

use crate::infrastructure::api::error::{ApiError, ApiResult};
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a client for `base_url` with the given request timeout.
    ///
    /// A trailing slash is appended to the base URL when missing so that
    /// relative paths resolve below it.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if the URL is invalid or the client
    /// cannot be built.
    pub fn new(base_url: &str, timeout_ms: u64) -> ApiResult<Self> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| ApiError::internal(format!("Invalid base URL {}: {}", normalized, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| ApiError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            timeout_ms,
        })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Returns the base URL.
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves an endpoint path against the base URL.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if the path cannot be joined.
    pub fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::internal(format!("Invalid endpoint {}: {}", path, e)))
    }

    /// Resolves `path` and appends each of `params` as one percent-encoded
    /// path segment, so `/`, `#` and `?` in a parameter stay inside it.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if the path cannot be joined.
    pub fn endpoint_with(&self, path: &str, params: &[&str]) -> ApiResult<Url> {
        let mut url = self.endpoint(path)?;
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                ApiError::internal(format!("Base URL cannot carry a path: {}", self.base_url))
            })?;
            segments.pop_if_empty().extend(params);
        }
        Ok(url)
    }

    /// Makes a GET request and deserializes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns a network error if the request fails or the status is not
    /// successful, and `ApiError::Format` if the body cannot be parsed.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.endpoint(path)?;
        self.send(self.client.get(url)).await
    }

    /// Makes a GET request to `path` followed by the encoded `params`.
    ///
    /// # Errors
    ///
    /// Same as [`HttpClient::get`].
    pub async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[&str],
    ) -> ApiResult<T> {
        let url = self.endpoint_with(path, params)?;
        self.send(self.client.get(url)).await
    }

    /// Makes a GET request with a bearer token.
    ///
    /// # Errors
    ///
    /// Same as [`HttpClient::get`]; 401 and 403 map to
    /// `ApiError::Authentication`.
    pub async fn get_with_bearer<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
    ) -> ApiResult<T> {
        let url = self.endpoint(path)?;
        let header = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| ApiError::internal(format!("Invalid token: {}", e)))?;
        self.send(self.client.get(url).header(AUTHORIZATION, header))
            .await
    }

    /// Makes a POST request with a JSON body and deserializes the JSON response.
    ///
    /// # Errors
    ///
    /// Same as [`HttpClient::get`].
    pub async fn post<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let url = self.endpoint(path)?;
        self.send(self.client.post(url).json(body)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await.map_err(|e| self.map_reqwest_error(e))?;
        tracing::debug!(url = %response.url(), status = %response.status(), "api response");
        self.handle_response(response).await
    }

    /// Checks the status and deserializes the JSON body.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> ApiResult<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await.map_err(|e| self.map_reqwest_error(e))?;
            serde_json::from_str(&body)
                .map_err(|e| ApiError::format(format!("Failed to parse response: {}", e)))
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(self.map_status_error(status, &body))
        }
    }

    fn map_reqwest_error(&self, error: reqwest::Error) -> ApiError {
        if error.is_timeout() {
            ApiError::timeout_with_duration("Request timed out", self.timeout_ms)
        } else if error.is_connect() {
            ApiError::network(format!("Connection failed: {}", error))
        } else {
            ApiError::network(format!("HTTP request failed: {}", error))
        }
    }

    fn map_status_error(&self, status: StatusCode, body: &str) -> ApiError {
        let message = error_message(status, body);
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::authentication(message),
            _ => ApiError::status(status.as_u16(), message),
        }
    }
}

/// Prefers the server's `message` field, then the raw body, then the reason phrase.
fn error_message(status: StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string));

    match from_json {
        Some(message) => message,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => status
            .canonical_reason()
            .map_or_else(|| format!("HTTP error: {}", status.as_u16()), str::to_string),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_client_normalizes_base_url() {
        let client = HttpClient::new("https://example.com/restaurant", 5000).unwrap();
        assert_eq!(client.timeout_ms(), 5000);
        assert_eq!(client.base_url().as_str(), "https://example.com/restaurant/");
        assert_eq!(
            client.endpoint("/api/v1/restaurants").unwrap().as_str(),
            "https://example.com/restaurant/api/v1/restaurants"
        );
    }

    #[test]
    fn params_are_encoded_as_single_segments() {
        let client = HttpClient::new("https://example.com/restaurant/", 5000).unwrap();
        assert_eq!(
            client
                .endpoint_with("api/v1/users/available", &["a/b#c?d"])
                .unwrap()
                .as_str(),
            "https://example.com/restaurant/api/v1/users/available/a%2Fb%23c%3Fd"
        );
        assert_eq!(
            client
                .endpoint_with("api/v1/restaurants/weekly", &["abc123", "fi"])
                .unwrap()
                .as_str(),
            "https://example.com/restaurant/api/v1/restaurants/weekly/abc123/fi"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            HttpClient::new("not a url", 1000),
            Err(ApiError::Internal { .. })
        ));
    }

    #[test]
    fn error_message_prefers_json_message() {
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#"{"message":"username taken"}"#),
            "username taken"
        );
        assert_eq!(error_message(StatusCode::BAD_REQUEST, "plain"), "plain");
        assert_eq!(error_message(StatusCode::NOT_FOUND, ""), "Not Found");
    }

    #[test]
    fn status_mapping() {
        let client = HttpClient::new("https://example.com/", 1000).unwrap();
        assert!(matches!(
            client.map_status_error(StatusCode::UNAUTHORIZED, ""),
            ApiError::Authentication { .. }
        ));
        assert!(client.map_status_error(StatusCode::NOT_FOUND, "").is_not_found());
        assert!(
            client
                .map_status_error(StatusCode::BAD_GATEWAY, "")
                .is_server_error()
        );
    }
}
