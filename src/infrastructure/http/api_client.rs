//! Shrine CMS API HTTP transport.

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::errors::GalleryError;
use crate::domain::ports::TransportPort;

const USER_AGENT: &str = concat!("darshan/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Error body shape the CMS API returns on failures.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

/// reqwest-backed transport for the shrine CMS API.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a transport against the given API base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(base_url: impl Into<String>) -> Result<Self, GalleryError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a transport with an explicit request timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, GalleryError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| GalleryError::unexpected(format!("failed to create HTTP client: {e}")))?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { client, base_url })
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, GalleryError> {
        let url = format!("{}{path}", self.base_url);
        debug!(method = %method, url = %url, "Gallery API request");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, url = %url, "Failed to reach gallery API");
            if e.is_timeout() {
                GalleryError::transport("request timed out")
            } else if e.is_connect() {
                GalleryError::transport("failed to connect to the gallery service")
            } else {
                GalleryError::transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        response.json::<Value>().await.map_err(|e| {
            warn!(error = %e, "Failed to parse gallery API response");
            GalleryError::unexpected(format!("failed to parse response: {e}"))
        })
    }

    async fn handle_error_response(
        status: StatusCode,
        response: reqwest::Response,
    ) -> GalleryError {
        let server_message = match response.json::<ErrorResponse>().await {
            Ok(error) => error.message,
            Err(_) => format!("HTTP {status}"),
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                GalleryError::transport(format!("not authorized: {server_message}"))
            }
            StatusCode::NOT_FOUND => {
                GalleryError::transport(format!("not found: {server_message}"))
            }
            StatusCode::TOO_MANY_REQUESTS => GalleryError::RateLimited { retry_after_ms: 5000 },
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
                GalleryError::transport("the gallery service is temporarily unavailable")
            }
            s if s.is_client_error() => GalleryError::transport(server_message),
            _ => GalleryError::transport(format!("unexpected response: {status} - {server_message}")),
        }
    }
}

#[async_trait]
impl TransportPort for HttpTransport {
    async fn get(&self, path: &str) -> Result<Value, GalleryError> {
        self.request(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, GalleryError> {
        self.request(Method::POST, path, Some(body)).await
    }

    async fn put(&self, path: &str, body: Value) -> Result<Value, GalleryError> {
        self.request(Method::PUT, path, Some(body)).await
    }

    async fn patch(&self, path: &str, body: Value) -> Result<Value, GalleryError> {
        self.request(Method::PATCH, path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<Value, GalleryError> {
        self.request(Method::DELETE, path, None).await
    }
}
