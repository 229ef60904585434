//! Port definition for the HTTP transport.

use serde_json::Value;

use crate::domain::errors::GalleryError;

/// Port for the HTTP transport the gallery service talks through.
///
/// Implementations return the parsed JSON response body on 2xx and a
/// normalized [`GalleryError`] otherwise.
#[async_trait::async_trait]
pub trait TransportPort: Send + Sync {
    /// Performs a GET request.
    async fn get(&self, path: &str) -> Result<Value, GalleryError>;

    /// Performs a POST request with a JSON body.
    async fn post(&self, path: &str, body: Value) -> Result<Value, GalleryError>;

    /// Performs a PUT request with a JSON body.
    async fn put(&self, path: &str, body: Value) -> Result<Value, GalleryError>;

    /// Performs a PATCH request with a JSON body.
    async fn patch(&self, path: &str, body: Value) -> Result<Value, GalleryError>;

    /// Performs a DELETE request.
    async fn delete(&self, path: &str) -> Result<Value, GalleryError>;
}
