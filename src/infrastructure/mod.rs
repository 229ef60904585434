//! Infrastructure layer with external service adapters.

/// Read-cache implementation.
pub mod cache;
/// Application configuration.
pub mod config;
/// HTTP transport to the shrine CMS API.
pub mod http;
/// Media ingestion (encoding, picker and clipboard sources).
pub mod media;

pub use cache::{CacheConfig, CacheStats, TtlCache};
pub use config::{AppConfig, CliArgs, Command, LogLevel};
pub use http::HttpTransport;
pub use media::ENCODE_PROGRESS_CEILING;
