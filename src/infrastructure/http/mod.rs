//! HTTP transport adapter.

mod api_client;

pub use api_client::HttpTransport;
