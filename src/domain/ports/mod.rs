mod cache_store_port;
mod transport_port;

pub use cache_store_port::CacheStorePort;
pub use transport_port::TransportPort;
