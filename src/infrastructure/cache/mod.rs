//! In-memory TTL cache for gallery queries.

mod ttl_cache;

pub use ttl_cache::{CacheConfig, CacheStats, DEFAULT_CACHE_CAPACITY, TtlCache};
