//! In-memory TTL cache for gallery read queries.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use lru::LruCache;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::domain::entities::{CacheKey, EndpointFamily};
use crate::domain::ports::CacheStorePort;

/// Default maximum number of cached queries.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Cache tuning knobs, loadable from the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of entries held at once.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// TTL in seconds for list/browse queries.
    #[serde(default = "default_list_ttl_secs")]
    pub list_ttl_secs: u64,
    /// TTL in seconds for aggregate/statistics queries.
    #[serde(default = "default_stats_ttl_secs")]
    pub stats_ttl_secs: u64,
}

fn default_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

fn default_list_ttl_secs() -> u64 {
    EndpointFamily::PublicGallery.default_ttl().as_secs()
}

fn default_stats_ttl_secs() -> u64 {
    EndpointFamily::GalleryStats.default_ttl().as_secs()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            list_ttl_secs: default_list_ttl_secs(),
            stats_ttl_secs: default_stats_ttl_secs(),
        }
    }
}

impl CacheConfig {
    /// Returns the TTL applied to entries of the given family.
    #[must_use]
    pub const fn ttl_for(&self, family: EndpointFamily) -> Duration {
        match family {
            EndpointFamily::PublicGallery | EndpointFamily::AdminGallery => {
                Duration::from_secs(self.list_ttl_secs)
            }
            EndpointFamily::GalleryStats => Duration::from_secs(self.stats_ttl_secs),
        }
    }
}

/// One stored payload with its storage timestamp.
///
/// Entries never leave the store; callers get a cloned payload.
struct CacheEntry {
    payload: Value,
    stored_at: Instant,
}

/// In-memory TTL cache with a capacity bound and prefix invalidation.
///
/// Expiry is lazy: an entry past its family TTL is popped on the next
/// read and reported as absent.
pub struct TtlCache {
    entries: Arc<RwLock<LruCache<CacheKey, CacheEntry>>>,
    config: CacheConfig,
    hits: std::sync::atomic::AtomicU64,
    misses: std::sync::atomic::AtomicU64,
}

impl TtlCache {
    /// Creates a cache with the given configuration.
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        let cap = NonZeroUsize::new(config.capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Arc::new(RwLock::new(LruCache::new(cap))),
            config,
            hits: std::sync::atomic::AtomicU64::new(0),
            misses: std::sync::atomic::AtomicU64::new(0),
        }
    }

    /// Creates a cache with default capacity and TTLs.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(CacheConfig::default())
    }

    /// Returns cache statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(std::sync::atomic::Ordering::Relaxed);
        let misses = self.misses.load(std::sync::atomic::Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        CacheStats {
            hits,
            misses,
            hit_rate,
            size: self.len(),
        }
    }
}

impl Default for TtlCache {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Statistics about cache performance.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses, expiries included.
    pub misses: u64,
    /// Hit rate as a percentage.
    pub hit_rate: f64,
    /// Current number of entries.
    pub size: usize,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cache: {} entries, {:.1}% hit rate ({} hits, {} misses)",
            self.size, self.hit_rate, self.hits, self.misses
        )
    }
}

#[async_trait::async_trait]
impl CacheStorePort for TtlCache {
    async fn get(&self, key: &CacheKey) -> Option<Value> {
        let ttl = self.config.ttl_for(key.family());
        let mut entries = self.entries.write().await;

        if let Some(entry) = entries.get(key) {
            if entry.stored_at.elapsed() <= ttl {
                self.hits.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                trace!(key = %key, "Cache hit");
                return Some(entry.payload.clone());
            }
        } else {
            self.misses
                .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            trace!(key = %key, "Cache miss");
            return None;
        }

        // Present but past its TTL: treat as absent.
        entries.pop(key);
        self.misses
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        trace!(key = %key, "Cache entry expired");
        None
    }

    async fn set(&self, key: CacheKey, payload: Value) {
        let mut entries = self.entries.write().await;
        debug!(key = %key, "Storing cache entry");
        entries.put(
            key,
            CacheEntry {
                payload,
                stored_at: Instant::now(),
            },
        );
    }

    async fn invalidate_prefix(&self, prefix: &str) -> usize {
        let mut entries = self.entries.write().await;
        let doomed: Vec<CacheKey> = entries
            .iter()
            .filter(|(key, _)| key.has_prefix(prefix))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &doomed {
            entries.pop(key);
        }
        if !doomed.is_empty() {
            debug!(prefix = prefix, count = doomed.len(), "Invalidated cache entries");
        }
        doomed.len()
    }

    async fn clear(&self) {
        let mut entries = self.entries.write().await;
        entries.clear();
        debug!("Cleared gallery cache");
    }

    fn len(&self) -> usize {
        // Best-effort estimate; a concurrent writer may skew it slightly.
        let entries = self.entries.try_read();
        entries.map(|e| e.len()).unwrap_or(0)
    }
}
