//! Port definition for the read cache.

use serde_json::Value;

use crate::domain::entities::CacheKey;

/// Port for the TTL read cache.
///
/// Implementations must be thread-safe. Callers receive cloned payloads,
/// never a handle into the stored entry.
#[async_trait::async_trait]
pub trait CacheStorePort: Send + Sync {
    /// Returns the cached payload if present and not expired.
    ///
    /// `None` means "not cached"; a cached empty list comes back as
    /// `Some(Value::Array(vec![]))`, which callers must treat as a hit.
    async fn get(&self, key: &CacheKey) -> Option<Value>;

    /// Stores a payload under the key, overwriting any prior entry.
    async fn set(&self, key: CacheKey, payload: Value);

    /// Removes every entry whose key starts with the given prefix.
    /// Returns the number of entries removed.
    async fn invalidate_prefix(&self, prefix: &str) -> usize;

    /// Removes all entries.
    async fn clear(&self);

    /// Returns the current number of entries.
    fn len(&self) -> usize;

    /// Returns true if the cache is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
