//! In-memory cache implementation with LRU eviction.
//!
//! Provides a thread-safe in-memory cache with TTL support using
//! tokio synchronization primitives and LRU eviction policy.
//!
//! This implementation mirrors the Redis cache behavior: expired entries
//! answer as absent, just like a key that aged out of Redis.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;

use boxoffice_core::store::{Cache, Result};

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    /// Creates a new cache entry with optional TTL.
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self { value, expires_at }
    }

    /// Returns true if this entry has expired.
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() > exp)
    }
}

/// In-memory cache implementation with LRU eviction.
///
/// Thread-safe cache using `Arc<RwLock<LruCache>>` for concurrent access.
/// Supports TTL with lazy expiration (entries are cleaned up on access).
/// Uses LRU eviction to limit memory usage when max_entries is reached.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
}

impl MemoryCache {
    /// Creates a new in-memory cache with LRU eviction.
    ///
    /// # Arguments
    ///
    /// * `max_entries` - Maximum number of entries before LRU eviction kicks in.
    ///
    /// # Panics
    ///
    /// Panics if `max_entries` is 0.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).expect("max_entries must be > 0");
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut store = self.store.write().await;

        match store.get(key) {
            Some(entry) if entry.is_expired() => {
                // Entry exists but is expired - return None
                // Note: We do lazy cleanup, so we don't remove it here.
                // A production implementation might want to spawn a cleanup task.
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut store = self.store.write().await;
        let entry = CacheEntry::new(value.to_vec(), ttl);
        store.put(key.to_string(), entry);

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut store = self.store.write().await;
        store.pop(key);

        Ok(())
    }
}
