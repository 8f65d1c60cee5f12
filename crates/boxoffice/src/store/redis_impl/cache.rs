//! Redis cache implementation.
//!
//! Backs the cache-aside event lookup. Values are opaque bytes; TTLs are
//! applied with SETEX so entries age out server-side without any local
//! bookkeeping.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use boxoffice_core::store::{Cache, Result};

use super::error::map_redis_error;

/// Redis cache backend using connection manager for pooling.
pub struct RedisCache {
    conn: redis::aio::ConnectionManager,
}

impl RedisCache {
    /// Creates a new Redis cache connection.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379")
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ConnectionFailed` if the connection cannot be established.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let result: Option<Vec<u8>> = conn.get(key).await.map_err(map_redis_error)?;
        Ok(result)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.conn.clone();

        match ttl {
            Some(duration) => {
                let seconds = duration.as_secs().max(1);
                conn.set_ex::<_, _, ()>(key, value, seconds)
                    .await
                    .map_err(map_redis_error)?;
            }
            None => {
                conn.set::<_, _, ()>(key, value)
                    .await
                    .map_err(map_redis_error)?;
            }
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key).await.map_err(map_redis_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::Duration;

    /// Helper to get Redis URL from environment.
    fn redis_url() -> String {
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }

    /// Skip test if Redis not available.
    async fn get_test_cache() -> Option<RedisCache> {
        RedisCache::new(&redis_url()).await.ok()
    }

    /// Generate a unique test key to avoid conflicts.
    fn test_key(suffix: &str) -> String {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        format!("test:redis_cache:{}:{}:{}", std::process::id(), n, suffix)
    }

    #[tokio::test]
    async fn test_redis_set_and_get() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("set_get");
        let value = b"hello world";

        // Set the value
        cache.set(&key, value, None).await.unwrap();

        // Get the value
        let result = cache.get(&key).await.unwrap();
        assert_eq!(result, Some(value.to_vec()));

        // Clean up
        cache.delete(&key).await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_get_nonexistent() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("nonexistent");
        let result = cache.get(&key).await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_redis_delete() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("delete");
        let value = b"to be deleted";

        // Set the value
        cache.set(&key, value, None).await.unwrap();

        // Verify it exists
        assert!(cache.get(&key).await.unwrap().is_some());

        // Delete it
        cache.delete(&key).await.unwrap();

        // Verify it's gone
        assert!(cache.get(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_redis_ttl() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("ttl");
        let value = b"expiring value";

        // Set with 1 second TTL
        cache
            .set(&key, value, Some(Duration::from_secs(1)))
            .await
            .unwrap();

        // Verify it exists immediately
        assert!(cache.get(&key).await.unwrap().is_some());

        // Wait for expiration
        tokio::time::sleep(Duration::from_millis(1500)).await;

        // Verify it's expired
        assert!(cache.get(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_redis_sub_second_ttl_rounds_up() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("short_ttl");

        // SETEX takes whole seconds; a sub-second TTL must still expire
        // rather than persist forever.
        cache
            .set(&key, b"value", Some(Duration::from_millis(100)))
            .await
            .unwrap();

        assert!(cache.get(&key).await.unwrap().is_some());

        // Clean up rather than waiting out the rounded-up TTL
        cache.delete(&key).await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_overwrite() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("overwrite");

        // Set initial value
        cache.set(&key, b"initial", None).await.unwrap();
        assert_eq!(cache.get(&key).await.unwrap(), Some(b"initial".to_vec()));

        // Overwrite with new value
        cache.set(&key, b"updated", None).await.unwrap();
        assert_eq!(cache.get(&key).await.unwrap(), Some(b"updated".to_vec()));

        // Clean up
        cache.delete(&key).await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_binary_data() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("binary");
        let value: Vec<u8> = (0..=255).collect();

        // Set binary data
        cache.set(&key, &value, None).await.unwrap();

        // Get and verify
        let result = cache.get(&key).await.unwrap();
        assert_eq!(result, Some(value));

        // Clean up
        cache.delete(&key).await.unwrap();
    }
}
