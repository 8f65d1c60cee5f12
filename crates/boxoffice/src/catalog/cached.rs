//! Cached event catalog decorator.
//!
//! Wraps an `EventCatalog` implementation with the cache-aside pattern:
//! per-event lookups check the cache first, fall back to the source on a
//! miss, and write the fetched record back with a TTL so repeat lookups
//! inside the expiry window never touch the source.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use boxoffice_core::catalog::{EventCatalog, Result};
use boxoffice_core::event::Event;
use boxoffice_core::store::{deserialize_event, event_key, serialize_event, Cache};

/// Cached event catalog decorator.
///
/// Cache behavior is deliberately one-sided: the catalog is read-only, so
/// there is no invalidation path. Entries simply age out after the TTL.
/// Missing events are never cached; a repeat lookup of an unknown id asks
/// the source again.
///
/// # Type Parameters
///
/// * `S` - The underlying catalog (authoritative source)
/// * `C` - The cache implementation
pub struct CachedCatalog<S, C>
where
    S: EventCatalog,
    C: Cache,
{
    source: Arc<S>,
    cache: Arc<C>,
    ttl: Duration,
}

impl<S, C> CachedCatalog<S, C>
where
    S: EventCatalog,
    C: Cache,
{
    /// Creates a new cached catalog.
    ///
    /// # Arguments
    ///
    /// * `source` - The authoritative catalog to fall back to
    /// * `cache` - The cache implementation
    /// * `ttl` - Time-to-live for cached events
    pub fn new(source: Arc<S>, cache: Arc<C>, ttl: Duration) -> Self {
        Self { source, cache, ttl }
    }
}

#[async_trait]
impl<S, C> EventCatalog for CachedCatalog<S, C>
where
    S: EventCatalog + 'static,
    C: Cache + 'static,
{
    async fn event_by_id(&self, id: &str) -> Result<Option<Event>> {
        let cache_key = event_key(id);

        // Check cache first
        if let Ok(Some(bytes)) = self.cache.get(&cache_key).await {
            if let Ok(event) = deserialize_event(&bytes) {
                tracing::debug!(event_id = %id, "Cache hit for event");
                return Ok(Some(event));
            }
            // Deserialization failed - treat as cache miss
            tracing::warn!(event_id = %id, "Cached event deserialization failed");
        }

        // Cache miss - fetch from the authoritative source
        tracing::debug!(event_id = %id, "Cache miss for event, fetching from source");
        let event = self.source.event_by_id(id).await?;

        match &event {
            Some(e) => {
                // Populate cache; a write failure degrades to uncached reads
                if let Ok(bytes) = serialize_event(e) {
                    if let Err(err) = self.cache.set(&cache_key, &bytes, Some(self.ttl)).await {
                        tracing::warn!(event_id = %id, error = %err, "Failed to cache event");
                    } else {
                        tracing::debug!(
                            event_id = %id,
                            ttl_seconds = self.ttl.as_secs(),
                            "Cached event"
                        );
                    }
                }
            }
            None => {
                tracing::warn!(event_id = %id, "Event not found");
            }
        }

        Ok(event)
    }

    /// List reads go straight to the source; only per-event lookups are cached.
    async fn all_events(&self) -> Result<Vec<Event>> {
        self.source.all_events().await
    }
}
