//! Application state wiring the catalog and store backends together.
//!
//! The state holds trait objects for the three store-backed seams, so the
//! demo and the background units never know which backend is compiled in.
//! Backend selection happens in the feature-gated factory modules below.

use std::sync::Arc;

use tokio::sync::broadcast;

use boxoffice_core::catalog::EventCatalog;
use boxoffice_core::store::{NotificationQueue, UpdatePubSub};

use crate::config::Config;

/// Shared application state.
///
/// Cloning is cheap: all backends sit behind `Arc`s and the shutdown
/// sender is a handle onto one shared channel.
#[derive(Clone)]
pub struct AppState {
    /// Event catalog (cached, wraps the static table).
    pub catalog: Arc<dyn EventCatalog>,
    /// Work queue for ticket notifications.
    pub queue: Arc<dyn NotificationQueue>,
    /// Pub/sub channel for event updates.
    pub updates: Arc<dyn UpdatePubSub>,

    /// Shutdown signal sender for the background units.
    pub shutdown_tx: broadcast::Sender<()>,
}

impl AppState {
    /// Creates a new AppState over the given backends.
    fn build(
        catalog: Arc<dyn EventCatalog>,
        queue: Arc<dyn NotificationQueue>,
        updates: Arc<dyn UpdatePubSub>,
    ) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            catalog,
            queue,
            updates,
            shutdown_tx,
        }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe_shutdown(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Signal all background units to shut down.
    pub fn signal_shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }
}

// ============================================================================
// Factory functions for the store backends
// ============================================================================

#[cfg(feature = "memory")]
mod memory_backend {
    use super::*;
    use crate::catalog::{CachedCatalog, StaticCatalog};
    use crate::store::memory::{MemoryCache, MemoryPubSub, MemoryQueue};

    impl AppState {
        /// Creates AppState with in-process store backends.
        /// Runs without any external dependencies.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let source = Arc::new(StaticCatalog::new());
            let cache = Arc::new(MemoryCache::new(config.cache_max_entries));
            let queue = Arc::new(MemoryQueue::new());
            let updates = Arc::new(MemoryPubSub::new());

            let catalog = Arc::new(CachedCatalog::new(source, cache, config.cache_ttl()));

            Ok(Self::build(catalog, queue, updates))
        }
    }
}

#[cfg(feature = "redis")]
mod redis_backend {
    use super::*;
    use boxoffice_core::store::{event_updates_channel, notification_queue_key};

    use crate::catalog::{CachedCatalog, StaticCatalog};
    use crate::store::redis_impl::{RedisCache, RedisPubSub, RedisQueue};

    impl AppState {
        /// Creates AppState with Redis store backends.
        ///
        /// Each backend owns its own connection: the blocking queue pop and
        /// the pub/sub stream must not contend with cache traffic.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let source = Arc::new(StaticCatalog::new());
            let cache = Arc::new(RedisCache::new(&config.redis_url).await?);
            let queue =
                Arc::new(RedisQueue::new(&config.redis_url, notification_queue_key()).await?);
            let updates =
                Arc::new(RedisPubSub::new(&config.redis_url, event_updates_channel()).await?);

            let catalog = Arc::new(CachedCatalog::new(source, cache, config.cache_ttl()));

            Ok(Self::build(catalog, queue, updates))
        }
    }
}

// ============================================================================
// Test support - provides Default implementation for unit tests
// ============================================================================

#[cfg(all(test, feature = "memory"))]
mod test_support {
    use super::*;
    use crate::catalog::{CachedCatalog, StaticCatalog};
    use crate::store::memory::{MemoryCache, MemoryPubSub, MemoryQueue};

    impl Default for AppState {
        /// Creates an AppState over the in-memory backends for testing,
        /// without reading any environment configuration.
        fn default() -> Self {
            let source = Arc::new(StaticCatalog::new());
            let cache = Arc::new(MemoryCache::new(1_024));
            let catalog = Arc::new(CachedCatalog::new(
                source,
                cache,
                std::time::Duration::from_secs(60),
            ));

            Self::build(
                catalog,
                Arc::new(MemoryQueue::new()),
                Arc::new(MemoryPubSub::new()),
            )
        }
    }
}
