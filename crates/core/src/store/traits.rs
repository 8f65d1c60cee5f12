use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::event::{EventUpdate, Notification};

use super::Result;

/// Trait for basic cache operations.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value in the cache with an optional TTL.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Deletes a value from the cache by key.
    async fn delete(&self, key: &str) -> Result<()>;
}

/// Trait for the FIFO notification queue.
#[async_trait]
pub trait NotificationQueue: Send + Sync {
    /// Pushes a notification onto the queue. Fire-and-forget: the call
    /// returns as soon as the store accepts the item.
    async fn push(&self, notification: &Notification) -> Result<()>;

    /// Pops the oldest queued notification, waiting indefinitely until one
    /// is available.
    ///
    /// Implementations must be cancel-safe so consumers can `select!` this
    /// against a shutdown signal.
    async fn pop(&self) -> Result<Notification>;
}

/// Trait for the event update pub/sub channel.
#[async_trait]
pub trait UpdatePubSub: Send + Sync {
    /// Publishes an update notice to the channel. Delivered only to
    /// subscribers listening at publish time.
    async fn publish(&self, update: &EventUpdate) -> Result<()>;

    /// Subscribes to update notices published after this call.
    async fn subscribe(&self) -> Result<broadcast::Receiver<EventUpdate>>;
}
