//! In-memory pub/sub implementation.
//!
//! Provides a thread-safe pub/sub mechanism for event updates using
//! a tokio broadcast channel.

use async_trait::async_trait;
use tokio::sync::broadcast;

use boxoffice_core::event::EventUpdate;
use boxoffice_core::store::{Result, UpdatePubSub};

/// Channel capacity for pub/sub messages.
const CHANNEL_CAPACITY: usize = 100;

/// In-memory pub/sub implementation.
///
/// Thread-safe pub/sub using a tokio broadcast channel. All updates flow
/// through a single channel, matching the single Redis channel the
/// application publishes on. Subscribers only observe updates published
/// after they subscribed.
#[derive(Debug, Clone)]
pub struct MemoryPubSub {
    sender: broadcast::Sender<EventUpdate>,
}

impl MemoryPubSub {
    /// Creates a new pub/sub instance with no subscribers.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }
}

impl Default for MemoryPubSub {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpdatePubSub for MemoryPubSub {
    async fn publish(&self, update: &EventUpdate) -> Result<()> {
        // Send the update. If there are no receivers, that's fine -
        // it just means no one is subscribed yet.
        // We clone the update since broadcast::send takes ownership.
        let _ = self.sender.send(update.clone());

        Ok(())
    }

    async fn subscribe(&self) -> Result<broadcast::Receiver<EventUpdate>> {
        Ok(self.sender.subscribe())
    }
}
