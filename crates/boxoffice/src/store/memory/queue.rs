//! In-memory notification queue implementation.
//!
//! Provides a thread-safe FIFO queue using tokio synchronization
//! primitives. `pop` parks on a [`tokio::sync::Notify`] until a producer
//! pushes, mirroring the blocking right-pop the Redis backend issues.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use boxoffice_core::event::Notification;
use boxoffice_core::store::{NotificationQueue, Result};

/// In-memory notification queue implementation.
///
/// Producers append to the back and the consumer takes from the front,
/// so notifications are delivered in the order they were pushed. Items
/// are removed under the lock, which makes `pop` safe to race against a
/// shutdown signal: a notification is either still queued or already
/// returned, never dropped in between.
#[derive(Debug, Clone)]
pub struct MemoryQueue {
    items: Arc<Mutex<VecDeque<Notification>>>,
    notify: Arc<Notify>,
}

impl MemoryQueue {
    /// Creates a new empty queue.
    pub fn new() -> Self {
        Self {
            items: Arc::new(Mutex::new(VecDeque::new())),
            notify: Arc::new(Notify::new()),
        }
    }
}

impl Default for MemoryQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationQueue for MemoryQueue {
    async fn push(&self, notification: &Notification) -> Result<()> {
        let mut items = self.items.lock().await;
        items.push_back(notification.clone());
        drop(items);

        // Wake one waiting consumer. If none is waiting, Notify stores a
        // permit so the next pop returns without parking.
        self.notify.notify_one();

        Ok(())
    }

    async fn pop(&self) -> Result<Notification> {
        loop {
            {
                let mut items = self.items.lock().await;
                if let Some(notification) = items.pop_front() {
                    return Ok(notification);
                }
            }

            // Queue was empty - park until a producer pushes. The queue is
            // re-checked after waking, so a permit consumed by a cancelled
            // pop never strands an item.
            self.notify.notified().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_push_then_pop() {
        let queue = MemoryQueue::new();
        let notification = Notification::new("Carla", "Your ticket has been reserved!");

        queue.push(&notification).await.unwrap();
        let popped = queue.pop().await.unwrap();

        assert_eq!(popped, notification);
    }

    #[tokio::test]
    async fn test_pop_preserves_push_order() {
        let queue = MemoryQueue::new();
        let first = Notification::new("Carla", "first");
        let second = Notification::new("Diego", "second");
        let third = Notification::new("Elena", "third");

        queue.push(&first).await.unwrap();
        queue.push(&second).await.unwrap();
        queue.push(&third).await.unwrap();

        assert_eq!(queue.pop().await.unwrap(), first);
        assert_eq!(queue.pop().await.unwrap(), second);
        assert_eq!(queue.pop().await.unwrap(), third);
    }

    #[tokio::test]
    async fn test_pop_blocks_until_push() {
        let queue = MemoryQueue::new();

        // Nothing queued yet - pop should stay pending
        let pending = tokio::time::timeout(Duration::from_millis(50), queue.pop()).await;
        assert!(pending.is_err(), "pop should block on an empty queue");

        let notification = Notification::new("Diego", "Remember to bring your laptop.");
        queue.push(&notification).await.unwrap();

        // Now pop should complete promptly
        let popped = tokio::time::timeout(Duration::from_millis(100), queue.pop())
            .await
            .expect("pop should complete after a push")
            .unwrap();
        assert_eq!(popped, notification);
    }

    #[tokio::test]
    async fn test_pop_wakes_waiting_consumer() {
        let queue = MemoryQueue::new();
        let consumer_queue = queue.clone();

        // Start the consumer before anything is queued
        let consumer = tokio::spawn(async move { consumer_queue.pop().await });

        // Give the consumer a moment to park on the empty queue
        tokio::time::sleep(Duration::from_millis(50)).await;

        let notification = Notification::new("Elena", "Doors open at 7pm!");
        queue.push(&notification).await.unwrap();

        let popped = tokio::time::timeout(Duration::from_secs(1), consumer)
            .await
            .expect("consumer should be woken by the push")
            .unwrap()
            .unwrap();
        assert_eq!(popped, notification);
    }

    #[tokio::test]
    async fn test_each_notification_delivered_once() {
        let queue = MemoryQueue::new();

        for i in 0..5 {
            let notification = Notification::new(format!("user-{i}"), "queued");
            queue.push(&notification).await.unwrap();
        }

        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(queue.pop().await.unwrap().user);
        }
        seen.sort();

        assert_eq!(seen, ["user-0", "user-1", "user-2", "user-3", "user-4"]);

        // Queue is drained - a sixth pop must block
        let pending = tokio::time::timeout(Duration::from_millis(50), queue.pop()).await;
        assert!(pending.is_err(), "drained queue should block");
    }

    #[tokio::test]
    async fn test_cancelled_pop_does_not_lose_notifications() {
        let queue = MemoryQueue::new();

        // A pop that gets cancelled while parked
        {
            let pending = tokio::time::timeout(Duration::from_millis(20), queue.pop()).await;
            assert!(pending.is_err());
        }

        let notification = Notification::new("Carla", "still here");
        queue.push(&notification).await.unwrap();

        // The notification must survive the earlier cancellation
        let popped = queue.pop().await.unwrap();
        assert_eq!(popped, notification);
    }
}
