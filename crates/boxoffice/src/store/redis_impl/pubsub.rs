//! Redis pub/sub implementation.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::StreamExt;
use redis::AsyncCommands;
use tokio::sync::{broadcast, RwLock};

use boxoffice_core::event::EventUpdate;
use boxoffice_core::store::{
    deserialize_update, serialize_update, Result, StoreError, UpdatePubSub,
};

use super::error::map_redis_error;

/// Redis pub/sub backend for live event update broadcasting.
///
/// All updates travel over one fixed channel. The first subscriber spawns
/// a fan-out task holding a dedicated pub/sub connection; later
/// subscribers share its broadcast channel.
pub struct RedisPubSub {
    client: redis::Client,
    channel: String,
    subscription: Arc<RwLock<Option<broadcast::Sender<EventUpdate>>>>,
}

impl RedisPubSub {
    /// Creates a new Redis pub/sub connection over the given channel.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379")
    /// * `channel` - Channel name updates are published on
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ConnectionFailed` if the connection cannot be established.
    pub async fn new(url: &str, channel: impl Into<String>) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;

        // Verify connection by getting a connection
        let _ = client
            .get_multiplexed_async_connection()
            .await
            .map_err(map_redis_error)?;

        Ok(Self {
            client,
            channel: channel.into(),
            subscription: Arc::new(RwLock::new(None)),
        })
    }
}

#[async_trait]
impl UpdatePubSub for RedisPubSub {
    async fn publish(&self, update: &EventUpdate) -> Result<()> {
        // Serialize the update to JSON
        let payload =
            serialize_update(update).map_err(|e| StoreError::Serialization(e.to_string()))?;

        // Get a connection and publish
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(map_redis_error)?;

        conn.publish::<_, _, ()>(&self.channel, &payload)
            .await
            .map_err(|e| StoreError::PublishFailed(e.to_string()))?;

        Ok(())
    }

    async fn subscribe(&self) -> Result<broadcast::Receiver<EventUpdate>> {
        // Check if the fan-out task is already running
        {
            let subscription = self.subscription.read().await;
            if let Some(sender) = subscription.as_ref() {
                return Ok(sender.subscribe());
            }
        }

        // Create a new broadcast channel
        let (tx, rx) = broadcast::channel(100);

        // Store the sender
        {
            let mut subscription = self.subscription.write().await;
            // Double-check in case another task created it
            if let Some(sender) = subscription.as_ref() {
                return Ok(sender.subscribe());
            }
            *subscription = Some(tx.clone());
        }

        // Spawn a background task to handle the Redis subscription
        let channel = self.channel.clone();
        let client = self.client.clone();
        let subscription = Arc::clone(&self.subscription);

        tokio::spawn(async move {
            if let Err(e) =
                run_subscription_loop(client, channel.clone(), tx, subscription).await
            {
                tracing::error!("Redis subscription error on channel {}: {}", channel, e);
            }
        });

        Ok(rx)
    }
}

/// Runs the Redis subscription loop, forwarding messages to the broadcast channel.
async fn run_subscription_loop(
    client: redis::Client,
    channel: String,
    tx: broadcast::Sender<EventUpdate>,
    subscription: Arc<RwLock<Option<broadcast::Sender<EventUpdate>>>>,
) -> Result<()> {
    let mut pubsub = client.get_async_pubsub().await.map_err(map_redis_error)?;

    pubsub.subscribe(&channel).await.map_err(map_redis_error)?;

    // on_message yields only message frames; subscription confirmations
    // never reach this stream.
    let mut stream = pubsub.on_message();

    loop {
        match stream.next().await {
            Some(msg) => {
                let payload: String = msg.get_payload().map_err(map_redis_error)?;

                match deserialize_update(payload.as_bytes()) {
                    Ok(update) => {
                        // Send to broadcast channel
                        // Ignore send errors (no receivers)
                        let _ = tx.send(update);
                    }
                    Err(e) => {
                        tracing::warn!(
                            "Failed to deserialize event update: {} - payload: {}",
                            e,
                            payload
                        );
                    }
                }
            }
            None => {
                // Stream ended, clean up subscription
                tracing::info!("Redis subscription stream ended for channel {}", channel);
                break;
            }
        }
    }

    // Clean up subscription on exit
    let mut sub = subscription.write().await;
    *sub = None;

    Ok(())
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

    /// Generate a unique channel name so concurrent tests never cross-talk.
    fn test_channel(suffix: &str) -> String {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        format!("test:redis_pubsub:{}:{}:{}", std::process::id(), n, suffix)
    }

    /// Skip test if Redis not available.
    async fn get_test_pubsub(channel: &str) -> Option<RedisPubSub> {
        RedisPubSub::new(&redis_url(), channel).await.ok()
    }

    #[tokio::test]
    async fn test_redis_pubsub_creation() {
        let result = RedisPubSub::new(&redis_url(), test_channel("creation")).await;
        if result.is_err() {
            eprintln!("Skipping test: Redis not available");
            return;
        }
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_redis_pubsub_publish_and_receive() {
        let channel = test_channel("pub_recv");
        let Some(pubsub) = get_test_pubsub(&channel).await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let update = EventUpdate::new("4", "New keynote speaker confirmed!");

        // Subscribe first
        let mut rx = pubsub.subscribe().await.unwrap();

        // Give the subscription time to establish
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Publish update
        pubsub.publish(&update).await.unwrap();

        // Receive with timeout
        let received = tokio::time::timeout(Duration::from_secs(2), rx.recv()).await;

        match received {
            Ok(Ok(received_update)) => {
                assert_eq!(received_update, update);
            }
            Ok(Err(e)) => {
                panic!("Receive error: {:?}", e);
            }
            Err(_) => {
                panic!("Timeout waiting for update");
            }
        }
    }

    #[tokio::test]
    async fn test_redis_pubsub_multiple_subscribers() {
        let channel = test_channel("multi");
        let Some(pubsub) = get_test_pubsub(&channel).await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let update = EventUpdate::new("6", "Signing session after the show!");

        // Create two subscribers
        let mut rx1 = pubsub.subscribe().await.unwrap();
        let mut rx2 = pubsub.subscribe().await.unwrap();

        // Give subscriptions time to establish
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Publish update
        pubsub.publish(&update).await.unwrap();

        // Both should receive
        let timeout = Duration::from_secs(2);
        let received1 = tokio::time::timeout(timeout, rx1.recv()).await;
        let received2 = tokio::time::timeout(timeout, rx2.recv()).await;

        assert!(received1.is_ok());
        assert!(received2.is_ok());
    }

    #[tokio::test]
    async fn test_redis_pubsub_no_delivery_before_subscribe() {
        let channel = test_channel("late_sub");
        let Some(pubsub) = get_test_pubsub(&channel).await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let early = EventUpdate::new("4", "Published before anyone listened");
        let late = EventUpdate::new("6", "Published after subscribing");

        // Publish before subscribing - Redis drops it, no subscriber exists
        pubsub.publish(&early).await.unwrap();

        let mut rx = pubsub.subscribe().await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        pubsub.publish(&late).await.unwrap();

        // Only the update published after subscribing arrives
        let received = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("update published after subscribing should arrive")
            .unwrap();
        assert_eq!(received, late);
    }

    #[tokio::test]
    async fn test_redis_pubsub_different_channels() {
        let channel1 = test_channel("chan_a");
        let channel2 = test_channel("chan_b");
        let Some(pubsub1) = get_test_pubsub(&channel1).await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };
        let Some(pubsub2) = get_test_pubsub(&channel2).await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let update = EventUpdate::new("7", "Materials now available online!");

        // Subscribe to channel 1 only
        let mut rx1 = pubsub1.subscribe().await.unwrap();

        // Give subscription time to establish
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Publish to channel 2 (should not be received by rx1)
        pubsub2.publish(&update).await.unwrap();

        // Should timeout since the update went to a different channel
        let received = tokio::time::timeout(Duration::from_millis(200), rx1.recv()).await;

        assert!(
            received.is_err(),
            "Should not receive update from a different channel"
        );
    }

    #[tokio::test]
    async fn test_redis_pubsub_skips_malformed_payload() {
        let channel = test_channel("malformed");
        let Some(pubsub) = get_test_pubsub(&channel).await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let mut rx = pubsub.subscribe().await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Something other than a serialized update lands on the channel
        let client = redis::Client::open(redis_url().as_str()).unwrap();
        let mut conn = client.get_multiplexed_async_connection().await.unwrap();
        conn.publish::<_, _, ()>(&channel, "not valid json")
            .await
            .unwrap();

        // A well-formed update published afterwards still gets through
        let update = EventUpdate::new("6", "Signing session after the show!");
        pubsub.publish(&update).await.unwrap();

        let received = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("well-formed update should still arrive")
            .unwrap();
        assert_eq!(received, update);
    }
}
