//! Redis notification queue implementation.
//!
//! Producers LPUSH onto a named list and the consumer BRPOPs from the
//! other end, so the list behaves as a FIFO work queue. The blocking pop
//! runs on its own connection: a BRPOP with no timeout parks the whole
//! connection server-side, and sharing it with request/response traffic
//! would stall every other command.

use async_trait::async_trait;
use redis::AsyncCommands;

use boxoffice_core::event::Notification;
use boxoffice_core::store::{
    deserialize_notification, serialize_notification, NotificationQueue, Result, StoreError,
};

use super::error::map_redis_error;

/// Redis work queue backend for ticket notifications.
pub struct RedisQueue {
    /// Connection for non-blocking producer commands.
    conn: redis::aio::ConnectionManager,
    /// Dedicated connection for the blocking consumer pop.
    pop_conn: redis::aio::ConnectionManager,
    key: String,
}

impl RedisQueue {
    /// Creates a new Redis queue over the given list key.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379")
    /// * `key` - List key the queue lives under
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ConnectionFailed` if the connections cannot be established.
    pub async fn new(url: &str, key: impl Into<String>) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client.clone())
            .await
            .map_err(map_redis_error)?;
        let pop_conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        Ok(Self {
            conn,
            pop_conn,
            key: key.into(),
        })
    }
}

#[async_trait]
impl NotificationQueue for RedisQueue {
    async fn push(&self, notification: &Notification) -> Result<()> {
        let payload = serialize_notification(notification)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut conn = self.conn.clone();
        conn.lpush::<_, _, ()>(&self.key, &payload)
            .await
            .map_err(map_redis_error)?;

        Ok(())
    }

    async fn pop(&self) -> Result<Notification> {
        let mut conn = self.pop_conn.clone();

        loop {
            // Timeout 0 blocks until an item arrives. A manager reconnect can
            // still surface as an empty reply, so re-issue instead of
            // reporting a phantom miss.
            let reply: Option<(String, Vec<u8>)> = conn
                .brpop(&self.key, 0.0)
                .await
                .map_err(map_redis_error)?;

            if let Some((_, payload)) = reply {
                let notification = deserialize_notification(&payload)
                    .map_err(|e| StoreError::Serialization(e.to_string()))?;
                return Ok(notification);
            }
        }
    }
}
