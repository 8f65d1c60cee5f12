//! Background units: the notification consumer and the update listener.
//!
//! Both run as plain tokio tasks that loop until the shared shutdown
//! signal fires. They own trait objects, so the same loops drive the
//! in-memory and the Redis backends.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

use boxoffice_core::store::{NotificationQueue, StoreError, UpdatePubSub};

/// Delay before re-polling the queue after a store error.
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Consumes ticket notifications off the work queue until shutdown.
///
/// This is the unbounded blocking-pop loop: each pop parks until a
/// producer pushes, and the shutdown signal is the only other way out.
/// Malformed payloads are logged and dropped so one bad message cannot
/// wedge the queue.
pub async fn run_notification_consumer(
    queue: Arc<dyn NotificationQueue>,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    tracing::info!("Notification consumer started, waiting on the queue");

    loop {
        tokio::select! {
            result = queue.pop() => {
                match result {
                    Ok(notification) => {
                        tracing::info!(
                            user = %notification.user,
                            text = %notification.text,
                            "Notification processed"
                        );
                    }
                    Err(StoreError::Serialization(err)) => {
                        tracing::warn!(error = %err, "Skipping malformed notification");
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "Queue pop failed, retrying");
                        tokio::time::sleep(RETRY_DELAY).await;
                    }
                }
            }
            _ = shutdown_rx.recv() => {
                tracing::debug!("Notification consumer shutting down");
                break;
            }
        }
    }
}

/// Listens for event updates published on the channel until shutdown.
///
/// Subscribes first, then drains the receiver; updates published before
/// the subscription was established are never seen.
pub async fn run_update_listener(
    pubsub: Arc<dyn UpdatePubSub>,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    let mut receiver = match pubsub.subscribe().await {
        Ok(r) => r,
        Err(err) => {
            tracing::error!(error = %err, "Failed to subscribe to event updates");
            return;
        }
    };

    tracing::info!("Update listener subscribed, waiting for messages");

    loop {
        tokio::select! {
            result = receiver.recv() => {
                match result {
                    Ok(update) => {
                        tracing::info!(
                            event_id = %update.event_id,
                            title = %update.title,
                            "Event update received"
                        );
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "Update listener lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::info!("Update channel closed");
                        break;
                    }
                }
            }
            _ = shutdown_rx.recv() => {
                tracing::debug!("Update listener shutting down");
                break;
            }
        }
    }
}
