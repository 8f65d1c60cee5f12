//! The scripted demo driving all three store patterns.
//!
//! Mirrors a box-office afternoon: a burst of event lookups, a batch of
//! ticket notifications pushed onto the work queue, then live updates
//! published to whoever is listening. The background units are spawned
//! mid-script, right before the part that feeds them, with a pause after
//! so they are ready for what follows.

use std::time::Duration;

use anyhow::Result;
use tokio::task::JoinHandle;

use boxoffice_core::event::{EventUpdate, Notification};

use crate::state::AppState;
use crate::workers;

/// Runs the scripted demo, pausing between steps so the interleaved
/// worker output reads naturally.
///
/// Returns the handles of the background units it spawned; callers join
/// them after signalling shutdown.
pub async fn run(state: &AppState, pause: Duration) -> Result<Vec<JoinHandle<()>>> {
    tracing::info!("Part 1: cache-aside event lookups");

    // Cold lookup hits the source, the repeat is served from the cache
    lookup(state, "2").await?;
    tokio::time::sleep(pause).await;
    lookup(state, "2").await?;
    tokio::time::sleep(pause).await;
    lookup(state, "5").await?;
    tokio::time::sleep(pause).await;

    tracing::info!("Part 2: queueing ticket notifications");

    let consumer = tokio::spawn(workers::run_notification_consumer(
        state.queue.clone(),
        state.subscribe_shutdown(),
    ));
    tokio::time::sleep(pause).await;

    notify(state, "Carla", "Your ticket for Tech Fair 2025 has been reserved!").await?;
    notify(state, "Diego", "Advanced Rust Workshop: remember to bring your laptop.").await?;
    notify(state, "Elena", "Update: Rock Show doors open at 7pm!").await?;
    tokio::time::sleep(pause).await;

    tracing::info!("Part 3: publishing event updates");

    let listener = tokio::spawn(workers::run_update_listener(
        state.updates.clone(),
        state.subscribe_shutdown(),
    ));
    tokio::time::sleep(pause).await;

    announce(state, "4", "Sustainability Conference: new keynote speaker confirmed!").await?;
    announce(state, "6", "Galaxy Quest launch: signing session after the show!").await?;
    announce(state, "7", "Advanced Rust Workshop: materials now available online!").await?;
    tokio::time::sleep(pause).await;

    Ok(vec![consumer, listener])
}

/// Looks up one event through the cached catalog and reports the result.
async fn lookup(state: &AppState, id: &str) -> Result<()> {
    match state.catalog.event_by_id(id).await? {
        Some(event) => {
            tracing::info!(
                event_id = %event.id,
                title = %event.title,
                venue = %event.venue,
                date = %event.date,
                tickets = event.tickets_available,
                "Lookup result"
            );
        }
        None => {
            tracing::info!(event_id = %id, "Lookup returned no event");
        }
    }

    Ok(())
}

/// Pushes one ticket notification onto the work queue. Fire-and-forget:
/// returns as soon as the store accepts the item.
async fn notify(state: &AppState, user: &str, text: &str) -> Result<()> {
    let notification = Notification::new(user, text);
    state.queue.push(&notification).await?;
    tracing::info!(user = %user, "Notification queued");

    Ok(())
}

/// Publishes one update notice to the event updates channel.
async fn announce(state: &AppState, event_id: &str, title: &str) -> Result<()> {
    let update = EventUpdate::new(event_id, title);
    state.updates.publish(&update).await?;
    tracing::info!(event_id = %event_id, title = %title, "Update published");

    Ok(())
}
