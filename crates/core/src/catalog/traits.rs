use async_trait::async_trait;

use crate::event::Event;

use super::Result;

/// Authoritative source for event records.
///
/// The source is read-only from the application's point of view: records are
/// looked up and listed, never written. Absence is a normal outcome
/// (`Ok(None)`), not an error.
#[async_trait]
pub trait EventCatalog: Send + Sync {
    /// Gets an event by its identifier.
    async fn event_by_id(&self, id: &str) -> Result<Option<Event>>;

    /// Lists all events the source knows about.
    async fn all_events(&self) -> Result<Vec<Event>>;
}
