//! Static in-memory event catalog.
//!
//! Stands in for the authoritative events database. The table is fixed at
//! construction and never mutated, so lookups need no locking.

use std::collections::HashMap;

use async_trait::async_trait;

use boxoffice_core::catalog::{EventCatalog, Result};
use boxoffice_core::event::{seed_events, Event};

/// Read-only event catalog backed by an in-memory table.
///
/// Shared behind an `Arc`; the table is immutable after construction.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    events: HashMap<String, Event>,
}

impl StaticCatalog {
    /// Creates a catalog seeded with the demo event table.
    pub fn new() -> Self {
        Self::with_events(seed_events())
    }

    /// Creates a catalog over the given events, keyed by event id.
    pub fn with_events(events: Vec<Event>) -> Self {
        let events = events.into_iter().map(|e| (e.id.clone(), e)).collect();
        Self { events }
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventCatalog for StaticCatalog {
    async fn event_by_id(&self, id: &str) -> Result<Option<Event>> {
        Ok(self.events.get(id).cloned())
    }

    async fn all_events(&self) -> Result<Vec<Event>> {
        let mut events: Vec<Event> = self.events.values().cloned().collect();
        events.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(events)
    }
}
