use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An event record as served by the authoritative source.
///
/// Records are immutable: once produced they are only read, cached, and
/// eventually expired. The full record is what goes over the wire when an
/// event is cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub venue: String,
    /// Calendar date of the event (serialized as `YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Tickets still available when the record was produced.
    pub tickets_available: u32,
}

impl Event {
    /// Creates a new event record.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        venue: impl Into<String>,
        date: NaiveDate,
        tickets_available: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            venue: venue.into(),
            date,
            tickets_available,
        }
    }
}

/// A message queued for asynchronous delivery to a user.
///
/// Pushed onto the notification list and consumed by the queue worker.
/// Ordering follows list semantics; durability is the store's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub user: String,
    pub text: String,
}

impl Notification {
    /// Creates a new notification addressed to `user`.
    pub fn new(user: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            text: text.into(),
        }
    }
}

/// A transient notice that an event changed.
///
/// Published to the update channel; subscribers that are not listening at
/// publish time never see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventUpdate {
    pub event_id: String,
    pub title: String,
}

impl EventUpdate {
    /// Creates a new update notice for the event with `event_id`.
    pub fn new(event_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            title: title.into(),
        }
    }
}
