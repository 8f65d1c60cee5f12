//! Pure functions for serializing/deserializing domain types to/from store bytes.
//!
//! All three flows use JSON on the wire, so cached records, queued
//! notifications, and published updates stay human-readable and can be
//! inspected with a plain store client.

use thiserror::Error;

use crate::event::{Event, EventUpdate, Notification};

/// Errors that can occur during store serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes an event record to JSON bytes.
pub fn serialize_event(event: &Event) -> Result<Vec<u8>> {
    serde_json::to_vec(event).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to an event record.
pub fn deserialize_event(bytes: &[u8]) -> Result<Event> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

/// Serializes a notification to JSON bytes.
pub fn serialize_notification(notification: &Notification) -> Result<Vec<u8>> {
    serde_json::to_vec(notification)
        .map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a notification.
pub fn deserialize_notification(bytes: &[u8]) -> Result<Notification> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

/// Serializes an update notice to JSON bytes.
pub fn serialize_update(update: &EventUpdate) -> Result<Vec<u8>> {
    serde_json::to_vec(update).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to an update notice.
pub fn deserialize_update(bytes: &[u8]) -> Result<EventUpdate> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}
