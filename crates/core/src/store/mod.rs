mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{Result, StoreError};
pub use keys::{event_key, event_updates_channel, notification_queue_key};
pub use serialization::{
    deserialize_event, deserialize_notification, deserialize_update, serialize_event,
    serialize_notification, serialize_update, SerializationError,
};
pub use traits::{Cache, NotificationQueue, UpdatePubSub};
