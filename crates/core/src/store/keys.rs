/// Returns the cache key for a single event record.
pub fn event_key(event_id: &str) -> String {
    format!("event:{}", event_id)
}

/// Returns the list key backing the notification queue.
///
/// A single shared list: producers LPUSH onto it, the consumer BRPOPs from
/// it, so delivery order follows list semantics.
pub fn notification_queue_key() -> &'static str {
    "notifications:queue"
}

/// Returns the pub/sub channel name for event update notices.
pub fn event_updates_channel() -> &'static str {
    "events:updates"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_key() {
        assert_eq!(event_key("2"), "event:2");
        assert_eq!(event_key("42"), "event:42");
    }

    #[test]
    fn test_notification_queue_key() {
        assert_eq!(notification_queue_key(), "notifications:queue");
    }

    #[test]
    fn test_event_updates_channel() {
        assert_eq!(event_updates_channel(), "events:updates");
    }
}
