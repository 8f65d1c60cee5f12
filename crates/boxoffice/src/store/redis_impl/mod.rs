//! Redis store backend implementation.
//!
//! Provides the byte cache, the notification queue, and the update
//! channel on top of a Redis server. Each backend owns its own
//! connection so the blocking queue pop and the pub/sub stream cannot
//! starve the request/response traffic.

#![allow(dead_code)]

mod cache;
mod error;
mod pubsub;
mod queue;

pub use cache::RedisCache;
pub use pubsub::RedisPubSub;
pub use queue::RedisQueue;
