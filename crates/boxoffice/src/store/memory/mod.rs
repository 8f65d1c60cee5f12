//! In-memory store backend implementation.
//!
//! Provides a thread-safe cache with TTL support, a notification queue,
//! and an update pub/sub channel for single-process runs without a Redis
//! server.

#![allow(dead_code)]
#![allow(unused_imports)]

mod cache;
mod pubsub;
mod queue;

pub use cache::MemoryCache;
pub use pubsub::MemoryPubSub;
pub use queue::MemoryQueue;
