//! Store backend implementations.
//!
//! This module provides concrete implementations of the store traits
//! defined in `boxoffice_core::store`: the byte cache behind the
//! cache-aside lookup, the notification work queue, and the event update
//! pub/sub channel. The implementations are selected at compile time via
//! feature flags.
//!
//! # Feature Flags
//!
//! - `memory` (default): In-process backends using tokio synchronization primitives
//! - `redis`: Redis backends using the redis crate
//!
//! These features are mutually exclusive - only one store backend can be
//! enabled at a time.

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "memory", feature = "redis"))]
compile_error!(
    "Features 'memory' and 'redis' are mutually exclusive. \
    Enable only one store backend at a time."
);

#[cfg(not(any(feature = "memory", feature = "redis")))]
compile_error!(
    "No store backend selected. Enable 'memory' or 'redis' feature. \
    Example: cargo build -p boxoffice --features memory"
);

#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "redis")]
pub mod redis_impl;

// Re-export the active store implementation
#[cfg(feature = "memory")]
#[allow(unused_imports)]
pub use memory::{MemoryCache, MemoryPubSub, MemoryQueue};

#[cfg(feature = "redis")]
#[allow(unused_imports)]
pub use redis_impl::{RedisCache, RedisPubSub, RedisQueue};
