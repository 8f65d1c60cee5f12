//! Event catalog implementations.
//!
//! [`StaticCatalog`] serves the seeded authoritative table that stands in
//! for a real events database. [`CachedCatalog`] wraps any catalog with
//! the cache-aside read path: check the cache, fall back to the source,
//! write the result back with a TTL.

mod cached;
mod static_table;

pub use cached::CachedCatalog;
pub use static_table::StaticCatalog;
