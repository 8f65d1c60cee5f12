//! Domain types and store seams for the boxoffice project.
//!
//! This crate is IO-free: it defines the event records, the traits the
//! application implements against an external store (cache, notification
//! queue, update pub/sub), and the trait for the authoritative event source.
//! Concrete backends live in the `boxoffice` crate.

pub mod catalog;
pub mod event;
pub mod store;
