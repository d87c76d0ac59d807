//! Core types and scheduling logic for the famplan ecosystem.
//!
//! This crate provides the pieces shared by famplan-cli and famplan-notify:
//! - `Event` and recurrence rule types
//! - `recurrence` for expanding a seed event into a bounded series
//! - `notify` for deciding when upcoming-event notifications are due
//! - `store` for the JSON event store both binaries read and write

pub mod constants;
pub mod date_range;
pub mod error;
pub mod event;
pub mod notify;
pub mod recurrence;
pub mod store;

// Re-export all event types at crate root for convenience
pub use event::*;
