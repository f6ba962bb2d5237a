//! Journal events: record type, payload shapes and log severity.
//!
//! ## Contents
//! - [`Event`], [`Payload`] the immutable record and its data
//! - [`Level`], [`LogMessage`] the `sys.log` payload and its ordering
//!
//! Events are only constructed by [`EventPool::add`](crate::EventPool::add),
//! which assigns the sequence number and timestamp.

mod event;
mod level;

pub use event::{Event, Payload};
pub use level::{LOG_TAG, Level, LogMessage};
