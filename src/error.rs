//! Error types used by the event pool and its subscriptions.
//!
//! Core pool operations are infallible: every call either applies fully or is
//! a defined no-op. Errors only surface at the edges:
//!
//! - [`TryRecvError`] — non-blocking receive on a [`Subscription`](crate::Subscription).
//! - [`PoolError`] — serialization of events.
//!
//! [`CloseReason`] explains why a subscription's stream ended.

use thiserror::Error;

/// Why a subscription stopped receiving events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Removed through `unsubscribe` or by dropping the subscription.
    Unsubscribed,
    /// Evicted because its queue was full under `OverflowPolicy::Disconnect`.
    Overflow,
    /// The pool itself was dropped.
    PoolDropped,
}

impl CloseReason {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            CloseReason::Unsubscribed => "unsubscribed",
            CloseReason::Overflow => "overflow",
            CloseReason::PoolDropped => "pool_dropped",
        }
    }
}

/// # Errors returned by [`Subscription::try_recv`](crate::Subscription::try_recv).
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryRecvError {
    /// Nothing is queued right now; the subscription is still live.
    #[error("no event available")]
    Empty,

    /// The subscription is closed and fully drained.
    #[error("subscription closed: {}", .0.as_label())]
    Closed(CloseReason),
}

impl TryRecvError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use eventpool::{CloseReason, TryRecvError};
    ///
    /// assert_eq!(TryRecvError::Empty.as_label(), "recv_empty");
    /// assert_eq!(TryRecvError::Closed(CloseReason::Overflow).as_label(), "recv_closed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TryRecvError::Empty => "recv_empty",
            TryRecvError::Closed(_) => "recv_closed",
        }
    }

    /// True if the subscription will never yield again.
    pub fn is_closed(&self) -> bool {
        matches!(self, TryRecvError::Closed(_))
    }
}

/// # Errors produced by pool helpers.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum PoolError {
    /// An event could not be rendered as JSON.
    #[error("event serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl PoolError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            PoolError::Serialize(_) => "pool_serialize",
        }
    }
}
