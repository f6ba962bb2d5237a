//! # Subscription: one consumer's view of the pool.
//!
//! A [`Subscription`] yields two internally ordered streams:
//! ```text
//! subscribe() ──► backlog (history at subscribe time, newest-first)
//!             └─► live queue (events added afterwards, arrival order)
//! ```
//! The backlog is captured under the pool lock and owned by the subscription,
//! so replay costs the caller of `subscribe` nothing and cannot race with
//! `unsubscribe`. The live queue is a bounded `tokio::sync::mpsc` channel fed by
//! [`EventPool::add`](crate::EventPool::add).
//!
//! ## Rules
//! - Backlog items are yielded before live items.
//! - Every receive path checks the cancellation token first: once
//!   unsubscribed, nothing more is yielded (backlog or live).
//! - An evicted subscription (`CloseReason::Overflow`) still drains what was
//!   already queued, then ends.
//! - Dropping a subscription unregisters it from its pool.

use std::collections::VecDeque;
use std::fmt;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, Weak};
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::pool::EventPool;
use crate::error::{CloseReason, TryRecvError};
use crate::events::Event;

/// Identifier of a subscription within its pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// State shared between a subscription and its slot in the pool.
#[derive(Debug, Default)]
pub(crate) struct SlotShared {
    pub(crate) dropped: AtomicU64,
    pub(crate) reason: OnceLock<CloseReason>,
}

/// Receiving end of a pool subscription.
///
/// Obtained from [`EventPool::subscribe`](crate::EventPool::subscribe).
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    backlog: VecDeque<Event>,
    rx: mpsc::Receiver<Event>,
    token: CancellationToken,
    shared: Arc<SlotShared>,
    pool: Weak<EventPool>,
}

impl Subscription {
    pub(crate) fn new(
        id: SubscriptionId,
        backlog: VecDeque<Event>,
        rx: mpsc::Receiver<Event>,
        token: CancellationToken,
        shared: Arc<SlotShared>,
        pool: Weak<EventPool>,
    ) -> Self {
        Self {
            id,
            backlog,
            rx,
            token,
            shared,
            pool,
        }
    }

    #[inline]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Number of backlog events not yet received.
    #[inline]
    pub fn backlog_len(&self) -> usize {
        self.backlog.len()
    }

    /// Live events skipped for this subscriber because its queue was full.
    #[inline]
    pub fn dropped(&self) -> u64 {
        self.shared.dropped.load(Ordering::Relaxed)
    }

    /// Why the subscription was closed, if it was.
    pub fn close_reason(&self) -> Option<CloseReason> {
        self.shared.reason.get().copied()
    }

    /// True once `unsubscribe` was called for this subscription.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Receives the next event, waiting for a live one if needed.
    ///
    /// Returns `None` once the subscription is unsubscribed, evicted and
    /// drained, or its pool is gone.
    pub async fn recv(&mut self) -> Option<Event> {
        if self.token.is_cancelled() {
            return None;
        }
        if let Some(ev) = self.backlog.pop_front() {
            return Some(ev);
        }
        let ev = self.rx.recv().await;
        self.accept(ev)
    }

    /// Blocking variant of [`recv`](Self::recv) for synchronous consumers.
    ///
    /// # Panics
    /// Panics when called from within an asynchronous execution context,
    /// like `tokio::sync::mpsc::Receiver::blocking_recv`.
    pub fn blocking_recv(&mut self) -> Option<Event> {
        if self.token.is_cancelled() {
            return None;
        }
        if let Some(ev) = self.backlog.pop_front() {
            return Some(ev);
        }
        let ev = self.rx.blocking_recv();
        self.accept(ev)
    }

    /// Receives the next event without waiting.
    pub fn try_recv(&mut self) -> Result<Event, TryRecvError> {
        if self.token.is_cancelled() {
            return Err(TryRecvError::Closed(self.reason()));
        }
        if let Some(ev) = self.backlog.pop_front() {
            return Ok(ev);
        }
        match self.rx.try_recv() {
            Ok(ev) => self
                .accept(Some(ev))
                .ok_or(TryRecvError::Closed(self.reason())),
            Err(mpsc::error::TryRecvError::Empty) => Err(TryRecvError::Empty),
            Err(mpsc::error::TryRecvError::Disconnected) => {
                Err(TryRecvError::Closed(self.reason()))
            }
        }
    }

    /// Drains everything that is available right now.
    pub fn drain_ready(&mut self) -> Vec<Event> {
        let mut out = Vec::new();
        while let Ok(ev) = self.try_recv() {
            out.push(ev);
        }
        out
    }

    /// Drops live events that raced with an unsubscribe.
    fn accept(&self, ev: Option<Event>) -> Option<Event> {
        ev.filter(|_| !self.token.is_cancelled())
    }

    fn reason(&self) -> CloseReason {
        self.close_reason().unwrap_or(CloseReason::PoolDropped)
    }

    pub(crate) fn belongs_to(&self, pool: &EventPool) -> bool {
        std::ptr::eq(self.pool.as_ptr(), pool)
    }
}

impl Stream for Subscription {
    type Item = Event;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Event>> {
        let this = self.get_mut();
        if this.token.is_cancelled() {
            return Poll::Ready(None);
        }
        if let Some(ev) = this.backlog.pop_front() {
            return Poll::Ready(Some(ev));
        }
        match this.rx.poll_recv(cx) {
            Poll::Ready(ev) => Poll::Ready(this.accept(ev)),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(pool) = self.pool.upgrade() {
            pool.unsubscribe_id(self.id);
        }
    }
}
