//! # EventPool: append-and-broadcast journal.
//!
//! The [`EventPool`] owns the retained history and the set of live
//! subscriptions. One `parking_lot::Mutex` guards both, plus the logger flags.
//!
//! ## Architecture
//! ```text
//! add(tag, payload)
//!     │   ┌──────────────── pool lock ────────────────┐
//!     ├──►│ seq += 1, Event::new(seq, tag, payload)   │
//!     │   │ history.push_front(event)                 │
//!     │   │ for slot in slots (registration order):   │
//!     │   │     try_send ──► [queue S1] ─► Subscription S1
//!     │   │     try_send ──► [queue S2] ─► Subscription S2
//!     │   └───────────────────────────────────────────┘
//!     └──► returns Event
//! ```
//!
//! ## Rules
//! - **Total order**: `add` calls never interleave; no event is broadcast
//!   before it is in history.
//! - **Newest-first history**: the most recent event is always at the front.
//! - **Never blocks on subscribers**: delivery uses `try_send`; a full queue is
//!   handled by [`OverflowPolicy`].
//! - **Snapshot sorts a copy**: canonical history order is never rearranged.
//!
//! ## Example
//! ```rust
//! use eventpool::{EventPool, PoolConfig};
//!
//! let pool = EventPool::new(PoolConfig::default());
//! pool.add("net.up", "eth0");
//! pool.add("net.down", "eth0");
//!
//! let mut sub = pool.subscribe();
//! assert_eq!(sub.try_recv().unwrap().tag(), "net.down");
//! assert_eq!(sub.try_recv().unwrap().tag(), "net.up");
//!
//! pool.add("net.up", "wlan0");
//! assert_eq!(sub.try_recv().unwrap().tag(), "net.up");
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::config::{OverflowPolicy, PoolConfig};
use super::subscription::{SlotShared, Subscription, SubscriptionId};
use crate::error::CloseReason;
use crate::events::{Event, Payload};

/// Pool-side end of a subscription.
struct Slot {
    id: SubscriptionId,
    sender: mpsc::Sender<Event>,
    token: CancellationToken,
    shared: Arc<SlotShared>,
}

impl Slot {
    /// Hands `ev` to this subscriber. Returns `false` if the slot must be removed.
    fn deliver(&self, ev: &Event, policy: OverflowPolicy) -> bool {
        match self.sender.try_send(ev.clone()) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => match policy {
                OverflowPolicy::DropNewest => {
                    let dropped = self.shared.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                    // Warn once per subscriber; repeated drops from a stalled reader go to trace.
                    if dropped == 1 {
                        tracing::warn!(
                            subscription = %self.id,
                            policy = policy.as_label(),
                            tag = ev.tag(),
                            seq = ev.seq(),
                            "subscriber queue full; dropping events"
                        );
                    } else {
                        tracing::trace!(subscription = %self.id, seq = ev.seq(), dropped, "event dropped");
                    }
                    true
                }
                OverflowPolicy::Disconnect => {
                    tracing::warn!(
                        subscription = %self.id,
                        policy = policy.as_label(),
                        tag = ev.tag(),
                        seq = ev.seq(),
                        "subscriber queue full; disconnecting"
                    );
                    self.close(CloseReason::Overflow, false);
                    false
                }
            },
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::debug!(subscription = %self.id, "subscriber receiver gone; removing");
                self.close(CloseReason::Unsubscribed, false);
                false
            }
        }
    }

    /// Records why the slot closes. The sender is released when the slot is dropped.
    fn close(&self, reason: CloseReason, cancel: bool) {
        let _ = self.shared.reason.set(reason);
        if cancel {
            self.token.cancel();
        }
    }
}

struct State {
    history: VecDeque<Event>,
    slots: Vec<Slot>,
    debug: bool,
    silent: bool,
    next_seq: u64,
    next_id: u64,
}

/// In-process event journal and broadcast hub.
///
/// Shared by `Arc`; create one per host application (or per test).
pub struct EventPool {
    cfg: PoolConfig,
    state: Mutex<State>,
}

impl EventPool {
    /// Creates an empty pool seeded with `cfg.debug` / `cfg.silent`.
    #[must_use]
    pub fn new(cfg: PoolConfig) -> Arc<Self> {
        let state = State {
            history: VecDeque::new(),
            slots: Vec::new(),
            debug: cfg.debug,
            silent: cfg.silent,
            next_seq: 0,
            next_id: 0,
        };
        Arc::new(Self {
            cfg,
            state: Mutex::new(state),
        })
    }

    /// Shorthand for a default-configured pool with the given flags.
    #[must_use]
    pub fn with_flags(debug: bool, silent: bool) -> Arc<Self> {
        Self::new(PoolConfig {
            debug,
            silent,
            ..PoolConfig::default()
        })
    }

    /// Configuration the pool was created with.
    #[inline]
    pub fn config(&self) -> &PoolConfig {
        &self.cfg
    }

    /// Records an event and broadcasts it to every live subscription.
    ///
    /// History mutation and fan-out happen under one critical section, in
    /// subscriber registration order.
    pub fn add(&self, tag: impl Into<Arc<str>>, payload: impl Into<Payload>) -> Event {
        let mut state = self.state.lock();

        let seq = state.next_seq;
        state.next_seq += 1;
        let ev = Event::new(seq, tag.into(), payload.into());

        state.history.push_front(ev.clone());
        if let Some(limit) = self.cfg.retention() {
            state.history.truncate(limit);
        }

        let policy = self.cfg.overflow;
        state.slots.retain(|slot| slot.deliver(&ev, policy));
        ev
    }

    /// Registers a new subscription.
    ///
    /// The current history is captured as the subscription's backlog
    /// (newest-first); events added afterwards arrive on its live queue.
    /// Never blocks.
    pub fn subscribe(self: &Arc<Self>) -> Subscription {
        let (tx, rx) = mpsc::channel(self.cfg.queue_capacity_clamped());
        let token = CancellationToken::new();
        let shared = Arc::new(SlotShared::default());

        let mut state = self.state.lock();
        let id = SubscriptionId(state.next_id);
        state.next_id += 1;
        let backlog = state.history.clone();
        state.slots.push(Slot {
            id,
            sender: tx,
            token: token.clone(),
            shared: Arc::clone(&shared),
        });
        drop(state);

        tracing::trace!(subscription = %id, backlog = backlog.len(), "subscribed");
        Subscription::new(id, backlog, rx, token, shared, Arc::downgrade(self))
    }

    /// Removes `sub` from the pool and ends its stream.
    ///
    /// Returns `false` (no-op) if it was already removed or belongs to another pool.
    pub fn unsubscribe(&self, sub: &Subscription) -> bool {
        sub.belongs_to(self) && self.unsubscribe_id(sub.id())
    }

    /// Removes the subscription with the given id. Unknown ids are a no-op.
    pub fn unsubscribe_id(&self, id: SubscriptionId) -> bool {
        let mut state = self.state.lock();
        let Some(pos) = state.slots.iter().position(|slot| slot.id == id) else {
            return false;
        };
        let slot = state.slots.remove(pos);
        slot.close(CloseReason::Unsubscribed, true);
        tracing::trace!(subscription = %id, "unsubscribed");
        true
    }

    /// Discards all retained events. Subscriptions are unaffected.
    pub fn clear(&self) {
        self.state.lock().history.clear();
    }

    /// Retained events sorted ascending by timestamp (ties by sequence).
    pub fn snapshot(&self) -> Vec<Event> {
        let mut events: Vec<Event> = self.state.lock().history.iter().cloned().collect();
        events.sort_by(|a, b| a.at().cmp(&b.at()).then(a.seq().cmp(&b.seq())));
        events
    }

    /// Up to `n` most recent events, newest-first.
    pub fn recent(&self, n: usize) -> Vec<Event> {
        self.state.lock().history.iter().take(n).cloned().collect()
    }

    /// Number of retained events.
    pub fn len(&self) -> usize {
        self.state.lock().history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().history.is_empty()
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().slots.len()
    }

    pub fn set_debug(&self, debug: bool) {
        self.state.lock().debug = debug;
    }

    pub fn set_silent(&self, silent: bool) {
        self.state.lock().silent = silent;
    }

    pub fn debug(&self) -> bool {
        self.state.lock().debug
    }

    pub fn silent(&self) -> bool {
        self.state.lock().silent
    }

    /// Reads `(debug, silent)` under a single lock acquisition.
    pub(crate) fn flags(&self) -> (bool, bool) {
        let state = self.state.lock();
        (state.debug, state.silent)
    }

    #[cfg(test)]
    pub(crate) fn push_raw(&self, ev: Event) {
        self.state.lock().history.push_front(ev);
    }
}

impl fmt::Debug for EventPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("EventPool")
            .field("events", &state.history.len())
            .field("subscribers", &state.slots.len())
            .field("debug", &state.debug)
            .field("silent", &state.silent)
            .finish()
    }
}

impl Drop for EventPool {
    fn drop(&mut self) {
        for slot in &self.state.get_mut().slots {
            slot.close(CloseReason::PoolDropped, false);
        }
    }
}
