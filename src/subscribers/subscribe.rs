//! # Push-style subscriber trait.
//!
//! [`Subscribe`] is the extension point for consumers that prefer a callback
//! over pulling from a [`Subscription`](crate::Subscription). Each subscriber is
//! driven by a dedicated worker task owned by a
//! [`SubscriberSet`](crate::SubscriberSet).
//!
//! ## Contract
//! - Events arrive in subscription order: backlog (newest-first), then live.
//! - Implementations may be slow; they only fill their own queue. What happens
//!   when it is full is decided by the pool's `OverflowPolicy`.
//! - Panics are caught per event and logged; the worker keeps going.
//!
//! ## Example
//! ```rust
//! use eventpool::{Event, Subscribe};
//! use async_trait::async_trait;
//!
//! struct Audit;
//!
//! #[async_trait]
//! impl Subscribe for Audit {
//!     async fn on_event(&self, ev: &Event) {
//!         // write audit record...
//!         let _ = ev;
//!     }
//!     fn name(&self) -> &'static str { "audit" }
//!     fn accepts(&self, tag: &str) -> bool { tag.starts_with("auth.") }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Contract for push-style event consumers.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handle a single event.
    async fn on_event(&self, event: &Event);

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Tag filter; events whose tag is rejected are skipped by the worker.
    fn accepts(&self, _tag: &str) -> bool {
        true
    }
}
