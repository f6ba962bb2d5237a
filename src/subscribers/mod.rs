//! # Push-style subscribers.
//!
//! Pull consumers use [`Subscription`](crate::Subscription) directly. This
//! module adds a callback layer on top: a [`Subscribe`] implementation is
//! driven by a worker task that owns one subscription.
//!
//! ## Architecture
//! ```text
//! EventPool::add ──► Subscription (per subscriber) ──► worker ──► Subscribe::on_event(&Event)
//!                                                                    │
//!                                                      ┌─────────────┼──────────┐
//!                                                      ▼             ▼          ▼
//!                                                  LogWriter      Metrics    Custom
//! ```

#[cfg(feature = "logging")]
mod embedded;
mod subscribe;
mod subscriber_set;

#[cfg(feature = "logging")]
pub use embedded::LogWriter;
pub use subscribe::Subscribe;
pub use subscriber_set::SubscriberSet;
