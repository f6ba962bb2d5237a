//! # eventpool
//!
//! **eventpool** is an in-process event journal and broadcast hub.
//!
//! Independent modules of a host application record tagged events (state
//! changes, log lines) into one [`EventPool`]; the pool retains them and fans
//! every new event out to any number of live subscribers, without producers
//! knowing who is listening.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  module #1   │   │  module #2   │   │    Logger    │
//!     │ add(tag, ..) │   │ add(tag, ..) │   │ log(level,..)│
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼ filter debug/silent
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  EventPool (one lock)                                             │
//! │  - history (newest-first)                                         │
//! │  - slots (per-subscriber bounded queues, registration order)      │
//! │  - debug / silent flags                                           │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!  ┌─────────────┐   ┌─────────────┐   ┌──────────────────┐
//!  │Subscription │   │Subscription │   │  SubscriberSet   │
//!  │ backlog+live│   │ backlog+live│   │ worker ─► on_event│
//!  └─────────────┘   └─────────────┘   └──────────────────┘
//! ```
//!
//! ### Fatal path
//! ```text
//! Logger::fatal(msg) ──► EventPool::add("sys.log", Fatal) ──► Terminate::terminate(msg)
//!                                                             (ProcessExit: stderr + exit 1)
//! ```
//!
//! ## Features
//! | Area              | Description                                                 | Key types / traits                        |
//! |-------------------|-------------------------------------------------------------|-------------------------------------------|
//! | **Journal**       | Append, broadcast, snapshot and clear tagged events.        | [`EventPool`], [`Event`], [`Payload`]     |
//! | **Consumption**   | Pull (async, blocking, stream) or push-style subscribers.   | [`Subscription`], [`Subscribe`]           |
//! | **Logging**       | Severity filtering with fatal termination.                  | [`Logger`], [`Level`], [`Terminate`]      |
//! | **Labels**        | Pluggable display labels for log levels.                    | [`LabelFormatter`], [`AnsiLabels`]        |
//! | **Errors**        | Typed receive/serialization errors.                         | [`TryRecvError`], [`PoolError`]           |
//! | **Configuration** | Queue capacity, overflow policy, retention.                 | [`PoolConfig`], [`OverflowPolicy`]        |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] subscriber _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use eventpool::{EventPool, Level, Logger, PoolConfig, log_event};
//!
//! let pool = EventPool::new(PoolConfig::default());
//! let logger = Logger::new(pool.clone());
//! let mut sub = pool.subscribe();
//!
//! pool.add("net.up", "eth0");
//! log_event!(logger, Level::Info, "{} interfaces up", 1);
//! logger.debug("not recorded: debug flag is off");
//!
//! assert_eq!(sub.try_recv().unwrap().tag(), "net.up");
//! assert_eq!(sub.try_recv().unwrap().log_message().unwrap().message, "1 interfaces up");
//! assert!(sub.try_recv().is_err());
//! assert_eq!(pool.snapshot().len(), 2);
//! ```
mod core;
mod error;
mod events;
mod logger;
mod subscribers;

// ---- Public re-exports ----

pub use crate::core::{EventPool, OverflowPolicy, PoolConfig, Subscription, SubscriptionId};
pub use error::{CloseReason, PoolError, TryRecvError};
pub use events::{Event, LOG_TAG, Level, LogMessage, Payload};
pub use logger::{AnsiLabels, LabelFormatter, Logger, PlainLabels, ProcessExit, Terminate};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in event printer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
