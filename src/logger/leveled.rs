//! # Leveled logger over an event pool.
//!
//! [`Logger`] turns a severity level and a formatted message into a `sys.log`
//! event on its [`EventPool`].
//!
//! ## Filtering
//! ```text
//! log(level, args)
//!     ├─ level == Fatal            ─► journal, then Terminate::terminate (never filtered)
//!     ├─ level == Debug && !debug  ─► dropped
//!     ├─ level <  Error && silent  ─► dropped
//!     └─ otherwise                 ─► journal as sys.log
//! ```
//! Flags are read from the pool on every call, so `set_debug` / `set_silent`
//! take effect immediately.

use std::fmt;
use std::sync::Arc;

use super::terminate::{ProcessExit, Terminate};
use crate::core::EventPool;
use crate::events::{Event, LOG_TAG, Level, LogMessage};

/// Severity-aware front end for an [`EventPool`].
///
/// Cheap to clone; clones share the pool and the termination effect.
#[derive(Clone)]
pub struct Logger {
    pool: Arc<EventPool>,
    terminator: Arc<dyn Terminate>,
}

impl Logger {
    /// Logger that exits the process on fatal messages.
    #[must_use]
    pub fn new(pool: Arc<EventPool>) -> Self {
        Self::with_terminator(pool, Arc::new(ProcessExit::default()))
    }

    /// Logger with a custom termination effect.
    #[must_use]
    pub fn with_terminator(pool: Arc<EventPool>, terminator: Arc<dyn Terminate>) -> Self {
        Self { pool, terminator }
    }

    #[inline]
    pub fn pool(&self) -> &Arc<EventPool> {
        &self.pool
    }

    /// True if a message at `level` would be journaled right now.
    pub fn enabled(&self, level: Level) -> bool {
        let (debug, silent) = self.pool.flags();
        passes(level, debug, silent)
    }

    /// Journals a formatted message unless filtered out.
    ///
    /// Returns the recorded event, or `None` if the message was filtered.
    /// `Level::Fatal` does not return.
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) -> Option<Event> {
        if level == Level::Fatal {
            self.fatal(args);
        }
        if !self.enabled(level) {
            return None;
        }
        Some(self.record(level, fmt::format(args)))
    }

    pub fn debug(&self, msg: impl fmt::Display) -> Option<Event> {
        self.log(Level::Debug, format_args!("{msg}"))
    }

    pub fn info(&self, msg: impl fmt::Display) -> Option<Event> {
        self.log(Level::Info, format_args!("{msg}"))
    }

    pub fn important(&self, msg: impl fmt::Display) -> Option<Event> {
        self.log(Level::Important, format_args!("{msg}"))
    }

    pub fn warning(&self, msg: impl fmt::Display) -> Option<Event> {
        self.log(Level::Warning, format_args!("{msg}"))
    }

    pub fn error(&self, msg: impl fmt::Display) -> Option<Event> {
        self.log(Level::Error, format_args!("{msg}"))
    }

    /// Journals the message, then hands it to the termination effect.
    pub fn fatal(&self, msg: impl fmt::Display) -> ! {
        let message = msg.to_string();
        self.record(Level::Fatal, message.clone());
        self.terminator.terminate(&message)
    }

    fn record(&self, level: Level, message: String) -> Event {
        if self.pool.config().mirror_to_tracing {
            mirror(level, &message);
        }
        self.pool.add(LOG_TAG, LogMessage::new(level, message))
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").field("pool", &self.pool).finish()
    }
}

/// Filtering rule shared by `log` and `enabled`.
fn passes(level: Level, debug: bool, silent: bool) -> bool {
    match level {
        Level::Fatal => true,
        Level::Debug if !debug => false,
        l if l < Level::Error && silent => false,
        _ => true,
    }
}

fn mirror(level: Level, message: &str) {
    match level {
        Level::Debug => tracing::debug!(target: "eventpool", "{message}"),
        Level::Info | Level::Important => {
            tracing::info!(target: "eventpool", level = level.as_str(), "{message}")
        }
        Level::Warning => tracing::warn!(target: "eventpool", "{message}"),
        Level::Error | Level::Fatal => {
            tracing::error!(target: "eventpool", level = level.as_str(), "{message}")
        }
    }
}

/// Logs through a [`Logger`] with `format!`-style arguments.
///
/// ```rust
/// use eventpool::{EventPool, Level, Logger, log_event};
///
/// let logger = Logger::new(EventPool::with_flags(false, false));
/// let ev = log_event!(logger, Level::Info, "{} hosts up", 3).unwrap();
/// assert_eq!(ev.log_message().unwrap().message, "3 hosts up");
/// ```
#[macro_export]
macro_rules! log_event {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, ::std::format_args!($($arg)+))
    };
}
