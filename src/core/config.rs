//! # Pool configuration.
//!
//! Provides [`PoolConfig`] centralized settings for an [`EventPool`](crate::EventPool).
//!
//! ## Sentinel values
//! - `history_limit = 0` → unlimited retention
//! - `queue_capacity = 0` → clamped to 1

/// What the pool does when a subscriber's queue is full during `add`.
///
/// Delivery never blocks the producer: the pool lock is held while fanning
/// out, so a stalled subscriber must not be able to stall every producer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Skip the event for that subscriber only and count it as dropped.
    #[default]
    DropNewest,
    /// Evict the subscriber; its stream ends with `CloseReason::Overflow`.
    Disconnect,
}

impl OverflowPolicy {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            OverflowPolicy::DropNewest => "drop_newest",
            OverflowPolicy::Disconnect => "disconnect",
        }
    }
}

/// Configuration for an event pool.
///
/// ## Field semantics
/// - `debug`: initial value of the debug flag (debug-level logs are recorded)
/// - `silent`: initial value of the silent flag (only error and fatal logs are recorded)
/// - `queue_capacity`: per-subscriber live queue size (min 1)
/// - `overflow`: behavior when a subscriber queue is full
/// - `history_limit`: max retained events (`0` = unlimited)
/// - `mirror_to_tracing`: also emit journaled log messages through `tracing`
///
/// ## Notes
/// `debug` and `silent` only seed the pool; later changes go through
/// `EventPool::set_debug` / `EventPool::set_silent`.
#[derive(Clone, Debug)]
pub struct PoolConfig {
    pub debug: bool,
    pub silent: bool,

    /// Capacity of each subscriber's live queue.
    ///
    /// The backlog captured at subscribe time does not count against it.
    pub queue_capacity: usize,

    pub overflow: OverflowPolicy,

    /// Maximum number of retained events.
    ///
    /// When exceeded, the oldest events are discarded on `add`.
    pub history_limit: usize,

    pub mirror_to_tracing: bool,
}

impl PoolConfig {
    /// Returns the per-subscriber queue capacity clamped to a minimum of 1.
    #[inline]
    pub fn queue_capacity_clamped(&self) -> usize {
        self.queue_capacity.max(1)
    }

    /// Returns the retention limit as an `Option`.
    ///
    /// - `None` → unlimited
    /// - `Some(n)` → at most `n` events retained
    #[inline]
    pub fn retention(&self) -> Option<usize> {
        if self.history_limit == 0 {
            None
        } else {
            Some(self.history_limit)
        }
    }
}

impl Default for PoolConfig {
    /// Default configuration:
    ///
    /// - `debug = false`, `silent = false`
    /// - `queue_capacity = 1024`
    /// - `overflow = OverflowPolicy::DropNewest`
    /// - `history_limit = 0` (unlimited)
    /// - `mirror_to_tracing = false`
    fn default() -> Self {
        Self {
            debug: false,
            silent: false,
            queue_capacity: 1024,
            overflow: OverflowPolicy::default(),
            history_limit: 0,
            mirror_to_tracing: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = PoolConfig::default();
        assert!(!cfg.debug);
        assert!(!cfg.silent);
        assert_eq!(cfg.queue_capacity_clamped(), 1024);
        assert_eq!(cfg.overflow, OverflowPolicy::DropNewest);
        assert_eq!(cfg.retention(), None);
    }

    #[test]
    fn test_sentinels() {
        let cfg = PoolConfig {
            queue_capacity: 0,
            history_limit: 3,
            ..PoolConfig::default()
        };
        assert_eq!(cfg.queue_capacity_clamped(), 1);
        assert_eq!(cfg.retention(), Some(3));
    }
}
