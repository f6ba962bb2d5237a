//! Journal core: the pool, its subscriptions and configuration.
//!
//! Internal modules:
//! - [`pool`]: append-and-broadcast journal guarded by one lock;
//! - [`subscription`]: backlog + live queue receiver with cancellation;
//! - [`config`]: pool settings and overflow policy.

mod config;
mod pool;
mod subscription;

pub use config::{OverflowPolicy, PoolConfig};
pub use pool::EventPool;
pub use subscription::{Subscription, SubscriptionId};
