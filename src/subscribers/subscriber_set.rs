//! # Worker-driven fan-out to push-style subscribers.
//!
//! Provides [`SubscriberSet`] — attaches [`Subscribe`] implementations to a
//! pool, one subscription and one worker task each.
//!
//! ## Architecture
//! ```text
//! EventPool::add(event)
//!     │
//!     ├──► [queue 1] ──► worker 1 ──► subscriber1.on_event()
//!     │    (bounded)         └──────► panic → tracing::error!, continue
//!     ├──► [queue 2] ──► worker 2 ──► subscriber2.on_event()
//!     │    (bounded)
//!     └──► [queue N] ──► worker N ──► subscriberN.on_event()
//!          (bounded)
//! ```
//!
//! ## Rules
//! - **No cross-subscriber ordering**: subscriber A may process event N while B processes N+5
//! - **Per-subscriber order**: backlog newest-first, then live events in arrival order
//! - **Isolation**: a slow or panicking subscriber doesn't affect others
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state inconsistent
//! if a subscriber panics while holding a lock.

use std::any::Any;
use std::sync::Arc;

use futures::FutureExt;
use tokio::task::JoinHandle;

use crate::core::{EventPool, Subscription, SubscriptionId};
use crate::subscribers::Subscribe;

/// Per-subscriber worker metadata.
struct Worker {
    id: SubscriptionId,
    name: &'static str,
    handle: JoinHandle<()>,
}

/// Set of push-style subscribers attached to one pool.
///
/// Must be created inside a tokio runtime: workers are spawned with `tokio::spawn`.
pub struct SubscriberSet {
    pool: Arc<EventPool>,
    workers: Vec<Worker>,
}

impl SubscriberSet {
    /// Subscribes every entry of `subs` to `pool` and spawns its worker.
    #[must_use]
    pub fn new(pool: &Arc<EventPool>, subs: Vec<Arc<dyn Subscribe>>) -> Self {
        let mut set = Self {
            pool: Arc::clone(pool),
            workers: Vec::with_capacity(subs.len()),
        };
        for sub in subs {
            set.attach(sub);
        }
        set
    }

    /// Attaches one more subscriber.
    pub fn attach(&mut self, sub: Arc<dyn Subscribe>) -> SubscriptionId {
        let subscription = self.pool.subscribe();
        let id = subscription.id();
        let name = sub.name();
        let handle = tokio::spawn(run_worker(subscription, sub));

        tracing::debug!(subscriber = name, subscription = %id, "subscriber attached");
        self.workers.push(Worker { id, name, handle });
        id
    }

    /// Unsubscribes every worker and waits for them to finish.
    ///
    /// Events still queued at this point are not delivered.
    pub async fn shutdown(mut self) {
        let workers = std::mem::take(&mut self.workers);
        for worker in &workers {
            self.pool.unsubscribe_id(worker.id);
        }
        for worker in workers {
            if let Err(err) = worker.handle.await {
                tracing::warn!(subscriber = worker.name, error = %err, "subscriber worker failed");
            }
        }
    }

    /// True if there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.workers.len()
    }
}

impl Drop for SubscriberSet {
    /// Unsubscribes the remaining workers; each ends at its next receive.
    fn drop(&mut self) {
        for worker in &self.workers {
            self.pool.unsubscribe_id(worker.id);
        }
    }
}

async fn run_worker(mut subscription: Subscription, sub: Arc<dyn Subscribe>) {
    while let Some(ev) = subscription.recv().await {
        if !sub.accepts(ev.tag()) {
            continue;
        }
        let fut = sub.on_event(&ev);
        if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
            tracing::error!(
                subscriber = sub.name(),
                tag = ev.tag(),
                seq = ev.seq(),
                info = %panic_message(&*panic_err),
                "subscriber panicked"
            );
        }
    }
    tracing::trace!(subscriber = sub.name(), "subscriber worker stopped");
}

fn panic_message(any: &(dyn Any + Send)) -> String {
    if let Some(msg) = any.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = any.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::mpsc;

    use super::*;
    use crate::core::PoolConfig;
    use crate::events::Event;

    struct Recorder {
        tx: mpsc::UnboundedSender<String>,
        prefix: Option<&'static str>,
    }

    #[async_trait]
    impl Subscribe for Recorder {
        async fn on_event(&self, ev: &Event) {
            if ev.tag() == "bad" {
                panic!("cannot handle {}", ev.tag());
            }
            let _ = self.tx.send(ev.tag().to_string());
        }

        fn name(&self) -> &'static str {
            "recorder"
        }

        fn accepts(&self, tag: &str) -> bool {
            self.prefix.is_none_or(|p| tag.starts_with(p) || tag == "bad")
        }
    }

    fn recorder(prefix: Option<&'static str>) -> (Arc<dyn Subscribe>, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(Recorder { tx, prefix }), rx)
    }

    async fn next(rx: &mut mpsc::UnboundedReceiver<String>) -> String {
        tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("timed out waiting for subscriber")
            .expect("recorder channel closed")
    }

    #[tokio::test]
    async fn test_worker_receives_backlog_then_live() {
        let pool = EventPool::new(PoolConfig::default());
        pool.add("old1", ());
        pool.add("old2", ());

        let (sub, mut rx) = recorder(None);
        let set = SubscriberSet::new(&pool, vec![sub]);
        pool.add("live", ());

        assert_eq!(next(&mut rx).await, "old2");
        assert_eq!(next(&mut rx).await, "old1");
        assert_eq!(next(&mut rx).await, "live");
        assert_eq!(set.len(), 1);
        set.shutdown().await;
        assert_eq!(pool.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_panic_is_isolated() {
        let pool = EventPool::new(PoolConfig::default());
        let (sub, mut rx) = recorder(None);
        let set = SubscriberSet::new(&pool, vec![sub]);

        pool.add("ok1", ());
        pool.add("bad", ());
        pool.add("ok2", ());

        assert_eq!(next(&mut rx).await, "ok1");
        assert_eq!(next(&mut rx).await, "ok2");
        set.shutdown().await;
    }

    #[tokio::test]
    async fn test_drop_detaches_workers() {
        let pool = EventPool::new(PoolConfig::default());
        let (sub, mut rx) = recorder(None);
        let set = SubscriberSet::new(&pool, vec![sub]);

        pool.add("before", ());
        assert_eq!(next(&mut rx).await, "before");

        drop(set);
        assert_eq!(pool.subscriber_count(), 0);
        pool.add("after", ());

        // The worker exits and drops the recorder, closing the channel.
        let rest = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await;
        assert!(matches!(rest, Ok(None)), "unexpected delivery after drop: {rest:?}");
    }

    #[tokio::test]
    async fn test_accepts_filters_tags() {
        let pool = EventPool::new(PoolConfig::default());
        let (sub, mut rx) = recorder(Some("net."));
        let set = SubscriberSet::new(&pool, vec![sub]);

        pool.add("wifi.scan", ());
        pool.add("net.up", ());

        assert_eq!(next(&mut rx).await, "net.up");
        set.shutdown().await;
        assert!(rx.try_recv().is_err());
    }
}
