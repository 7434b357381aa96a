//! # SubscriberSet: non-blocking fan-out over multiple subscribers
//!
//! [`SubscriberSet`] is a [`Logger`] that distributes each [`LaneEvent`] to
//! multiple async subscribers **without awaiting** their processing, so it
//! can sit directly behind a lane's poll path.
//!
//! ## What it guarantees
//! - `log` / `emit` return immediately (`try_send`).
//! - Per-subscriber FIFO (queue order).
//! - Panics inside subscribers are caught and logged (isolation).
//!
//! ## What it does **not** guarantee
//! - No global ordering across different subscribers (use `LaneEvent::seq`).
//! - No retries on per-subscriber queue overflow (events are dropped for that
//!   subscriber and a warning is logged).
//!
//! ## Diagram
//! ```text
//!    log(LaneEvent)
//!        │                        (Arc-clone per subscriber)
//!        ├────────────────► [queue S1] ─► worker S1 ─► on_event()
//!        ├────────────────► [queue S2] ─► worker S2 ─► on_event()
//!        └────────────────► [queue SN] ─► worker SN ─► on_event()
//! ```
//!
//! Workers are spawned on the ambient tokio runtime, so [`SubscriberSet::new`]
//! must be called from within one.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::events::LaneEvent;
use crate::loggers::Logger;

use super::Subscribe;

/// Per-subscriber channel metadata.
struct SubscriberChannel {
    name: &'static str,
    sender: mpsc::Sender<Arc<LaneEvent>>,
}

/// Fan-out coordinator for multiple lane subscribers.
pub struct SubscriberSet {
    channels: RwLock<Vec<SubscriberChannel>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl SubscriberSet {
    /// Creates a new set and spawns one worker task per subscriber.
    ///
    /// ### Per-subscriber setup
    /// - Bounded mpsc queue (capacity from [`Subscribe::queue_capacity`], min 1)
    /// - Dedicated worker task (runs until the set shuts down)
    /// - Panic isolation via `catch_unwind`
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>) -> Self {
        let mut channels = Vec::with_capacity(subs.len());
        let mut workers = Vec::with_capacity(subs.len());

        for sub in subs {
            let cap = sub.queue_capacity().max(1);
            let name = sub.name();
            let (tx, mut rx) = mpsc::channel::<Arc<LaneEvent>>(cap);
            let s = Arc::clone(&sub);

            let handle = tokio::spawn(async move {
                while let Some(ev) = rx.recv().await {
                    let fut = s.on_event(ev.as_ref());

                    if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                        let info = {
                            let any = &*panic_err;
                            if let Some(msg) = any.downcast_ref::<&'static str>() {
                                (*msg).to_string()
                            } else if let Some(msg) = any.downcast_ref::<String>() {
                                msg.clone()
                            } else {
                                "unknown panic".to_string()
                            }
                        };
                        tracing::error!(subscriber = s.name(), info = %info, "lane subscriber panicked");
                    }
                }
            });
            channels.push(SubscriberChannel { name, sender: tx });
            workers.push(handle);
        }

        Self {
            channels: RwLock::new(channels),
            workers: Mutex::new(workers),
        }
    }

    /// Emits an event to all subscribers (clones the event).
    pub fn emit(&self, event: &LaneEvent) {
        self.emit_arc(Arc::new(event.clone()));
    }

    /// Emits a pre-allocated `Arc<LaneEvent>` to all subscribers.
    ///
    /// - Uses `try_send` (non-blocking)
    /// - On queue full or closed: drops the event for that subscriber, logs a warning
    pub fn emit_arc(&self, event: Arc<LaneEvent>) {
        let channels = self.channels.read().unwrap_or_else(PoisonError::into_inner);
        for channel in channels.iter() {
            match channel.sender.try_send(Arc::clone(&event)) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    tracing::warn!(
                        subscriber = channel.name,
                        seq = event.seq,
                        "lane subscriber dropped event: queue full"
                    );
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    tracing::warn!(
                        subscriber = channel.name,
                        seq = event.seq,
                        "lane subscriber dropped event: worker closed"
                    );
                }
            }
        }
    }

    /// Gracefully shuts down all subscriber workers.
    ///
    /// 1. Drops all channel senders (workers drain their queues, then exit)
    /// 2. Awaits all worker tasks to finish
    ///
    /// Events logged after shutdown are dropped silently.
    pub async fn shutdown(&self) {
        self.channels
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();

        let workers = std::mem::take(&mut *self.workers.lock().unwrap_or_else(PoisonError::into_inner));
        for h in workers {
            let _ = h.await;
        }
    }

    /// True if there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of active subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Logger for SubscriberSet {
    fn log(&self, event: LaneEvent) {
        self.emit_arc(Arc::new(event));
    }

    fn name(&self) -> &'static str {
        "subscriber-set"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use crate::lanes::Lane;
    use async_trait::async_trait;
    use futures::{stream, StreamExt};
    use tokio::sync::Mutex as AsyncMutex;

    #[derive(Default)]
    struct Collect {
        seen: AsyncMutex<Vec<EventKind>>,
    }

    #[async_trait]
    impl Subscribe for Collect {
        async fn on_event(&self, ev: &LaneEvent) {
            self.seen.lock().await.push(ev.kind);
        }

        fn name(&self) -> &'static str {
            "collect"
        }
    }

    struct Panicky;

    #[async_trait]
    impl Subscribe for Panicky {
        async fn on_event(&self, ev: &LaneEvent) {
            if ev.kind == EventKind::Begin {
                panic!("boom");
            }
        }
    }

    #[tokio::test]
    async fn test_fans_out_to_every_subscriber() {
        let a = Arc::new(Collect::default());
        let b = Arc::new(Collect::default());
        let set = Arc::new(SubscriberSet::new(vec![a.clone() as Arc<dyn Subscribe>, b.clone()]));
        assert_eq!(set.len(), 2);

        let lane = Lane::<u8>::builder("fan").logger(set.clone()).build();
        let _ = lane.attach(stream::iter([1u8, 2])).count().await;
        set.shutdown().await;

        let expected = vec![
            EventKind::Begin,
            EventKind::Value,
            EventKind::Value,
            EventKind::End,
            EventKind::Completion,
        ];
        assert_eq!(*a.seen.lock().await, expected);
        assert_eq!(*b.seen.lock().await, expected);
        assert!(set.is_empty());
    }

    #[tokio::test]
    async fn test_panicking_subscriber_is_isolated() {
        let good = Arc::new(Collect::default());
        let set = SubscriberSet::new(vec![Arc::new(Panicky) as Arc<dyn Subscribe>, good.clone()]);

        set.emit(&LaneEvent::new(EventKind::Begin, 1, "p"));
        set.emit(&LaneEvent::new(EventKind::Value, 1, "p").with_value("x"));
        set.shutdown().await;

        assert_eq!(
            *good.seen.lock().await,
            vec![EventKind::Begin, EventKind::Value]
        );
    }

    #[tokio::test]
    async fn test_log_after_shutdown_is_dropped() {
        let c = Arc::new(Collect::default());
        let set = SubscriberSet::new(vec![c.clone() as Arc<dyn Subscribe>]);
        set.shutdown().await;
        set.log(LaneEvent::new(EventKind::Begin, 1, "late"));
        assert!(c.seen.lock().await.is_empty());
    }
}
