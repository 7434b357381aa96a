//! # LaneStream: pass-through instrumented stream.
//!
//! [`LaneStream`] forwards every poll to the wrapped source and returns exactly
//! what the source returns, reporting on the side:
//!
//! ```text
//! poll_next()
//!   ├─► cancellation token fired? ─► finish(Cancelled), Ready(None)
//!   └─► source.poll_next()
//!         ├─ Ready(Some(item)) ─► value / failure report ─► Ready(Some(item))
//!         ├─ Ready(None)       ─► finish(Completed)       ─► Ready(None)
//!         └─ Pending           ─► Pending
//!
//! drop()              ─► finish(Cancelled)   (no-op after completion)
//! LaneHandle::cancel ─► finish(Cancelled) + cancel token (wakes the stream)
//! ```
//!
//! `finish` goes through the subscription's termination guard, so the end is
//! reported once no matter which path gets there first.
//!
//! ## Rules
//! - No buffering, reordering or transformation of items.
//! - After completion, polls keep going to the source; late items are still
//!   reported as values.
//! - After cancellation, the source is no longer polled.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::stream::FusedStream;
use futures::Stream;
use tokio_util::sync::WaitForCancellationFutureOwned;

use crate::core::Tracker;
use crate::events::SubscriptionState;

use super::observe::Observe;

/// Stream instrumented by a lane.
///
/// Created by [`Lane::attach`](crate::Lane::attach),
/// [`Lane::attach_try`](crate::Lane::attach_try) or the [`LaneExt`](crate::LaneExt) methods.
#[must_use = "streams do nothing unless polled"]
pub struct LaneStream<S, O> {
    source: Pin<Box<S>>,
    observer: O,
    tracker: Arc<Tracker>,
    cancelled: Pin<Box<WaitForCancellationFutureOwned>>,
    stopped: bool,
}

impl<S, O> LaneStream<S, O> {
    pub(crate) fn new(source: S, observer: O, tracker: Arc<Tracker>) -> Self {
        let cancelled = Box::pin(tracker.token().clone().cancelled_owned());
        Self {
            source: Box::pin(source),
            observer,
            tracker,
            cancelled,
            stopped: false,
        }
    }

    /// Returns a handle that can cancel this subscription from any thread.
    pub fn handle(&self) -> LaneHandle {
        LaneHandle {
            tracker: Arc::clone(&self.tracker),
        }
    }

    #[inline]
    pub fn subscription_id(&self) -> u64 {
        self.tracker.subscription().id()
    }

    /// True once completion, failure or cancellation has been reported.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.tracker.is_terminated()
    }
}

impl<S, O> Stream for LaneStream<S, O>
where
    S: Stream,
    O: Observe<S::Item> + Unpin,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.stopped {
            return Poll::Ready(None);
        }

        if this.cancelled.as_mut().poll(cx).is_ready() {
            this.stopped = true;
            this.tracker.finish(SubscriptionState::Cancelled);
            return Poll::Ready(None);
        }

        match this.source.as_mut().poll_next(cx) {
            Poll::Ready(Some(item)) => {
                if this.observer.is_failure(&item) {
                    let reason: Arc<str> = Arc::from(this.observer.describe(&item));
                    if !this.tracker.finish(SubscriptionState::Failed(Arc::clone(&reason))) {
                        // Already ended: a late failure is still an emission.
                        this.tracker.value(|| reason.to_string());
                    }
                } else {
                    let observer = &this.observer;
                    this.tracker.value(|| observer.describe(&item));
                }
                Poll::Ready(Some(item))
            }
            Poll::Ready(None) => {
                this.tracker.finish(SubscriptionState::Completed);
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.stopped {
            (0, Some(0))
        } else {
            self.source.size_hint()
        }
    }
}

impl<S, O> FusedStream for LaneStream<S, O>
where
    S: FusedStream,
    O: Observe<S::Item> + Unpin,
{
    fn is_terminated(&self) -> bool {
        self.stopped || self.source.is_terminated()
    }
}

impl<S, O> Drop for LaneStream<S, O> {
    fn drop(&mut self) {
        self.tracker.finish(SubscriptionState::Cancelled);
    }
}

impl<S, O> fmt::Debug for LaneStream<S, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LaneStream")
            .field("subscription", self.tracker.subscription())
            .field("stopped", &self.stopped)
            .finish_non_exhaustive()
    }
}

/// Cross-thread handle to one lane subscription.
///
/// Cloneable and `Send + Sync`; cancelling reports `Cancelled` (unless the
/// subscription already ended) and makes the stream yield `None` on its next poll.
#[derive(Clone)]
pub struct LaneHandle {
    tracker: Arc<Tracker>,
}

impl LaneHandle {
    /// Disposes the subscription.
    ///
    /// Returns `true` if this call is the one that ended the subscription.
    pub fn cancel(&self) -> bool {
        self.tracker.cancel()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.tracker.is_terminated()
    }

    #[inline]
    pub fn subscription_id(&self) -> u64 {
        self.tracker.subscription().id()
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.tracker.subscription().name()
    }

    /// Rendered source location of the lane.
    #[inline]
    pub fn source(&self) -> &str {
        self.tracker.source()
    }
}

impl fmt::Debug for LaneHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LaneHandle")
            .field("subscription", &self.subscription_id())
            .field("name", &self.name())
            .field("finished", &self.is_finished())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventKind, LaneFilter, LaneType};
    use crate::lanes::Lane;
    use crate::loggers::Recorder;
    use futures::{executor::block_on, stream, StreamExt};
    use std::sync::Barrier;
    use std::thread;
    use std::time::Duration;

    fn recorded(filter: LaneFilter) -> (Arc<Recorder>, Lane<i32>) {
        let rec = Arc::new(Recorder::new());
        let lane = Lane::<i32>::builder("numbers")
            .logger(rec.clone())
            .filter(filter)
            .build();
        (rec, lane)
    }

    #[test]
    fn test_values_then_completion_in_order() {
        let (rec, lane) = recorded(LaneFilter::all());
        let out: Vec<i32> = block_on(lane.attach(stream::iter([1, 2, 3])).collect());

        assert_eq!(out, vec![1, 2, 3]);
        assert_eq!(
            rec.kinds(),
            vec![
                EventKind::Begin,
                EventKind::Value,
                EventKind::Value,
                EventKind::Value,
                EventKind::End,
                EventKind::Completion,
            ]
        );
        assert_eq!(rec.values(), vec!["1", "2", "3"]);
        let end = &rec.events()[4];
        assert_eq!(end.state, Some(SubscriptionState::Completed));
    }

    #[test]
    fn test_lifecycle_disabled_keeps_values() {
        let (rec, lane) = recorded(LaneFilter::only(LaneType::Event));
        let _ = block_on(lane.attach(stream::iter([1, 2])).count());

        assert_eq!(rec.count(EventKind::Begin), 0);
        assert_eq!(rec.count(EventKind::End), 0);
        assert_eq!(rec.values(), vec!["1", "2"]);
        assert_eq!(rec.count(EventKind::Completion), 1);
    }

    #[test]
    fn test_values_disabled_keeps_lifecycle() {
        let (rec, lane) = recorded(LaneFilter::only(LaneType::Subscription));
        let _ = block_on(lane.attach(stream::iter([1, 2])).count());

        assert_eq!(rec.kinds(), vec![EventKind::Begin, EventKind::End]);
    }

    #[test]
    fn test_drop_before_completion_reports_cancelled() {
        let (rec, lane) = recorded(LaneFilter::all());
        let mut s = lane.attach(stream::iter([1, 2, 3]));
        assert_eq!(block_on(s.next()), Some(1));
        drop(s);

        assert_eq!(
            rec.kinds(),
            vec![
                EventKind::Begin,
                EventKind::Value,
                EventKind::End,
                EventKind::Cancelled
            ]
        );
        assert_eq!(rec.events()[2].state, Some(SubscriptionState::Cancelled));
    }

    #[test]
    fn test_handle_cancel_stops_stream() {
        let (rec, lane) = recorded(LaneFilter::all());
        let mut s = lane.attach(stream::iter([1, 2, 3]));
        let handle = s.handle();

        assert!(handle.cancel());
        assert!(!handle.cancel());
        assert!(s.is_finished());
        assert_eq!(block_on(s.next()), None);
        assert_eq!(s.size_hint(), (0, Some(0)));
        drop(s);

        assert_eq!(rec.count(EventKind::End), 1);
        assert_eq!(rec.count(EventKind::Value), 0);
    }

    #[test]
    fn test_values_after_completion_are_not_gated() {
        // A misbehaving source that yields again after signalling completion.
        let mut script = vec![Some(1), None, Some(9), None].into_iter();
        let source = stream::poll_fn(move |_| Poll::Ready(script.next().flatten()));

        let (rec, lane) = recorded(LaneFilter::all());
        let mut s = lane.attach(source);
        assert_eq!(block_on(s.next()), Some(1));
        assert_eq!(block_on(s.next()), None);
        assert_eq!(block_on(s.next()), Some(9));
        drop(s);

        assert_eq!(rec.values(), vec!["1", "9"]);
        assert_eq!(rec.count(EventKind::End), 1);
        assert_eq!(rec.count(EventKind::Completion), 1);
        assert_eq!(rec.count(EventKind::Cancelled), 0);
    }

    #[test]
    fn test_failure_reported_once_and_item_forwarded() {
        let rec = Arc::new(Recorder::new());
        let lane = Lane::<u32>::builder("io").logger(rec.clone()).build();
        let items: Vec<Result<u32, String>> = vec![Ok(1), Err("timeout".into()), Ok(2)];

        let out: Vec<_> = block_on(lane.attach_try(stream::iter(items.clone())).collect());
        assert_eq!(out, items);

        assert_eq!(
            rec.kinds(),
            vec![
                EventKind::Begin,
                EventKind::Value,
                EventKind::End,
                EventKind::Error,
                EventKind::Value,
            ]
        );
        let events = rec.events();
        assert_eq!(
            events[2].state,
            Some(SubscriptionState::Failed(Arc::from("timeout")))
        );
        assert_eq!(events[3].value.as_deref(), Some("timeout"));
    }

    #[test]
    fn test_failure_after_end_is_reported_as_value() {
        let rec = Arc::new(Recorder::new());
        let lane = Lane::<u32>::builder("io").logger(rec.clone()).build();
        let items: Vec<Result<u32, String>> = vec![Err("a".into()), Ok(1), Err("b".into())];

        let out: Vec<_> = block_on(lane.attach_try(stream::iter(items.clone())).collect());
        assert_eq!(out, items);

        assert_eq!(
            rec.kinds(),
            vec![
                EventKind::Begin,
                EventKind::End,
                EventKind::Error,
                EventKind::Value,
                EventKind::Value,
            ]
        );
        assert_eq!(rec.values(), vec!["1", "b"]);
        assert_eq!(rec.count(EventKind::End), 1);
    }

    #[test]
    fn test_failure_races_cancellation() {
        for _ in 0..200 {
            let rec = Arc::new(Recorder::new());
            let lane = Lane::<u32>::builder("io").logger(rec.clone()).build();
            let items: Vec<Result<u32, String>> = vec![Err("reset".into())];
            let mut s = lane.attach_try(stream::iter(items));
            let handle = s.handle();
            let id = s.subscription_id();
            let barrier = Arc::new(Barrier::new(2));

            let b1 = Arc::clone(&barrier);
            let consumer = thread::spawn(move || {
                b1.wait();
                while block_on(s.next()).is_some() {}
            });
            let b2 = Arc::clone(&barrier);
            let canceller = thread::spawn(move || {
                b2.wait();
                handle.cancel();
            });
            consumer.join().unwrap();
            canceller.join().unwrap();

            let events: Vec<_> = rec
                .events()
                .into_iter()
                .filter(|e| e.subscription == id)
                .collect();
            let ends: Vec<_> = events.iter().filter(|e| e.kind == EventKind::End).collect();
            let markers = events
                .iter()
                .filter(|e| matches!(e.kind, EventKind::Error | EventKind::Cancelled))
                .count();
            assert_eq!(ends.len(), 1, "events: {events:?}");
            assert_eq!(markers, 1, "events: {events:?}");
            assert!(matches!(
                ends[0].state,
                Some(SubscriptionState::Failed(_)) | Some(SubscriptionState::Cancelled)
            ));
        }
    }

    #[tokio::test]
    async fn test_cancel_wakes_pending_stream() {
        let (rec, lane) = recorded(LaneFilter::all());
        let mut s = lane.attach(stream::pending::<i32>());
        let handle = s.handle();

        let waiter = tokio::spawn(async move { s.next().await });
        tokio::task::yield_now().await;
        handle.cancel();

        let out = tokio::time::timeout(Duration::from_secs(5), waiter)
            .await
            .expect("stream woke up")
            .unwrap();
        assert_eq!(out, None);
        assert_eq!(rec.kinds(), vec![EventKind::Begin, EventKind::End, EventKind::Cancelled]);
    }

    #[test]
    fn test_completion_races_cancellation() {
        for _ in 0..200 {
            let (rec, lane) = recorded(LaneFilter::all());
            let mut s = lane.attach(stream::empty::<i32>());
            let handle = s.handle();
            let id = s.subscription_id();
            let barrier = Arc::new(Barrier::new(2));

            let b1 = Arc::clone(&barrier);
            let completer = thread::spawn(move || {
                b1.wait();
                let _ = block_on(s.next());
            });
            let b2 = Arc::clone(&barrier);
            let canceller = thread::spawn(move || {
                b2.wait();
                handle.cancel();
            });
            completer.join().unwrap();
            canceller.join().unwrap();

            let kinds = rec.kinds_for(id);
            let ends = kinds.iter().filter(|k| **k == EventKind::End).count();
            let markers = kinds
                .iter()
                .filter(|k| matches!(k, EventKind::Completion | EventKind::Cancelled))
                .count();
            assert_eq!(ends, 1, "kinds: {kinds:?}");
            assert_eq!(markers, 1, "kinds: {kinds:?}");
            assert_eq!(kinds[0], EventKind::Begin);
        }
    }
}
