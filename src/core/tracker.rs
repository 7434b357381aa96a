//! # Per-subscription tracker.
//!
//! [`Tracker`] is the state shared between a [`LaneStream`](crate::LaneStream)
//! and its [`LaneHandle`](crate::LaneHandle)s. It owns:
//! - the [`Subscription`] handle (id, name, logger),
//! - the rendered source location,
//! - the category filter,
//! - the [`TerminationGuard`],
//! - the cancellation token the stream listens on.
//!
//! ## Rules
//! - `Begin` is reported once, when the tracker is created.
//! - `End` plus its value-track marker are reported only by the guard winner.
//! - Values are **not** gated by the guard; a source that keeps yielding
//!   after completion still gets its values reported.
//! - Nothing here blocks: reporting is a direct `Logger::log` call.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::events::{LaneFilter, LaneType, SubscriptionState};

use super::guard::TerminationGuard;
use super::subscription::{EventValue, Subscription};

pub(crate) struct Tracker {
    subscription: Subscription,
    source: Arc<str>,
    filter: LaneFilter,
    guard: TerminationGuard,
    token: CancellationToken,
}

impl Tracker {
    /// Creates the tracker and reports `Begin`.
    pub(crate) fn start(
        subscription: Subscription,
        source: Arc<str>,
        filter: LaneFilter,
        token: CancellationToken,
    ) -> Arc<Self> {
        let tracker = Arc::new(Self {
            subscription,
            source,
            filter,
            guard: TerminationGuard::new(),
            token,
        });
        if tracker.filter.contains(LaneType::Subscription) {
            tracker.subscription.begin(&tracker.source);
        }
        tracker
    }

    /// Reports one value; `render` runs only if the event category is enabled.
    pub(crate) fn value(&self, render: impl FnOnce() -> String) {
        if self.filter.contains(LaneType::Event) {
            self.subscription
                .event(EventValue::Value(render()), &self.source);
        }
    }

    /// Ends the subscription with `state` if nothing ended it before.
    ///
    /// Returns `true` if this call won the guard.
    pub(crate) fn finish(&self, state: SubscriptionState) -> bool {
        if !self.guard.try_terminate() {
            return false;
        }

        let marker = match &state {
            SubscriptionState::Completed => EventValue::Completion,
            SubscriptionState::Cancelled => EventValue::Cancelled,
            SubscriptionState::Failed(reason) => EventValue::Error(Arc::clone(reason)),
        };
        tracing::trace!(
            lane = self.subscription.name(),
            subscription = self.subscription.id(),
            state = state.as_label(),
            "lane terminated"
        );

        if self.filter.contains(LaneType::Subscription) {
            self.subscription.end(state);
        }
        if self.filter.contains(LaneType::Event) {
            self.subscription.event(marker, &self.source);
        }
        true
    }

    /// Ends the subscription as cancelled and wakes the stream.
    pub(crate) fn cancel(&self) -> bool {
        let won = self.finish(SubscriptionState::Cancelled);
        self.token.cancel();
        won
    }

    #[inline]
    pub(crate) fn is_terminated(&self) -> bool {
        self.guard.is_terminated()
    }

    #[inline]
    pub(crate) fn token(&self) -> &CancellationToken {
        &self.token
    }

    #[inline]
    pub(crate) fn subscription(&self) -> &Subscription {
        &self.subscription
    }

    #[inline]
    pub(crate) fn source(&self) -> &str {
        &self.source
    }
}
