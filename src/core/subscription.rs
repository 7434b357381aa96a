//! # Subscription handle.
//!
//! [`Subscription`] identifies one logical subscription to a stream and knows
//! how to phrase its reports: `begin`, `end(state)` and `event(value)`. It does
//! not filter and does not guard; the tracker owning it does both.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;

use crate::events::{EventKind, LaneEvent, SubscriptionState};
use crate::loggers::LoggerRef;

/// Subscription id counter (ids start at 1).
static SUBSCRIPTION_SEQ: AtomicU64 = AtomicU64::new(1);

/// Payload of a value-track report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValue {
    /// A formatted item.
    Value(String),
    /// The source completed.
    Completion,
    /// The subscription was cancelled.
    Cancelled,
    /// The source failed.
    Error(Arc<str>),
}

/// One logical subscription: id, lane name and destination logger.
#[derive(Clone)]
pub struct Subscription {
    id: u64,
    name: Arc<str>,
    logger: LoggerRef,
}

impl Subscription {
    /// Creates a subscription with a fresh id.
    pub fn new(name: impl Into<Arc<str>>, logger: LoggerRef) -> Self {
        Self {
            id: SUBSCRIPTION_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            name: name.into(),
            logger,
        }
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reports the start of the subscription.
    pub fn begin(&self, source: &Arc<str>) {
        self.logger
            .log(self.report(EventKind::Begin).with_source(Arc::clone(source)));
    }

    /// Reports the end of the subscription.
    pub fn end(&self, state: SubscriptionState) {
        self.logger.log(self.report(EventKind::End).with_state(state));
    }

    /// Reports a value-track event.
    pub fn event(&self, value: EventValue, source: &Arc<str>) {
        let ev = match value {
            EventValue::Value(v) => self.report(EventKind::Value).with_value(v),
            EventValue::Completion => self.report(EventKind::Completion),
            EventValue::Cancelled => self.report(EventKind::Cancelled),
            EventValue::Error(reason) => self.report(EventKind::Error).with_value(reason),
        };
        self.logger.log(ev.with_source(Arc::clone(source)));
    }

    fn report(&self, kind: EventKind) -> LaneEvent {
        LaneEvent::new(kind, self.id, Arc::clone(&self.name))
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("logger", &self.logger.name())
            .finish()
    }
}
