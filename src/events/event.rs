//! # Lane events reported to the logging backend.
//!
//! The [`EventKind`] enum classifies reports across the two lane categories:
//! - **Subscription events** ([`LaneType::Subscription`]): `Begin`, `End`
//! - **Value events** ([`LaneType::Event`]): `Value`, `Completion`, `Cancelled`, `Error`
//!
//! The [`LaneEvent`] struct carries the metadata: sequence number, timestamp,
//! subscription id, lane name, source location, terminal state and formatted value.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order
//! (e.g. through per-subscriber queues).
//!
//! ## Example
//! ```rust
//! use timelane::{EventKind, LaneEvent, LaneType};
//!
//! let ev = LaneEvent::new(EventKind::Value, 7, "numbers")
//!     .with_source("main.rs:12 - main()")
//!     .with_value("42");
//!
//! assert_eq!(ev.kind.lane_type(), LaneType::Event);
//! assert_eq!(ev.value.as_deref(), Some("42"));
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Lane category a report belongs to.
///
/// Filters ([`LaneFilter`](crate::LaneFilter)) enable or disable whole categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneType {
    /// Subscription lifecycle: begin and end.
    Subscription,
    /// Per-emission values and terminal markers on the value track.
    Event,
}

impl LaneType {
    /// All categories, in display order.
    pub const ALL: [LaneType; 2] = [LaneType::Subscription, LaneType::Event];

    /// Stable lowercase name, also accepted by the filter parser.
    pub fn as_str(&self) -> &'static str {
        match self {
            LaneType::Subscription => "subscription",
            LaneType::Event => "event",
        }
    }
}

impl fmt::Display for LaneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a subscription ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionState {
    /// The source stream finished.
    Completed,
    /// The subscription was disposed before the source finished.
    Cancelled,
    /// The source yielded an error item (failure lanes only).
    Failed(Arc<str>),
}

impl SubscriptionState {
    /// Short stable label for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            SubscriptionState::Completed => "completed",
            SubscriptionState::Cancelled => "cancelled",
            SubscriptionState::Failed(_) => "error",
        }
    }
}

/// Classification of lane reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Subscription category ===
    /// Subscription started.
    ///
    /// Sets:
    /// - `source`: call-site location
    Begin,

    /// Subscription ended.
    ///
    /// Sets:
    /// - `state`: completed / cancelled / failed
    End,

    // === Event category ===
    /// The stream emitted an item.
    ///
    /// Sets:
    /// - `value`: formatted item
    /// - `source`: call-site location
    Value,

    /// Completion marker on the value track.
    Completion,

    /// Cancellation marker on the value track.
    Cancelled,

    /// Failure marker on the value track.
    ///
    /// Sets:
    /// - `value`: error description
    Error,
}

impl EventKind {
    /// Category this kind is filtered under.
    #[inline]
    pub fn lane_type(&self) -> LaneType {
        match self {
            EventKind::Begin | EventKind::End => LaneType::Subscription,
            EventKind::Value | EventKind::Completion | EventKind::Cancelled | EventKind::Error => {
                LaneType::Event
            }
        }
    }

    /// Whether the kind marks the end of a subscription (on either track).
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            EventKind::End | EventKind::Completion | EventKind::Cancelled | EventKind::Error
        )
    }
}

/// One report for the logging backend.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Debug, Clone)]
pub struct LaneEvent {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Subscription this report belongs to.
    pub subscription: u64,
    /// Lane display name.
    pub lane: Arc<str>,
    /// Event classification.
    pub kind: EventKind,
    /// Rendered call-site location (`file:line - function`).
    pub source: Option<Arc<str>>,
    /// Terminal state (only for `End`).
    pub state: Option<SubscriptionState>,
    /// Formatted item or failure reason.
    pub value: Option<Arc<str>>,
}

impl LaneEvent {
    /// Creates a new event with the current timestamp and next sequence number.
    pub fn new(kind: EventKind, subscription: u64, lane: impl Into<Arc<str>>) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            subscription,
            lane: lane.into(),
            kind,
            source: None,
            state: None,
            value: None,
        }
    }

    /// Attaches the rendered source location.
    #[inline]
    pub fn with_source(mut self, source: impl Into<Arc<str>>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attaches a terminal state.
    #[inline]
    pub fn with_state(mut self, state: SubscriptionState) -> Self {
        self.state = Some(state);
        self
    }

    /// Attaches a formatted value or reason.
    #[inline]
    pub fn with_value(mut self, value: impl Into<Arc<str>>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Category of this event.
    #[inline]
    pub fn lane_type(&self) -> LaneType {
        self.kind.lane_type()
    }
}
