//! # Lane event subscriber trait.
//!
//! Provides [`Subscribe`] an extension point for plugging async sinks (a
//! timeline instrument, a socket, a file) behind a [`SubscriberSet`](crate::SubscriberSet).
//!
//! Each subscriber gets:
//! - **Dedicated worker task** (runs independently)
//! - **Per-subscriber bounded queue** (capacity via [`Subscribe::queue_capacity`])
//! - **Panic isolation** (panics are caught and logged)
//!
//! ## Architecture
//! ```text
//! LaneStream ──► SubscriberSet::log ──► [bounded queue] ──► worker task ──► subscriber.on_event()
//!                                                                      └─► panic caught → tracing::error!
//! ```
//!
//! ## Rules
//! - A slow subscriber only affects its own queue.
//! - Queue overflow drops the event **for this subscriber only**.
//! - Events are processed sequentially (FIFO) per subscriber.
//! - Subscribers never block the stream being instrumented.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use timelane::{EventKind, LaneEvent, Subscribe};
//!
//! struct Failures;
//!
//! #[async_trait]
//! impl Subscribe for Failures {
//!     async fn on_event(&self, ev: &LaneEvent) {
//!         if matches!(ev.kind, EventKind::Error) {
//!             // page someone, etc.
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "failures" }
//!     fn queue_capacity(&self) -> usize { 64 }
//! }
//! ```

use async_trait::async_trait;

use crate::events::LaneEvent;

/// Async sink for lane events.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally; do not panic.
/// - Slow processing affects only this subscriber's queue.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Processes a single event.
    ///
    /// Called from a dedicated worker task, not from the stream's poll.
    /// Events are delivered in FIFO order per subscriber.
    async fn on_event(&self, event: &LaneEvent);

    /// Returns the subscriber name used in diagnostics.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns the preferred queue capacity for this subscriber.
    ///
    /// When full, new events are dropped for this subscriber only.
    /// The set clamps capacity to a minimum of 1.
    ///
    /// Default: 1024.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
