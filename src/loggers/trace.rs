//! # TracingLogger: lane reports as `tracing` events
//!
//! Emits one event per report under the `timelane` target. Subscription
//! events are logged at `INFO`, values and terminal markers at `DEBUG`,
//! failures at `WARN`. Install any `tracing` subscriber to see them:
//!
//! ```text
//! INFO timelane: begin lane="numbers" subscription=3 source="main.rs:12 - main()"
//! DEBUG timelane: value lane="numbers" subscription=3 value="1"
//! INFO timelane: end lane="numbers" subscription=3 state="completed"
//! ```

use tracing::{debug, info, warn};

use crate::events::{EventKind, LaneEvent, SubscriptionState};
use crate::loggers::Logger;

/// Logger forwarding reports to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl TracingLogger {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn log(&self, ev: LaneEvent) {
        let lane = &*ev.lane;
        let subscription = ev.subscription;
        let source = ev.source.as_deref().unwrap_or("");
        let value = ev.value.as_deref().unwrap_or("");

        match ev.kind {
            EventKind::Begin => {
                info!(target: "timelane", lane, subscription, source, "begin");
            }
            EventKind::End => {
                let state = ev
                    .state
                    .as_ref()
                    .map(SubscriptionState::as_label)
                    .unwrap_or("unknown");
                info!(target: "timelane", lane, subscription, state, "end");
            }
            EventKind::Value => {
                debug!(target: "timelane", lane, subscription, value, "value");
            }
            EventKind::Completion => {
                debug!(target: "timelane", lane, subscription, "completion");
            }
            EventKind::Cancelled => {
                debug!(target: "timelane", lane, subscription, "cancelled");
            }
            EventKind::Error => {
                warn!(target: "timelane", lane, subscription, reason = value, "error");
            }
        }
    }

    fn name(&self) -> &'static str {
        "tracing"
    }
}
