//! # In-memory recorder.
//!
//! [`Recorder`] keeps every report it receives, in arrival order. It backs the
//! crate's own tests and is handy for snapshotting what a pipeline reports.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::events::{EventKind, LaneEvent};
use crate::loggers::Logger;

/// Logger that stores reports in memory.
#[derive(Debug, Default)]
pub struct Recorder {
    events: Mutex<Vec<LaneEvent>>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn events(&self) -> Vec<LaneEvent> {
        self.lock().clone()
    }

    /// Recorded kinds, in arrival order.
    pub fn kinds(&self) -> Vec<EventKind> {
        self.lock().iter().map(|e| e.kind).collect()
    }

    /// Recorded kinds for one subscription.
    pub fn kinds_for(&self, subscription: u64) -> Vec<EventKind> {
        self.lock()
            .iter()
            .filter(|e| e.subscription == subscription)
            .map(|e| e.kind)
            .collect()
    }

    /// Formatted values of `Value` reports, in arrival order.
    pub fn values(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|e| e.kind == EventKind::Value)
            .filter_map(|e| e.value.as_deref().map(str::to_owned))
            .collect()
    }

    /// Number of reports of the given kind.
    pub fn count(&self, kind: EventKind) -> usize {
        self.lock().iter().filter(|e| e.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drops everything recorded so far.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LaneEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Logger for Recorder {
    fn log(&self, event: LaneEvent) {
        self.lock().push(event);
    }

    fn name(&self) -> &'static str {
        "recorder"
    }
}
