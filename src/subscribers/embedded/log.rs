//! # LogWriter: simple lane event printer
//!
//! A minimal subscriber that prints incoming [`LaneEvent`]s to stdout.
//! Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! [begin] lane="numbers" sub=3 source="main.rs:12 - demo::main"
//! [value] lane="numbers" sub=3 value="1"
//! [end] lane="numbers" sub=3 state=completed
//! [completion] lane="numbers" sub=3
//! [cancelled] lane="ticks" sub=4
//! [error] lane="io" sub=5 reason="timeout"
//! ```

use async_trait::async_trait;

use crate::events::{EventKind, LaneEvent, SubscriptionState};
use crate::subscribers::Subscribe;

/// Lane event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn line(e: &LaneEvent) -> String {
        let head = format!("lane={:?} sub={}", &*e.lane, e.subscription);
        let value = e.value.as_deref().unwrap_or("");
        match e.kind {
            EventKind::Begin => format!(
                "[begin] {head} source={:?}",
                e.source.as_deref().unwrap_or("")
            ),
            EventKind::End => format!(
                "[end] {head} state={}",
                e.state
                    .as_ref()
                    .map(SubscriptionState::as_label)
                    .unwrap_or("unknown")
            ),
            EventKind::Value => format!("[value] {head} value={value:?}"),
            EventKind::Completion => format!("[completion] {head}"),
            EventKind::Cancelled => format!("[cancelled] {head}"),
            EventKind::Error => format!("[error] {head} reason={value:?}"),
        }
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &LaneEvent) {
        println!("{}", Self::line(e));
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
