//! # Async subscribers for lane events.
//!
//! This module provides the [`Subscribe`] trait and [`SubscriberSet`], the
//! [`Logger`](crate::Logger) that fans lane events out to subscribers.
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   LaneStream ── Logger::log(LaneEvent) ──► SubscriberSet ──► per-subscriber queue
//!                                                                  │
//!                                                                  ├──► Subscribe::on_event(&LaneEvent)
//!                                                                  │         │
//!                                                                  │    ┌────┴─────┬──────────┐
//!                                                                  │    ▼          ▼          ▼
//!                                                                  │  LogWriter  Instrument  Custom
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use timelane::{LaneEvent, Subscribe, SubscriberSet};
//!
//! struct Forward;
//!
//! #[async_trait]
//! impl Subscribe for Forward {
//!     async fn on_event(&self, ev: &LaneEvent) {
//!         // ship `ev` to the timeline instrument
//!         let _ = ev;
//!     }
//! }
//!
//! # async fn demo() {
//! let set = Arc::new(SubscriberSet::new(vec![Arc::new(Forward) as _]));
//! # }
//! ```

#[cfg(feature = "logging")]
mod embedded;
mod set;
mod subscriber;

#[cfg(feature = "logging")]
pub use embedded::LogWriter;
pub use set::SubscriberSet;
pub use subscriber::Subscribe;
