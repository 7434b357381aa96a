//! Lane events: types and category filter.
//!
//! This module groups the **data model** handed to loggers and the **filter**
//! deciding which categories reach them.
//!
//! ## Contents
//! - [`EventKind`], [`LaneEvent`] report classification and payload metadata
//! - [`LaneType`], [`SubscriptionState`] category and terminal state
//! - [`LaneFilter`] set of enabled categories
//!
//! ## Quick reference
//! - **Publisher**: the per-subscription tracker behind every `LaneStream`.
//! - **Consumers**: any [`Logger`](crate::Logger) (`TracingLogger`, `Recorder`,
//!   `SubscriberSet`).

mod event;
mod filter;

pub use event::{EventKind, LaneEvent, LaneType, SubscriptionState};
pub use filter::LaneFilter;
