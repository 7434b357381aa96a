//! # timelane
//!
//! **Timelane** instruments async streams for timeline debugging.
//!
//! Attaching a *lane* to a [`Stream`](futures::Stream) reports the stream's
//! lifecycle (subscribe, each value, completion, cancellation, failure) to a
//! [`Logger`]. The stream itself passes through untouched: same items, same
//! order, same readiness.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │ .lane("a")   │   │ .lane("b")   │   │ lane.attach()│
//!     │ (LaneExt)    │   │ (LaneExt)    │   │ (Lane<T>)    │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  LaneStream  │   │  LaneStream  │   │  LaneStream  │   ◄── LaneHandle::cancel()
//!     │  + Tracker   │   │  + Tracker   │   │  + Tracker   │       (any thread)
//!     │ (guard/filter│   │ (guard/filter│   │ (guard/filter│
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            │ Begin / Value / End(state) / Completion / Cancelled / Error
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  dyn Logger                                                       │
//! │  - TracingLogger (default)                                        │
//! │  - Recorder (in-memory)                                           │
//! │  - SubscriberSet ──► [queue] ──► worker ──► Subscribe::on_event() │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ### Lifecycle
//! ```text
//! attach ──► Begin
//!
//! loop poll_next {
//!   ├─► token cancelled          ─► guard ─► End(Cancelled) + Cancelled, None
//!   ├─► source Some(item)        ─► Value(format(item))   (Error for Err items on try lanes)
//!   └─► source None              ─► guard ─► End(Completed) + Completion
//! }
//!
//! drop / LaneHandle::cancel ─► guard ─► End(Cancelled) + Cancelled
//! ```
//! The guard is a per-subscription compare-and-set: whichever terminal signal
//! arrives first is reported, the others are suppressed.
//!
//! ## Features
//! | Area              | Description                                                   | Key types / traits                          |
//! |-------------------|---------------------------------------------------------------|---------------------------------------------|
//! | **Operator**      | Pass-through instrumentation of any stream.                   | [`LaneExt`], [`lane!`], [`Lane`]            |
//! | **Termination**   | Once-only end report under racing completion/cancellation.    | [`TerminationGuard`], [`LaneHandle`]        |
//! | **Events**        | Reports, categories and filters.                              | [`LaneEvent`], [`EventKind`], [`LaneFilter`]|
//! | **Backends**      | Where reports go.                                             | [`Logger`], [`TracingLogger`], [`Recorder`] |
//! | **Subscribers**   | Async fan-out with per-subscriber queues.                     | [`Subscribe`], [`SubscriberSet`]            |
//! | **Configuration** | Shared defaults, optionally from the environment.             | [`Config`]                                  |
//! | **Errors**        | Typed configuration errors.                                   | [`LaneError`]                               |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in `LogWriter` subscriber _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use futures::{executor::block_on, stream, StreamExt};
//! use timelane::{EventKind, Lane, LaneExt, LaneFilter, Recorder};
//!
//! let rec = Arc::new(Recorder::new());
//! let lane = Lane::<i32>::builder("numbers")
//!     .logger(rec.clone())
//!     .filter(LaneFilter::all())
//!     .build();
//!
//! let out: Vec<i32> = block_on(stream::iter([1, 2, 3]).lane_with(&lane).collect());
//! assert_eq!(out, vec![1, 2, 3]);
//! assert_eq!(
//!     rec.kinds(),
//!     vec![
//!         EventKind::Begin,
//!         EventKind::Value,
//!         EventKind::Value,
//!         EventKind::Value,
//!         EventKind::End,
//!         EventKind::Completion,
//!     ]
//! );
//! ```
mod core;
mod error;
mod events;
mod lanes;
mod loggers;
mod subscribers;

// ---- Public re-exports ----

pub use self::core::{Config, EventValue, Subscription, TerminationGuard};
pub use error::LaneError;
pub use events::{EventKind, LaneEvent, LaneFilter, LaneType, SubscriptionState};
pub use lanes::{
    Fallible, Formatter, Lane, LaneBuilder, LaneExt, LaneHandle, LaneStream, Observe,
    SourceLocation, Values,
};
pub use loggers::{default_logger, set_default_logger, Logger, LoggerRef, Recorder, TracingLogger};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in printer subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
