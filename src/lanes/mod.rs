//! # Lanes: the instrumentation operator.
//!
//! A lane wraps a stream and reports its lifecycle to a [`Logger`](crate::Logger)
//! without touching the data path.
//!
//! ## Architecture
//! ```text
//! stream::iter([1,2,3])
//!     .lane("numbers")              LaneExt (track_caller → SourceLocation)
//!          │
//!          ▼
//!   Lane::attach ──► Tracker::start ──► Begin
//!          │
//!          ▼
//!   LaneStream::poll_next ──► Value("1") Value("2") Value("3")
//!          │
//!          └─ source done ──► guard ──► End(Completed) + Completion
//! ```
//!
//! ## Contents
//! - [`Lane`], [`LaneBuilder`] reusable stage and its builder
//! - [`LaneStream`], [`LaneHandle`] instrumented stream and cross-thread handle
//! - [`LaneExt`] `.lane(..)` operators on any stream, plus [`lane!`](crate::lane) / [`try_lane!`](crate::try_lane)
//! - [`Observe`], [`Values`], [`Fallible`] item classification
//! - [`SourceLocation`], [`here!`](crate::here) call-site capture

mod ext;
mod lane;
mod observe;
mod source;
mod stream;

pub use ext::LaneExt;
pub use lane::{Lane, LaneBuilder};
pub use observe::{Fallible, Formatter, Observe, Values};
pub use source::SourceLocation;
pub use stream::{LaneHandle, LaneStream};
