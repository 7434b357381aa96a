//! Logging backends for lane reports.
//!
//! ## Contents
//! - [`Logger`] the synchronous, non-blocking reporting seam
//! - [`TracingLogger`] reports as `tracing` events (fallback default)
//! - [`Recorder`] in-memory capture
//! - [`set_default_logger`] / [`default_logger`] process-wide default
//!
//! Async sinks plug in through [`SubscriberSet`](crate::SubscriberSet), which
//! is itself a [`Logger`].

mod logger;
mod recorder;
mod trace;

pub use logger::{default_logger, set_default_logger, Logger, LoggerRef};
pub use recorder::Recorder;
pub use trace::TracingLogger;
