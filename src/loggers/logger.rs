//! # Logging backend trait and the process-wide default.
//!
//! [`Logger`] is the seam between lanes and whatever draws the timeline.
//! A lane calls [`Logger::log`] from inside `poll_next` (values, completion) or
//! from whichever thread disposes the subscription (cancellation), so
//! implementations must be cheap and must never block or await.
//!
//! ## Default logger
//! Lanes built without an explicit logger use [`default_logger`]. It returns the
//! logger installed with [`set_default_logger`], or a [`TracingLogger`] when none
//! was installed. The default can be installed once per process.
//!
//! ```rust
//! use std::sync::Arc;
//! use timelane::{default_logger, Recorder};
//!
//! let _logger = default_logger(); // TracingLogger unless something was installed
//! let rec = Arc::new(Recorder::new());
//! assert!(rec.is_empty());
//! ```

use std::sync::{Arc, OnceLock};

use crate::error::LaneError;
use crate::events::LaneEvent;

use super::TracingLogger;

static DEFAULT_LOGGER: OnceLock<Arc<dyn Logger>> = OnceLock::new();

/// Destination for lane reports.
///
/// ### Implementation requirements
/// - Non-blocking: called from the stream's poll path.
/// - Thread-safe: cancellation may be reported from any thread.
/// - Infallible from the lane's point of view; handle errors internally.
pub trait Logger: Send + Sync + 'static {
    /// Records one report.
    fn log(&self, event: LaneEvent);

    /// Returns the logger name used in diagnostics.
    ///
    /// The default uses `type_name::<Self>()`; override it for shorter names.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Shared, type-erased logger handle.
pub type LoggerRef = Arc<dyn Logger>;

/// Installs the process-wide default logger.
///
/// # Errors
/// Returns [`LaneError::DefaultLoggerAlreadySet`] if a default was already installed.
pub fn set_default_logger(logger: LoggerRef) -> Result<(), LaneError> {
    let name = logger.name();
    DEFAULT_LOGGER
        .set(logger)
        .map_err(|_| LaneError::DefaultLoggerAlreadySet)?;
    tracing::debug!(logger = name, "installed default lane logger");
    Ok(())
}

/// Returns the process-wide default logger.
///
/// Falls back to a fresh [`TracingLogger`] when nothing was installed.
pub fn default_logger() -> LoggerRef {
    match DEFAULT_LOGGER.get() {
        Some(logger) => Arc::clone(logger),
        None => Arc::new(TracingLogger::new()),
    }
}
