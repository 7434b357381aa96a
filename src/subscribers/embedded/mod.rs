//! # Built-in subscribers
//!
//! Small, self-contained implementations useful for demos.
//!
//! - [`LogWriter`]: prints lane events in a human-readable form (demo/debug).

mod log;

pub use log::LogWriter;
