//! Lane core: subscriptions and termination.
//!
//! Internal modules:
//! - [`config`]: shared lane defaults, optionally read from the environment;
//! - [`guard`]: once-only termination flag (atomic compare-and-set);
//! - [`subscription`]: subscription handle that phrases reports;
//! - [`tracker`]: per-subscription state shared by a stream and its handles.
//!
//! ```text
//! LaneStream ──┐                      ┌─► Subscription ──► Logger
//!              ├──► Tracker ──────────┤
//! LaneHandle ──┘   (filter, guard)    └─► TerminationGuard
//! ```

mod config;
mod guard;
mod subscription;
mod tracker;

pub use config::Config;
pub use guard::TerminationGuard;
pub use subscription::{EventValue, Subscription};

pub(crate) use tracker::Tracker;
