//! # Lane: a reusable instrumentation stage.
//!
//! [`Lane`] bundles everything needed to instrument a stream: display name,
//! call-site location, value formatter, category filter, logger and an
//! optional parent cancellation token. It is built with [`LaneBuilder`] and
//! attached to streams with [`Lane::attach`] / [`Lane::attach_try`].
//!
//! Attaching is the subscribe point: each attach creates a new
//! [`Subscription`] with its own termination guard and reports `Begin`
//! immediately. Attaching the same lane to two streams yields two independent
//! subscriptions that never suppress each other's reports.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use futures::{executor::block_on, stream, StreamExt};
//! use timelane::{EventKind, Lane, Recorder};
//!
//! let rec = Arc::new(Recorder::new());
//! let lane = Lane::<u32>::builder("numbers").logger(rec.clone()).build();
//!
//! let out: Vec<u32> = block_on(lane.attach(stream::iter([1, 2, 3])).collect());
//! assert_eq!(out, vec![1, 2, 3]);
//! assert_eq!(rec.values(), vec!["1", "2", "3"]);
//! assert_eq!(rec.count(EventKind::End), 1);
//! ```

use std::fmt::{self, Debug, Display};
use std::sync::Arc;

use futures::Stream;
use tokio_util::sync::CancellationToken;

use crate::core::{Config, Subscription, Tracker};
use crate::events::LaneFilter;
use crate::loggers::{default_logger, LoggerRef};

use super::observe::{Fallible, Formatter, Values};
use super::source::SourceLocation;
use super::stream::LaneStream;

/// Preconfigured instrumentation stage.
pub struct Lane<T> {
    name: Arc<str>,
    source: Arc<str>,
    format: Formatter<T>,
    filter: LaneFilter,
    logger: LoggerRef,
    parent: Option<CancellationToken>,
}

impl<T: 'static> Lane<T> {
    /// Starts building a lane; records the caller as its source location.
    #[track_caller]
    pub fn builder(name: impl Into<Arc<str>>) -> LaneBuilder<T> {
        LaneBuilder::new(name)
    }

    /// Subscribes `stream` through this lane.
    ///
    /// Reports `Begin` now; the returned stream reports values and the end.
    pub fn attach<S>(&self, stream: S) -> LaneStream<S, Values<T>>
    where
        S: Stream<Item = T>,
    {
        LaneStream::new(stream, Values::new(Arc::clone(&self.format)), self.subscribe())
    }

    /// Subscribes a stream of `Result`s through this lane.
    ///
    /// `Ok` items are values formatted by the lane; the first `Err` ends the
    /// subscription as failed. Items are forwarded unchanged either way.
    pub fn attach_try<S, E>(&self, stream: S) -> LaneStream<S, Fallible<T>>
    where
        S: Stream<Item = Result<T, E>>,
        E: Display,
    {
        LaneStream::new(
            stream,
            Fallible::new(Arc::clone(&self.format)),
            self.subscribe(),
        )
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rendered source location.
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn filter(&self) -> LaneFilter {
        self.filter
    }

    fn subscribe(&self) -> Arc<Tracker> {
        let token = match &self.parent {
            Some(parent) => parent.child_token(),
            None => CancellationToken::new(),
        };
        Tracker::start(
            Subscription::new(Arc::clone(&self.name), Arc::clone(&self.logger)),
            Arc::clone(&self.source),
            self.filter,
            token,
        )
    }
}

impl<T> Clone for Lane<T> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            source: Arc::clone(&self.source),
            format: Arc::clone(&self.format),
            filter: self.filter,
            logger: Arc::clone(&self.logger),
            parent: self.parent.clone(),
        }
    }
}

impl<T> fmt::Debug for Lane<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lane")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("filter", &self.filter)
            .field("logger", &self.logger.name())
            .finish()
    }
}

/// Builder for [`Lane`].
///
/// Defaults: all categories, file-name-only source paths, the process-wide
/// [`default_logger`], `Debug` formatting, no parent cancellation token.
pub struct LaneBuilder<T> {
    name: Arc<str>,
    location: SourceLocation,
    format: Option<Formatter<T>>,
    filter: LaneFilter,
    full_paths: bool,
    logger: Option<LoggerRef>,
    parent: Option<CancellationToken>,
}

impl<T: 'static> LaneBuilder<T> {
    /// Creates a builder; records the caller as the source location.
    #[track_caller]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            location: SourceLocation::caller(),
            format: None,
            filter: LaneFilter::all(),
            full_paths: false,
            logger: None,
            parent: None,
        }
    }

    /// Inherits filter and path rendering from `cfg`.
    pub fn with_config(mut self, cfg: &Config) -> Self {
        self.filter = cfg.filter;
        self.full_paths = cfg.full_paths;
        self
    }

    /// Overrides the recorded source location (see [`here!`](crate::here)).
    pub fn source(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }

    /// Sets the value formatter.
    pub fn formatter<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.format = Some(Arc::new(f));
        self
    }

    pub fn filter(mut self, filter: LaneFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn logger(mut self, logger: LoggerRef) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Cancels every subscription of this lane when `token` is cancelled.
    ///
    /// Each subscription listens on its own child token, so cancelling one
    /// subscription's handle leaves the others alone.
    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.parent = Some(token);
        self
    }

    /// Builds the lane with `format` as the formatter, for items without `Debug`.
    pub fn build_with<F>(self, format: F) -> Lane<T>
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.finish(Arc::new(format))
    }

    /// Builds the lane; items are formatted with `Debug` unless a formatter was set.
    pub fn build(mut self) -> Lane<T>
    where
        T: Debug,
    {
        let format: Formatter<T> = match self.format.take() {
            Some(f) => f,
            None => Arc::new(|v: &T| format!("{v:?}")),
        };
        self.finish(format)
    }

    fn finish(self, format: Formatter<T>) -> Lane<T> {
        Lane {
            source: Arc::from(self.location.render(self.full_paths)),
            name: self.name,
            format,
            filter: self.filter,
            logger: self.logger.unwrap_or_else(default_logger),
            parent: self.parent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventKind, LaneType};
    use crate::loggers::Recorder;
    use futures::{executor::block_on, stream, StreamExt};

    #[test]
    fn test_builder_records_call_site() {
        let lane = Lane::<u8>::builder("x").logger(Arc::new(Recorder::new())).build();
        assert!(lane.source().starts_with("lane.rs:"), "got {}", lane.source());
        assert_eq!(lane.name(), "x");
    }

    #[test]
    fn test_config_controls_filter_and_paths() {
        let cfg = Config {
            filter: LaneFilter::only(LaneType::Event),
            full_paths: true,
        };
        let lane = Lane::<u8>::builder("x")
            .with_config(&cfg)
            .logger(Arc::new(Recorder::new()))
            .build();
        assert_eq!(lane.filter(), LaneFilter::only(LaneType::Event));
        assert!(lane.source().contains("src/lanes/lane.rs:"), "got {}", lane.source());
    }

    #[test]
    fn test_explicit_source_location() {
        let lane = Lane::<u8>::builder("x")
            .source(SourceLocation::new("src/jobs.rs", 9, "jobs::run"))
            .logger(Arc::new(Recorder::new()))
            .build();
        assert_eq!(lane.source(), "jobs.rs:9 - jobs::run");
    }

    #[test]
    fn test_custom_formatter_for_non_debug_items() {
        struct Opaque(u32);

        let rec = Arc::new(Recorder::new());
        let lane = Lane::<Opaque>::builder("opaque")
            .logger(rec.clone())
            .build_with(|o| format!("opaque-{}", o.0));

        let _ = block_on(lane.attach(stream::iter([Opaque(1), Opaque(2)])).count());
        assert_eq!(rec.values(), vec!["opaque-1", "opaque-2"]);
    }

    #[test]
    fn test_two_attaches_are_independent_subscriptions() {
        let rec = Arc::new(Recorder::new());
        let lane = Lane::<u8>::builder("shared").logger(rec.clone()).build();

        let first = lane.attach(stream::iter([1u8, 2]));
        let second = lane.attach(stream::iter([3u8]));
        let (a, b) = (first.subscription_id(), second.subscription_id());
        assert_ne!(a, b);

        // Cancel one, complete the other.
        second.handle().cancel();
        let _ = block_on(first.collect::<Vec<_>>());
        drop(second);

        assert_eq!(
            rec.kinds_for(a),
            vec![
                EventKind::Begin,
                EventKind::Value,
                EventKind::Value,
                EventKind::End,
                EventKind::Completion
            ]
        );
        assert_eq!(
            rec.kinds_for(b),
            vec![EventKind::Begin, EventKind::End, EventKind::Cancelled]
        );
    }

    #[test]
    fn test_parent_token_cancels_all_subscriptions() {
        let rec = Arc::new(Recorder::new());
        let parent = CancellationToken::new();
        let lane = Lane::<u8>::builder("ticks")
            .logger(rec.clone())
            .cancel_on(parent.clone())
            .build();

        let mut a = lane.attach(stream::pending::<u8>());
        let mut b = lane.attach(stream::pending::<u8>());
        parent.cancel();

        assert_eq!(block_on(a.next()), None);
        assert_eq!(block_on(b.next()), None);
        assert_eq!(rec.count(EventKind::End), 2);
        assert_eq!(rec.count(EventKind::Cancelled), 2);
    }
}
