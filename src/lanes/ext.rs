//! # `lane` operator on any stream.
//!
//! [`LaneExt`] is implemented for every [`Stream`]. The one-liners build a
//! throwaway [`Lane`] with the process-wide default logger; `lane_with` /
//! `try_lane_with` reuse a configured lane.
//!
//! The [`lane!`](crate::lane) and [`try_lane!`](crate::try_lane) macros record
//! file, line and enclosing function. The `.lane(..)` methods only see file and
//! line through `#[track_caller]`.
//!
//! ```rust
//! use futures::{executor::block_on, stream, StreamExt};
//! use timelane::LaneExt;
//!
//! let doubled: Vec<u32> = block_on(
//!     stream::iter([1u32, 2, 3])
//!         .lane("input")
//!         .map(|v| v * 2)
//!         .lane_formatted("doubled", |v| format!("{v:#x}"))
//!         .collect(),
//! );
//! assert_eq!(doubled, vec![2, 4, 6]);
//! ```

use std::fmt::{Debug, Display};
use std::sync::Arc;

use futures::Stream;

use super::lane::Lane;
use super::observe::{Fallible, Values};
use super::source::SourceLocation;
use super::stream::LaneStream;

/// Extension trait adding lane operators to streams.
pub trait LaneExt: Stream + Sized {
    /// Instruments the stream under `name`, formatting items with `Debug`.
    #[track_caller]
    fn lane(self, name: impl Into<Arc<str>>) -> LaneStream<Self, Values<Self::Item>>
    where
        Self::Item: Debug + 'static,
    {
        Lane::<Self::Item>::builder(name).build().attach(self)
    }

    /// Instruments the stream under `name` with a custom formatter.
    #[track_caller]
    fn lane_formatted<F>(
        self,
        name: impl Into<Arc<str>>,
        format: F,
    ) -> LaneStream<Self, Values<Self::Item>>
    where
        Self::Item: 'static,
        F: Fn(&Self::Item) -> String + Send + Sync + 'static,
    {
        Lane::<Self::Item>::builder(name)
            .build_with(format)
            .attach(self)
    }

    /// Instruments the stream under `name` with an explicit source location.
    ///
    /// Usually reached through [`lane!`](crate::lane).
    fn lane_at(
        self,
        name: impl Into<Arc<str>>,
        source: SourceLocation,
    ) -> LaneStream<Self, Values<Self::Item>>
    where
        Self::Item: Debug + 'static,
    {
        Lane::<Self::Item>::builder(name)
            .source(source)
            .build()
            .attach(self)
    }

    /// Like [`lane_at`](LaneExt::lane_at) with a custom formatter.
    fn lane_formatted_at<F>(
        self,
        name: impl Into<Arc<str>>,
        source: SourceLocation,
        format: F,
    ) -> LaneStream<Self, Values<Self::Item>>
    where
        Self::Item: 'static,
        F: Fn(&Self::Item) -> String + Send + Sync + 'static,
    {
        Lane::<Self::Item>::builder(name)
            .source(source)
            .build_with(format)
            .attach(self)
    }

    /// Instruments the stream through a preconfigured lane.
    fn lane_with(self, lane: &Lane<Self::Item>) -> LaneStream<Self, Values<Self::Item>>
    where
        Self::Item: 'static,
    {
        lane.attach(self)
    }

    /// Instruments a stream of `Result`s; the first `Err` is reported as a failure.
    #[track_caller]
    fn try_lane<T, E>(self, name: impl Into<Arc<str>>) -> LaneStream<Self, Fallible<T>>
    where
        Self: Stream<Item = Result<T, E>>,
        T: Debug + 'static,
        E: Display,
    {
        Lane::<T>::builder(name).build().attach_try(self)
    }

    /// Failure lane with an explicit source location.
    ///
    /// Usually reached through [`try_lane!`](crate::try_lane).
    fn try_lane_at<T, E>(
        self,
        name: impl Into<Arc<str>>,
        source: SourceLocation,
    ) -> LaneStream<Self, Fallible<T>>
    where
        Self: Stream<Item = Result<T, E>>,
        T: Debug + 'static,
        E: Display,
    {
        Lane::<T>::builder(name)
            .source(source)
            .build()
            .attach_try(self)
    }

    /// Instruments a stream of `Result`s through a preconfigured lane.
    fn try_lane_with<T, E>(self, lane: &Lane<T>) -> LaneStream<Self, Fallible<T>>
    where
        Self: Stream<Item = Result<T, E>>,
        T: 'static,
        E: Display,
    {
        lane.attach_try(self)
    }
}

impl<S: Stream> LaneExt for S {}

/// Attaches a lane to a stream, recording file, line and enclosing function.
///
/// `lane!(stream, name)` formats items with `Debug`;
/// `lane!(stream, name, formatter)` uses the given formatter.
///
/// ```rust
/// use futures::{executor::block_on, stream, StreamExt};
/// use timelane::lane;
///
/// fn load() -> String {
///     let s = lane!(stream::iter([1u8, 2]), "bytes");
///     let source = s.handle().source().to_string();
///     let _ = block_on(s.count());
///     source
/// }
///
/// let source = load();
/// assert!(source.contains(" - "), "{source}");
/// assert!(source.ends_with("load"), "{source}");
/// ```
#[macro_export]
macro_rules! lane {
    ($stream:expr, $name:expr $(,)?) => {
        $crate::LaneExt::lane_at($stream, $name, $crate::here!())
    };
    ($stream:expr, $name:expr, $format:expr $(,)?) => {
        $crate::LaneExt::lane_formatted_at($stream, $name, $crate::here!(), $format)
    };
}

/// Failure-lane counterpart of [`lane!`](crate::lane) for streams of `Result`s.
#[macro_export]
macro_rules! try_lane {
    ($stream:expr, $name:expr $(,)?) => {
        $crate::LaneExt::try_lane_at($stream, $name, $crate::here!())
    };
}
