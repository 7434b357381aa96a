//! # Item observers.
//!
//! A [`LaneStream`](crate::LaneStream) hands every item it forwards to an
//! [`Observe`] implementation, which decides whether the item is a plain value
//! or a failure and how it is described on the timeline.
//!
//! - [`Values`]: every item is a value, described by the lane's formatter.
//! - [`Fallible`]: for `Result<T, E>` items; `Ok` is a value, `Err` ends the
//!   subscription as failed with `E`'s `Display` text as the reason.

use std::fmt::Display;
use std::sync::Arc;

/// Caller-supplied value formatter.
pub type Formatter<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Classifies and describes stream items.
pub trait Observe<I> {
    /// True if the item terminates the subscription as failed.
    fn is_failure(&self, item: &I) -> bool;

    /// Text shown on the timeline for the item.
    fn describe(&self, item: &I) -> String;
}

/// Observer for infallible streams.
pub struct Values<T> {
    format: Formatter<T>,
}

impl<T> Values<T> {
    pub(crate) fn new(format: Formatter<T>) -> Self {
        Self { format }
    }
}

impl<T> Observe<T> for Values<T> {
    #[inline]
    fn is_failure(&self, _item: &T) -> bool {
        false
    }

    #[inline]
    fn describe(&self, item: &T) -> String {
        (self.format)(item)
    }
}

/// Observer for streams of `Result<T, E>`.
pub struct Fallible<T> {
    format: Formatter<T>,
}

impl<T> Fallible<T> {
    pub(crate) fn new(format: Formatter<T>) -> Self {
        Self { format }
    }
}

impl<T, E: Display> Observe<Result<T, E>> for Fallible<T> {
    #[inline]
    fn is_failure(&self, item: &Result<T, E>) -> bool {
        item.is_err()
    }

    fn describe(&self, item: &Result<T, E>) -> String {
        match item {
            Ok(v) => (self.format)(v),
            Err(e) => e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallible_splits_ok_and_err() {
        let obs = Fallible::<u8>::new(Arc::new(|v: &u8| format!("#{v}")));
        let ok: Result<u8, String> = Ok(3);
        let err: Result<u8, String> = Err("disk full".into());

        assert!(!obs.is_failure(&ok));
        assert!(obs.is_failure(&err));
        assert_eq!(obs.describe(&ok), "#3");
        assert_eq!(obs.describe(&err), "disk full");
    }
}
