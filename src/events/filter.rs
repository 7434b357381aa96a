//! # Category filter for lane reports.
//!
//! [`LaneFilter`] is a tiny set over [`LaneType`]. Every report is checked
//! against it right before it is handed to the logger, so a disabled category
//! costs nothing beyond the check (the formatter is not even called for values).
//!
//! Filters parse from comma-separated category names:
//! ```rust
//! use timelane::{LaneFilter, LaneType};
//!
//! let f: LaneFilter = "subscription".parse().unwrap();
//! assert!(f.contains(LaneType::Subscription));
//! assert!(!f.contains(LaneType::Event));
//!
//! let all: LaneFilter = "subscription, event".parse().unwrap();
//! assert_eq!(all, LaneFilter::all());
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::LaneError;
use crate::events::LaneType;

/// Set of enabled lane categories.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LaneFilter {
    bits: u8,
}

impl LaneFilter {
    /// Both categories enabled.
    #[inline]
    pub const fn all() -> Self {
        Self { bits: 0b11 }
    }

    /// Nothing is reported.
    #[inline]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    /// Only the given category.
    #[inline]
    pub const fn only(ty: LaneType) -> Self {
        Self { bits: Self::bit(ty) }
    }

    /// Returns a copy with `ty` enabled.
    #[inline]
    pub const fn with(self, ty: LaneType) -> Self {
        Self { bits: self.bits | Self::bit(ty) }
    }

    /// Returns a copy with `ty` disabled.
    #[inline]
    pub const fn without(self, ty: LaneType) -> Self {
        Self { bits: self.bits & !Self::bit(ty) }
    }

    /// True if reports of category `ty` pass.
    #[inline]
    pub const fn contains(&self, ty: LaneType) -> bool {
        self.bits & Self::bit(ty) != 0
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    const fn bit(ty: LaneType) -> u8 {
        match ty {
            LaneType::Subscription => 0b01,
            LaneType::Event => 0b10,
        }
    }
}

impl Default for LaneFilter {
    /// Everything enabled.
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<LaneType> for LaneFilter {
    fn from_iter<I: IntoIterator<Item = LaneType>>(iter: I) -> Self {
        iter.into_iter().fold(Self::none(), Self::with)
    }
}

impl FromStr for LaneFilter {
    type Err = LaneError;

    /// Parses `"subscription,event"`-style lists.
    ///
    /// Accepts `all` and `none` as shorthands; names are case-insensitive and
    /// surrounding whitespace is ignored. An empty string is an empty filter.
    /// Tokens apply left to right, so `none` clears what came before it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut filter = Self::none();
        for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            filter = match token.to_ascii_lowercase().as_str() {
                "all" => Self::all(),
                "none" => Self::none(),
                "subscription" | "subscriptions" => filter.with(LaneType::Subscription),
                "event" | "events" => filter.with(LaneType::Event),
                _ => {
                    return Err(LaneError::InvalidFilter {
                        token: token.to_string(),
                    })
                }
            };
        }
        Ok(filter)
    }
}

impl fmt::Debug for LaneFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(LaneType::ALL.iter().filter(|ty| self.contains(**ty)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_and_none() {
        assert!(LaneFilter::all().contains(LaneType::Subscription));
        assert!(LaneFilter::all().contains(LaneType::Event));
        assert!(LaneFilter::none().is_empty());
        assert_eq!(LaneFilter::default(), LaneFilter::all());
    }

    #[test]
    fn test_without_disables_one_category() {
        let f = LaneFilter::all().without(LaneType::Event);
        assert!(f.contains(LaneType::Subscription));
        assert!(!f.contains(LaneType::Event));
        assert_eq!(f, LaneFilter::only(LaneType::Subscription));
    }

    #[test]
    fn test_parse_lists() {
        assert_eq!("".parse::<LaneFilter>().unwrap(), LaneFilter::none());
        assert_eq!("ALL".parse::<LaneFilter>().unwrap(), LaneFilter::all());
        assert_eq!(
            " events ".parse::<LaneFilter>().unwrap(),
            LaneFilter::only(LaneType::Event)
        );
        assert_eq!(
            "event,subscription".parse::<LaneFilter>().unwrap(),
            LaneFilter::all()
        );
    }

    #[test]
    fn test_parse_none_clears_earlier_tokens() {
        assert_eq!(
            "subscription,none".parse::<LaneFilter>().unwrap(),
            LaneFilter::none()
        );
        assert_eq!(
            "all,none,event".parse::<LaneFilter>().unwrap(),
            LaneFilter::only(LaneType::Event)
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "subscription,values".parse::<LaneFilter>().unwrap_err();
        assert_eq!(
            err,
            LaneError::InvalidFilter {
                token: "values".into()
            }
        );
    }

    #[test]
    fn test_collect() {
        let f: LaneFilter = [LaneType::Event].into_iter().collect();
        assert_eq!(f, LaneFilter::only(LaneType::Event));
    }
}
