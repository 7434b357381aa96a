//! # Call-site source locations.
//!
//! Every lane remembers where it was attached so the timeline can link a lane
//! back to code. A [`SourceLocation`] is captured in one of two ways:
//!
//! - **Implicitly** with `#[track_caller]`: [`LaneExt::lane`](crate::LaneExt::lane)
//!   and [`Lane::builder`](crate::Lane::builder) record the caller's file and line.
//!   The function name is not available this way.
//! - **Explicitly** with [`here!`](crate::here), which also records the
//!   enclosing function. [`lane!`](crate::lane) and [`try_lane!`](crate::try_lane)
//!   use it, so they are the one-liners that carry a function name.
//!
//! Rendered once per lane as `"<file>:<line> - <function>"`, or
//! `"<file>:<line>"` when the function is unknown.

use std::fmt;

/// File, line and (optionally) function of a call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    file: &'static str,
    line: u32,
    function: Option<&'static str>,
}

impl SourceLocation {
    /// Creates a location from explicit parts.
    pub const fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        Self {
            file,
            line,
            function: Some(function),
        }
    }

    /// Location of the caller (through any chain of `#[track_caller]` functions).
    #[track_caller]
    pub fn caller() -> Self {
        let loc = std::panic::Location::caller();
        Self {
            file: loc.file(),
            line: loc.line(),
            function: None,
        }
    }

    #[inline]
    pub fn file(&self) -> &'static str {
        self.file
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[inline]
    pub fn function(&self) -> Option<&'static str> {
        self.function
    }

    /// Last path component of the file.
    pub fn file_name(&self) -> &'static str {
        self.file.rsplit(['/', '\\']).next().unwrap_or(self.file)
    }

    /// Renders the location for reports.
    pub fn render(&self, full_path: bool) -> String {
        let file = if full_path { self.file } else { self.file_name() };
        match self.function {
            Some(function) => format!("{file}:{} - {function}", self.line),
            None => format!("{file}:{}", self.line),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

/// Captures the current file, line and enclosing function as a [`SourceLocation`].
///
/// ```rust
/// use timelane::{here, SourceLocation};
///
/// fn load() -> SourceLocation {
///     here!()
/// }
///
/// let loc = load();
/// assert_eq!(loc.function().map(|f| f.ends_with("load")), Some(true));
/// ```
#[macro_export]
macro_rules! here {
    () => {{
        fn __here() {}
        fn __name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = __name_of(__here);
        $crate::SourceLocation::new(
            file!(),
            line!(),
            name.strip_suffix("::__here").unwrap_or(name),
        )
    }};
}
