//! crates/levellog/src/line.rs
//! Line rendering: timestamp, optional `file:line`, tag and message.

use std::fmt::{self, Write as _};
use std::panic::Location;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// `MM/DD/YYYY HH:MM:SS.MICROS`
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[month]/[day]/[year] [hour]:[minute]:[second].[subsecond digits:6]"
);

const FALLBACK_TIMESTAMP: &str = "01/01/1970 00:00:00.000000";

/// Selects which prefix components precede the level tag.
///
/// The format is derived from the logger's debug flag: enabling debug mode
/// switches every subsequent line to [`LineFormat::TimestampWithLocation`].
///
/// # Examples
///
/// ```
/// use levellog::LineFormat;
///
/// assert_eq!(LineFormat::from(true), LineFormat::TimestampWithLocation);
/// assert!(!LineFormat::default().includes_location());
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LineFormat {
    /// `<timestamp> <LVL>: <message>`
    #[default]
    Timestamp,
    /// `<timestamp> <file:line> <LVL>: <message>`
    TimestampWithLocation,
}

impl LineFormat {
    /// Reports whether lines rendered in this format carry a `file:line` token.
    #[must_use]
    pub const fn includes_location(self) -> bool {
        matches!(self, Self::TimestampWithLocation)
    }
}

impl From<bool> for LineFormat {
    /// Maps the debug flag onto the format it implies.
    fn from(debug: bool) -> Self {
        if debug {
            Self::TimestampWithLocation
        } else {
            Self::Timestamp
        }
    }
}

/// Source position reported in location-annotated lines.
///
/// Only the last path component of the file is rendered, so
/// `crates/app/src/main.rs` at line 12 displays as `main.rs:12`.
///
/// # Examples
///
/// ```
/// use levellog::SourceLocation;
///
/// let location = SourceLocation::new("crates/app/src/main.rs", 12);
/// assert_eq!(location.short_file(), "main.rs");
/// assert_eq!(location.to_string(), "main.rs:12");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct SourceLocation {
    file: &'static str,
    line: u32,
}

impl SourceLocation {
    /// Creates a location from an explicit file path and line.
    #[must_use]
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Captures the location of the caller, following `#[track_caller]` chains.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        Self::from(Location::caller())
    }

    /// Returns the file path exactly as recorded.
    #[must_use]
    pub const fn file(&self) -> &'static str {
        self.file
    }

    /// Returns the final path component of the file.
    #[must_use]
    pub fn short_file(&self) -> &'static str {
        self.file.rsplit(['/', '\\']).next().unwrap_or(self.file)
    }

    /// Returns the recorded line number.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }
}

impl From<&'static Location<'static>> for SourceLocation {
    fn from(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), location.line())
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.short_file(), self.line)
    }
}

/// Location of the formatting primitive itself, reported at call depth 0.
pub(crate) fn formatter_location() -> SourceLocation {
    SourceLocation::from(Location::caller())
}

/// Returns the local UTC offset, falling back to UTC when it cannot be determined.
///
/// The offset is sampled once per logger because querying it is unsound once
/// other threads exist on some platforms and the `time` crate refuses to.
pub(crate) fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

/// Renders the current time in the fixed line timestamp format.
pub(crate) fn timestamp(offset: UtcOffset) -> String {
    render_timestamp(OffsetDateTime::now_utc().to_offset(offset))
}

fn render_timestamp(moment: OffsetDateTime) -> String {
    moment
        .format(TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| FALLBACK_TIMESTAMP.to_owned())
}

/// Joins values with single spaces using their [`fmt::Display`] output.
pub(crate) fn join_values(values: &[&dyn fmt::Display]) -> String {
    let mut joined = String::new();
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            joined.push(' ');
        }
        let _ = write!(joined, "{value}");
    }
    joined
}

/// Renders values the way a panic reports its raw argument list: `[a b c]`.
pub(crate) fn raw_values(values: &[&dyn fmt::Display]) -> String {
    format!("[{}]", join_values(values))
}

/// Assembles one complete output line.
///
/// `tag` is `None` for panic output. A newline is appended unless the message
/// already ends with one.
pub(crate) fn render(
    stamp: &str,
    location: Option<SourceLocation>,
    tag: Option<&str>,
    message: &str,
) -> String {
    let mut line = String::with_capacity(stamp.len() + message.len() + 32);
    line.push_str(stamp);
    line.push(' ');
    if let Some(location) = location {
        let _ = write!(line, "{location} ");
    }
    if let Some(tag) = tag {
        line.push_str(tag);
        line.push_str(": ");
    }
    line.push_str(message);
    if !message.ends_with('\n') {
        line.push('\n');
    }
    line
}
