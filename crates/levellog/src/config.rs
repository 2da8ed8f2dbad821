//! crates/levellog/src/config.rs
//! Runtime-adjustable logger settings.

use crate::line::LineFormat;

/// Call depth that attributes lines to the direct caller of a leveled method.
pub const DEFAULT_CALL_DEPTH: usize = 2;

/// Snapshot of the settings a [`Logger`](crate::Logger) consults on every write.
///
/// # Examples
///
/// ```
/// use levellog::{LoggerConfig, DEFAULT_CALL_DEPTH};
///
/// let config = LoggerConfig::default();
/// assert!(!config.debug);
/// assert_eq!(config.call_depth, DEFAULT_CALL_DEPTH);
///
/// let verbose = LoggerConfig::debug();
/// assert!(verbose.line_format().includes_location());
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoggerConfig {
    /// Emit debug lines and annotate every line with `file:line`.
    pub debug: bool,
    /// Frame reported by location annotation.
    ///
    /// `0` reports the line formatter, `1` the logger's emit site, and `2` or
    /// more the caller of the leveled method (further frames are selected by
    /// marking wrappers `#[track_caller]`).
    pub call_depth: usize,
}

impl LoggerConfig {
    /// Default settings with debug mode enabled.
    #[must_use]
    pub const fn debug() -> Self {
        Self {
            debug: true,
            call_depth: DEFAULT_CALL_DEPTH,
        }
    }

    /// Returns the line format implied by the debug flag.
    #[must_use]
    pub fn line_format(&self) -> LineFormat {
        LineFormat::from(self.debug)
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            debug: false,
            call_depth: DEFAULT_CALL_DEPTH,
        }
    }
}
