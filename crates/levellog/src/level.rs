//! crates/levellog/src/level.rs
//! Severity levels and their three-letter line tags.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Severity attached to a tagged log line.
///
/// Panic output is deliberately absent: panics render the raw message without
/// any tag, so they never go through a [`Level`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Level {
    /// Diagnostic detail, only emitted while debug mode is enabled.
    Debug,
    /// Routine progress.
    Info,
    /// Recoverable failure.
    Error,
    /// Unrecoverable failure; the process exits after the line is written.
    Fatal,
}

impl Level {
    /// All levels in ascending severity.
    pub const ALL: [Self; 4] = [Self::Debug, Self::Info, Self::Error, Self::Fatal];

    /// Returns the tag rendered in front of the message.
    ///
    /// # Examples
    ///
    /// ```
    /// use levellog::Level;
    ///
    /// assert_eq!(Level::Debug.tag(), "DBG");
    /// assert_eq!(Level::Info.tag(), "INF");
    /// assert_eq!(Level::Error.tag(), "ERR");
    /// assert_eq!(Level::Fatal.tag(), "FTL");
    /// ```
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Debug => "DBG",
            Self::Info => "INF",
            Self::Error => "ERR",
            Self::Fatal => "FTL",
        }
    }

    /// Returns the lowercase name of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }

    /// Reports whether lines of this level are gated on debug mode.
    #[must_use]
    pub const fn requires_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error returned when parsing a [`Level`] from a string fails.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unrecognised log level '{input}' (expected one of DBG, INF, ERR, FTL)")]
pub struct ParseLevelError {
    input: String,
}

impl ParseLevelError {
    /// Returns the rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    /// Accepts either the tag or the level name, ignoring ASCII case.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        Self::ALL
            .into_iter()
            .find(|level| {
                trimmed.eq_ignore_ascii_case(level.tag())
                    || trimmed.eq_ignore_ascii_case(level.as_str())
            })
            .ok_or_else(|| ParseLevelError {
                input: input.to_owned(),
            })
    }
}
