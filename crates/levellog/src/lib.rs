#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/levellog/src/lib.rs
//!
//! # Overview
//!
//! `levellog` decorates a line-oriented writer with severity tags, a
//! microsecond timestamp, and an optional `file:line` annotation. The single
//! entry point is [`Logger`], which owns its sink and exposes leveled write
//! operations: debug, info, error, fatal and panic.
//!
//! # Design
//!
//! Each call renders exactly one line of the form
//!
//! ```text
//! MM/DD/YYYY HH:MM:SS.MICROS [file:line ]LVL: message
//! ```
//!
//! where `LVL` is one of `DBG`, `INF`, `ERR`, `FTL`, and writes it to the sink
//! with a single `write_all` followed by a flush. Panic output carries neither
//! a tag nor a location, only the raw message.
//!
//! Debug mode couples two behaviours: it lets debug lines through and it adds
//! the `file:line` token to every line. Locations come from
//! `#[track_caller]`; the configured call depth selects which frame is
//! reported (see [`LoggerConfig::call_depth`]).
//!
//! # Invariants
//!
//! - One call writes at most one line; there is no buffering or batching.
//! - Concurrent callers never interleave within a line because the sink sits
//!   behind a mutex.
//! - Only [`Logger::fatal`]/[`Logger::fatalf`] exit the process (status 1);
//!   [`Logger::panic`]/[`Logger::panicf`] unwind and may be caught.
//!
//! # Errors
//!
//! Leveled operations never return errors. Sink write failures are swallowed;
//! with the `tracing` feature the first failure per logger is reported once
//! as a `tracing` warning. Parsing a [`Level`] from text returns
//! [`ParseLevelError`].
//!
//! # Examples
//!
//! ```
//! use levellog::{debug_log, info_log, Logger};
//!
//! let logger = Logger::new(Vec::new());
//! info_log!(logger, "started worker {}", 3);
//! debug_log!(logger, "not shown");
//!
//! logger.enable_debug(true);
//! debug_log!(logger; "now", "shown");
//!
//! let output = String::from_utf8(logger.into_inner()).unwrap();
//! let lines: Vec<_> = output.lines().collect();
//! assert_eq!(lines.len(), 2);
//! assert!(lines[0].ends_with(" INF: started worker 3"));
//! assert!(lines[1].ends_with(" DBG: now shown"));
//! ```
//!
//! # See also
//!
//! - `LevelLayer` (feature `tracing`) to route `tracing` events through a
//!   [`Logger`].

mod config;
mod level;
mod line;
mod logger;
mod macros;
mod sink;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use config::{DEFAULT_CALL_DEPTH, LoggerConfig};
pub use level::{Level, ParseLevelError};
pub use line::{LineFormat, SourceLocation};
pub use logger::{BoxedSink, FATAL_EXIT_CODE, Logger};
pub use sink::LineSink;
#[cfg(feature = "tracing")]
pub use tracing_bridge::LevelLayer;
