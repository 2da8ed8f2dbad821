//! crates/levellog/src/macros.rs
//! Call-site macros for the leveled methods.
//!
//! Every macro accepts two shapes:
//!
//! - `name!(logger, "format {}", args...)` forwards to the `*f` method with
//!   [`format_args!`];
//! - `name!(logger; value, value, ...)` forwards to the values method, joining
//!   the [`Display`](std::fmt::Display) output of each value with spaces.
//!
//! Because the methods are `#[track_caller]`, locations reported in debug mode
//! point at the macro invocation.

/// Emit a `DBG` line when debug mode is enabled.
///
/// # Example
/// ```
/// use levellog::{debug_log, Logger, LoggerConfig};
///
/// let logger = Logger::with_config(Vec::new(), LoggerConfig::debug());
/// debug_log!(logger, "cache {} of {}", 3, 8);
/// debug_log!(logger; "cache", "warm");
/// assert_eq!(logger.into_inner().iter().filter(|b| **b == b'\n').count(), 2);
/// ```
#[macro_export]
macro_rules! debug_log {
    ($logger:expr; $($value:expr),+ $(,)?) => {
        $logger.debug(&[$(&$value as &dyn ::std::fmt::Display),+])
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.debugf(::std::format_args!($($arg)+))
    };
}

/// Emit an `INF` line.
///
/// # Example
/// ```
/// use levellog::{info_log, Logger};
///
/// let logger = Logger::new(Vec::new());
/// info_log!(logger, "x={}", 5);
/// let output = String::from_utf8(logger.into_inner()).unwrap();
/// assert!(output.ends_with("INF: x=5\n"));
/// ```
#[macro_export]
macro_rules! info_log {
    ($logger:expr; $($value:expr),+ $(,)?) => {
        $logger.info(&[$(&$value as &dyn ::std::fmt::Display),+])
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.infof(::std::format_args!($($arg)+))
    };
}

/// Emit an `ERR` line.
///
/// # Example
/// ```
/// use levellog::{error_log, Logger};
///
/// let logger = Logger::new(Vec::new());
/// error_log!(logger; "connect failed:", "refused");
/// let output = String::from_utf8(logger.into_inner()).unwrap();
/// assert!(output.ends_with("ERR: connect failed: refused\n"));
/// ```
#[macro_export]
macro_rules! error_log {
    ($logger:expr; $($value:expr),+ $(,)?) => {
        $logger.error(&[$(&$value as &dyn ::std::fmt::Display),+])
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.errorf(::std::format_args!($($arg)+))
    };
}

/// Emit an `FTL` line and exit the process with status 1.
///
/// # Example
/// ```no_run
/// use levellog::{fatal_log, Logger};
///
/// let logger = Logger::stderr();
/// fatal_log!(logger, "cannot open {}", "/etc/app.conf");
/// ```
#[macro_export]
macro_rules! fatal_log {
    ($logger:expr; $($value:expr),+ $(,)?) => {
        $logger.fatal(&[$(&$value as &dyn ::std::fmt::Display),+])
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatalf(::std::format_args!($($arg)+))
    };
}

/// Emit the raw message and panic with it.
///
/// # Example
/// ```should_panic
/// use levellog::{panic_log, Logger};
///
/// let logger = Logger::new(Vec::new());
/// panic_log!(logger; "unreachable", "state");
/// ```
#[macro_export]
macro_rules! panic_log {
    ($logger:expr; $($value:expr),+ $(,)?) => {
        $logger.panic(&[$(&$value as &dyn ::std::fmt::Display),+])
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.panicf(::std::format_args!($($arg)+))
    };
}
