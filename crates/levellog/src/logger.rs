//! crates/levellog/src/logger.rs
//! The leveled logger.

use std::fmt;
use std::io::{self, Write};
use std::panic::Location;
use std::process;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use time::UtcOffset;

use crate::config::LoggerConfig;
use crate::level::Level;
use crate::line::{self, LineFormat, SourceLocation};
use crate::sink::LineSink;

/// Exit status used by [`Logger::fatal`] and [`Logger::fatalf`].
pub const FATAL_EXIT_CODE: i32 = 1;

/// Type-erased sink accepted by [`Logger::from_optional`].
pub type BoxedSink = Box<dyn Write + Send>;

/// Leveled logger writing one timestamped line per call.
///
/// Lines have the shape `MM/DD/YYYY HH:MM:SS.MICROS [file:line ]LVL: message`.
/// The `file:line` token appears only while debug mode is enabled, and debug
/// mode is also what lets [`debug`](Self::debug) and
/// [`debugf`](Self::debugf) produce output; the two behaviours are coupled.
///
/// Every leveled method comes in two forms: a values form taking a slice of
/// [`fmt::Display`] values joined with single spaces, and an `*f` form taking
/// [`fmt::Arguments`] built with [`format_args!`]. The `*_log!` macros wrap
/// both forms.
///
/// The logger owns no global state. Construct one per process or subsystem
/// and hand it (usually behind an [`Arc`](std::sync::Arc)) to whatever needs
/// it. Configuration is held in relaxed atomics: changes take effect on the
/// next write, and a change racing a concurrent write is best-effort.
///
/// # Examples
///
/// ```
/// use levellog::Logger;
///
/// let logger = Logger::new(Vec::new());
/// logger.info(&[&"listening on", &8080]);
/// logger.debug(&[&"suppressed"]);
///
/// let output = String::from_utf8(logger.into_inner()).unwrap();
/// assert!(output.ends_with(" INF: listening on 8080\n"));
/// assert_eq!(output.lines().count(), 1);
/// ```
pub struct Logger<W> {
    sink: LineSink<W>,
    debug: AtomicBool,
    call_depth: AtomicUsize,
    offset: UtcOffset,
}

impl<W> Logger<W> {
    /// Creates a logger writing to `writer` with debug mode disabled.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_config(writer, LoggerConfig::default())
    }

    /// Creates a logger writing to `writer` with explicit settings.
    #[must_use]
    pub fn with_config(writer: W, config: LoggerConfig) -> Self {
        Self {
            sink: LineSink::new(writer),
            debug: AtomicBool::new(config.debug),
            call_depth: AtomicUsize::new(config.call_depth),
            offset: line::local_offset(),
        }
    }

    /// Sets which frame location annotation reports.
    ///
    /// The value is not validated. `0` reports the line formatter, `1` the
    /// logger's emit site and `2` the caller of the leveled method. Depths
    /// above `2` have no further effect and report the same frame as `2`; to
    /// attribute lines to a frame further up, mark the wrapping functions
    /// `#[track_caller]` or pass the location explicitly to
    /// [`log_at`](Self::log_at).
    pub fn set_call_depth(&self, depth: usize) {
        self.call_depth.store(depth, Ordering::Relaxed);
    }

    /// Returns the configured call depth.
    #[must_use]
    pub fn call_depth(&self) -> usize {
        self.call_depth.load(Ordering::Relaxed)
    }

    /// Turns debug mode on or off.
    ///
    /// While enabled, debug lines are emitted and every line of every level
    /// carries a `file:line` token. Disabling removes both.
    pub fn enable_debug(&self, enabled: bool) {
        self.debug.store(enabled, Ordering::Relaxed);
    }

    /// Reports whether debug mode is enabled.
    #[must_use]
    pub fn debug_enabled(&self) -> bool {
        self.debug.load(Ordering::Relaxed)
    }

    /// Returns the line format currently in effect.
    #[must_use]
    pub fn line_format(&self) -> LineFormat {
        LineFormat::from(self.debug_enabled())
    }

    /// Returns a snapshot of the current settings.
    #[must_use]
    pub fn config(&self) -> LoggerConfig {
        LoggerConfig {
            debug: self.debug_enabled(),
            call_depth: self.call_depth(),
        }
    }

    /// Replaces the current settings.
    pub fn apply_config(&self, config: &LoggerConfig) {
        self.enable_debug(config.debug);
        self.set_call_depth(config.call_depth);
    }

    /// Runs `f` with exclusive access to the sink.
    pub fn with_sink<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        self.sink.with_writer(f)
    }

    /// Consumes the logger and returns the sink.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.sink.into_inner()
    }
}

impl Logger<io::Stderr> {
    /// Creates a logger writing to the process's standard error stream.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl Default for Logger<io::Stderr> {
    fn default() -> Self {
        Self::stderr()
    }
}

impl Logger<BoxedSink> {
    /// Creates a logger for an optional sink, using standard error when absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use levellog::Logger;
    ///
    /// let logger = Logger::from_optional(None);
    /// assert!(!logger.debug_enabled());
    /// ```
    #[must_use]
    pub fn from_optional(writer: Option<BoxedSink>) -> Self {
        Self::new(writer.unwrap_or_else(|| Box::new(io::stderr())))
    }
}

impl<W> Logger<W>
where
    W: Write,
{
    /// Writes a `DBG` line from space-joined values when debug mode is enabled.
    #[track_caller]
    pub fn debug(&self, values: &[&dyn fmt::Display]) {
        if self.debug_enabled() {
            self.emit(Level::Debug, SourceLocation::caller(), &line::join_values(values));
        }
    }

    /// Writes a `DBG` line from format arguments when debug mode is enabled.
    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        if self.debug_enabled() {
            self.emit(Level::Debug, SourceLocation::caller(), &fmt::format(args));
        }
    }

    /// Writes an `INF` line from space-joined values.
    #[track_caller]
    pub fn info(&self, values: &[&dyn fmt::Display]) {
        self.emit(Level::Info, SourceLocation::caller(), &line::join_values(values));
    }

    /// Writes an `INF` line from format arguments.
    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Info, SourceLocation::caller(), &fmt::format(args));
    }

    /// Writes an `ERR` line from space-joined values.
    #[track_caller]
    pub fn error(&self, values: &[&dyn fmt::Display]) {
        self.emit(Level::Error, SourceLocation::caller(), &line::join_values(values));
    }

    /// Writes an `ERR` line from format arguments.
    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Error, SourceLocation::caller(), &fmt::format(args));
    }

    /// Writes an `FTL` line from space-joined values, then exits with status 1.
    ///
    /// Destructors of live values do not run.
    #[track_caller]
    pub fn fatal(&self, values: &[&dyn fmt::Display]) -> ! {
        self.emit(Level::Fatal, SourceLocation::caller(), &line::join_values(values));
        process::exit(FATAL_EXIT_CODE)
    }

    /// Writes an `FTL` line from format arguments, then exits with status 1.
    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.emit(Level::Fatal, SourceLocation::caller(), &fmt::format(args));
        process::exit(FATAL_EXIT_CODE)
    }

    /// Writes the raw values as `[v1 v2 ...]` without a tag, then panics.
    ///
    /// The panic unwinds through the caller and can be intercepted with
    /// [`std::panic::catch_unwind`]. Its payload is the rendered message.
    #[track_caller]
    pub fn panic(&self, values: &[&dyn fmt::Display]) -> ! {
        let message = line::raw_values(values);
        self.emit_untagged(&message);
        panic!("{message}")
    }

    /// Writes the formatted message without a tag, then panics with it.
    #[track_caller]
    pub fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        let message = fmt::format(args);
        self.emit_untagged(&message);
        panic!("{message}")
    }

    /// Writes a line at `level` attributed to the caller.
    ///
    /// Debug lines are still gated on debug mode. This never terminates the
    /// process, even for [`Level::Fatal`]; use [`fatal`](Self::fatal) for that.
    #[track_caller]
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        self.log_at(level, SourceLocation::caller(), args);
    }

    /// Writes a line at `level` attributed to an explicitly captured location.
    ///
    /// Used when the call site is known by other means, such as the file and
    /// line recorded in a `tracing` event.
    pub fn log_at(&self, level: Level, caller: SourceLocation, args: fmt::Arguments<'_>) {
        if level.requires_debug() && !self.debug_enabled() {
            return;
        }
        self.emit(level, caller, &fmt::format(args));
    }

    fn emit(&self, level: Level, caller: SourceLocation, message: &str) {
        let location = self
            .debug_enabled()
            .then(|| self.resolve_location(caller));
        let stamp = line::timestamp(self.offset);
        let rendered = line::render(&stamp, location, Some(level.tag()), message);
        self.sink.write_line(&rendered);
    }

    fn emit_untagged(&self, message: &str) {
        let stamp = line::timestamp(self.offset);
        self.sink
            .write_line(&line::render(&stamp, None, None, message));
    }

    fn resolve_location(&self, caller: SourceLocation) -> SourceLocation {
        match self.call_depth() {
            0 => line::formatter_location(),
            1 => SourceLocation::from(Location::caller()),
            _ => caller,
        }
    }
}

impl<W> fmt::Debug for Logger<W>
where
    W: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("sink", &self.sink)
            .field("debug", &self.debug_enabled())
            .field("call_depth", &self.call_depth())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CALL_DEPTH;
    use std::panic::{self, AssertUnwindSafe};

    fn output(logger: Logger<Vec<u8>>) -> Vec<String> {
        String::from_utf8(logger.into_inner())
            .expect("utf-8")
            .lines()
            .map(str::to_owned)
            .collect()
    }

    /// Strips the 26-byte timestamp and the separating space.
    fn body(line: &str) -> &str {
        &line[27..]
    }

    #[track_caller]
    fn wrapped_info(logger: &Logger<Vec<u8>>, message: &str) {
        logger.info(&[&message]);
    }

    #[test]
    fn new_logger_defaults() {
        let logger = Logger::new(Vec::<u8>::new());
        assert!(!logger.debug_enabled());
        assert_eq!(logger.call_depth(), DEFAULT_CALL_DEPTH);
        assert_eq!(logger.line_format(), LineFormat::Timestamp);
    }

    #[test]
    fn info_and_error_always_write() {
        let logger = Logger::new(Vec::new());
        logger.info(&[&"started"]);
        logger.error(&[&"boom"]);
        logger.enable_debug(true);
        logger.info(&[&"again"]);

        let lines = output(logger);
        assert_eq!(lines.len(), 3);
        assert_eq!(body(&lines[0]), "INF: started");
        assert_eq!(body(&lines[1]), "ERR: boom");
        assert!(lines[2].ends_with("INF: again"));
    }

    #[test]
    fn debug_is_gated_on_debug_mode() {
        let logger = Logger::new(Vec::new());
        logger.debug(&[&"hidden"]);
        logger.debugf(format_args!("hidden {}", 1));
        assert!(logger.with_sink(|buffer| buffer.is_empty()));

        logger.enable_debug(true);
        logger.debug(&[&"shown"]);
        logger.debugf(format_args!("shown {}", 2));

        let lines = output(logger);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("DBG: shown"));
        assert!(lines[1].ends_with("DBG: shown 2"));
    }

    #[test]
    fn values_and_format_forms_agree() {
        let logger = Logger::new(Vec::new());
        logger.infof(format_args!("x={}", 5));
        logger.info(&[&"x=5"]);

        let lines = output(logger);
        assert_eq!(body(&lines[0]), body(&lines[1]));
    }

    #[test]
    fn values_are_space_joined() {
        let logger = Logger::new(Vec::new());
        logger.error(&[&"code", &23, &"partial"]);
        assert_eq!(body(&output(logger)[0]), "ERR: code 23 partial");
    }

    #[test]
    fn debug_mode_adds_caller_location() {
        let logger = Logger::new(Vec::new());
        logger.enable_debug(true);
        let expected_line = line!() + 1;
        logger.error(&[&"boom"]);

        let lines = output(logger);
        assert_eq!(body(&lines[0]), format!("logger.rs:{expected_line} ERR: boom"));
    }

    #[test]
    fn disabling_debug_removes_location() {
        let logger = Logger::new(Vec::new());
        logger.enable_debug(true);
        logger.info(&[&"with"]);
        logger.enable_debug(false);
        logger.info(&[&"without"]);

        let lines = output(logger);
        assert!(body(&lines[0]).starts_with("logger.rs:"));
        assert_eq!(body(&lines[1]), "INF: without");
    }

    #[test]
    fn track_caller_wrappers_move_the_reported_frame() {
        let logger = Logger::new(Vec::new());
        logger.enable_debug(true);
        let expected_line = line!() + 1;
        wrapped_info(&logger, "via wrapper");

        let lines = output(logger);
        assert_eq!(
            body(&lines[0]),
            format!("logger.rs:{expected_line} INF: via wrapper")
        );
    }

    #[test]
    fn call_depth_selects_internal_frames() {
        let logger = Logger::with_config(Vec::new(), LoggerConfig::debug());
        let caller_line = line!() + 1;
        logger.info(&[&"depth two"]);
        logger.set_call_depth(1);
        logger.info(&[&"depth one"]);
        logger.set_call_depth(0);
        logger.info(&[&"depth zero"]);

        let lines = output(logger);
        assert_eq!(
            body(&lines[0]),
            format!("logger.rs:{caller_line} INF: depth two")
        );
        let depth_one = body(&lines[1]);
        assert!(depth_one.starts_with("logger.rs:"));
        assert!(!depth_one.starts_with(&format!("logger.rs:{} ", caller_line + 2)));
        assert!(body(&lines[2]).starts_with("line.rs:"));
    }

    #[test]
    fn depths_above_two_report_the_caller() {
        let logger = Logger::with_config(Vec::new(), LoggerConfig::debug());
        let first = line!() + 1;
        logger.info(&[&"two"]);
        logger.set_call_depth(3);
        let second = line!() + 1;
        logger.info(&[&"three"]);
        logger.set_call_depth(usize::MAX);
        let third = line!() + 1;
        logger.info(&[&"max"]);

        let lines = output(logger);
        assert_eq!(body(&lines[0]), format!("logger.rs:{first} INF: two"));
        assert_eq!(body(&lines[1]), format!("logger.rs:{second} INF: three"));
        assert_eq!(body(&lines[2]), format!("logger.rs:{third} INF: max"));
    }

    #[test]
    fn debug_format_does_not_block_inside_with_sink() {
        let logger = Logger::new(Vec::<u8>::new());
        let rendered = logger.with_sink(|_| format!("{logger:?}"));
        assert!(rendered.contains("<locked>"));
        assert!(format!("{logger:?}").contains("writer: []"));
    }

    #[test]
    fn config_round_trips_through_logger() {
        let logger = Logger::new(Vec::<u8>::new());
        let config = LoggerConfig {
            debug: true,
            call_depth: 7,
        };
        logger.apply_config(&config);
        assert_eq!(logger.config(), config);
        assert_eq!(logger.line_format(), LineFormat::TimestampWithLocation);
    }

    #[test]
    fn log_never_exits_for_fatal_level() {
        let logger = Logger::new(Vec::new());
        logger.log(Level::Fatal, format_args!("recorded"));
        logger.log(Level::Debug, format_args!("gated"));
        let lines = output(logger);
        assert_eq!(lines.len(), 1);
        assert_eq!(body(&lines[0]), "FTL: recorded");
    }

    #[test]
    fn log_at_uses_supplied_location() {
        let logger = Logger::with_config(Vec::new(), LoggerConfig::debug());
        logger.log_at(
            Level::Info,
            SourceLocation::new("src/handlers/upload.rs", 88),
            format_args!("stored"),
        );
        assert_eq!(body(&output(logger)[0]), "upload.rs:88 INF: stored");
    }

    #[test]
    fn panic_writes_raw_values_then_unwinds() {
        let logger = Logger::with_config(Vec::new(), LoggerConfig::debug());
        let result: std::thread::Result<()> = panic::catch_unwind(AssertUnwindSafe(|| {
            logger.panic(&[&"disk", &"full"]);
        }));

        let payload = result.expect_err("panic must unwind");
        assert_eq!(payload.downcast_ref::<String>().map(String::as_str), Some("[disk full]"));
        assert_eq!(body(&output(logger)[0]), "[disk full]");
    }

    #[test]
    fn panicf_writes_formatted_message_then_unwinds() {
        let logger = Logger::new(Vec::new());
        let result: std::thread::Result<()> = panic::catch_unwind(AssertUnwindSafe(|| {
            logger.panicf(format_args!("invariant {} broken", "I7"));
        }));

        let payload = result.expect_err("panic must unwind");
        assert_eq!(
            payload.downcast_ref::<String>().map(String::as_str),
            Some("invariant I7 broken")
        );
        assert_eq!(body(&output(logger)[0]), "invariant I7 broken");
    }

    #[test]
    fn logger_is_usable_after_a_caught_panic() {
        let logger = Logger::new(Vec::new());
        let caught: std::thread::Result<()> =
            panic::catch_unwind(AssertUnwindSafe(|| logger.panic(&[&"first"])));
        assert!(caught.is_err());
        logger.info(&[&"still here"]);
        let lines = output(logger);
        assert_eq!(lines.len(), 2);
        assert_eq!(body(&lines[1]), "INF: still here");
    }

    #[test]
    fn from_optional_uses_supplied_sink() {
        let logger = Logger::from_optional(Some(Box::new(io::sink()) as BoxedSink));
        logger.info(&[&"discarded"]);
        assert!(!logger.debug_enabled());
    }

    #[test]
    fn debug_format_reports_settings() {
        let logger = Logger::new(Vec::<u8>::new());
        let rendered = format!("{logger:?}");
        assert!(rendered.contains("debug: false"));
        assert!(rendered.contains("call_depth: 2"));
    }
}
