//! src/bin/cli.rs
//!
//! Argument parsing and dispatch for the `levellog` binary. The binary writes
//! a single leveled line, which makes the fatal and panic exit behaviour
//! observable from outside the process.

use std::ffi::OsString;
use std::fmt;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use levellog::{BoxedSink, DEFAULT_CALL_DEPTH, Level, Logger, LoggerConfig, ParseLevelError};

/// Exit status when the log file cannot be opened.
const OPEN_FAILURE_EXIT_CODE: u8 = 2;

/// Write one leveled log line.
#[derive(Debug, Parser)]
#[command(name = "levellog", version, about)]
struct Args {
    /// Emit debug lines and annotate every line with file:line
    #[arg(long)]
    debug: bool,

    /// Frame reported by file:line annotation
    #[arg(long, value_name = "N", default_value_t = DEFAULT_CALL_DEPTH)]
    call_depth: usize,

    /// Append to PATH instead of writing to standard error
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Route debug/info/error lines through tracing and the bridge layer
    #[cfg(feature = "tracing")]
    #[arg(long)]
    via_tracing: bool,

    /// Operation to perform: a level name or tag (debug/DBG, info/INF,
    /// error/ERR, fatal/FTL) or `panic`
    #[arg(value_name = "ACTION", value_parser = parse_action)]
    action: Action,

    /// Values joined with single spaces to form the message
    values: Vec<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Action {
    Log(Level),
    Panic,
}

fn parse_action(input: &str) -> Result<Action, ParseLevelError> {
    if input.trim().eq_ignore_ascii_case("panic") {
        return Ok(Action::Panic);
    }
    input.parse().map(Action::Log)
}

pub fn run_with<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = match Args::try_parse_from(args) {
        Ok(args) => args,
        Err(error) => {
            let _ = error.print();
            return ExitCode::from(u8::try_from(error.exit_code()).unwrap_or(2));
        }
    };

    let sink = match open_sink(args.log_file.as_ref()) {
        Ok(sink) => sink,
        Err(message) => {
            eprintln!("levellog: {message}");
            return ExitCode::from(OPEN_FAILURE_EXIT_CODE);
        }
    };

    let logger = Arc::new(Logger::from_optional(sink));
    logger.apply_config(&LoggerConfig {
        debug: args.debug,
        call_depth: args.call_depth,
    });

    #[cfg(feature = "tracing")]
    if args.via_tracing && emit_via_tracing(&logger, args.action, &args.values.join(" ")) {
        return ExitCode::SUCCESS;
    }

    let values: Vec<&dyn fmt::Display> = args
        .values
        .iter()
        .map(|value| value as &dyn fmt::Display)
        .collect();

    match args.action {
        Action::Log(Level::Debug) => logger.debug(&values),
        Action::Log(Level::Info) => logger.info(&values),
        Action::Log(Level::Error) => logger.error(&values),
        Action::Log(Level::Fatal) => logger.fatal(&values),
        Action::Panic => logger.panic(&values),
    }

    ExitCode::SUCCESS
}

fn open_sink(path: Option<&PathBuf>) -> Result<Option<BoxedSink>, String> {
    let Some(path) = path else {
        return Ok(None);
    };
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(|file| Some(Box::new(file) as BoxedSink))
        .map_err(|error| format!("cannot open log file {}: {error}", path.display()))
}

/// Emits the message as a tracing event. Fatal and panic have no tracing
/// counterpart and return `false` so the caller handles them directly.
#[cfg(feature = "tracing")]
fn emit_via_tracing(logger: &Arc<Logger<BoxedSink>>, action: Action, message: &str) -> bool {
    use levellog::LevelLayer;
    use tracing_subscriber::layer::SubscriberExt;

    let level = match action {
        Action::Log(level @ (Level::Debug | Level::Info | Level::Error)) => level,
        Action::Log(Level::Fatal) | Action::Panic => return false,
    };

    let subscriber = tracing_subscriber::registry().with(LevelLayer::new(Arc::clone(logger)));
    tracing::subscriber::with_default(subscriber, || match level {
        Level::Debug => tracing::debug!("{message}"),
        Level::Info => tracing::info!("{message}"),
        Level::Error | Level::Fatal => tracing::error!("{message}"),
    });
    true
}
