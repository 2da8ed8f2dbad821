//! crates/levellog/src/tracing_bridge.rs
//! Bridge from `tracing` events to leveled lines.
//!
//! [`LevelLayer`] is a `tracing-subscriber` layer that renders each event
//! through a shared [`Logger`], so code instrumented with the standard
//! `tracing` macros produces the same line format as direct logger calls.
//!
//! # Level mapping
//!
//! | tracing         | line tag |
//! |-----------------|----------|
//! | `ERROR`, `WARN` | `ERR`    |
//! | `INFO`          | `INF`    |
//! | `DEBUG`, `TRACE`| `DBG`    |
//!
//! `DBG` lines stay suppressed while the logger's debug mode is disabled.
//! Only the event's `message` field is rendered; other fields are dropped.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use levellog::{LevelLayer, Logger};
//! use tracing_subscriber::layer::SubscriberExt;
//!
//! let logger = Arc::new(Logger::new(Vec::new()));
//! let subscriber = tracing_subscriber::registry().with(LevelLayer::new(Arc::clone(&logger)));
//!
//! tracing::subscriber::with_default(subscriber, || {
//!     tracing::info!("indexed {} documents", 12);
//! });
//!
//! let output = logger.with_sink(|buffer| String::from_utf8(buffer.clone()).unwrap());
//! assert!(output.ends_with("INF: indexed 12 documents\n"));
//! ```

use std::fmt::{self, Write as _};
use std::io::Write;
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::level::Level;
use crate::line::SourceLocation;
use crate::logger::Logger;

/// A tracing layer that writes events through a [`Logger`].
pub struct LevelLayer<W> {
    logger: Arc<Logger<W>>,
}

impl<W> LevelLayer<W> {
    /// Creates a layer writing through `logger`.
    #[must_use]
    pub const fn new(logger: Arc<Logger<W>>) -> Self {
        Self { logger }
    }

    /// Returns the logger events are written through.
    #[must_use]
    pub const fn logger(&self) -> &Arc<Logger<W>> {
        &self.logger
    }

    /// Maps a tracing level onto a line level.
    #[must_use]
    pub fn map_level(level: tracing::Level) -> Level {
        if level == tracing::Level::ERROR || level == tracing::Level::WARN {
            Level::Error
        } else if level == tracing::Level::INFO {
            Level::Info
        } else {
            Level::Debug
        }
    }
}

impl<S, W> Layer<S> for LevelLayer<W>
where
    S: Subscriber,
    W: Write + Send + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Self::map_level(*metadata.level());
        if level.requires_debug() && !self.logger.debug_enabled() {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let location = SourceLocation::new(
            metadata.file().unwrap_or_else(|| metadata.target()),
            metadata.line().unwrap_or(0),
        );
        self.logger
            .log_at(level, location, format_args!("{}", visitor.message));
    }
}

impl<W> fmt::Debug for LevelLayer<W>
where
    W: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelLayer")
            .field("logger", &self.logger)
            .finish()
    }
}

/// Collects the `message` field of an event.
#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        }
    }
}
