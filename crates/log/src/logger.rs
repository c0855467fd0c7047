//! The front-end logger handle.

use logerr_kverrors::{ErrorValue, Value};
use logerr_ports::LogSink;
use std::fmt;
use std::sync::Arc;

/// A cheap, clonable handle over a [`LogSink`] plus a level offset.
///
/// `info` calls are emitted at the logger's level, which starts at 0 and
/// grows with [`Logger::v`]. `error` calls are never gated. A logger without
/// a sink discards everything.
#[derive(Clone, Default)]
pub struct Logger {
    sink: Option<Arc<dyn LogSink>>,
    level: u32,
}

impl Logger {
    /// A logger over `sink` at level 0.
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink: Some(sink),
            level: 0,
        }
    }

    /// A logger that drops every record.
    #[must_use]
    pub const fn discard() -> Self {
        Self {
            sink: None,
            level: 0,
        }
    }

    /// The underlying sink, if any.
    pub fn sink(&self) -> Option<&Arc<dyn LogSink>> {
        self.sink.as_ref()
    }

    /// The level `info` records are emitted at.
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Returns true when `info` on this logger would produce a record.
    pub fn enabled(&self) -> bool {
        self.sink
            .as_ref()
            .is_some_and(|sink| sink.enabled(self.level))
    }

    /// Log a non-error message with key/value pairs as context.
    #[track_caller]
    pub fn info(&self, msg: &str, keys_and_values: impl IntoIterator<Item = Value>) {
        if let Some(sink) = &self.sink {
            sink.info(self.level, msg, keys_and_values.into_iter().collect());
        }
    }

    /// Log an error with a message and key/value pairs as context.
    ///
    /// Passing `None` logs the message without an `_error` field.
    #[track_caller]
    pub fn error(
        &self,
        error: Option<ErrorValue>,
        msg: &str,
        keys_and_values: impl IntoIterator<Item = Value>,
    ) {
        if let Some(sink) = &self.sink {
            sink.error(error, msg, keys_and_values.into_iter().collect());
        }
    }

    /// A logger whose `info` records are `level` steps more verbose.
    ///
    /// Levels add up: `logger.v(1).v(2)` logs at level 3.
    #[must_use]
    pub fn v(&self, level: u32) -> Self {
        Self {
            sink: self.sink.clone(),
            level: self.level.saturating_add(level),
        }
    }

    /// A logger whose records carry the extra pairs.
    #[must_use]
    pub fn with_values(&self, keys_and_values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            sink: self
                .sink
                .as_ref()
                .map(|sink| sink.with_values(keys_and_values.into_iter().collect())),
            level: self.level,
        }
    }

    /// A logger whose component name is extended with `name`.
    #[must_use]
    pub fn with_name(&self, name: &str) -> Self {
        Self {
            sink: self.sink.as_ref().map(|sink| sink.with_name(name)),
            level: self.level,
        }
    }
}

impl From<Arc<dyn LogSink>> for Logger {
    fn from(sink: Arc<dyn LogSink>) -> Self {
        Self::new(sink)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Logger")
            .field("sink", &self.sink.as_ref().map(|sink| sink.type_name()))
            .field("level", &self.level)
            .finish()
    }
}
