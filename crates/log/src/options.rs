//! Options applied to a freshly built sink.

use logerr_ports::LogWriter;
use logerr_sink::Sink;
use std::fmt;
use std::sync::Arc;

/// A configuration option for [`crate::new_logger`].
#[derive(Clone)]
pub enum LoggerOption {
    /// Send records to this writer instead of stdout.
    Output(Arc<dyn LogWriter>),
    /// Start at this verbosity instead of 0.
    Verbosity(u32),
}

impl LoggerOption {
    /// Apply the option to `sink`.
    pub fn apply(&self, sink: &Sink) {
        match self {
            Self::Output(output) => sink.set_output(Arc::clone(output)),
            Self::Verbosity(level) => sink.set_verbosity(*level),
        }
    }
}

impl fmt::Debug for LoggerOption {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Output(_) => formatter.write_str("Output(..)"),
            Self::Verbosity(level) => formatter.debug_tuple("Verbosity").field(level).finish(),
        }
    }
}

/// Set the writer of the logger's sink.
pub fn with_output(output: Arc<dyn LogWriter>) -> LoggerOption {
    LoggerOption::Output(output)
}

/// Set the verbosity of the logger's sink.
#[must_use]
pub const fn with_verbosity(level: u32) -> LoggerOption {
    LoggerOption::Verbosity(level)
}
