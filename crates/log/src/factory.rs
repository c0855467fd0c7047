//! Logger constructors and sink recovery.

use crate::logger::Logger;
use crate::options::LoggerOption;
use logerr_config::{LoggerConfig, OutputTarget};
use logerr_kverrors::{KVError, Value, kvs};
use logerr_ports::LogWriter;
use logerr_sink::{Sink, StderrWriter, StdoutWriter};
use std::sync::Arc;

/// Message of the error returned by [`get_sink`] for a foreign sink.
pub const UNKNOWN_SINK_TYPE: &str = "unknown log sink type";

/// A logger with no component name writing to stdout at verbosity 0.
#[must_use]
pub fn default_logger() -> Logger {
    Logger::new(Arc::new(Sink::new("", Arc::new(StdoutWriter))))
}

/// A logger for `component` whose records always carry the given pairs.
///
/// Records go to stdout at verbosity 0 unless an option says otherwise.
pub fn new_logger(
    component: &str,
    options: impl IntoIterator<Item = LoggerOption>,
    keys_and_values: impl IntoIterator<Item = Value>,
) -> Logger {
    let sink = Sink::new(component, Arc::new(StdoutWriter)).with_context(keys_and_values);
    for option in options {
        option.apply(&sink);
    }
    Logger::new(Arc::new(sink))
}

/// A logger built from a validated config.
pub fn new_logger_from_config(
    config: &LoggerConfig,
    keys_and_values: impl IntoIterator<Item = Value>,
) -> Logger {
    let output: Arc<dyn LogWriter> = match config.output {
        OutputTarget::Stdout => Arc::new(StdoutWriter),
        OutputTarget::Stderr => Arc::new(StderrWriter),
    };
    let sink = Sink::new(config.component.as_str(), output)
        .with_verbosity(config.verbosity)
        .with_context(keys_and_values);
    Logger::new(Arc::new(sink))
}

/// Recover the concrete [`Sink`] behind `logger`.
///
/// Fails with [`UNKNOWN_SINK_TYPE`], carrying `sink_type` and `expected_type`
/// attributes, when the logger wraps some other sink or none at all.
pub fn get_sink(logger: &Logger) -> Result<&Sink, KVError> {
    let Some(sink) = logger.sink() else {
        return Err(unknown_sink_type("none"));
    };
    sink.as_any()
        .downcast_ref::<Sink>()
        .ok_or_else(|| unknown_sink_type(sink.type_name()))
}

fn unknown_sink_type(found: &str) -> KVError {
    KVError::new(
        UNKNOWN_SINK_TYPE,
        kvs![
            "sink_type",
            found,
            "expected_type",
            std::any::type_name::<Sink>()
        ],
    )
}
