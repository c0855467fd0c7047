//! Ready-made sinks for tests.

use crate::in_memory::MemoryWriter;
use logerr_ports::LogWriter;
use logerr_sink::Sink;
use std::sync::Arc;

/// Timestamp written by fixture sinks.
pub const FIXED_TIMESTAMP: &str = "2024-01-02T03:04:05.123456789Z";

/// A sink writing to a fresh [`MemoryWriter`] with a fixed clock.
pub fn sink_with_buffer(name: &str, verbosity: u32) -> (Sink, Arc<MemoryWriter>) {
    let buffer = MemoryWriter::shared();
    let sink = Sink::new(name, Arc::clone(&buffer) as Arc<dyn LogWriter>)
        .with_verbosity(verbosity)
        .with_clock(|| FIXED_TIMESTAMP.to_string());
    (sink, buffer)
}
