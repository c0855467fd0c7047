//! In-memory implementations of the boundary traits.
//!
//! These implementations are intended for:
//! - Unit/integration tests
//! - Capturing records without touching stdout

use crate::observed::ObservedEntry;
use logerr_kverrors::{ErrorValue, Value};
use logerr_ports::{LogSink, LogWriter};
use std::any::Any;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Writer that keeps every write in memory.
#[derive(Debug, Default)]
pub struct MemoryWriter {
    writes: Mutex<Vec<Vec<u8>>>,
}

impl MemoryWriter {
    /// A new shared writer.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Everything written so far, as text.
    pub fn contents(&self) -> String {
        let writes = self.writes.lock().expect("memory writer lock");
        writes
            .iter()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .collect()
    }

    /// Non-empty lines written so far.
    pub fn lines(&self) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Number of `write_all` calls.
    pub fn write_count(&self) -> usize {
        self.writes.lock().expect("memory writer lock").len()
    }

    /// Returns true when nothing was written.
    pub fn is_empty(&self) -> bool {
        self.write_count() == 0
    }

    /// Drain and return the lines written so far.
    pub fn take_lines(&self) -> Vec<String> {
        let lines = self.lines();
        self.writes.lock().expect("memory writer lock").clear();
        lines
    }

    /// Parse every line into an [`ObservedEntry`]. Panics on malformed lines.
    pub fn entries(&self) -> Vec<ObservedEntry> {
        self.lines()
            .iter()
            .map(|line| ObservedEntry::parse(line).expect("well-formed record"))
            .collect()
    }
}

impl LogWriter for MemoryWriter {
    fn write_all(&self, bytes: &[u8]) -> io::Result<()> {
        self.writes
            .lock()
            .expect("memory writer lock")
            .push(bytes.to_vec());
        Ok(())
    }
}

/// Writer that rejects every write and counts the attempts.
#[derive(Debug, Default)]
pub struct FailingWriter {
    attempts: AtomicUsize,
}

impl FailingWriter {
    /// Number of rejected writes.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl LogWriter for FailingWriter {
    fn write_all(&self, _bytes: &[u8]) -> io::Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "writer closed"))
    }
}

/// A sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl LogSink for NoopSink {
    fn enabled(&self, _level: u32) -> bool {
        false
    }

    fn info(&self, _level: u32, _msg: &str, _keys_and_values: Vec<Value>) {}

    fn error(&self, _error: Option<ErrorValue>, _msg: &str, _keys_and_values: Vec<Value>) {}

    fn with_values(&self, _keys_and_values: Vec<Value>) -> Arc<dyn LogSink> {
        Arc::new(Self)
    }

    fn with_name(&self, _name: &str) -> Arc<dyn LogSink> {
        Arc::new(Self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
