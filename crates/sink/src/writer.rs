//! Standard writers for encoded records.

use logerr_ports::LogWriter;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// Writes records to standard output, one locked write per record.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutWriter;

impl LogWriter for StdoutWriter {
    fn write_all(&self, bytes: &[u8]) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(bytes)?;
        stdout.flush()
    }
}

/// Writes records to standard error, one locked write per record.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrWriter;

impl LogWriter for StderrWriter {
    fn write_all(&self, bytes: &[u8]) -> io::Result<()> {
        io::stderr().lock().write_all(bytes)
    }
}

/// Adapts any [`Write`] into a [`LogWriter`] by serialising access.
///
/// Every record is written under the lock, so lines never interleave.
#[derive(Debug, Default)]
pub struct LockedWriter<W> {
    inner: Mutex<W>,
}

impl<W: Write + Send> LockedWriter<W> {
    /// Wrap a writer.
    pub const fn new(inner: W) -> Self {
        Self {
            inner: Mutex::new(inner),
        }
    }

    /// Unwrap the writer.
    pub fn into_inner(self) -> W {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> LogWriter for LockedWriter<W> {
    fn write_all(&self, bytes: &[u8]) -> io::Result<()> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.write_all(bytes)?;
        inner.flush()
    }
}
