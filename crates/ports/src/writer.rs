//! Byte sink boundary contract.

use std::io;
use std::sync::Arc;

/// Destination for encoded log lines.
///
/// Each call receives one complete line. Implementations that need per-line
/// atomicity across threads must provide it themselves.
pub trait LogWriter: Send + Sync {
    /// Write every byte of `bytes`.
    fn write_all(&self, bytes: &[u8]) -> io::Result<()>;
}

impl<W: LogWriter + ?Sized> LogWriter for Arc<W> {
    fn write_all(&self, bytes: &[u8]) -> io::Result<()> {
        (**self).write_all(bytes)
    }
}

impl<W: LogWriter + ?Sized> LogWriter for Box<W> {
    fn write_all(&self, bytes: &[u8]) -> io::Result<()> {
        (**self).write_all(bytes)
    }
}
