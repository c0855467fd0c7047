//! # logerr-testkit
//!
//! Test helpers and in-memory writers.
//! This crate depends on `kverrors`, `ports` and `sink`.

pub mod errors;
pub mod fixtures;
pub mod in_memory;
pub mod observed;

pub use errors::{LetterError, UnexpectedEof, an_error, wrapped_eof};
pub use fixtures::{FIXED_TIMESTAMP, sink_with_buffer};
pub use in_memory::{FailingWriter, MemoryWriter, NoopSink};
pub use observed::ObservedEntry;

/// Returns the testkit crate version.
#[must_use]
pub const fn testkit_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
