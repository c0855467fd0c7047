//! # logerr-sink
//!
//! Structured JSON records and the sink that produces them.
//!
//! A [`Sink`] turns `info`/`error` calls into [`Line`] records and hands them
//! to an [`Encoder`], which writes one JSON object per line:
//!
//! ```text
//! {"_ts":"2024-01-02T03:04:05.123Z","_level":"0","_component":"app","_message":"started","port":8080}
//! ```
//!
//! Sinks at verbosity 2 and above also write `_file:line`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod caller;
pub mod clock;
pub mod encoder;
pub mod keys;
pub mod record;
pub mod sink;
pub mod verbosity;
pub mod writer;

pub use clock::{TimestampFn, format_rfc3339_nano, reset_timestamp_func, set_timestamp_func, timestamp};
pub use encoder::{EncodeError, Encoder, JsonEncoder};
pub use keys::{
    COMPONENT_KEY, ERROR_KEY, FILE_LINE_KEY, FIXED_KEYS, LEVEL_KEY, MESSAGE_KEY, TIMESTAMP_KEY,
};
pub use record::Line;
pub use sink::Sink;
pub use verbosity::Verbosity;
pub use writer::{LockedWriter, StderrWriter, StdoutWriter};

/// Returns the sink crate version.
#[must_use]
pub const fn sink_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
