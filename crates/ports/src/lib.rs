//! # logerr-ports
//!
//! Boundary traits for the logerr workspace.
//!
//! This crate defines the interfaces between the front-end logger, the JSON
//! sink and the output destination. It depends only on `logerr-kverrors`.

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod sink;
pub mod writer;

pub use sink::LogSink;
pub use writer::LogWriter;
