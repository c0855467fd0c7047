//! # logerr
//!
//! Structured JSON logging with key/value errors.
//!
//! ```no_run
//! use logerr::{KVError, kvs, new_logger, with_verbosity};
//!
//! let logger = new_logger("billing", [with_verbosity(1)], kvs!["region", "eu"]);
//! logger.info("invoice sent", kvs!["invoice", 42]);
//! logger.v(1).info("retrying", kvs!["attempt", 2]);
//!
//! let error = KVError::new("card declined", kvs!["code", "insufficient_funds"]);
//! logger.error(Some(error.into()), "charge failed", kvs!["invoice", 42]);
//! ```
//!
//! Each record is one JSON object on its own line:
//!
//! ```text
//! {"_ts":"2024-01-02T03:04:05.123Z","_level":"1","_component":"billing","_message":"charge failed","_error":{"msg":"card declined","code":"insufficient_funds"},"invoice":42,"region":"eu"}
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod factory;
pub mod logger;
pub mod options;

pub use factory::{UNKNOWN_SINK_TYPE, default_logger, get_sink, new_logger, new_logger_from_config};
pub use logger::Logger;
pub use options::{LoggerOption, with_output, with_verbosity};

pub use logerr_config::{LoggerConfig, OutputTarget};
pub use logerr_kverrors as errors;
pub use logerr_kverrors::{
    Attrs, ErrorContext, ErrorValue, KVError, ResultExt, Value, add, add_ctx, as_error, chain,
    from_map, is, is_value, kvs, message, new, new_context, root, to_map, unwrap, wrap,
};
pub use logerr_ports::{LogSink, LogWriter};
pub use logerr_sink::{
    Encoder, JsonEncoder, LockedWriter, Sink, StderrWriter, StdoutWriter, Verbosity,
    reset_timestamp_func, set_timestamp_func,
};

/// Returns the logerr crate version.
#[must_use]
pub const fn logerr_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_surface_is_reachable_from_the_facade() {
        let ctx = new_context(kvs!["tenant", "acme"]);
        let mut error = new("lookup failed", kvs!["id", 7]);
        error = add_ctx(&error, &ctx);
        error = add(&error, kvs!["attempt", 2]);

        let attrs = to_map(from_map(error.kvs()));
        assert_eq!(attrs, errors::kvs(&error).cloned().unwrap_or_default());
        assert_eq!(attrs.get("tenant"), Some(&Value::from("acme")));
        assert_eq!(attrs.get("attempt"), Some(&Value::from(2)));
    }
}
