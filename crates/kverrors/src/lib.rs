//! # logerr-kverrors
//!
//! Structured key/value errors.
//!
//! A [`KVError`] carries a message, arbitrary attributes and an optional
//! cause. It renders as `"msg"` or `"msg: cause"` for humans and as a nested
//! JSON object for machines:
//!
//! ```
//! use logerr_kverrors::{KVError, kvs};
//!
//! let inner = KVError::new("an error", kvs!["key", "value"]);
//! let outer = KVError::wrap(inner, "main error", kvs!["key", "value"]);
//!
//! assert_eq!(outer.to_string(), "main error: an error");
//! let json = serde_json::to_string(&outer).unwrap_or_default();
//! assert_eq!(
//!     json,
//!     r#"{"msg":"main error","key":"value","cause":{"msg":"an error","key":"value"}}"#
//! );
//! ```
//!
//! ## Design Principles
//!
//! 1. **No workspace dependencies** - Only serde and serde_json
//! 2. **Standard chains** - Causes are exposed through `Error::source`
//! 3. **Encode-time failures** - Values are stored as given; JSON encoding
//!    is where unsupported values (non-finite floats) are reported

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod context;
pub mod error;
pub mod inspect;
pub mod kv;
pub mod object;
pub mod result;
pub mod value;

pub use context::ErrorContext;
pub use error::{KEY_CAUSE, KEY_MESSAGE, KVError};
pub use inspect::{
    add, add_ctx, as_error, chain, is, is_value, kvs, message, root, to_kv_error, unwrap,
};
pub use kv::{Attrs, combine, from_map, to_map};
pub use object::{MapObjectEncoder, ObjectEncoder, ObjectMarshaler};
pub use result::{Result, ResultExt};
pub use value::{ErrorValue, Value};

/// Create a new [`KVError`].
pub fn new(msg: impl Into<String>, keys_and_values: impl IntoIterator<Item = Value>) -> KVError {
    KVError::new(msg, keys_and_values)
}

/// Wrap an optional cause. A missing cause yields no error.
pub fn wrap<E>(
    cause: Option<E>,
    msg: impl Into<String>,
    keys_and_values: impl IntoIterator<Item = Value>,
) -> Option<KVError>
where
    E: Into<ErrorValue>,
{
    cause.map(|cause| KVError::wrap(cause, msg, keys_and_values))
}

/// Create an [`ErrorContext`] from a flat key/value list.
pub fn new_context(keys_and_values: impl IntoIterator<Item = Value>) -> ErrorContext {
    ErrorContext::new(keys_and_values)
}

/// Returns the kverrors crate version.
#[must_use]
pub const fn kverrors_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
