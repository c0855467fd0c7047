//! The structured key/value error.

use crate::context::ErrorContext;
use crate::kv::{Attrs, to_map};
use crate::object::{ObjectEncoder, ObjectMarshaler};
use crate::value::{ErrorValue, Value};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::error::Error as StdError;
use std::fmt;

/// Attribute key holding the human-readable message.
pub const KEY_MESSAGE: &str = "msg";
/// Attribute key holding the wrapped cause.
pub const KEY_CAUSE: &str = "cause";

/// An error made of a message, arbitrary attributes and an optional cause.
///
/// All three live in one attribute map: the message under [`KEY_MESSAGE`],
/// the cause under [`KEY_CAUSE`]. JSON output renders the message first,
/// then the remaining attributes in key order, then the cause.
#[derive(Debug, Clone, PartialEq)]
pub struct KVError {
    kvs: Attrs,
}

impl KVError {
    /// Create an error from a message and a flat key/value list.
    ///
    /// The message is never replaced by a `msg` key in the list.
    pub fn new(msg: impl Into<String>, keys_and_values: impl IntoIterator<Item = Value>) -> Self {
        let mut kvs = to_map(keys_and_values);
        kvs.insert(KEY_MESSAGE.to_string(), Value::String(msg.into()));
        Self { kvs }
    }

    /// Create an error that wraps `cause`.
    ///
    /// The cause is never replaced by a `cause` key in the list.
    pub fn wrap(
        cause: impl Into<ErrorValue>,
        msg: impl Into<String>,
        keys_and_values: impl IntoIterator<Item = Value>,
    ) -> Self {
        let mut error = Self::new(msg, keys_and_values);
        error
            .kvs
            .insert(KEY_CAUSE.to_string(), Value::Error(cause.into()));
        error
    }

    /// The `msg` attribute as text (empty when absent).
    pub fn message(&self) -> String {
        self.kvs
            .get(KEY_MESSAGE)
            .map(|msg| msg.to_string())
            .unwrap_or_default()
    }

    /// The wrapped cause, when the `cause` attribute holds an error.
    pub fn cause(&self) -> Option<&ErrorValue> {
        self.kvs.get(KEY_CAUSE).and_then(Value::as_error)
    }

    /// All attributes, including `msg` and `cause`.
    pub const fn kvs(&self) -> &Attrs {
        &self.kvs
    }

    /// Merge key/value pairs into this error in place; existing keys are overwritten.
    ///
    /// This includes `msg` and `cause`.
    pub fn add(&mut self, keys_and_values: impl IntoIterator<Item = Value>) -> &mut Self {
        self.kvs.extend(to_map(keys_and_values));
        self
    }

    /// Set a single attribute, consuming and returning the error.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.kvs.insert(key.into(), value.into());
        self
    }

    /// Merge every attribute of `ctx` into this error in place.
    pub fn add_ctx(&mut self, ctx: &ErrorContext) -> &mut Self {
        self.kvs
            .extend(ctx.kvs().iter().map(|(key, value)| (key.clone(), value.clone())));
        self
    }
}

impl fmt::Display for KVError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cause() {
            Some(cause) => write!(formatter, "{}: {cause}", self.message()),
            None => formatter.write_str(&self.message()),
        }
    }
}

impl StdError for KVError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause()
            .map(|cause| cause.as_dyn() as &(dyn StdError + 'static))
    }
}

impl Serialize for KVError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.kvs.len()))?;
        if let Some(msg) = self.kvs.get(KEY_MESSAGE) {
            map.serialize_entry(KEY_MESSAGE, msg)?;
        }
        for (key, value) in &self.kvs {
            if key == KEY_MESSAGE || key == KEY_CAUSE {
                continue;
            }
            map.serialize_entry(key, value)?;
        }
        if let Some(cause) = self.kvs.get(KEY_CAUSE) {
            map.serialize_entry(KEY_CAUSE, cause)?;
        }
        map.end()
    }
}

impl ObjectMarshaler for KVError {
    fn marshal_log_object(&self, encoder: &mut dyn ObjectEncoder) {
        for (key, value) in &self.kvs {
            match value.as_error().and_then(ErrorValue::as_kv_error) {
                Some(nested) => encoder.add_object(key, nested),
                None => encoder.add_value(key, value),
            }
        }
    }
}
