//! Reusable attribute bags for building related errors.

use crate::error::KVError;
use crate::kv::{Attrs, combine, from_map, to_map};
use crate::value::{ErrorValue, Value};

/// A prebuilt set of attributes shared by every error created from it.
///
/// Errors built from a context get its attributes first; call-site
/// attributes override them, and the message always wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorContext {
    kvs: Attrs,
}

impl ErrorContext {
    /// Build a context from a flat key/value list.
    pub fn new(keys_and_values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            kvs: to_map(keys_and_values),
        }
    }

    /// The context's attributes.
    pub const fn kvs(&self) -> &Attrs {
        &self.kvs
    }

    /// Create a `KVError` carrying the context's attributes.
    pub fn new_error(
        &self,
        msg: impl Into<String>,
        keys_and_values: impl IntoIterator<Item = Value>,
    ) -> KVError {
        let attrs = combine(&self.kvs, keys_and_values);
        KVError::new(msg, from_map(&attrs))
    }

    /// Wrap `cause` in a `KVError` carrying the context's attributes.
    pub fn wrap(
        &self,
        cause: impl Into<ErrorValue>,
        msg: impl Into<String>,
        keys_and_values: impl IntoIterator<Item = Value>,
    ) -> KVError {
        let attrs = combine(&self.kvs, keys_and_values);
        KVError::wrap(cause, msg, from_map(&attrs))
    }

    /// Merge the context into an existing error in place.
    pub fn add_to<'a>(&self, error: &'a mut KVError) -> &'a mut KVError {
        error.add_ctx(self)
    }

    /// Extend the context with more attributes; new keys win.
    #[must_use]
    pub fn extend(&self, keys_and_values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            kvs: combine(&self.kvs, keys_and_values),
        }
    }
}
