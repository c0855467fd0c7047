//! Inspection helpers that accept any error, `KVError` or not.
//!
//! The cause chain is the standard `source()` chain, so these helpers see
//! through foreign wrappers as well as `KVError` causes.

use crate::context::ErrorContext;
use crate::error::KVError;
use crate::kv::Attrs;
use crate::value::{ErrorValue, Value};
use std::error::Error as StdError;
use std::{iter, ptr};

/// Iterate over `error` and every error in its cause chain, outermost first.
pub fn chain<'a>(
    error: &'a (dyn StdError + 'static),
) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
    iter::successors(Some(error), |&current| current.source())
}

/// The direct cause of `error`, if any.
pub fn unwrap<'a>(error: &'a (dyn StdError + 'static)) -> Option<&'a (dyn StdError + 'static)> {
    error.source()
}

/// Returns true when any error in the chain equals `target`.
///
/// Comparison is structural: a link matches when it has `target`'s concrete
/// type and compares equal to it.
pub fn is<T>(error: &(dyn StdError + 'static), target: &T) -> bool
where
    T: StdError + PartialEq + 'static,
{
    chain(error).any(|link| link.downcast_ref::<T>() == Some(target))
}

/// Returns true when any error in the chain is the very error held by `target`.
///
/// Use this for errors without `PartialEq`, such as `std::io::Error`: keep the
/// [`ErrorValue`] that was wrapped and match on identity.
pub fn is_value(error: &(dyn StdError + 'static), target: &ErrorValue) -> bool {
    let target: *const (dyn StdError + Send + Sync + 'static) = target.as_dyn();
    chain(error).any(|link| ptr::addr_eq(link, target))
}

/// The first error in the chain whose concrete type is `T`.
pub fn as_error<'a, T>(error: &'a (dyn StdError + 'static)) -> Option<&'a T>
where
    T: StdError + 'static,
{
    chain(error).find_map(|link| link.downcast_ref::<T>())
}

/// The innermost error of the chain. An error without a cause is its own root.
pub fn root<'a>(error: &'a (dyn StdError + 'static)) -> &'a (dyn StdError + 'static) {
    let mut current = error;
    while let Some(next) = current.source() {
        current = next;
    }
    current
}

/// The attributes of `error` when it is a `KVError`.
pub fn kvs<'a>(error: &'a (dyn StdError + 'static)) -> Option<&'a Attrs> {
    error.downcast_ref::<KVError>().map(KVError::kvs)
}

/// The `msg` of a `KVError`, or the error text of anything else.
pub fn message(error: &(dyn StdError + 'static)) -> String {
    error
        .downcast_ref::<KVError>()
        .map_or_else(|| error.to_string(), KVError::message)
}

/// Return a copy of `error` with the pairs merged in.
///
/// A foreign error is first turned into a `KVError` carrying its text as the
/// message.
pub fn add(
    error: &(dyn StdError + 'static),
    keys_and_values: impl IntoIterator<Item = Value>,
) -> KVError {
    let mut kv_error = to_kv_error(error);
    kv_error.add(keys_and_values);
    kv_error
}

/// Return a copy of `error` with the context's attributes merged in.
pub fn add_ctx(error: &(dyn StdError + 'static), ctx: &ErrorContext) -> KVError {
    let mut kv_error = to_kv_error(error);
    kv_error.add_ctx(ctx);
    kv_error
}

/// Clone a `KVError` or convert a foreign error into one.
pub fn to_kv_error(error: &(dyn StdError + 'static)) -> KVError {
    error.downcast_ref::<KVError>().map_or_else(
        || KVError::new(error.to_string(), Vec::<Value>::new()),
        KVError::clone,
    )
}
