//! Result helpers for key/value errors.

use crate::error::KVError;
use crate::value::{ErrorValue, Value};

/// Result type defaulting to [`KVError`].
pub type Result<T, E = KVError> = std::result::Result<T, E>;

/// Extension helpers mirroring common `Result` combinators.
pub trait ResultExt<T, E> {
    /// Map the success value, preserving the error.
    fn map_ok<U, F>(self, op: F) -> Result<U, E>
    where
        F: FnOnce(T) -> U;

    /// Map the error value, preserving the success.
    fn map_err_with<F, E2>(self, op: F) -> Result<T, E2>
    where
        F: FnOnce(E) -> E2;

    /// Chain fallible operations.
    fn and_then_with<U, F>(self, op: F) -> Result<U, E>
    where
        F: FnOnce(T) -> Result<U, E>;

    /// Wrap the error in a [`KVError`] with a message and attributes.
    fn wrap_err<I>(self, msg: &str, keys_and_values: I) -> Result<T>
    where
        E: Into<ErrorValue>,
        I: IntoIterator<Item = Value>;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn map_ok<U, F>(self, op: F) -> Result<U, E>
    where
        F: FnOnce(T) -> U,
    {
        self.map(op)
    }

    fn map_err_with<F, E2>(self, op: F) -> Result<T, E2>
    where
        F: FnOnce(E) -> E2,
    {
        self.map_err(op)
    }

    fn and_then_with<U, F>(self, op: F) -> Result<U, E>
    where
        F: FnOnce(T) -> Result<U, E>,
    {
        self.and_then(op)
    }

    fn wrap_err<I>(self, msg: &str, keys_and_values: I) -> Result<T>
    where
        E: Into<ErrorValue>,
        I: IntoIterator<Item = Value>,
    {
        self.map_err(|error| KVError::wrap(error, msg, keys_and_values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect;
    use crate::kvs;

    #[test]
    fn result_ext_maps_ok() {
        let value: Result<i32> = Ok(1);
        let mapped = value.map_ok(|value| value + 2);

        assert!(matches!(mapped, Ok(3)));
    }

    #[test]
    fn result_ext_maps_err() {
        let value: Result<i32> = Err(KVError::new("bad input", kvs![]));
        let mapped = value.map_err_with(|error| error.with("field", "name"));

        assert!(mapped.is_err());
        if let Err(error) = mapped {
            assert_eq!(error.kvs().get("field"), Some(&Value::from("name")));
        }
    }

    #[test]
    fn result_ext_and_then() {
        let value: Result<i32> = Ok(2);
        let chained = value.and_then_with(|value| Ok(value * 3));

        assert!(matches!(chained, Ok(6)));
    }

    #[test]
    fn wrap_err_keeps_cause() {
        let io_result: Result<(), std::io::Error> = Err(std::io::Error::other("pipe closed"));
        let wrapped = io_result.wrap_err("flush failed", kvs!["fd", 2]);

        let Err(error) = wrapped else {
            unreachable!("error stays an error");
        };
        assert_eq!(error.to_string(), "flush failed: pipe closed");
        assert_eq!(error.kvs().get("fd"), Some(&Value::from(2)));
        assert!(inspect::as_error::<std::io::Error>(&error).is_some());
    }
}
