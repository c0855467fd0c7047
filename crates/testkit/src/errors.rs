//! Error fixtures.

use logerr_kverrors::{KVError, kvs};

/// A foreign (non-`KVError`) error with comparable structure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{letter}")]
pub struct LetterError {
    /// Text of the error.
    pub letter: String,
}

impl LetterError {
    /// Create a letter error.
    pub fn new(letter: impl Into<String>) -> Self {
        Self {
            letter: letter.into(),
        }
    }
}

/// A unit error standing in for a library sentinel such as "unexpected EOF".
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unexpected EOF")]
pub struct UnexpectedEof;

/// A `KVError` with one attribute.
pub fn an_error() -> KVError {
    KVError::new("an error", kvs!["key", "value"])
}

/// `KVError`s wrapped `depth` times around [`UnexpectedEof`].
pub fn wrapped_eof(depth: usize) -> KVError {
    let mut error = KVError::wrap(UnexpectedEof, "e1", kvs![]);
    for level in 2..=depth {
        error = KVError::wrap(error, format!("e{level}"), kvs![]);
    }
    error
}
