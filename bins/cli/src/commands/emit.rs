//! `info` and `error` handlers.

use crate::commands::parse_pairs;
use crate::error::CliError;
use logerr::{KVError, Logger};

/// Emit one info record at `level`.
pub fn run_info(
    logger: &Logger,
    level: u32,
    message: &str,
    pairs: &[String],
) -> Result<(), CliError> {
    let keys_and_values = parse_pairs(pairs)?;
    tracing::debug!(level, message, "emitting info record");
    logger.v(level).info(message, keys_and_values);
    Ok(())
}

/// Emit one error record, optionally carrying an error built from the flags.
pub fn run_error(
    logger: &Logger,
    message: &str,
    error: Option<&str>,
    error_pairs: &[String],
    pairs: &[String],
) -> Result<(), CliError> {
    let keys_and_values = parse_pairs(pairs)?;
    let error = match error {
        Some(text) => Some(KVError::new(text, parse_pairs(error_pairs)?)),
        None if !error_pairs.is_empty() => {
            return Err(CliError::InvalidInput(
                "--error-kv requires --error".to_string(),
            ));
        },
        None => None,
    };
    tracing::debug!(message, has_error = error.is_some(), "emitting error record");
    logger.error(error.map(Into::into), message, keys_and_values);
    Ok(())
}
