//! Subcommand handlers.

mod config;
mod emit;

pub use config::{ConfigFormat, run_config_show};
pub use emit::{run_error, run_info};

use crate::error::CliError;
use logerr::Value;

/// Parse `key=value` flags into a flat key/value list.
///
/// Values are read as JSON when they parse as JSON and kept as text otherwise,
/// so `count=3` yields a number and `city=Athens` a string.
pub fn parse_pairs(pairs: &[String]) -> Result<Vec<Value>, CliError> {
    let mut list = Vec::with_capacity(pairs.len() * 2);
    for pair in pairs {
        let Some((key, raw)) = pair.split_once('=') else {
            return Err(CliError::InvalidInput(format!(
                "expected key=value, got {pair:?}"
            )));
        };
        if key.is_empty() {
            return Err(CliError::InvalidInput(format!("empty key in {pair:?}")));
        }
        let value = serde_json::from_str::<serde_json::Value>(raw)
            .map_or_else(|_| Value::from(raw), Value::from);
        list.push(Value::from(key));
        list.push(value);
    }
    Ok(list)
}
