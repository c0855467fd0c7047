//! Parse emitted records back into structured entries.

use logerr_kverrors::{KVError, kvs};
use logerr_sink::{
    COMPONENT_KEY, ERROR_KEY, FILE_LINE_KEY, LEVEL_KEY, MESSAGE_KEY, TIMESTAMP_KEY, Verbosity,
};
use serde_json::{Map, Value};

/// One emitted record, split into its fixed fields and its context.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedEntry {
    /// `_component`.
    pub component: String,
    /// `_message`.
    pub message: String,
    /// `_ts`.
    pub timestamp: String,
    /// `_file:line`, present in developer mode.
    pub file_line: Option<String>,
    /// `_level`, parsed from its decimal string.
    pub verbosity: Verbosity,
    /// `_error`, when the record carries one.
    pub error: Option<Value>,
    /// Every other key.
    pub context: Map<String, Value>,
}

impl ObservedEntry {
    /// Parse a single JSON line.
    pub fn parse(line: &str) -> Result<Self, KVError> {
        let value: Value = serde_json::from_str(line)
            .map_err(|error| KVError::wrap(error, "record is not JSON", kvs!["line", line]))?;
        let Value::Object(mut fields) = value else {
            return Err(KVError::new("record is not an object", kvs!["line", line]));
        };

        let message = take_string(&mut fields, MESSAGE_KEY)?;
        let timestamp = take_string(&mut fields, TIMESTAMP_KEY)?;
        let component = take_string(&mut fields, COMPONENT_KEY)?;
        let level = take_string(&mut fields, LEVEL_KEY)?;
        let verbosity = level.parse::<Verbosity>().map_err(|error| {
            KVError::wrap(error, "malformed/missing key", kvs!["key", LEVEL_KEY])
        })?;
        let file_line = match fields.remove(FILE_LINE_KEY) {
            Some(Value::String(file_line)) => Some(file_line),
            Some(_) => return Err(missing(FILE_LINE_KEY)),
            None => None,
        };
        let error = fields.remove(ERROR_KEY);

        Ok(Self {
            component,
            message,
            timestamp,
            file_line,
            verbosity,
            error,
            context: fields,
        })
    }

    /// The entry as one flat map, fixed fields included.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = self.context.clone();
        map.insert(MESSAGE_KEY.to_string(), Value::from(self.message.clone()));
        map.insert(TIMESTAMP_KEY.to_string(), Value::from(self.timestamp.clone()));
        map.insert(COMPONENT_KEY.to_string(), Value::from(self.component.clone()));
        map.insert(LEVEL_KEY.to_string(), Value::from(self.verbosity.get()));
        if let Some(file_line) = &self.file_line {
            map.insert(FILE_LINE_KEY.to_string(), Value::from(file_line.clone()));
        }
        if let Some(error) = &self.error {
            map.insert(ERROR_KEY.to_string(), error.clone());
        }
        map
    }

    /// Only the requested keys; absent keys map to `null`.
    pub fn fields(&self, keys: &[&str]) -> Map<String, Value> {
        let entry = self.to_map();
        keys.iter()
            .map(|key| {
                (
                    (*key).to_string(),
                    entry.get(*key).cloned().unwrap_or(Value::Null),
                )
            })
            .collect()
    }
}

fn take_string(fields: &mut Map<String, Value>, key: &str) -> Result<String, KVError> {
    match fields.remove(key) {
        Some(Value::String(value)) => Ok(value),
        _ => Err(missing(key)),
    }
}

fn missing(key: &str) -> KVError {
    KVError::new("malformed/missing key", kvs!["key", key])
}
