//! The log record and its JSON shape.

use crate::keys::{
    COMPONENT_KEY, FILE_LINE_KEY, LEVEL_KEY, MESSAGE_KEY, TIMESTAMP_KEY, is_fixed_key,
};
use crate::verbosity::Verbosity;
use logerr_kverrors::Attrs;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One log record before encoding.
///
/// Serialises as a single flat JSON object: the fixed fields first, then
/// every context entry as a top-level key. `_file:line` is only written in
/// developer mode, and `_level` is a decimal string.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// RFC3339 timestamp with nanoseconds.
    pub timestamp: String,
    /// Call site as `path:line`.
    pub file_line: String,
    /// Verbosity of the emitting sink.
    pub verbosity: Verbosity,
    /// Component name of the emitting sink.
    pub component: String,
    /// Record message.
    pub message: String,
    /// Attributes flattened next to the fixed fields.
    pub context: Attrs,
}

impl Line {
    /// Returns true when the record includes its call site.
    pub const fn is_developer(&self) -> bool {
        self.verbosity.is_developer()
    }
}

impl Serialize for Line {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(TIMESTAMP_KEY, &self.timestamp)?;
        if self.is_developer() {
            map.serialize_entry(FILE_LINE_KEY, &self.file_line)?;
        }
        map.serialize_entry(LEVEL_KEY, &self.verbosity.to_string())?;
        map.serialize_entry(COMPONENT_KEY, &self.component)?;
        map.serialize_entry(MESSAGE_KEY, &self.message)?;
        for (key, value) in &self.context {
            if is_fixed_key(key) {
                continue;
            }
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logerr_kverrors::{KVError, Value, kvs, to_map};

    fn line(verbosity: u32, context: Attrs) -> Line {
        Line {
            timestamp: "2024-01-02T03:04:05.123Z".to_string(),
            file_line: "src/main.rs:42".to_string(),
            verbosity: Verbosity::new(verbosity),
            component: "app".to_string(),
            message: "hello".to_string(),
            context,
        }
    }

    #[test]
    fn production_shape_omits_call_site() -> Result<(), serde_json::Error> {
        let encoded = serde_json::to_string(&line(1, Attrs::new()))?;
        assert_eq!(
            encoded,
            r#"{"_ts":"2024-01-02T03:04:05.123Z","_level":"1","_component":"app","_message":"hello"}"#
        );
        Ok(())
    }

    #[test]
    fn developer_shape_includes_call_site() -> Result<(), serde_json::Error> {
        let encoded = serde_json::to_string(&line(2, to_map(kvs!["k", "v"])))?;
        assert_eq!(
            encoded,
            r#"{"_ts":"2024-01-02T03:04:05.123Z","_file:line":"src/main.rs:42","_level":"2","_component":"app","_message":"hello","k":"v"}"#
        );
        Ok(())
    }

    #[test]
    fn context_is_flattened_after_fixed_fields() -> Result<(), serde_json::Error> {
        let error = KVError::new("an error", kvs!["key", "value"]);
        let context = to_map(kvs!["b", 2, "a", true, "_error", error]);
        let encoded = serde_json::to_string(&line(0, context))?;

        assert!(encoded.ends_with(
            r#""_message":"hello","_error":{"msg":"an error","key":"value"},"a":true,"b":2}"#
        ));
        Ok(())
    }

    #[test]
    fn fixed_fields_win_over_context() -> Result<(), serde_json::Error> {
        let context = to_map(kvs!["_message", "imposter", "_level", "9", "other", 1]);
        let value: serde_json::Value = serde_json::to_value(line(0, context))?;

        assert_eq!(value["_message"], "hello");
        assert_eq!(value["_level"], "0");
        assert_eq!(value["other"], 1);
        Ok(())
    }

    #[test]
    fn non_finite_context_fails() {
        let context = to_map(kvs!["value", f64::NAN]);
        let error = serde_json::to_string(&line(0, context)).err();
        assert!(error.is_some_and(|error| error.to_string().contains("unsupported value: NaN")));
    }

    #[test]
    fn nested_values_keep_structure() -> Result<(), serde_json::Error> {
        let context = to_map(kvs!["list", vec![Value::from(1), Value::Null]]);
        let value: serde_json::Value = serde_json::to_value(line(0, context))?;

        assert_eq!(value["list"], serde_json::json!([1, null]));
        Ok(())
    }
}
