//! Record encoders.

use crate::record::Line;
use logerr_kverrors::{KVError, kvs};
use logerr_ports::LogWriter;
use std::fmt;
use std::io;

/// Error returned by an [`Encoder`].
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// The record could not be serialised.
    #[error("json: {0}")]
    Serialize(#[source] serde_json::Error),
    /// The writer rejected the encoded bytes.
    #[error("write: {0}")]
    Io(#[from] io::Error),
}

impl From<EncodeError> for KVError {
    fn from(error: EncodeError) -> Self {
        let kind = match &error {
            EncodeError::Serialize(_) => "serialize",
            EncodeError::Io(_) => "io",
        };
        Self::wrap(error, "failed to encode log record", kvs!["kind", kind])
    }
}

/// Turns a record into bytes on a writer.
pub trait Encoder: Send + Sync + fmt::Debug {
    /// Type name reported in fallback diagnostics.
    fn name(&self) -> &'static str;

    /// Write exactly one encoded record to `writer`.
    fn encode(&self, writer: &dyn LogWriter, line: &Line) -> Result<(), EncodeError>;
}

/// Encodes each record as one JSON object followed by a newline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonEncoder;

impl Encoder for JsonEncoder {
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn encode(&self, writer: &dyn LogWriter, line: &Line) -> Result<(), EncodeError> {
        let mut bytes = serde_json::to_vec(line).map_err(EncodeError::Serialize)?;
        bytes.push(b'\n');
        writer.write_all(&bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verbosity::Verbosity;
    use logerr_kverrors::{Attrs, Value, to_map};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Buffer(Mutex<Vec<u8>>);

    impl LogWriter for Buffer {
        fn write_all(&self, bytes: &[u8]) -> io::Result<()> {
            self.0
                .lock()
                .map_err(|_| io::Error::other("poisoned"))?
                .extend_from_slice(bytes);
            Ok(())
        }
    }

    impl Buffer {
        fn text(&self) -> String {
            self.0
                .lock()
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                .unwrap_or_default()
        }
    }

    struct Closed;

    impl LogWriter for Closed {
        fn write_all(&self, _bytes: &[u8]) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    fn line(context: Attrs) -> Line {
        Line {
            timestamp: "ts".to_string(),
            file_line: "f.rs:1".to_string(),
            verbosity: Verbosity::ZERO,
            component: String::new(),
            message: "m".to_string(),
            context,
        }
    }

    #[test]
    fn writes_one_object_per_record() -> Result<(), EncodeError> {
        let buffer = Buffer::default();
        JsonEncoder.encode(&buffer, &line(Attrs::new()))?;
        JsonEncoder.encode(&buffer, &line(to_map(vec![Value::from("k"), Value::from(1)])))?;

        let text = buffer.text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(text.ends_with('\n'));
        for line in lines {
            serde_json::from_str::<serde_json::Value>(line).map_err(EncodeError::Serialize)?;
        }
        Ok(())
    }

    #[test]
    fn serialisation_errors_write_nothing() {
        let buffer = Buffer::default();
        let result = JsonEncoder.encode(
            &buffer,
            &line(to_map(vec![Value::from("v"), Value::Float(f64::INFINITY)])),
        );

        let message = result.err().map(|error| error.to_string()).unwrap_or_default();
        assert_eq!(message, "json: unsupported value: +Inf");
        assert!(buffer.text().is_empty());
    }

    #[test]
    fn writer_errors_are_reported() {
        let result = JsonEncoder.encode(&Closed, &line(Attrs::new()));
        assert!(matches!(result, Err(EncodeError::Io(_))));
    }

    #[test]
    fn encode_errors_convert_to_kv_errors() {
        let error = KVError::from(EncodeError::Io(io::Error::other("gone")));
        assert_eq!(error.kvs().get("kind"), Some(&Value::from("io")));
        assert_eq!(error.to_string(), "failed to encode log record: write: gone");
    }

    #[test]
    fn name_is_the_type_name() {
        assert!(JsonEncoder.name().ends_with("JsonEncoder"));
    }
}
