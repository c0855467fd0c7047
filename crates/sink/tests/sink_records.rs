//! Integration tests for the records a `Sink` writes.

use logerr_kverrors::{ErrorValue, KVError, kvs};
use logerr_ports::LogWriter;
use logerr_sink::{EncodeError, Encoder, Line, Sink};
use logerr_testkit::{FIXED_TIMESTAMP, FailingWriter, MemoryWriter, UnexpectedEof, sink_with_buffer};
use serde_json::json;
use std::sync::Arc;
use std::thread;

#[test]
fn info_above_verbosity_writes_nothing() {
    let (sink, buffer) = sink_with_buffer("app", 1);

    sink.info(2, "x", kvs![]);
    assert!(buffer.is_empty());

    sink.info(0, "x", kvs![]);
    let lines = buffer.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(
        lines[0],
        format!(r#"{{"_ts":"{FIXED_TIMESTAMP}","_level":"1","_component":"app","_message":"x"}}"#)
    );
}

#[test]
fn error_record_embeds_kv_error() {
    let (sink, buffer) = sink_with_buffer("", 0);

    let error = KVError::new("an error", kvs!["key", "value"]);
    sink.error(Some(error.into()), "wrap", kvs![]);

    let contents = buffer.contents();
    assert!(contents.contains(r#""_message":"wrap""#), "{contents}");
    assert!(contents.contains(r#""_level":"0""#), "{contents}");
    assert!(
        contents.contains(r#""_error":{"msg":"an error","key":"value"}"#),
        "{contents}"
    );
}

#[test]
fn derived_values_join_call_site_values() {
    let (sink, buffer) = sink_with_buffer("", 0);

    sink.with_values(kvs!["hello", "world"])
        .info(0, "m", kvs!["foo", "bar"]);

    let contents = buffer.contents();
    assert!(contents.contains(r#""hello":"world""#), "{contents}");
    assert!(contents.contains(r#""foo":"bar""#), "{contents}");
}

#[test]
fn nan_attribute_writes_diagnostic_line() {
    let (sink, buffer) = sink_with_buffer("", 0);

    sink.info(0, "m", kvs!["value", f64::NAN]);

    let lines = buffer.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("failed to encode message"));
    assert!(lines[0].contains("json: unsupported value: NaN"));

    let fallback: serde_json::Value =
        serde_json::from_str(&lines[0]).unwrap_or(serde_json::Value::Null);
    assert_eq!(fallback["message"], json!("failed to encode message"));
    assert_eq!(fallback["encoder"], json!(std::any::type_name::<logerr_sink::JsonEncoder>()));
}

#[test]
fn error_is_never_gated() {
    let (sink, buffer) = sink_with_buffer("", 0);

    sink.error(Some(ErrorValue::from(UnexpectedEof)), "eof", kvs![]);
    sink.error(None, "no error", kvs![]);

    let entries = buffer.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].error, Some(json!({ "msg": "unexpected EOF" })));
    assert_eq!(entries[1].message, "no error");
    assert!(entries[1].error.is_none());
}

#[test]
fn parent_does_not_see_child_values() {
    let (parent, buffer) = sink_with_buffer("", 0);
    let child = parent.with_values(kvs!["k", "v"]);

    child.info(0, "child", kvs![]);
    child.info(0, "child again", kvs![]);
    parent.info(0, "parent", kvs![]);

    let entries = buffer.entries();
    assert_eq!(entries[0].context.get("k"), Some(&json!("v")));
    assert_eq!(entries[1].context.get("k"), Some(&json!("v")));
    assert!(!entries[2].context.contains_key("k"));
}

#[test]
fn with_name_joins_segments() {
    let (named, _) = sink_with_buffer("a", 0);
    assert_eq!(named.with_name("b").name(), "a_b");

    let (unnamed, _) = sink_with_buffer("", 0);
    assert_eq!(unnamed.with_name("b").name(), "b");
}

#[test]
fn every_record_has_fixed_fields() {
    for verbosity in 0..4_u32 {
        let (sink, buffer) = sink_with_buffer("fixed", verbosity);
        sink.info(0, "m", kvs![]);

        let lines = buffer.lines();
        let record: serde_json::Value =
            serde_json::from_str(&lines[0]).unwrap_or(serde_json::Value::Null);
        for key in ["_ts", "_level", "_component", "_message"] {
            assert!(record.get(key).is_some(), "missing {key} at v={verbosity}");
        }
        assert_eq!(record.get("_file:line").is_some(), verbosity >= 2, "v={verbosity}");
    }
}

#[test]
fn developer_mode_records_the_call_site() {
    let (sink, buffer) = sink_with_buffer("dev", 2);

    let line = line!() + 1;
    sink.info(0, "here", kvs![]);

    let entries = buffer.entries();
    assert_eq!(entries[0].file_line, Some(format!("{}:{line}", file!())));
}

#[test]
fn developer_mode_puts_file_line_second() {
    let (sink, buffer) = sink_with_buffer("dev", 2);

    sink.info(0, "m", kvs![]);

    let line = buffer.lines().remove(0);
    let ts_end = line.find(r#","_file:line""#).unwrap_or(usize::MAX);
    let level = line.find(r#","_level""#).unwrap_or(0);
    assert!(ts_end < level, "{line}");
}

#[test]
fn writer_failures_are_swallowed() {
    let writer = Arc::new(FailingWriter::default());
    let sink = Sink::new("", Arc::clone(&writer) as Arc<dyn LogWriter>);

    sink.info(0, "lost", kvs![]);
    sink.error(None, "lost too", kvs![]);

    assert_eq!(writer.attempts(), 2);
}

#[derive(Debug)]
struct RefusingEncoder;

impl Encoder for RefusingEncoder {
    fn name(&self) -> &'static str {
        "RefusingEncoder"
    }

    fn encode(&self, _writer: &dyn LogWriter, _line: &Line) -> Result<(), EncodeError> {
        Err(EncodeError::Serialize(serde::ser::Error::custom(
            "short buffer",
        )))
    }
}

#[test]
fn fallback_names_the_failing_encoder() {
    let buffer = MemoryWriter::shared();
    let sink = Sink::new("", Arc::clone(&buffer) as Arc<dyn LogWriter>)
        .with_encoder(Arc::new(RefusingEncoder));

    sink.info(0, "hello, world", kvs![]);

    let output = buffer.contents();
    assert!(output.contains("hello, world"), "has the original message");
    assert!(output.contains("short buffer"), "shows the original error");
    assert!(output.contains("RefusingEncoder"), "names the encoder");
    assert!(output.ends_with('\n'));
}

#[test]
fn concurrent_emitters_and_setters() {
    let (sink, buffer) = sink_with_buffer("shared", 0);
    let sink = Arc::new(sink);

    let emitters: Vec<_> = (0..8)
        .map(|worker| {
            let sink = Arc::clone(&sink);
            thread::spawn(move || {
                for index in 0..50 {
                    sink.info(0, "tick", kvs!["worker", worker, "index", index]);
                }
            })
        })
        .collect();
    let setter = {
        let sink = Arc::clone(&sink);
        thread::spawn(move || {
            for round in 0..50_u32 {
                sink.set_verbosity(round % 3);
            }
        })
    };

    for handle in emitters {
        assert!(handle.join().is_ok());
    }
    assert!(setter.join().is_ok());

    let entries = buffer.entries();
    assert_eq!(entries.len(), 400);
    assert!(entries.iter().all(|entry| entry.verbosity.get() < 3));
}
