//! End-to-end tests for `logerr info` and `logerr error`.

use std::io;
use std::process::{Command, Output};

fn logerr() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_logerr"));
    command
        .env_remove("LOGERR_COMPONENT")
        .env_remove("LOGERR_VERBOSITY")
        .env_remove("LOGERR_OUTPUT")
        .env_remove("RUST_LOG");
    command
}

fn records(bytes: &[u8]) -> io::Result<Vec<serde_json::Value>> {
    String::from_utf8_lossy(bytes)
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| serde_json::from_str(line).map_err(io::Error::other))
        .collect()
}

fn run(command: &mut Command) -> io::Result<(Output, Vec<serde_json::Value>)> {
    let output = command.output()?;
    let parsed = records(&output.stdout)?;
    Ok((output, parsed))
}

#[test]
fn info_writes_one_record_with_typed_attributes() -> io::Result<()> {
    let (output, records) = run(logerr().args([
        "--component",
        "billing",
        "info",
        "invoice sent",
        "--kv",
        "invoice=42",
        "--kv",
        "city=Athens",
    ]))?;

    assert!(output.status.success());
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record["_component"], "billing");
    assert_eq!(record["_message"], "invoice sent");
    assert_eq!(record["_level"], "0");
    assert_eq!(record["invoice"], 42);
    assert_eq!(record["city"], "Athens");
    assert!(record.get("_ts").is_some());
    assert!(record.get("_file:line").is_none());
    Ok(())
}

#[test]
fn info_above_verbosity_is_dropped() -> io::Result<()> {
    let (output, records) = run(logerr().args(["--verbosity", "1", "info", "quiet", "--level", "2"]))?;

    assert!(output.status.success());
    assert!(records.is_empty());
    Ok(())
}

#[test]
fn developer_verbosity_adds_file_line() -> io::Result<()> {
    let (output, records) = run(logerr()
        .env("LOGERR_VERBOSITY", "2")
        .args(["info", "debugging", "--level", "2"]))?;

    assert!(output.status.success());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["_level"], "2");
    assert!(records[0]["_file:line"].is_string());
    Ok(())
}

#[test]
fn error_embeds_structured_error() -> io::Result<()> {
    let (output, records) = run(logerr().args([
        "--component",
        "billing",
        "error",
        "charge failed",
        "--error",
        "card declined",
        "--error-kv",
        "code=\"insufficient_funds\"",
        "--name",
        "payments",
        "--kv",
        "invoice=42",
    ]))?;

    assert!(output.status.success());
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record["_component"], "billing_payments");
    assert_eq!(
        record["_error"],
        serde_json::json!({ "msg": "card declined", "code": "insufficient_funds" })
    );
    assert_eq!(record["invoice"], 42);
    Ok(())
}

#[test]
fn error_without_error_text_has_no_error_field() -> io::Result<()> {
    let (output, records) = run(logerr().args(["error", "no cause", "--kv", "k=v"]))?;

    assert!(output.status.success());
    assert_eq!(records.len(), 1);
    assert!(records[0].get("_error").is_none());
    assert_eq!(records[0]["k"], "v");
    Ok(())
}

#[test]
fn stderr_flag_redirects_records() -> io::Result<()> {
    let output = logerr().args(["--stderr", "info", "to stderr"]).output()?;

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let records = records(&output.stderr)?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["_message"], "to stderr");
    Ok(())
}

#[test]
fn invalid_env_fails_with_invalid_input() -> io::Result<()> {
    let output = logerr()
        .env("LOGERR_VERBOSITY", "loud")
        .args(["info", "never written"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("LOGERR_VERBOSITY"), "{stderr}");
    Ok(())
}

#[test]
fn malformed_pair_is_rejected() -> io::Result<()> {
    let output = logerr().args(["info", "m", "--kv", "novalue"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    Ok(())
}
