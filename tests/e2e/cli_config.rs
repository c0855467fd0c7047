//! End-to-end tests for `logerr config show`.

use std::fs;
use std::io;
use std::process::Command;

fn logerr() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_logerr"));
    command
        .env_remove("LOGERR_COMPONENT")
        .env_remove("LOGERR_VERBOSITY")
        .env_remove("LOGERR_OUTPUT")
        .env_remove("RUST_LOG");
    command
}

fn show(command: &mut Command) -> io::Result<serde_json::Value> {
    let output = command.args(["config", "show"]).output()?;
    if !output.status.success() {
        return Err(io::Error::other(String::from_utf8_lossy(&output.stderr).into_owned()));
    }
    serde_json::from_slice(&output.stdout).map_err(io::Error::other)
}

#[test]
fn defaults_without_sources() -> io::Result<()> {
    let config = show(&mut logerr())?;

    assert_eq!(
        config,
        serde_json::json!({ "version": 1, "component": "", "verbosity": 0, "output": "stdout" })
    );
    Ok(())
}

#[test]
fn precedence_is_flags_then_env_then_file() -> io::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("logger.toml");
    fs::write(&path, "component = \"from-file\"\nverbosity = 1\noutput = \"stderr\"\n")?;

    let config = show(
        logerr()
            .env("LOGERR_VERBOSITY", "3")
            .env("LOGERR_COMPONENT", "from-env")
            .arg("--config")
            .arg(&path)
            .args(["--component", "from-flag"]),
    )?;

    assert_eq!(config["component"], "from-flag");
    assert_eq!(config["verbosity"], 3);
    assert_eq!(config["output"], "stderr");
    Ok(())
}

#[test]
fn toml_output() -> io::Result<()> {
    let output = logerr()
        .args(["--component", "api", "config", "show", "--format", "toml"])
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("component = \"api\""), "{stdout}");
    Ok(())
}

#[test]
fn unsupported_config_file_fails() -> io::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("logger.yaml");
    fs::write(&path, "component: api\n")?;

    let output = logerr()
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unsupported config format"), "{stderr}");
    Ok(())
}

#[test]
fn whitespace_component_is_rejected() -> io::Result<()> {
    let output = logerr()
        .args(["--component", "two words", "config", "show"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    Ok(())
}
