//! Config loading helpers (env + file + defaults).
//!
//! Precedence is deterministic (highest wins):
//! - env overrides (`LoggerEnv`)
//! - config file content (JSON or TOML)
//! - defaults (`LoggerConfig::default()`)

use crate::env::{LoggerEnv, apply_env_overrides};
use crate::schema::{LoggerConfig, ValidatedLoggerConfig};
use logerr_kverrors::{KVError, kvs};
use std::path::Path;

/// Supported config file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON (also used for files without an extension).
    Json,
    /// TOML.
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a path's extension.
    pub fn detect(path: &Path) -> Result<Self, KVError> {
        let ext = path
            .extension()
            .and_then(|value| value.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            None | Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            Some(other) => Err(KVError::new(
                "unsupported config format; use .json or .toml",
                kvs!["code", "unsupported_format", "extension", other],
            )),
        }
    }
}

/// Load the logger config from in-memory config text.
pub fn load_logger_config_from_sources(
    config_text: Option<(&str, ConfigFormat)>,
    env: &LoggerEnv,
) -> Result<ValidatedLoggerConfig, KVError> {
    let config = match config_text {
        None => LoggerConfig::default(),
        Some((input, format)) => parse_config_unvalidated(input, format)?,
    };

    // env is applied last and also validates the resulting config.
    apply_env_overrides(config, env)
}

/// Load the logger config from an optional file path.
pub fn load_logger_config_from_path(
    config_path: Option<&Path>,
    env: &LoggerEnv,
) -> Result<ValidatedLoggerConfig, KVError> {
    let config = match config_path {
        None => LoggerConfig::default(),
        Some(path) => {
            let format = ConfigFormat::detect(path)?;
            let config_text = read_config_file(path)?;
            tracing::debug!(path = %path.display(), ?format, "loaded logger config file");
            parse_config_unvalidated(&config_text, format)
                .map_err(|error| error.with("path", path.to_string_lossy().to_string()))?
        },
    };

    apply_env_overrides(config, env)
}

/// Load the logger config from the process environment and an optional file path.
pub fn load_logger_config_std_env(
    config_path: Option<&Path>,
) -> Result<ValidatedLoggerConfig, KVError> {
    let env = LoggerEnv::from_std_env()?;
    load_logger_config_from_path(config_path, &env)
}

/// Serialize the config as deterministic pretty JSON (with trailing newline).
pub fn to_pretty_json(config: &LoggerConfig) -> Result<String, KVError> {
    let mut output = serde_json::to_string_pretty(config).map_err(|error| {
        KVError::wrap(error, "failed to serialize config", kvs!["code", "serialize_json"])
    })?;
    output.push('\n');
    Ok(output)
}

/// Serialize the config as deterministic pretty TOML (with trailing newline).
pub fn to_pretty_toml(config: &LoggerConfig) -> Result<String, KVError> {
    let mut output = toml::to_string_pretty(config).map_err(|error| {
        KVError::wrap(error, "failed to serialize config TOML", kvs!["code", "serialize_toml"])
    })?;
    output.push('\n');
    Ok(output)
}

fn parse_config_unvalidated(input: &str, format: ConfigFormat) -> Result<LoggerConfig, KVError> {
    match format {
        ConfigFormat::Json => serde_json::from_str(input).map_err(|error| {
            KVError::wrap(error, "invalid config JSON", kvs!["code", "invalid_json"])
        }),
        ConfigFormat::Toml => toml::from_str(input).map_err(|error| {
            KVError::wrap(error, "invalid config TOML", kvs!["code", "invalid_toml"])
        }),
    }
}

fn read_config_file(path: &Path) -> Result<String, KVError> {
    std::fs::read_to_string(path).map_err(|error| {
        let code = match error.kind() {
            std::io::ErrorKind::NotFound => "config_file_not_found",
            std::io::ErrorKind::PermissionDenied => "config_file_permission_denied",
            _ => "config_file_io",
        };

        KVError::wrap(
            error,
            "failed to read config file",
            kvs!["code", code, "path", path.to_string_lossy().to_string()],
        )
    })
}
