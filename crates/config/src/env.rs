//! Environment variable parsing and env-to-config merging.
//!
//! Env parsing is strict: empty or invalid values fail fast instead of
//! silently falling back to the file or default value.

use crate::schema::{LoggerConfig, OutputTarget, ValidatedLoggerConfig};
use logerr_kverrors::{KVError, kvs};
use std::collections::BTreeMap;
use std::fmt;

/// Env var: component name.
pub const ENV_COMPONENT: &str = "LOGERR_COMPONENT";
/// Env var: verbosity (non-negative integer).
pub const ENV_VERBOSITY: &str = "LOGERR_VERBOSITY";
/// Env var: output stream (`stdout` or `stderr`).
pub const ENV_OUTPUT: &str = "LOGERR_OUTPUT";

/// Parsed env overrides. `None` means the variable was not set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggerEnv {
    /// Override for `component`.
    pub component: Option<String>,
    /// Override for `verbosity`.
    pub verbosity: Option<u32>,
    /// Override for `output`.
    pub output: Option<OutputTarget>,
}

impl LoggerEnv {
    /// Parse overrides from an explicit variable map.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            component: parse_optional_trimmed_string(map, ENV_COMPONENT)?,
            verbosity: parse_optional_u32(map, ENV_VERBOSITY)?,
            output: parse_optional_output(map, ENV_OUTPUT)?,
        })
    }

    /// Parse overrides from the process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in [ENV_COMPONENT, ENV_VERBOSITY, ENV_OUTPUT] {
            if let Ok(value) = std::env::var(name) {
                map.insert(name.to_string(), value);
            }
        }

        Self::from_map(&map)
    }

    /// True when no override is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.component.is_none() && self.verbosity.is_none() && self.output.is_none()
    }
}

/// Apply env overrides to a base config (env wins) and validate the result.
pub fn apply_env_overrides(
    base: LoggerConfig,
    env: &LoggerEnv,
) -> Result<ValidatedLoggerConfig, KVError> {
    let mut config = base;

    if let Some(component) = &env.component {
        tracing::debug!(var = ENV_COMPONENT, %component, "applying env override");
        config.component.clone_from(component);
    }
    if let Some(verbosity) = env.verbosity {
        tracing::debug!(var = ENV_VERBOSITY, verbosity, "applying env override");
        config.verbosity = verbosity;
    }
    if let Some(output) = env.output {
        tracing::debug!(var = ENV_OUTPUT, %output, "applying env override");
        config.output = output;
    }

    config.validate_and_normalize().map_err(Into::into)
}

/// Env parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// The variable is set but blank.
    EmptyValue {
        /// Variable name.
        var: &'static str,
    },
    /// The variable is not a non-negative integer.
    InvalidInt {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
    },
    /// The variable is not one of the accepted names.
    InvalidEnum {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
    },
}

impl EnvParseError {
    const fn code(&self) -> &'static str {
        match self {
            Self::EmptyValue { .. } => "empty_env_var",
            Self::InvalidInt { .. } => "invalid_env_int",
            Self::InvalidEnum { .. } => "invalid_env_enum",
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidInt { var, .. } => {
                write!(formatter, "{var} must be a non-negative integer")
            },
            Self::InvalidEnum { var, .. } => write!(formatter, "{var} has an unsupported value"),
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for KVError {
    fn from(error: EnvParseError) -> Self {
        let base = Self::new(error.to_string(), kvs!["code", error.code()]);
        match error {
            EnvParseError::EmptyValue { var } => base.with("env_var", var),
            EnvParseError::InvalidInt { var, value } | EnvParseError::InvalidEnum { var, value } => {
                base.with("env_var", var).with("value", value)
            },
        }
    }
}

fn parse_optional_trimmed_string(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<String>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    Ok(Some(trimmed.to_owned()))
}

fn parse_optional_u32(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<u32>, EnvParseError> {
    let Some(raw) = parse_optional_trimmed_string(map, var)? else {
        return Ok(None);
    };

    raw.parse::<u32>()
        .map(Some)
        .map_err(|_| EnvParseError::InvalidInt { var, value: raw })
}

fn parse_optional_output(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<OutputTarget>, EnvParseError> {
    let Some(raw) = parse_optional_trimmed_string(map, var)? else {
        return Ok(None);
    };

    OutputTarget::parse(&raw)
        .map(Some)
        .ok_or(EnvParseError::InvalidEnum { var, value: raw })
}
