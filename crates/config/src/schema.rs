//! Logger configuration schema and validation.

use logerr_kverrors::{KVError, kvs};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current config schema version.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Highest verbosity a config may request (2^31 - 1).
pub const MAX_VERBOSITY: u32 = 2_147_483_647;

/// Where emitted records are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    /// Process standard output.
    #[default]
    Stdout,
    /// Process standard error.
    Stderr,
}

impl OutputTarget {
    /// Parse the lowercase wire name (`stdout` or `stderr`), ignoring ASCII case.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "stdout" => Some(Self::Stdout),
            "stderr" => Some(Self::Stderr),
            _ => None,
        }
    }

    /// The lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Logger configuration as read from a file (before env overrides).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LoggerConfig {
    /// Schema version.
    pub version: u32,
    /// Component name stamped on every record.
    pub component: String,
    /// Maximum `info` level that is emitted.
    pub verbosity: u32,
    /// Output stream.
    pub output: OutputTarget,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            component: String::new(),
            verbosity: 0,
            output: OutputTarget::Stdout,
        }
    }
}

impl LoggerConfig {
    /// Validate and normalize the config, returning a validated wrapper.
    ///
    /// The component name is trimmed before validation.
    pub fn validate_and_normalize(mut self) -> Result<ValidatedLoggerConfig, ConfigSchemaError> {
        self.validate_version()?;

        if self.verbosity > MAX_VERBOSITY {
            return Err(ConfigSchemaError::VerbosityOutOfRange {
                value: self.verbosity,
                max: MAX_VERBOSITY,
            });
        }

        let trimmed = self.component.trim();
        if trimmed.chars().any(char::is_whitespace) {
            return Err(ConfigSchemaError::InvalidComponent {
                component: self.component,
            });
        }
        self.component = trimmed.to_owned();

        Ok(ValidatedLoggerConfig { raw: self })
    }

    const fn validate_version(&self) -> Result<(), ConfigSchemaError> {
        if self.version != CURRENT_CONFIG_VERSION {
            return Err(ConfigSchemaError::UnsupportedVersion {
                found: self.version,
                supported: CURRENT_CONFIG_VERSION,
            });
        }
        Ok(())
    }
}

/// A config that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLoggerConfig {
    raw: LoggerConfig,
}

impl ValidatedLoggerConfig {
    /// Borrow the validated config.
    #[must_use]
    pub const fn as_ref(&self) -> &LoggerConfig {
        &self.raw
    }

    /// Consume the wrapper and return the config.
    #[must_use]
    pub fn into_inner(self) -> LoggerConfig {
        self.raw
    }
}

impl AsRef<LoggerConfig> for ValidatedLoggerConfig {
    fn as_ref(&self) -> &LoggerConfig {
        &self.raw
    }
}

impl std::ops::Deref for ValidatedLoggerConfig {
    type Target = LoggerConfig;

    fn deref(&self) -> &Self::Target {
        &self.raw
    }
}

/// Schema validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSchemaError {
    /// The `version` field is not [`CURRENT_CONFIG_VERSION`].
    UnsupportedVersion {
        /// Version found in the input.
        found: u32,
        /// Version this build understands.
        supported: u32,
    },
    /// `verbosity` exceeds [`MAX_VERBOSITY`].
    VerbosityOutOfRange {
        /// Requested verbosity.
        value: u32,
        /// Allowed maximum.
        max: u32,
    },
    /// The component name contains whitespace.
    InvalidComponent {
        /// The rejected name.
        component: String,
    },
}

impl ConfigSchemaError {
    const fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedVersion { .. } => "unsupported_version",
            Self::VerbosityOutOfRange { .. } => "verbosity_out_of_range",
            Self::InvalidComponent { .. } => "invalid_component",
        }
    }
}

impl fmt::Display for ConfigSchemaError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found, supported } => write!(
                formatter,
                "unsupported config version {found} (supported: {supported})"
            ),
            Self::VerbosityOutOfRange { value, max } => {
                write!(formatter, "verbosity {value} is out of range (max {max})")
            },
            Self::InvalidComponent { component } => {
                write!(formatter, "component name {component:?} must not contain whitespace")
            },
        }
    }
}

impl std::error::Error for ConfigSchemaError {}

impl From<ConfigSchemaError> for KVError {
    fn from(error: ConfigSchemaError) -> Self {
        let base = Self::new(error.to_string(), kvs!["code", error.code()]);
        match error {
            ConfigSchemaError::UnsupportedVersion { found, supported } => {
                base.with("found", found).with("supported", supported)
            },
            ConfigSchemaError::VerbosityOutOfRange { value, max } => {
                base.with("verbosity", value).with("max", max)
            },
            ConfigSchemaError::InvalidComponent { component } => base.with("component", component),
        }
    }
}

/// Parse a logger config from JSON, applying validation and normalization.
pub fn parse_logger_config_json(input: &str) -> Result<ValidatedLoggerConfig, KVError> {
    let config: LoggerConfig = serde_json::from_str(input).map_err(|error| {
        KVError::wrap(error, "invalid config JSON", kvs!["code", "invalid_json"])
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// Parse a logger config from TOML, applying validation and normalization.
pub fn parse_logger_config_toml(input: &str) -> Result<ValidatedLoggerConfig, KVError> {
    let config: LoggerConfig = toml::from_str(input).map_err(|error| {
        KVError::wrap(error, "invalid config TOML", kvs!["code", "invalid_toml"])
    })?;

    config.validate_and_normalize().map_err(Into::into)
}
