//! `config show` handler.

use crate::error::CliError;
use clap::ValueEnum;
use logerr_config::{LoggerConfig, to_pretty_json, to_pretty_toml};

/// Output format for `config show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ConfigFormat {
    /// Pretty JSON.
    #[default]
    Json,
    /// Pretty TOML.
    Toml,
}

/// Render the effective config.
pub fn run_config_show(config: &LoggerConfig, format: ConfigFormat) -> Result<String, CliError> {
    match format {
        ConfigFormat::Json => to_pretty_json(config),
        ConfigFormat::Toml => to_pretty_toml(config),
    }
    .map_err(CliError::Serialization)
}
