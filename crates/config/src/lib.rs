//! # logerr-config
//!
//! Logger configuration: schema, env overrides and file loading.
//! Every failure is reported as a [`logerr_kverrors::KVError`] carrying a
//! `code` attribute.

/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (env + file).
pub mod load;
/// Configuration schema types and validation.
pub mod schema;

pub use env::{ENV_COMPONENT, ENV_OUTPUT, ENV_VERBOSITY, EnvParseError, LoggerEnv, apply_env_overrides};
pub use load::{
    ConfigFormat, load_logger_config_from_path, load_logger_config_from_sources,
    load_logger_config_std_env, to_pretty_json, to_pretty_toml,
};
pub use schema::{
    CURRENT_CONFIG_VERSION, ConfigSchemaError, LoggerConfig, MAX_VERBOSITY, OutputTarget,
    ValidatedLoggerConfig, parse_logger_config_json, parse_logger_config_toml,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use logerr_kverrors::kverrors_crate_version;

    #[test]
    fn config_crate_compiles() {
        let version = config_crate_version();
        assert!(!version.is_empty());
    }

    #[test]
    fn config_shares_workspace_version_with_kverrors() {
        assert_eq!(config_crate_version(), kverrors_crate_version());
    }
}
