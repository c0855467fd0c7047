//! CLI binary entrypoint.

mod commands;
mod error;

use clap::{Parser, Subcommand};
use commands::{ConfigFormat, run_config_show, run_error, run_info};
use error::{CliError, ExitCode};
use logerr::{Logger, new_logger_from_config};
use logerr_config::{
    LoggerConfig, OutputTarget, ValidatedLoggerConfig, load_logger_config_std_env,
};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "logerr",
    version,
    about = "Emit structured JSON log records",
    long_about = None
)]
struct Cli {
    /// Optional config file path (JSON/TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Component name (overrides config and env).
    #[arg(long, global = true)]
    component: Option<String>,
    /// Verbosity (overrides config and env).
    #[arg(long, global = true)]
    verbosity: Option<u32>,
    /// Write records to stderr instead of stdout.
    #[arg(long, global = true)]
    stderr: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Emit an info record.
    Info {
        /// Message text.
        message: String,
        /// Level the record is emitted at; dropped when above the verbosity.
        #[arg(long, default_value_t = 0)]
        level: u32,
        /// Name segment appended to the component (repeatable).
        #[arg(long = "name")]
        names: Vec<String>,
        /// Attribute as key=value; values parse as JSON when possible (repeatable).
        #[arg(long = "kv")]
        pairs: Vec<String>,
    },
    /// Emit an error record. Never dropped by verbosity.
    Error {
        /// Message text.
        message: String,
        /// Text of the attached error.
        #[arg(long)]
        error: Option<String>,
        /// Attribute of the attached error as key=value (repeatable).
        #[arg(long = "error-kv")]
        error_pairs: Vec<String>,
        /// Name segment appended to the component (repeatable).
        #[arg(long = "name")]
        names: Vec<String>,
        /// Attribute as key=value; values parse as JSON when possible (repeatable).
        #[arg(long = "kv")]
        pairs: Vec<String>,
    },
    /// Config-related commands.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigCommands {
    /// Print the effective config (defaults, file, env and flags merged).
    Show {
        /// Output format.
        #[arg(long, value_enum, default_value_t = ConfigFormat::Json)]
        format: ConfigFormat,
    },
}

fn main() -> std::process::ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(stdout) => match write_stdout(&stdout) {
            Ok(()) => std::process::ExitCode::from(ExitCode::Ok.as_u8()),
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn write_stdout(output: &str) -> Result<(), CliError> {
    if output.is_empty() {
        return Ok(());
    }
    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let config = effective_config(cli)?;
    match &cli.command {
        Commands::Info {
            message,
            level,
            names,
            pairs,
        } => {
            let logger = named_logger(&config, names);
            run_info(&logger, *level, message, pairs)?;
            Ok(String::new())
        },
        Commands::Error {
            message,
            error,
            error_pairs,
            names,
            pairs,
        } => {
            let logger = named_logger(&config, names);
            run_error(&logger, message, error.as_deref(), error_pairs, pairs)?;
            Ok(String::new())
        },
        Commands::Config {
            command: ConfigCommands::Show { format },
        } => run_config_show(&config, *format),
    }
}

fn effective_config(cli: &Cli) -> Result<LoggerConfig, CliError> {
    let mut config = load_logger_config_std_env(cli.config.as_deref())
        .map_err(CliError::Config)?
        .into_inner();

    if let Some(component) = &cli.component {
        config.component.clone_from(component);
    }
    if let Some(verbosity) = cli.verbosity {
        config.verbosity = verbosity;
    }
    if cli.stderr {
        config.output = OutputTarget::Stderr;
    }

    tracing::debug!(
        component = %config.component,
        verbosity = config.verbosity,
        output = %config.output,
        "resolved logger config"
    );
    config
        .validate_and_normalize()
        .map(ValidatedLoggerConfig::into_inner)
        .map_err(|error| CliError::Config(error.into()))
}

fn named_logger(config: &LoggerConfig, names: &[String]) -> Logger {
    names
        .iter()
        .fold(new_logger_from_config(config, Vec::new()), |logger, name| {
            logger.with_name(name)
        })
}
