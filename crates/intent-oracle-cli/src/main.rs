//! Intent Oracle CLI
//!
//! Crystallizes intent text into words drawn from an embedding vocabulary.
//!
//! # Commands
//!
//! - `manifest`: synthesize a charge for an intent and crystallize it
//! - `charge`: print the charge vector only
//! - `inspect`: describe the configured embedding artifact
//!
//! # Configuration
//!
//! `--config <file>` reads a single TOML file. Without it, configuration is
//! layered from `config/default.toml`, `config/{ORACLE_ENV}.toml` and
//! `ORACLE__*` environment variables.
//!
//! Exit codes: 0 success, 1 request failure, 2 configuration/artifact error.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use intent_oracle_core::config::LoggingConfig;
use intent_oracle_core::OracleConfig;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod error;

pub use error::{exit_code_for_error, CliError, CliExitCode};

/// Intent Oracle - crystallize intent into words
#[derive(Parser)]
#[command(name = "intent-oracle")]
#[command(version)]
#[command(about = "Crystallize intent text into words from an embedding vocabulary")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (TOML); replaces the layered lookup
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crystallize an intent into words
    Manifest(commands::manifest::ManifestArgs),
    /// Print the charge vector synthesized for an intent
    Charge(commands::charge::ChargeArgs),
    /// Load the embedding artifact and describe it
    Inspect(commands::inspect::InspectArgs),
}

fn load_config(path: Option<&PathBuf>) -> Result<OracleConfig, CliError> {
    let config = match path {
        Some(path) => OracleConfig::from_file(path)?,
        None => OracleConfig::load()?,
    };
    Ok(config)
}

fn init_logging(verbose: u8, logging: &LoggingConfig) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str())),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_file(logging.include_location)
        .with_line_number(logging.include_location)
        .with_writer(std::io::stderr);

    if logging.format == "compact" {
        builder.compact().init();
    } else {
        builder.pretty().init();
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref());
    let logging = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    init_logging(cli.verbose, &logging);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(exit_code_for_error(&e).into());
        }
    };

    let result = match cli.command {
        Commands::Manifest(args) => commands::manifest::handle_manifest(args, config).await,
        Commands::Charge(args) => commands::charge::handle_charge(args, config).await,
        Commands::Inspect(args) => commands::inspect::handle_inspect(args, config).await,
    };

    let code = match result {
        Ok(()) => CliExitCode::Success,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            exit_code_for_error(&e)
        }
    };

    std::process::exit(code.into());
}
