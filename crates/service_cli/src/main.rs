//! Securand CLI - secure bounded numbers and ranged shuffles
//!
//! # Commands
//!
//! - `securand number --lower 1 --upper 6` - Draw a bounded number
//! - `securand shuffle a b c d` - Shuffle the given items
//! - `securand json <file|->` - Execute a raw JSON request
//! - `securand check` - Check the entropy source
//!
//! Settings are resolved from flags, `SECURAND_*` environment variables and
//! `securand.toml`, in that order of precedence.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use securand_core::{Exclusion, NumberKind};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::number::NumberArgs;
use commands::shuffle::ShuffleArgs;
use config::{build_config, CliArgs};

/// Secure bounded random numbers and ranged shuffles
#[derive(Parser)]
#[command(name = "securand")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Output format (plain, json)
    #[arg(short, long, global = true)]
    format: Option<String>,

    /// Retry budget per generated value
    #[arg(long, global = true)]
    max_attempts: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw bounded random numbers
    Number {
        /// Lower bound (bounds may be given in either order)
        #[arg(short, long, allow_negative_numbers = true)]
        lower: f64,

        /// Upper bound
        #[arg(short, long, allow_negative_numbers = true)]
        upper: f64,

        /// Number kind (integer, fractional)
        #[arg(short, long)]
        kind: Option<NumberKind>,

        /// Bounds to exclude (none, lower, upper, both)
        #[arg(short, long)]
        exclude: Option<Exclusion>,

        /// Decimal digits for fractional values
        #[arg(short, long)]
        digits: Option<u8>,

        /// How many values to draw
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,
    },

    /// Shuffle a list of items
    Shuffle {
        /// Items to shuffle
        #[arg(required = true)]
        items: Vec<String>,

        /// First index of the shuffled window
        #[arg(short, long)]
        start: Option<usize>,

        /// End index (exclusive) of the shuffled window
        #[arg(short, long)]
        end: Option<usize>,

        /// Never return the input order
        #[arg(short, long)]
        avoid_identical: bool,
    },

    /// Execute a JSON request from a file, or stdin with `-`
    Json {
        /// Request file path
        source: String,
    },

    /// Check the entropy source and effective configuration
    Check,
}

impl From<&Cli> for CliArgs {
    fn from(cli: &Cli) -> Self {
        CliArgs {
            config_file: cli.config.clone(),
            log_level: cli.log_level.clone(),
            max_attempts: cli.max_attempts,
            format: cli.format.clone(),
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = build_config(&CliArgs::from(&cli)).context("failed to load configuration")?;

    init_tracing(config.log_level.as_filter_str());
    debug!(
        log_level = %config.log_level,
        max_attempts = config.max_attempts,
        format = %config.format,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Number {
            lower,
            upper,
            kind,
            exclude,
            digits,
            count,
        } => {
            let args = NumberArgs {
                lower,
                upper,
                kind,
                exclude,
                digits,
                count,
            };
            commands::number::run(&args, &config)?
        }
        Commands::Shuffle {
            items,
            start,
            end,
            avoid_identical,
        } => {
            let args = ShuffleArgs {
                items,
                start,
                end,
                avoid_identical,
            };
            commands::shuffle::run(&args, &config)?
        }
        Commands::Json { source } => commands::json::run(&source, &config)?,
        Commands::Check => commands::check::run(&config)?,
    }

    Ok(())
}
