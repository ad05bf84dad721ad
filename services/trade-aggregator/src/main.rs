//! Trade Aggregator - CSV trades in, per-symbol statistics CSV out
//!
//! Settings are resolved in order: defaults, optional config file,
//! `TRADE_AGG_*` environment variables, command-line flags.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use trade_aggregator::{AggregatorConfig, CalculatorKind, TimeGapPolicy};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SERVICE_NAME: &str = "trade-aggregator";

#[derive(Parser, Debug)]
#[command(name = "trade-aggregator")]
#[command(about = "Aggregate per-symbol trade statistics from a CSV file")]
#[command(version)]
struct Cli {
    /// Input trade CSV (timestamp,symbol,quantity,price)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output statistics CSV
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file (toml, json, yaml, ...)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Statistic set to compute
    #[arg(long, value_enum)]
    calculator: Option<CalculatorKind>,

    /// Handling of timestamps that step backwards within a symbol
    #[arg(long, value_enum)]
    gap_policy: Option<TimeGapPolicy>,

    /// Add MinPrice and TradeCount columns (requires --calculator extended)
    #[arg(long, default_value_t = false)]
    extended_columns: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<AggregatorConfig> {
        let mut config = match &self.config {
            Some(path) => AggregatorConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => AggregatorConfig::from_env().context("Failed to load config from environment")?,
        };

        if let Some(input) = &self.input {
            config.input_path.clone_from(input);
        }
        if let Some(output) = &self.output {
            config.output_path.clone_from(output);
        }
        if let Some(calculator) = self.calculator {
            config.calculator = calculator;
        }
        if let Some(policy) = self.gap_policy {
            config.time_gap_policy = policy;
        }
        if self.extended_columns {
            config.extended_columns = true;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    info!("Starting {}", SERVICE_NAME);
    info!("Input file: {}", config.input_path.display());
    info!("Output file: {}", config.output_path.display());

    let started = Instant::now();
    let summary = trade_aggregator::run(&config).context("Trade processing failed")?;

    info!(
        "Processed {} trades for {} symbols in {:?}; result saved to {}",
        summary.trades,
        summary.symbols,
        started.elapsed(),
        config.output_path.display()
    );
    Ok(())
}

/// Initialize tracing with environment filter
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", SERVICE_NAME.replace('-', "_")).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true),
        )
        .init();
}
