//! Synthetic trade generator
//!
//! Writes random `timestamp,symbol,quantity,price` lines until the output
//! reaches a target size, for load and memory testing of the aggregator.

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

const BYTES_PER_MIB: u64 = 1024 * 1024;
const PROGRESS_LOG_INTERVAL: u64 = 1_000_000;
const SYMBOL_LEN: usize = 3;
const MAX_TIMESTAMP_OFFSET: u64 = 1_000_000;

#[derive(Parser, Debug)]
#[command(name = "generate-trades")]
#[command(about = "Generate a synthetic trade CSV for the trade aggregator")]
struct Cli {
    /// Output file
    #[arg(short, long, default_value = "input.csv")]
    output: PathBuf,

    /// Target file size in MiB
    #[arg(short, long, default_value_t = 100)]
    size_mib: u64,

    /// Number of distinct symbols to draw from
    #[arg(long, default_value_t = 17_575)]
    symbols: usize,

    /// Base timestamp; each trade adds a random offset of up to one second
    #[arg(long, default_value_t = 52_924_702)]
    base_timestamp: u64,

    /// RNG seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn random_symbol(rng: &mut StdRng) -> String {
    (0..SYMBOL_LEN)
        .map(|_| char::from(rng.gen_range(b'A'..=b'Z')))
        .collect()
}

fn target_bytes(size_mib: u64) -> Result<u64> {
    size_mib
        .checked_mul(BYTES_PER_MIB)
        .with_context(|| format!("--size-mib {size_mib} is too large"))
}

/// Produces random trade lines over a fixed symbol universe
struct TradeGenerator {
    rng: StdRng,
    symbols: Vec<String>,
    base_timestamp: u64,
}

impl TradeGenerator {
    fn new(mut rng: StdRng, symbol_count: usize, base_timestamp: u64) -> Result<Self> {
        anyhow::ensure!(symbol_count > 0, "--symbols must be at least 1");
        anyhow::ensure!(
            base_timestamp.checked_add(MAX_TIMESTAMP_OFFSET).is_some(),
            "--base-timestamp {base_timestamp} leaves no room for the timestamp offset"
        );

        let symbols = (0..symbol_count).map(|_| random_symbol(&mut rng)).collect();
        Ok(Self {
            rng,
            symbols,
            base_timestamp,
        })
    }

    /// Next `timestamp,symbol,quantity,price` line, newline terminated
    fn next_line(&mut self) -> String {
        let ts = self.base_timestamp + self.rng.gen_range(0..=MAX_TIMESTAMP_OFFSET);
        let symbol = &self.symbols[self.rng.gen_range(0..self.symbols.len())];
        let quantity: u32 = self.rng.gen_range(1..=1000);
        let price: u32 = self.rng.gen_range(10..=10_000);

        format!("{ts},{symbol},{quantity},{price}\n")
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let target = target_bytes(cli.size_mib)?;

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut generator = TradeGenerator::new(rng, cli.symbols, cli.base_timestamp)?;

    let file = File::create(&cli.output)
        .with_context(|| format!("Cannot create output file {}", cli.output.display()))?;
    let mut out = BufWriter::with_capacity(1024 * 1024, file);

    let mut written = 0u64;
    let mut lines = 0u64;
    let started = Instant::now();

    info!("Generating {} MiB of trades into {}", cli.size_mib, cli.output.display());

    while written < target {
        let line = generator.next_line();
        out.write_all(line.as_bytes())?;

        written += line.len() as u64;
        lines += 1;

        if lines % PROGRESS_LOG_INTERVAL == 0 {
            info!(
                "Generated {} lines, {:.1} MiB, elapsed {:.1?}",
                lines,
                written as f64 / BYTES_PER_MIB as f64,
                started.elapsed()
            );
        }
    }
    out.flush()?;

    let elapsed = started.elapsed().as_secs_f64();
    let mib = written as f64 / BYTES_PER_MIB as f64;
    info!(
        "Generation completed: {} lines, {:.2} MiB in {:.1}s ({:.1} MiB/s)",
        lines,
        mib,
        elapsed,
        if elapsed > 0.0 { mib / elapsed } else { mib }
    );
    Ok(())
}
