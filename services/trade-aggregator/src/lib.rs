//! Trade Aggregator Service
//!
//! Reads a stream of trades and produces per-symbol statistics:
//! - Maximum gap between consecutive trades
//! - Total traded volume
//! - Volume-weighted average price (truncated)
//! - Maximum price
//!
//! The statistic set is pluggable through [`StatsCalculator`]; the
//! [`TradeProcessor`] engine is the same for every calculator.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod aggregators;
pub mod config;
pub mod engine;
pub mod error;
pub mod storage;

pub use aggregators::{
    ExtendedState, ExtendedStatsCalculator, StandardState, StandardStatsCalculator,
    StatsCalculator, TimeGapPolicy,
};
pub use common::{ExtendedMetrics, Px, Qty, Symbol, SymbolStats, Trade, Ts};
pub use config::{AggregatorConfig, CalculatorKind};
pub use engine::{Aggregation, ProcessSummary, TradeProcessor, aggregate};
pub use error::{AggregatorError, AggregatorResult};
pub use storage::{CsvStatsWriter, CsvTradeReader, StatsSink, TradeSource};

use tracing::info;

/// Run one conversion from `config.input_path` to `config.output_path`
///
/// The output file is only created when the whole run succeeds.
pub fn run(config: &AggregatorConfig) -> AggregatorResult<ProcessSummary> {
    config.validate()?;

    let reader = CsvTradeReader::open(&config.input_path)?;
    let writer =
        CsvStatsWriter::create(&config.output_path)?.with_extended_columns(config.extended_columns);

    info!(
        "Aggregating {} -> {} with {:?} calculator",
        config.input_path.display(),
        config.output_path.display(),
        config.calculator
    );

    match config.calculator {
        CalculatorKind::Standard => {
            TradeProcessor::new(StandardStatsCalculator::with_gap_policy(config.time_gap_policy))
                .with_source(reader)
                .with_sink(writer)
                .process()
        }
        CalculatorKind::Extended => {
            TradeProcessor::new(ExtendedStatsCalculator::with_gap_policy(config.time_gap_policy))
                .with_source(reader)
                .with_sink(writer)
                .process()
        }
    }
}
