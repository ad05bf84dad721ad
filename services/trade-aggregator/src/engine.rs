//! Aggregation engine
//!
//! Pulls every trade from a [`TradeSource`], folds it into per-symbol
//! statistics with a [`StatsCalculator`], finalizes all symbols once the
//! stream is exhausted, sorts by symbol and hands the result to a
//! [`StatsSink`] in a single call.

use crate::aggregators::StatsCalculator;
use crate::error::{AggregatorError, AggregatorResult};
use crate::storage::{StatsSink, TradeSource};
use common::{Symbol, SymbolStats};
use rustc_hash::FxHashMap;
use tracing::{debug, info};

/// Outcome of a successful [`TradeProcessor::process`] run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessSummary {
    /// Trades consumed from the source
    pub trades: u64,
    /// Distinct symbols written to the sink
    pub symbols: usize,
}

/// Result of folding a whole trade stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    /// Finalized statistics, sorted by symbol
    pub stats: Vec<SymbolStats>,
    /// Trades consumed from the source
    pub trades: u64,
}

/// Fold every trade from `source` into finalized, symbol-sorted statistics
pub fn aggregate<C, S>(calculator: &C, source: &mut S) -> Aggregation
where
    C: StatsCalculator,
    S: TradeSource + ?Sized,
{
    // Public statistics and private accumulator share one key.
    let mut book: FxHashMap<Symbol, (SymbolStats, C::State)> = FxHashMap::default();
    let mut trades = 0u64;

    while let Some(trade) = source.read_next() {
        trades += 1;

        match book.get_mut(&trade.symbol) {
            Some((stats, state)) => calculator.update_stats(stats, state, &trade),
            None => {
                debug!("New symbol {}", trade.symbol);
                let mut stats = SymbolStats::new(trade.symbol.clone());
                let mut state = C::State::default();
                calculator.update_stats(&mut stats, &mut state, &trade);
                book.insert(trade.symbol, (stats, state));
            }
        }
    }

    let mut stats: Vec<SymbolStats> = book
        .into_values()
        .map(|(mut stats, state)| {
            calculator.finalize_stats(&mut stats, &state);
            stats
        })
        .collect();
    stats.sort_unstable_by(|a, b| a.symbol.cmp(&b.symbol));

    Aggregation { stats, trades }
}

/// Drives a calculator over a trade source and persists the result
pub struct TradeProcessor<C: StatsCalculator> {
    source: Option<Box<dyn TradeSource>>,
    sink: Option<Box<dyn StatsSink>>,
    calculator: C,
}

impl<C: StatsCalculator> TradeProcessor<C> {
    /// Create a processor with no source or sink attached
    pub fn new(calculator: C) -> Self {
        Self {
            source: None,
            sink: None,
            calculator,
        }
    }

    /// Attach the trade source
    #[must_use]
    pub fn with_source(mut self, source: impl TradeSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Attach the statistics sink
    #[must_use]
    pub fn with_sink(mut self, sink: impl StatsSink + 'static) -> Self {
        self.set_sink(sink);
        self
    }

    /// Replace the statistics sink, e.g. before running again
    pub fn set_sink(&mut self, sink: impl StatsSink + 'static) {
        self.sink = Some(Box::new(sink));
    }

    /// Rewind the source to the beginning of its stream
    pub fn reset_source(&mut self) {
        if let Some(source) = self.source.as_deref_mut() {
            source.reset();
        }
    }

    /// The calculator in use
    pub const fn calculator(&self) -> &C {
        &self.calculator
    }

    /// Aggregate the whole source and write the sorted result to the sink
    ///
    /// Fails without touching either collaborator if one of them is missing.
    /// The sink is invoked at most once.
    pub fn process(&mut self) -> AggregatorResult<ProcessSummary> {
        let (source, sink) = match (self.source.as_deref_mut(), self.sink.as_deref_mut()) {
            (Some(source), Some(sink)) => (source, sink),
            (None, Some(_)) => return Err(AggregatorError::configuration("no trade source")),
            (Some(_), None) => return Err(AggregatorError::configuration("no statistics sink")),
            (None, None) => {
                return Err(AggregatorError::configuration(
                    "no trade source and no statistics sink",
                ));
            }
        };

        let Aggregation { stats, trades } = aggregate(&self.calculator, source);
        sink.write_stats(&stats)?;

        let summary = ProcessSummary {
            trades,
            symbols: stats.len(),
        };
        info!(
            "Processed {} trades across {} symbols",
            summary.trades, summary.symbols
        );
        Ok(summary)
    }
}
