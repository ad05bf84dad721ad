//! Trade sources and statistics sinks

pub mod csv_reader;
pub mod csv_writer;

use crate::error::AggregatorResult;
use common::{SymbolStats, Trade};

// Re-export commonly used types
pub use csv_reader::{CsvTradeReader, parse_trade_record};
pub use csv_writer::{CsvStatsWriter, EXTENDED_COLUMNS, STATS_COLUMNS, write_stats_csv};

/// Supplies trades one at a time in stream order
pub trait TradeSource {
    /// Next well-formed trade, or `None` once the stream is exhausted
    fn read_next(&mut self) -> Option<Trade>;

    /// Rewind to the beginning of the stream
    fn reset(&mut self);
}

/// Persists the final, sorted statistics
pub trait StatsSink {
    /// Write the complete result
    fn write_stats(&mut self, stats: &[SymbolStats]) -> AggregatorResult<()>;
}
