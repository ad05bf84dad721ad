//! Trade records and per-symbol statistics

use crate::{Px, Qty, Symbol, Ts};
use serde::{Deserialize, Serialize};

/// A single executed trade as read from the input stream
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// Trade time in microseconds
    pub ts: Ts,
    /// Traded instrument
    pub symbol: Symbol,
    /// Traded quantity (zero is allowed)
    pub quantity: Qty,
    /// Trade price
    pub price: Px,
}

impl Trade {
    /// Create a new trade
    #[must_use]
    pub fn new(ts: Ts, symbol: Symbol, quantity: Qty, price: Px) -> Self {
        Self {
            ts,
            symbol,
            quantity,
            price,
        }
    }
}

/// Metrics produced only by the extended calculator
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedMetrics {
    /// Lowest price observed
    pub min_price: Px,
    /// Number of trades observed
    pub trade_count: u64,
}

/// Aggregate statistics for one symbol
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolStats {
    /// Symbol these statistics describe
    pub symbol: Symbol,
    /// Largest gap between consecutive trades, in microseconds
    pub max_time_gap: u64,
    /// Sum of traded quantity
    pub total_volume: u64,
    /// Volume-weighted average price, truncated. Only valid after finalization.
    pub weighted_avg_price: Px,
    /// Highest price observed
    pub max_price: Px,
    /// Extra metrics, present when an extended calculator produced these stats
    pub extended: Option<ExtendedMetrics>,
}

impl SymbolStats {
    /// Create zeroed statistics for a symbol
    #[must_use]
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            max_time_gap: 0,
            total_volume: 0,
            weighted_avg_price: Px::ZERO,
            max_price: Px::ZERO,
            extended: None,
        }
    }
}
