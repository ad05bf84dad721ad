//! Extended trade statistics layered on top of the standard set

use super::{StandardState, StandardStatsCalculator, StatsCalculator, TimeGapPolicy};
use common::{ExtendedMetrics, Px, SymbolStats, Trade};

/// Per-symbol running state of the extended calculator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtendedState {
    standard: StandardState,
    min_price: Option<Px>,
    trade_count: u64,
}

impl ExtendedState {
    /// State of the wrapped standard calculator
    #[must_use]
    pub const fn standard(&self) -> &StandardState {
        &self.standard
    }

    /// Lowest price seen so far
    #[must_use]
    pub const fn min_price(&self) -> Option<Px> {
        self.min_price
    }

    /// Number of trades seen so far
    #[must_use]
    pub const fn trade_count(&self) -> u64 {
        self.trade_count
    }
}

/// Standard statistics plus minimum price and trade count
///
/// All shared arithmetic is delegated to [`StandardStatsCalculator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtendedStatsCalculator {
    standard: StandardStatsCalculator,
}

impl ExtendedStatsCalculator {
    /// Create a calculator with the default (wrapping) gap policy
    #[must_use]
    pub const fn new() -> Self {
        Self {
            standard: StandardStatsCalculator::new(),
        }
    }

    /// Create a calculator with an explicit gap policy
    #[must_use]
    pub const fn with_gap_policy(gap_policy: TimeGapPolicy) -> Self {
        Self {
            standard: StandardStatsCalculator::with_gap_policy(gap_policy),
        }
    }

    /// The wrapped standard calculator
    #[must_use]
    pub const fn standard(&self) -> &StandardStatsCalculator {
        &self.standard
    }
}

impl StatsCalculator for ExtendedStatsCalculator {
    type State = ExtendedState;

    fn update_stats(&self, stats: &mut SymbolStats, state: &mut ExtendedState, trade: &Trade) {
        self.standard.update_stats(stats, &mut state.standard, trade);

        state.min_price = Some(match state.min_price {
            Some(min) => min.min(trade.price),
            None => trade.price,
        });
        state.trade_count += 1;
    }

    fn finalize_stats(&self, stats: &mut SymbolStats, state: &ExtendedState) {
        self.standard.finalize_stats(stats, &state.standard);

        stats.extended = Some(ExtendedMetrics {
            min_price: state.min_price.unwrap_or(Px::ZERO),
            trade_count: state.trade_count,
        });
    }
}
