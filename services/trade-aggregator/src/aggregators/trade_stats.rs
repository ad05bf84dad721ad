//! Standard trade statistics: max time gap, volume, VWAP and max price

use super::{StatsCalculator, TimeGapPolicy};
use common::{Px, SymbolStats, Trade, Ts};

/// Per-symbol running state of the standard calculator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StandardState {
    /// Timestamp of the previous trade, `None` until the first trade
    last_ts: Option<Ts>,
    /// Running sum of price * quantity
    total_notional: u128,
}

impl StandardState {
    /// Whether any trade has been applied yet
    #[must_use]
    pub const fn has_trades(&self) -> bool {
        self.last_ts.is_some()
    }

    /// Timestamp of the most recent trade
    #[must_use]
    pub const fn last_ts(&self) -> Option<Ts> {
        self.last_ts
    }

    /// Running sum of price * quantity
    #[must_use]
    pub const fn total_notional(&self) -> u128 {
        self.total_notional
    }
}

/// Calculator for the standard statistic set
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardStatsCalculator {
    gap_policy: TimeGapPolicy,
}

impl StandardStatsCalculator {
    /// Create a calculator with the default (wrapping) gap policy
    #[must_use]
    pub const fn new() -> Self {
        Self {
            gap_policy: TimeGapPolicy::Wrapping,
        }
    }

    /// Create a calculator with an explicit gap policy
    #[must_use]
    pub const fn with_gap_policy(gap_policy: TimeGapPolicy) -> Self {
        Self { gap_policy }
    }

    /// Gap policy in use
    #[must_use]
    pub const fn gap_policy(&self) -> TimeGapPolicy {
        self.gap_policy
    }
}

impl StatsCalculator for StandardStatsCalculator {
    type State = StandardState;

    fn update_stats(&self, stats: &mut SymbolStats, state: &mut StandardState, trade: &Trade) {
        stats.total_volume += trade.quantity.as_u64();

        if trade.price > stats.max_price {
            stats.max_price = trade.price;
        }

        // First trade has no predecessor, so no gap.
        if let Some(last_ts) = state.last_ts {
            let gap = self.gap_policy.gap(last_ts, trade.ts);
            if gap > stats.max_time_gap {
                stats.max_time_gap = gap;
            }
        }

        state.last_ts = Some(trade.ts);
        state.total_notional += u128::from(trade.price.notional(trade.quantity));
    }

    fn finalize_stats(&self, stats: &mut SymbolStats, state: &StandardState) {
        if stats.total_volume == 0 {
            return;
        }
        // Bounded by the max price, so the narrowing never saturates.
        let avg = state.total_notional / u128::from(stats.total_volume);
        stats.weighted_avg_price = Px::new(u32::try_from(avg).unwrap_or(u32::MAX));
    }
}
