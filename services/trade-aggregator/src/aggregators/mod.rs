//! Statistics calculators
//!
//! A calculator folds one symbol's trades into its [`SymbolStats`] in two
//! phases: [`StatsCalculator::update_stats`] once per trade in stream order,
//! then [`StatsCalculator::finalize_stats`] once after the whole stream has
//! been consumed. Running sums that only make sense over the complete
//! aggregate live in the calculator's per-symbol [`StatsCalculator::State`],
//! which the engine stores right next to the public statistics.

pub mod extended_stats;
pub mod trade_stats;

pub use extended_stats::{ExtendedState, ExtendedStatsCalculator};
pub use trade_stats::{StandardState, StandardStatsCalculator};

use common::{SymbolStats, Trade, Ts};
use serde::{Deserialize, Serialize};

/// Strategy for computing per-symbol statistics over a trade stream
pub trait StatsCalculator {
    /// Private running state kept for each symbol
    type State: Default;

    /// Apply one trade to the symbol's statistics and private state
    fn update_stats(&self, stats: &mut SymbolStats, state: &mut Self::State, trade: &Trade);

    /// Fill in statistics that need the complete per-symbol aggregate
    fn finalize_stats(&self, _stats: &mut SymbolStats, _state: &Self::State) {}
}

/// How a backwards step between consecutive timestamps is measured
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TimeGapPolicy {
    /// Raw unsigned subtraction; a backwards step wraps to a huge gap
    #[default]
    Wrapping,
    /// A backwards step counts as a zero gap
    Saturating,
}

impl TimeGapPolicy {
    /// Gap between a trade at `previous` and the following one at `current`
    #[must_use]
    pub const fn gap(self, previous: Ts, current: Ts) -> u64 {
        match self {
            Self::Wrapping => current.as_micros().wrapping_sub(previous.as_micros()),
            Self::Saturating => current.as_micros().saturating_sub(previous.as_micros()),
        }
    }
}
