//! Trade aggregator configuration

use crate::aggregators::TimeGapPolicy;
use crate::error::{AggregatorError, AggregatorResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix, e.g. `TRADE_AGG_OUTPUT_PATH`
pub const ENV_PREFIX: &str = "TRADE_AGG";

/// Which statistic set to compute
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CalculatorKind {
    /// Max time gap, volume, weighted average price, max price
    #[default]
    Standard,
    /// Standard set plus min price and trade count
    Extended,
}

/// Trade aggregator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Trade CSV to read
    pub input_path: PathBuf,

    /// Statistics CSV to write
    pub output_path: PathBuf,

    /// Statistic set to compute
    pub calculator: CalculatorKind,

    /// Handling of timestamps that step backwards within a symbol
    pub time_gap_policy: TimeGapPolicy,

    /// Emit `MinPrice,TradeCount` columns (extended calculator only)
    pub extended_columns: bool,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("input.csv"),
            output_path: PathBuf::from("output.csv"),
            calculator: CalculatorKind::Standard,
            time_gap_policy: TimeGapPolicy::Wrapping,
            extended_columns: false,
        }
    }
}

impl AggregatorConfig {
    /// Load configuration from a file, overridden by `TRADE_AGG_*` variables
    ///
    /// Not validated, so callers can apply further overrides first.
    pub fn from_file(path: &Path) -> AggregatorResult<Self> {
        Self::load(Some(path), Self::environment())
    }

    /// Load configuration from `TRADE_AGG_*` variables only
    pub fn from_env() -> AggregatorResult<Self> {
        Self::load(None, Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
    }

    fn load(file: Option<&Path>, env: config::Environment) -> AggregatorResult<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path));
        }
        let settings = builder.add_source(env).build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Check that the settings are consistent
    pub fn validate(&self) -> AggregatorResult<()> {
        if self.extended_columns && self.calculator != CalculatorKind::Extended {
            return Err(AggregatorError::configuration(
                "extended columns require the extended calculator",
            ));
        }
        Ok(())
    }
}
