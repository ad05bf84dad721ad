//! Tests for the extended statistics calculator

use anyhow::Result;
use rstest::*;
use test_utils::{
    BASIC_EXTENDED_CSV, RecordingStatsSink, StringTradeSource, assert_csv_eq, basic_trades,
};
use trade_aggregator::{
    ExtendedMetrics, ExtendedStatsCalculator, Px, StandardStatsCalculator, StatsCalculator,
    TimeGapPolicy, TradeProcessor,
};

fn run<C: StatsCalculator>(calculator: C, data: &str) -> Result<test_utils::SinkHandle> {
    let sink = RecordingStatsSink::new();
    let handle = sink.handle();
    TradeProcessor::new(calculator)
        .with_source(StringTradeSource::new(data))
        .with_sink(sink)
        .process()?;
    Ok(handle)
}

#[test]
fn test_extended_calculator_keeps_standard_contract() -> Result<()> {
    let output = run(
        ExtendedStatsCalculator::new(),
        "1000000,aaa,10,100\n1001000,aaa,10,200\n",
    )?;

    let csv = output.csv().unwrap_or_default();
    assert!(csv.contains("aaa,1000,20,150,200\n"), "unexpected output: {csv}");
    Ok(())
}

#[rstest]
fn test_standard_columns_identical_across_calculators(basic_trades: &str) -> Result<()> {
    let standard = run(StandardStatsCalculator::new(), basic_trades)?;
    let extended = run(ExtendedStatsCalculator::new(), basic_trades)?;

    assert_csv_eq(
        &extended.csv().unwrap_or_default(),
        &standard.csv().unwrap_or_default(),
    );
    Ok(())
}

#[rstest]
fn test_extended_columns(basic_trades: &str) -> Result<()> {
    let output = run(ExtendedStatsCalculator::new(), basic_trades)?;
    assert_csv_eq(&output.extended_csv().unwrap_or_default(), BASIC_EXTENDED_CSV);
    Ok(())
}

#[test]
fn test_min_price_and_trade_count() -> Result<()> {
    let output = run(
        ExtendedStatsCalculator::new(),
        "1,aaa,1,50\n2,bbb,1,9\n3,aaa,1,0\n4,aaa,1,70\n",
    )?;
    let stats = output.stats().unwrap_or_default();

    assert_eq!(
        stats[0].extended,
        Some(ExtendedMetrics {
            min_price: Px::ZERO,
            trade_count: 3,
        })
    );
    assert_eq!(
        stats[1].extended,
        Some(ExtendedMetrics {
            min_price: Px::new(9),
            trade_count: 1,
        })
    );
    Ok(())
}

#[test]
fn test_calculator_accessor() {
    let processor =
        TradeProcessor::new(ExtendedStatsCalculator::with_gap_policy(TimeGapPolicy::Saturating));
    assert_eq!(
        processor.calculator().standard().gap_policy(),
        TimeGapPolicy::Saturating
    );
}
