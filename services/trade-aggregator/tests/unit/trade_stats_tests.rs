//! Tests for the standard statistics calculator driven through the engine

use anyhow::Result;
use rstest::*;
use test_utils::{
    RecordingStatsSink, StringTradeSource, TradeFactory, VecTradeSource, assert_sorted_by_symbol,
    assert_stats_row, basic_trades, trade,
};
use trade_aggregator::{
    Px, StandardStatsCalculator, SymbolStats, TimeGapPolicy, TradeProcessor, TradeSource,
};

/// Run the standard calculator over CSV text and return what the sink got
fn run_standard(data: &str) -> Result<Vec<SymbolStats>> {
    run_source(StringTradeSource::new(data), StandardStatsCalculator::new())
}

fn run_source(
    source: impl TradeSource + 'static,
    calculator: StandardStatsCalculator,
) -> Result<Vec<SymbolStats>> {
    let sink = RecordingStatsSink::new();
    let handle = sink.handle();
    TradeProcessor::new(calculator)
        .with_source(source)
        .with_sink(sink)
        .process()?;
    Ok(handle.stats().unwrap_or_default())
}

#[rstest]
#[case::single_trade("1234567,aaa,10,12\n", "aaa,0,10,12,12")]
#[case::weighted_average_truncates("1000000,aaa,20,18\n1000001,aaa,5,7\n", "aaa,1,25,15,18")]
#[case::three_evenly_spaced(
    "1000000,aaa,10,100\n1000500,aaa,10,150\n1001000,aaa,10,200\n",
    "aaa,500,30,150,200"
)]
#[case::uneven_gaps("1000000,aaa,1,5\n1000100,aaa,1,5\n1000900,aaa,1,5\n", "aaa,800,3,5,5")]
#[case::zero_quantity_only("5,aaa,0,40\n9,aaa,0,60\n", "aaa,4,0,0,60")]
#[case::zero_price("5,aaa,10,0\n", "aaa,0,10,0,0")]
fn test_single_symbol_rows(#[case] input: &str, #[case] expected_row: &str) -> Result<()> {
    let stats = run_standard(input)?;
    assert_eq!(stats.len(), 1);
    assert_stats_row(&stats[0], expected_row);
    Ok(())
}

#[rstest]
fn test_basic_dataset(basic_trades: &str) -> Result<()> {
    let stats = run_standard(basic_trades)?;

    assert_sorted_by_symbol(&stats);
    assert_stats_row(&stats[0], "aaa,5787,40,1161,1222");
    assert_stats_row(&stats[1], "aab,6103,69,810,907");
    assert_stats_row(&stats[2], "aac,3081,41,559,638");
    Ok(())
}

#[test]
fn test_output_ordering_is_lexicographic() -> Result<()> {
    let stats = run_standard("1,aac,1,1\n2,aaa,1,1\n3,aab,1,1\n4,aac,1,1\n5,aaa,1,1\n")?;
    let symbols: Vec<&str> = stats.iter().map(|s| s.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["aaa", "aab", "aac"]);
    Ok(())
}

#[test]
fn test_ordering_is_bytewise_not_case_folded() -> Result<()> {
    let stats = run_standard("1,abc,1,1\n2,ABD,1,1\n3,Abc,1,1\n4,ab,1,1\n")?;
    let symbols: Vec<&str> = stats.iter().map(|s| s.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["ABD", "Abc", "ab", "abc"]);
    Ok(())
}

#[test]
fn test_symbol_length_not_enforced() -> Result<()> {
    let stats = run_standard("1,BTCUSDT,2,30000\n2,X,1,7\n")?;
    let symbols: Vec<&str> = stats.iter().map(|s| s.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["BTCUSDT", "X"]);
    Ok(())
}

#[test]
fn test_interleaving_does_not_mix_symbol_gaps() -> Result<()> {
    // aaa trades are 1000 apart even though other symbols trade in between.
    let trades = vec![
        trade(1_000, "aaa", 1, 10),
        trade(1_001, "bbb", 1, 10),
        trade(1_500, "bbb", 1, 10),
        trade(2_000, "aaa", 1, 10),
        trade(2_001, "bbb", 1, 10),
    ];
    let stats = run_source(VecTradeSource::new(trades), StandardStatsCalculator::new())?;

    assert_eq!(stats[0].max_time_gap, 1_000);
    assert_eq!(stats[1].max_time_gap, 501);
    Ok(())
}

#[test]
fn test_backwards_timestamp_wraps_by_default() -> Result<()> {
    let stats = run_standard("100,aaa,1,1\n40,aaa,1,1\n")?;
    assert_eq!(stats[0].max_time_gap, 0u64.wrapping_sub(60));
    Ok(())
}

#[test]
fn test_backwards_timestamp_saturates_when_configured() -> Result<()> {
    let stats = run_source(
        StringTradeSource::new("100,aaa,1,1\n40,aaa,1,1\n70,aaa,1,1\n"),
        StandardStatsCalculator::with_gap_policy(TimeGapPolicy::Saturating),
    )?;
    assert_eq!(stats[0].max_time_gap, 30);
    Ok(())
}

#[test]
fn test_vwap_matches_manual_calculation() -> Result<()> {
    let trades = TradeFactory::new().series("aaa", 10, &[(10, 1000), (5, 1010), (15, 990)]);
    let stats = run_source(VecTradeSource::new(trades), StandardStatsCalculator::new())?;

    let expected = (10 * 1000 + 5 * 1010 + 15 * 990) / 30;
    assert_eq!(stats[0].weighted_avg_price, Px::new(expected));
    assert_eq!(stats[0].total_volume, 30);
    assert_eq!(stats[0].max_price, Px::new(1010));
    assert_eq!(stats[0].max_time_gap, 10);
    Ok(())
}

#[test]
fn test_standard_output_has_no_extended_metrics() -> Result<()> {
    let stats = run_standard("1,aaa,1,1\n")?;
    assert!(stats.iter().all(|s| s.extended.is_none()));
    Ok(())
}
