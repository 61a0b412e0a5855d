//! Integration tests for market-engine

use market_engine::prelude::*;

/// Helper function to create a test series
fn create_test_series(symbol: &str, count: usize, base_price: f64) -> PriceSeries {
    let prices: Vec<f64> = (0..count)
        .map(|i| base_price + (i as f64 * 0.001) + (i as f64 % 10.0) * 0.0005)
        .collect();
    PriceSeries::from_prices(symbol, 100, &prices)
}

/// Window of `period` moves, `down` of them falling by 1.0 and the rest rising by 1.0
fn window_with_down_moves(period: usize, down: usize) -> Vec<f64> {
    let mut prices = vec![100.0];
    for i in 0..period {
        let last = prices[prices.len() - 1];
        prices.push(if i < down { last - 1.0 } else { last + 1.0 });
    }
    prices
}

#[test]
fn test_rsi_non_increasing_with_more_down_moves() {
    let mut previous = f64::INFINITY;
    for down in 0..=14 {
        let value = rsi(&window_with_down_moves(14, down), 14);
        assert!(value <= previous, "RSI rose from {} to {} at {} down moves", previous, value, down);
        assert!((0.0..=100.0).contains(&value));
        previous = value;
    }
}

#[test]
fn test_engine_pipeline_from_store() {
    let engine = MarketEngine::new(EngineConfig::default());
    let mut store = engine.new_store();
    for i in 0..60 {
        store.record("EUR/USD", 1.08 + i as f64 * 0.0002);
        store.record("GBP/USD", 1.26 + i as f64 * 0.0003);
        store.record("USD/JPY", 150.0 - i as f64 * 0.02);
    }

    let basket = store.snapshot();
    assert_eq!(basket.len(), 3);

    let indicators = engine.compute_indicators(&basket[0]);
    assert_eq!(indicators.len(), 3);
    for indicator in &indicators {
        assert!((0.0..=100.0).contains(&indicator.strength));
    }

    let sentiment = engine.sentiment("EUR/USD", &indicators);
    assert!((sentiment.total() - 100.0).abs() <= 1.0);

    let snapshots: Vec<MarketSnapshot> = basket
        .iter()
        .filter_map(MarketSnapshot::from_series)
        .collect();
    let strengths = engine.compute_currency_strength(&snapshots);
    assert_eq!(strengths.len(), 4);
    for strength in &strengths {
        assert!((-100.0..=100.0).contains(&strength.strength));
    }
    // USD loses against EUR and GBP and falls against JPY
    assert_eq!(strengths.last().map(|s| s.currency.as_str()), Some("USD"));

    let correlations = engine.compute_correlations(&basket);
    assert_eq!(correlations.len(), 3);
    for pair in &correlations {
        assert!((-1.0..=1.0).contains(&pair.correlation));
    }
}

#[test]
fn test_signal_levels_round_trip_through_risk() -> anyhow::Result<()> {
    let engine = MarketEngine::new(EngineConfig::default());
    let mut rng = StdRandom::seeded(11);

    for (symbol, price, change) in [
        ("EUR/USD", 1.0850, 0.4),
        ("BTC/USD", 65_000.0, -3.2),
        ("USD/JPY", 151.2, 1.7),
        ("GBP/USD", 1.2710, -0.2),
    ] {
        let snapshot = MarketSnapshot::new(symbol, price, change);
        let series = create_test_series(symbol, 40, price);
        let signal = engine.generate_signal(&snapshot, &series, &mut rng);

        let risk = engine.calculate_risk(&RiskInput::from_signal(10_000.0, 2.0, &signal))?;
        assert!((risk.reward_ratio - signal.reward_ratio()).abs() < 1e-9);

        let volatile = snapshot.volatility() > engine.config().signal.volatility_threshold;
        let planned = engine.signal_generator().planned_reward_ratio(volatile);
        assert!((risk.reward_ratio - planned).abs() < 1e-6);
        assert!(SignalValidator::validate(&signal).is_ok());
    }
    Ok(())
}

#[test]
fn test_reference_risk_calculation() -> anyhow::Result<()> {
    let engine = MarketEngine::new(EngineConfig::default());
    let risk = engine.calculate_risk(&RiskInput {
        account_balance: 10_000.0,
        risk_percentage: 2.0,
        entry_price: 1.0850,
        stop_loss: 1.0820,
        target_price: 1.0920,
    })?;

    assert!((risk.risk_amount - 200.0).abs() < 1e-9);
    assert!((risk.pip_value - 0.0030).abs() < 1e-9);
    assert!((risk.position_size - 66_667.0).abs() < 1.0);
    assert!((risk.reward_ratio - 2.33).abs() < 0.01);
    assert_eq!(engine.classify_reward(risk.reward_ratio), RewardQuality::Excellent);
    Ok(())
}

#[test]
fn test_zero_stop_distance_is_invalid_input() {
    let engine = MarketEngine::new(EngineConfig::default());
    let result = engine.calculate_risk(&RiskInput {
        account_balance: 10_000.0,
        risk_percentage: 2.0,
        entry_price: 1.0850,
        stop_loss: 1.0850,
        target_price: 1.0920,
    });
    assert!(matches!(result, Err(EngineError::InvalidInput(_))));
}

#[test]
fn test_signal_determinism_with_fixed_seed() {
    let engine = MarketEngine::new(EngineConfig::default());
    let snapshot = MarketSnapshot::new("AUD/USD", 0.66, -0.7);
    let series = create_test_series("AUD/USD", 10, 0.66);

    let first = engine.generate_signal(&snapshot, &series, &mut StdRandom::seeded(3));
    let second = engine.generate_signal(&snapshot, &series, &mut StdRandom::seeded(3));

    assert_eq!(first.action, second.action);
    assert_eq!(first.risk_level, second.risk_level);
    assert_eq!(first.confidence, second.confidence);
    assert_eq!(first.stop_loss, second.stop_loss);
    assert_eq!(first.reasoning, second.reasoning);
}

#[test]
fn test_alert_statistics() -> anyhow::Result<()> {
    let engine = MarketEngine::new(EngineConfig::default());
    let mut history = AlertHistory::new();
    assert_eq!(history.statistics().win_rate, 0.0);

    let snapshot = MarketSnapshot::new("EUR/USD", 1.0850, 0.4);
    let readings = MomentumReadings { rsi: 40.0, macd: 0.0002 };
    let buy = engine
        .signal_generator()
        .generate_with(&snapshot, readings, Vec::new(), &mut ConstantRandom(0.5));
    assert_eq!(buy.action, SignalAction::Buy);

    let ids: Vec<_> = (0..5).map(|_| history.record(&buy)).collect();
    history.close(ids[0], buy.take_profit)?;
    history.close(ids[1], buy.take_profit)?;
    history.close(ids[2], buy.stop_loss)?;
    history.close(ids[3], buy.take_profit)?;

    let stats = history.statistics();
    assert_eq!(stats.closed, 4);
    assert_eq!(stats.wins, 3);
    assert_eq!(stats.active, 1);
    assert!((stats.win_rate - 75.0).abs() < 1e-9);

    let expected_pnl = 3.0 * (buy.take_profit - buy.entry_price) + (buy.stop_loss - buy.entry_price);
    assert!((stats.total_pnl - expected_pnl).abs() < 1e-12);
    Ok(())
}

#[test]
fn test_sampled_sentiment_sums_to_100() {
    let engine = MarketEngine::new(EngineConfig::default());
    let mut rng = StdRandom::seeded(99);
    for _ in 0..200 {
        let sentiment = engine.sampled_sentiment("ETH/USD", &mut rng);
        assert!((sentiment.total() - 100.0).abs() <= 1.0);
        assert!(sentiment.confidence >= sentiment.bullish);
    }
}
