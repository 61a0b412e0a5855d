//! Heuristic signal generator
//!
//! Produces a tradable recommendation from price change, RSI and MACD when no
//! external analyst is available, and serves as the baseline the analyst's
//! output is checked against. The only nondeterminism is drawn from the
//! caller's [`RandomSource`].

use crate::config::{IndicatorConfig, SignalConfig};
use crate::data::{MarketSnapshot, PriceSeries};
use crate::indicators::{self, Indicator};
use crate::random::RandomSource;
use crate::strategy::{Provenance, RiskLevel, Signal, SignalAction};
use chrono::Utc;
use tracing::{debug, info};

/// RSI and MACD values feeding the decision table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentumReadings {
    pub rsi: f64,
    pub macd: f64,
}

/// Heuristic BUY/SELL/HOLD generator
#[derive(Debug, Clone, Default)]
pub struct SignalGenerator {
    indicator_config: IndicatorConfig,
    config: SignalConfig,
}

impl SignalGenerator {
    /// Create new generator
    pub fn new(indicator_config: IndicatorConfig, config: SignalConfig) -> Self {
        Self {
            indicator_config,
            config,
        }
    }

    /// Generator parameters
    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    /// Generate a signal for the snapshot, using the series for indicators
    ///
    /// RSI and MACD come from the series when it is long enough; otherwise they
    /// are drawn from `rng` within the configured fallback ranges.
    pub fn generate(
        &self,
        snapshot: &MarketSnapshot,
        series: &PriceSeries,
        rng: &mut dyn RandomSource,
    ) -> Signal {
        let indicators = indicators::compute_all(series, &self.indicator_config);
        let prices = series.prices();

        let rsi = if prices.len() > self.indicator_config.rsi_period {
            indicators::rsi(&prices, self.indicator_config.rsi_period)
        } else {
            let (low, high) = self.config.fallback_rsi_range;
            rng.next_in(low, high)
        };

        let macd = match indicators::macd(&prices, &self.indicator_config) {
            Some(output) => output.macd,
            None => {
                let amplitude = self.config.fallback_macd_amplitude;
                rng.next_in(-amplitude, amplitude)
            }
        };

        self.generate_with(snapshot, MomentumReadings { rsi, macd }, indicators, rng)
    }

    /// Generate a signal from explicit readings
    ///
    /// Only the confidence jitter is drawn from `rng`.
    pub fn generate_with(
        &self,
        snapshot: &MarketSnapshot,
        readings: MomentumReadings,
        indicators: Vec<Indicator>,
        rng: &mut dyn RandomSource,
    ) -> Signal {
        let volatility = snapshot.volatility();
        let is_volatile = volatility > self.config.volatility_threshold;
        let (action, risk_level) = Self::decide(snapshot.change_percent, readings, is_volatile);

        let jitter = rng.next_in(0.0, self.config.max_jitter);
        let confidence = (self.config.base_confidence + volatility * self.config.volatility_weight + jitter)
            .min(self.config.max_confidence);

        let (stop_loss, take_profit) = self.price_levels(action, snapshot.price, is_volatile);
        let reasoning = Self::reasoning(snapshot, action, readings, is_volatile);

        debug!(
            "{}: change={:.3}%, rsi={:.2}, macd={:.6}, volatile={}",
            snapshot.symbol, snapshot.change_percent, readings.rsi, readings.macd, is_volatile
        );
        info!(
            "{} signal generated for {}: price={:.5}, confidence={:.1}, risk={:?}",
            action, snapshot.symbol, snapshot.price, confidence, risk_level
        );

        Signal {
            symbol: snapshot.symbol.clone(),
            action,
            confidence,
            entry_price: snapshot.price,
            stop_loss,
            take_profit,
            risk_level,
            reasoning,
            indicators,
            timestamp: Utc::now(),
            provenance: Provenance::Heuristic,
        }
    }

    /// Decision table
    ///
    /// Rising price with RSI below 50 and positive MACD buys; falling price
    /// with RSI above 50 and negative MACD sells; anything else holds.
    pub fn decide(change_percent: f64, readings: MomentumReadings, is_volatile: bool) -> (SignalAction, RiskLevel) {
        let directional_risk = if is_volatile {
            RiskLevel::High
        } else {
            RiskLevel::Medium
        };

        if change_percent > 0.0 && readings.rsi < 50.0 && readings.macd > 0.0 {
            (SignalAction::Buy, directional_risk)
        } else if change_percent < 0.0 && readings.rsi > 50.0 && readings.macd < 0.0 {
            (SignalAction::Sell, directional_risk)
        } else {
            (SignalAction::Hold, RiskLevel::Low)
        }
    }

    /// Stop loss and take profit for an action at `price`
    ///
    /// Sells place the stop above and the target below; buys and holds the
    /// other way round.
    pub fn price_levels(&self, action: SignalAction, price: f64, is_volatile: bool) -> (f64, f64) {
        let (stop_pct, target_pct) = self.offsets(is_volatile);
        match action {
            SignalAction::Sell => (price * (1.0 + stop_pct / 100.0), price * (1.0 - target_pct / 100.0)),
            SignalAction::Buy | SignalAction::Hold => {
                (price * (1.0 - stop_pct / 100.0), price * (1.0 + target_pct / 100.0))
            }
        }
    }

    /// Reward ratio the generator plans for: target distance over stop distance
    pub fn planned_reward_ratio(&self, is_volatile: bool) -> f64 {
        let (stop_pct, target_pct) = self.offsets(is_volatile);
        target_pct / stop_pct
    }

    fn offsets(&self, is_volatile: bool) -> (f64, f64) {
        if is_volatile {
            (self.config.volatile_stop_pct, self.config.volatile_target_pct)
        } else {
            (self.config.calm_stop_pct, self.config.calm_target_pct)
        }
    }

    fn reasoning(
        snapshot: &MarketSnapshot,
        action: SignalAction,
        readings: MomentumReadings,
        is_volatile: bool,
    ) -> String {
        let regime = if is_volatile { "elevated" } else { "calm" };
        let volatility = snapshot.volatility();
        match action {
            SignalAction::Buy => format!(
                "BUY {}: price up {:.2}% with RSI {:.1} below 50 and MACD {:.5} positive. Volatility {:.2}% ({}).",
                snapshot.symbol, snapshot.change_percent, readings.rsi, readings.macd, volatility, regime
            ),
            SignalAction::Sell => format!(
                "SELL {}: price down {:.2}% with RSI {:.1} above 50 and MACD {:.5} negative. Volatility {:.2}% ({}).",
                snapshot.symbol, volatility, readings.rsi, readings.macd, volatility, regime
            ),
            SignalAction::Hold => format!(
                "HOLD {}: change {:+.2}%, RSI {:.1} and MACD {:.5} do not line up. Volatility {:.2}% ({}).",
                snapshot.symbol, snapshot.change_percent, readings.rsi, readings.macd, volatility, regime
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ConstantRandom, SequenceRandom};

    fn readings(rsi: f64, macd: f64) -> MomentumReadings {
        MomentumReadings { rsi, macd }
    }

    #[test]
    fn test_decision_table() {
        assert_eq!(
            SignalGenerator::decide(0.5, readings(45.0, 0.0005), false),
            (SignalAction::Buy, RiskLevel::Medium)
        );
        assert_eq!(
            SignalGenerator::decide(1.5, readings(45.0, 0.0005), true),
            (SignalAction::Buy, RiskLevel::High)
        );
        assert_eq!(
            SignalGenerator::decide(-0.5, readings(55.0, -0.0005), false),
            (SignalAction::Sell, RiskLevel::Medium)
        );
        assert_eq!(
            SignalGenerator::decide(-2.0, readings(55.0, -0.0005), true),
            (SignalAction::Sell, RiskLevel::High)
        );
        assert_eq!(
            SignalGenerator::decide(0.5, readings(55.0, 0.0005), false),
            (SignalAction::Hold, RiskLevel::Low)
        );
        assert_eq!(
            SignalGenerator::decide(0.0, readings(45.0, 0.0005), false),
            (SignalAction::Hold, RiskLevel::Low)
        );
        assert_eq!(
            SignalGenerator::decide(-0.5, readings(50.0, -0.0005), false),
            (SignalAction::Hold, RiskLevel::Low)
        );
    }

    #[test]
    fn test_buy_levels_and_confidence() {
        let generator = SignalGenerator::default();
        let snapshot = MarketSnapshot::new("EUR/USD", 1.0, 0.5);
        let signal = generator.generate_with(&snapshot, readings(40.0, 0.0004), Vec::new(), &mut ConstantRandom(0.5));

        assert_eq!(signal.action, SignalAction::Buy);
        assert_eq!(signal.risk_level, RiskLevel::Medium);
        // 60 + 0.5 * 10 + 5
        assert!((signal.confidence - 70.0).abs() < 1e-9);
        assert!((signal.stop_loss - 0.992).abs() < 1e-12);
        assert!((signal.take_profit - 1.015).abs() < 1e-12);
        assert_eq!(signal.provenance, Provenance::Heuristic);
    }

    #[test]
    fn test_sell_levels_volatile() {
        let generator = SignalGenerator::default();
        let snapshot = MarketSnapshot::new("BTC/USD", 100.0, -3.0);
        let signal = generator.generate_with(&snapshot, readings(60.0, -0.0004), Vec::new(), &mut ConstantRandom(0.0));

        assert_eq!(signal.action, SignalAction::Sell);
        assert_eq!(signal.risk_level, RiskLevel::High);
        assert!((signal.stop_loss - 101.5).abs() < 1e-9);
        assert!((signal.take_profit - 97.5).abs() < 1e-9);
        // 60 + 30 + 0, below the ceiling
        assert!((signal.confidence - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_confidence_capped() {
        let generator = SignalGenerator::default();
        let snapshot = MarketSnapshot::new("BTC/USD", 100.0, 8.0);
        let signal = generator.generate_with(&snapshot, readings(40.0, 0.001), Vec::new(), &mut ConstantRandom(0.9));
        assert_eq!(signal.confidence, 95.0);
    }

    #[test]
    fn test_deterministic_with_fixed_seed() {
        let generator = SignalGenerator::default();
        let snapshot = MarketSnapshot::new("GBP/USD", 1.27, 0.3);
        let series = PriceSeries::from_prices("GBP/USD", 100, &[1.26, 1.27]);

        let first = generator.generate(&snapshot, &series, &mut SequenceRandom::new(vec![0.2, 0.8, 0.4]));
        let second = generator.generate(&snapshot, &series, &mut SequenceRandom::new(vec![0.2, 0.8, 0.4]));

        assert_eq!(first.action, second.action);
        assert_eq!(first.risk_level, second.risk_level);
        assert_eq!(first.confidence, second.confidence);
        assert_eq!(first.reasoning, second.reasoning);
        // rsi = 30 + 0.2 * 40 = 38, macd = -0.001 + 0.8 * 0.002 > 0
        assert_eq!(first.action, SignalAction::Buy);
        assert_eq!(first.indicators.len(), 3);
    }

    #[test]
    fn test_planned_reward_ratio_matches_levels() {
        let generator = SignalGenerator::default();
        let snapshot = MarketSnapshot::new("EUR/USD", 1.085, -0.4);
        let signal = generator.generate_with(&snapshot, readings(65.0, -0.0002), Vec::new(), &mut ConstantRandom(0.1));

        assert!((signal.reward_ratio() - generator.planned_reward_ratio(false)).abs() < 1e-9);
    }

    #[test]
    fn test_reasoning_cites_readings() {
        let generator = SignalGenerator::default();
        let snapshot = MarketSnapshot::new("USD/JPY", 150.0, 0.2);
        let signal = generator.generate_with(&snapshot, readings(55.0, 0.0003), Vec::new(), &mut ConstantRandom(0.0));

        assert_eq!(signal.action, SignalAction::Hold);
        assert!(signal.reasoning.contains("RSI 55.0"));
        assert!(signal.reasoning.contains("MACD 0.00030"));
    }
}
