//! Engine facade
//!
//! One entry point per dashboard calculation, all driven by a single
//! [`EngineConfig`].

use crate::analysis::{
    CorrelationEngine, CorrelationPair, CurrencyStrength, CurrencyStrengthEngine, MarketSentiment,
    SentimentAggregator,
};
use crate::config::EngineConfig;
use crate::data::{MarketSnapshot, PriceSeries, PriceSeriesStore};
use crate::events::{EconomicEvent, EconomicEventScorer, EventScore, NewsItem};
use crate::indicators::{self, Indicator, IndicatorKind};
use crate::portfolio::{RewardQuality, RiskCalculation, RiskCalculator, RiskInput};
use crate::random::RandomSource;
use crate::strategy::{Signal, SignalGenerator};
use crate::Result;

/// Market analysis engine
#[derive(Debug, Clone, Default)]
pub struct MarketEngine {
    config: EngineConfig,
    generator: SignalGenerator,
    risk: RiskCalculator,
}

impl MarketEngine {
    /// Create new engine
    pub fn new(config: EngineConfig) -> Self {
        Self {
            generator: SignalGenerator::new(config.indicators.clone(), config.signal.clone()),
            risk: RiskCalculator::new(config.risk.clone()),
            config,
        }
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Empty series store sized from the configuration
    pub fn new_store(&self) -> PriceSeriesStore {
        PriceSeriesStore::new(self.config.series_capacity)
    }

    /// RSI, MACD and Bollinger Bands for a series
    pub fn compute_indicators(&self, series: &PriceSeries) -> Vec<Indicator> {
        indicators::compute_all(series, &self.config.indicators)
    }

    /// A chosen subset of indicators for a series
    pub fn compute_selected(&self, series: &PriceSeries, kinds: &[IndicatorKind]) -> Vec<Indicator> {
        indicators::compute(series, kinds, &self.config.indicators)
    }

    /// Sentiment split from indicator readings
    pub fn sentiment(&self, symbol: &str, indicators: &[Indicator]) -> MarketSentiment {
        SentimentAggregator::from_indicators(symbol, indicators)
    }

    /// Sampled sentiment split for the sentiment screens
    pub fn sampled_sentiment(&self, symbol: &str, rng: &mut dyn RandomSource) -> MarketSentiment {
        SentimentAggregator::sample(symbol, rng)
    }

    /// Heuristic trading signal
    pub fn generate_signal(
        &self,
        snapshot: &MarketSnapshot,
        series: &PriceSeries,
        rng: &mut dyn RandomSource,
    ) -> Signal {
        self.generator.generate(snapshot, series, rng)
    }

    /// The heuristic generator itself
    pub fn signal_generator(&self) -> &SignalGenerator {
        &self.generator
    }

    /// Position size and reward ratio
    pub fn calculate_risk(&self, input: &RiskInput) -> Result<RiskCalculation> {
        self.risk.calculate(input)
    }

    /// Quality label for a reward ratio
    pub fn classify_reward(&self, reward_ratio: f64) -> RewardQuality {
        self.risk.classify(reward_ratio)
    }

    /// Strength per currency across the basket
    pub fn compute_currency_strength(&self, basket: &[MarketSnapshot]) -> Vec<CurrencyStrength> {
        CurrencyStrengthEngine::compute(basket)
    }

    /// Correlation for every pair of series in the basket
    pub fn compute_correlations(&self, basket: &[PriceSeries]) -> Vec<CorrelationPair> {
        CorrelationEngine::compute(basket)
    }

    /// Impact and direction of a calendar event
    pub fn score_event(&self, event: &EconomicEvent) -> EventScore {
        EconomicEventScorer::score_event(event)
    }

    /// Impact and tone of a news item
    pub fn score_news(&self, item: &NewsItem) -> EventScore {
        EconomicEventScorer::score_news(item)
    }
}
