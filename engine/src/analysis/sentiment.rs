//! Market sentiment aggregation
//!
//! Sentiment is a coarse heuristic. `confidence` is the largest of the three
//! shares and must not be read as a calibrated probability.

use crate::indicators::{Indicator, IndicatorSignal};
use crate::random::RandomSource;
use serde::{Deserialize, Serialize};

/// Lower bound of a sampled bullish/bearish share
pub const SAMPLED_SHARE_MIN: f64 = 30.0;
/// Upper bound of a sampled bullish/bearish share
pub const SAMPLED_SHARE_MAX: f64 = 70.0;

/// Prevailing side of the market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentBias {
    Bullish,
    Bearish,
    Neutral,
}

/// Bullish/bearish/neutral split for one instrument, in whole percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSentiment {
    pub symbol: String,
    pub bullish: f64,
    pub bearish: f64,
    pub neutral: f64,
    pub overall: SentimentBias,
    pub confidence: f64,
}

impl MarketSentiment {
    fn from_shares(symbol: &str, bullish: f64, bearish: f64, neutral: f64) -> Self {
        Self::with_bias(symbol, bullish, bearish, neutral, bias(bullish, bearish))
    }

    fn with_bias(symbol: &str, bullish: f64, bearish: f64, neutral: f64, overall: SentimentBias) -> Self {
        Self {
            symbol: symbol.to_string(),
            bullish,
            bearish,
            neutral,
            overall,
            confidence: bullish.max(bearish).max(neutral),
        }
    }

    /// Sum of the three shares
    pub fn total(&self) -> f64 {
        self.bullish + self.bearish + self.neutral
    }
}

/// Converts indicator readings into sentiment shares
pub struct SentimentAggregator;

impl SentimentAggregator {
    /// Share of indicators per signal class
    ///
    /// Percentages use largest-remainder rounding so they sum to exactly 100.
    /// An empty set is fully neutral with zero confidence.
    pub fn from_indicators(symbol: &str, indicators: &[Indicator]) -> MarketSentiment {
        if indicators.is_empty() {
            let mut sentiment = MarketSentiment::from_shares(symbol, 0.0, 0.0, 100.0);
            sentiment.confidence = 0.0;
            return sentiment;
        }

        let count = |class: IndicatorSignal| indicators.iter().filter(|i| i.signal == class).count();
        let counts = [
            count(IndicatorSignal::Bullish),
            count(IndicatorSignal::Bearish),
            count(IndicatorSignal::Neutral),
        ];
        let [bullish, bearish, neutral] = largest_remainder(counts, indicators.len());

        // Bias from raw counts so rounding never breaks a tie
        let overall = bias(counts[0] as f64, counts[1] as f64);
        MarketSentiment::with_bias(symbol, bullish, bearish, neutral, overall)
    }

    /// Sampled sentiment for the sentiment screens
    ///
    /// Bullish and bearish are drawn independently in `[30, 70]`. When they add
    /// up to more than 100 both are scaled down so neutral never goes negative.
    pub fn sample(symbol: &str, rng: &mut dyn RandomSource) -> MarketSentiment {
        let mut bullish = rng.next_in(SAMPLED_SHARE_MIN, SAMPLED_SHARE_MAX).round();
        let mut bearish = rng.next_in(SAMPLED_SHARE_MIN, SAMPLED_SHARE_MAX).round();

        let sum = bullish + bearish;
        if sum > 100.0 {
            bullish = (bullish * 100.0 / sum).round();
            bearish = 100.0 - bullish;
        }

        MarketSentiment::from_shares(symbol, bullish, bearish, 100.0 - bullish - bearish)
    }
}

fn bias(bullish: f64, bearish: f64) -> SentimentBias {
    if bullish > bearish {
        SentimentBias::Bullish
    } else if bearish > bullish {
        SentimentBias::Bearish
    } else {
        SentimentBias::Neutral
    }
}

fn largest_remainder(counts: [usize; 3], total: usize) -> [f64; 3] {
    let exact: Vec<f64> = counts
        .iter()
        .map(|&c| c as f64 * 100.0 / total as f64)
        .collect();
    let mut shares: Vec<f64> = exact.iter().map(|v| v.floor()).collect();
    let mut missing = 100 - shares.iter().sum::<f64>() as i64;

    let mut order: Vec<usize> = (0..3).collect();
    order.sort_by(|&a, &b| {
        let ra = exact[a] - shares[a];
        let rb = exact[b] - shares[b];
        rb.partial_cmp(&ra).unwrap_or(std::cmp::Ordering::Equal)
    });
    for index in order {
        if missing <= 0 {
            break;
        }
        shares[index] += 1.0;
        missing -= 1;
    }

    [shares[0], shares[1], shares[2]]
}
