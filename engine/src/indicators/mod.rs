//! Technical indicators module
//!
//! Every indicator is a pure function of a price snapshot. Nothing is carried
//! between calls; a refresh recomputes the whole set from the current series.
//! Moving averages and deviation come from the `ta` crate.

pub mod bb;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use bb::*;
pub use macd::*;
pub use rsi::*;
pub use sma::*;

use crate::config::IndicatorConfig;
use crate::data::PriceSeries;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Directional reading of an indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorSignal {
    Bullish,
    Bearish,
    Neutral,
}

impl fmt::Display for IndicatorSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Bullish => "bullish",
            Self::Bearish => "bearish",
            Self::Neutral => "neutral",
        };
        f.write_str(label)
    }
}

/// Indicators the engine knows how to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorKind {
    Rsi,
    Macd,
    BollingerBands,
}

impl IndicatorKind {
    /// Every supported indicator, in display order
    pub const ALL: [IndicatorKind; 3] = [Self::Rsi, Self::Macd, Self::BollingerBands];
}

/// Computed indicator reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    /// Indicator name (e.g., "RSI")
    pub name: String,
    /// Primary value
    pub value: f64,
    /// Directional reading
    pub signal: IndicatorSignal,
    /// Strength in `0..=100`
    pub strength: f64,
    /// Human-readable summary
    pub description: String,
}

impl Indicator {
    /// Create indicator, clamping strength to `0..=100`
    pub fn new(
        name: impl Into<String>,
        value: f64,
        signal: IndicatorSignal,
        strength: f64,
        description: impl Into<String>,
    ) -> Self {
        let strength = if strength.is_finite() {
            strength.clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            name: name.into(),
            value,
            signal,
            strength,
            description: description.into(),
        }
    }
}

/// Compute the requested indicators for a series
pub fn compute(series: &PriceSeries, kinds: &[IndicatorKind], config: &IndicatorConfig) -> Vec<Indicator> {
    let prices = series.prices();
    let indicators: Vec<Indicator> = kinds
        .iter()
        .map(|kind| match kind {
            IndicatorKind::Rsi => rsi_indicator(&prices, config),
            IndicatorKind::Macd => macd_indicator(&prices, config),
            IndicatorKind::BollingerBands => bollinger_indicator(&prices, config),
        })
        .collect();

    for indicator in &indicators {
        debug!(
            "{} {}: value={:.4}, signal={}, strength={:.1}",
            series.symbol, indicator.name, indicator.value, indicator.signal, indicator.strength
        );
    }

    indicators
}

/// Compute RSI, MACD and Bollinger Bands for a series
pub fn compute_all(series: &PriceSeries, config: &IndicatorConfig) -> Vec<Indicator> {
    compute(series, &IndicatorKind::ALL, config)
}
