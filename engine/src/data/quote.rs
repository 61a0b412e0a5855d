//! Latest quote for an instrument

use crate::data::PriceSeries;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Market snapshot consumed by signal generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    /// Symbol (e.g., "EUR/USD")
    pub symbol: String,
    /// Last traded price
    pub price: f64,
    /// Absolute change over the observed window
    pub change: f64,
    /// Percent change over the observed window
    pub change_percent: f64,
    /// High price over the observed window
    pub high: f64,
    /// Low price over the observed window
    pub low: f64,
    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl MarketSnapshot {
    /// Create a snapshot from explicit values; high/low default to the price
    pub fn new(symbol: impl Into<String>, price: f64, change_percent: f64) -> Self {
        let open = if change_percent == -100.0 {
            price
        } else {
            price / (1.0 + change_percent / 100.0)
        };
        Self {
            symbol: symbol.into(),
            price,
            change: price - open,
            change_percent,
            high: price.max(open),
            low: price.min(open),
            timestamp: Utc::now(),
        }
    }

    /// Derive a snapshot from a series; `None` when the series is empty
    pub fn from_series(series: &PriceSeries) -> Option<Self> {
        let price = series.latest()?;
        let first = series.first()?;
        let prices = series.prices();
        let high = prices.iter().copied().fold(f64::MIN, f64::max);
        let low = prices.iter().copied().fold(f64::MAX, f64::min);

        Some(Self {
            symbol: series.symbol.clone(),
            price,
            change: price - first,
            change_percent: series.change_percent(),
            high,
            low,
            timestamp: Utc::now(),
        })
    }

    /// Absolute percent move, the volatility measure used by the signal heuristic
    pub fn volatility(&self) -> f64 {
        self.change_percent.abs()
    }

    /// Base and quote currency of a "BASE/QUOTE" symbol
    pub fn currencies(&self) -> Option<(&str, &str)> {
        split_pair(&self.symbol)
    }
}

/// Split a "BASE/QUOTE" symbol; `None` when there is no separator
pub fn split_pair(symbol: &str) -> Option<(&str, &str)> {
    let (base, quote) = symbol.split_once('/')?;
    let (base, quote) = (base.trim(), quote.trim());
    if base.is_empty() || quote.is_empty() {
        return None;
    }
    Some((base, quote))
}
