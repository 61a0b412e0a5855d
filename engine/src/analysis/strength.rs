//! Currency strength from a basket of pairs

use crate::data::{split_pair, MarketSnapshot};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Strength points per percent of average change
pub const STRENGTH_SCALE: f64 = 50.0;
/// Average change (percent) beyond which a currency is trending
pub const TREND_THRESHOLD: f64 = 1.0;

/// Direction of a currency over the observed window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Sideways,
}

impl Trend {
    /// Trend from an average percent change
    pub fn from_change(change: f64) -> Self {
        if change > TREND_THRESHOLD {
            Self::Up
        } else if change < -TREND_THRESHOLD {
            Self::Down
        } else {
            Self::Sideways
        }
    }
}

/// Relative strength of one currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyStrength {
    pub currency: String,
    /// Strength in `-100..=100`
    pub strength: f64,
    /// Equal-weighted average percent change across the currency's pairs
    pub change_24h: f64,
    pub trend: Trend,
}

/// Aggregates pair moves into per-currency strength
pub struct CurrencyStrengthEngine;

impl CurrencyStrengthEngine {
    /// Strength per currency, strongest first
    ///
    /// A pair's change counts positively for its base currency and negatively
    /// for its quote currency. Each currency's change is the plain average of
    /// its contributions.
    pub fn compute(basket: &[MarketSnapshot]) -> Vec<CurrencyStrength> {
        let mut contributions: Vec<(String, Vec<f64>)> = Vec::new();

        for snapshot in basket {
            let Some((base, quote)) = split_pair(&snapshot.symbol) else {
                debug!("Skipping {}: not a BASE/QUOTE pair", snapshot.symbol);
                continue;
            };
            if !snapshot.change_percent.is_finite() {
                debug!("Skipping {}: non-finite change", snapshot.symbol);
                continue;
            }
            push_contribution(&mut contributions, base, snapshot.change_percent);
            push_contribution(&mut contributions, quote, -snapshot.change_percent);
        }

        let mut strengths: Vec<CurrencyStrength> = contributions
            .into_iter()
            .map(|(currency, changes)| {
                let change_24h = changes.iter().sum::<f64>() / changes.len() as f64;
                CurrencyStrength {
                    currency,
                    strength: (change_24h * STRENGTH_SCALE).clamp(-100.0, 100.0),
                    change_24h,
                    trend: Trend::from_change(change_24h),
                }
            })
            .collect();

        strengths.sort_by(|a, b| {
            b.strength
                .partial_cmp(&a.strength)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        strengths
    }
}

fn push_contribution(contributions: &mut Vec<(String, Vec<f64>)>, currency: &str, change: f64) {
    match contributions.iter_mut().find(|(c, _)| c == currency) {
        Some((_, changes)) => changes.push(change),
        None => contributions.push((currency.to_string(), vec![change])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find<'a>(strengths: &'a [CurrencyStrength], currency: &str) -> &'a CurrencyStrength {
        strengths.iter().find(|s| s.currency == currency).unwrap()
    }

    #[test]
    fn test_strength_weighted_average() {
        let basket = vec![
            MarketSnapshot::new("EUR/USD", 1.09, 1.0),
            MarketSnapshot::new("GBP/USD", 1.27, 0.5),
            MarketSnapshot::new("USD/JPY", 150.0, -1.5),
        ];
        let strengths = CurrencyStrengthEngine::compute(&basket);

        assert_eq!(strengths.len(), 4);
        // USD: -1.0, -0.5, -1.5 => -1.0
        let usd = find(&strengths, "USD");
        assert!((usd.change_24h + 1.0).abs() < 1e-9);
        assert!((usd.strength + 50.0).abs() < 1e-9);
        assert_eq!(usd.trend, Trend::Sideways);

        let jpy = find(&strengths, "JPY");
        assert!((jpy.change_24h - 1.5).abs() < 1e-9);
        assert_eq!(jpy.trend, Trend::Up);
        assert_eq!(strengths[0].currency, "JPY");
    }

    #[test]
    fn test_strength_clamped_and_trend_down() {
        let basket = vec![MarketSnapshot::new("BTC/USD", 60000.0, -5.0)];
        let strengths = CurrencyStrengthEngine::compute(&basket);

        let btc = find(&strengths, "BTC");
        assert_eq!(btc.strength, -100.0);
        assert_eq!(btc.trend, Trend::Down);
        assert_eq!(find(&strengths, "USD").strength, 100.0);
    }

    #[test]
    fn test_strength_skips_unparseable_symbols() {
        let basket = vec![MarketSnapshot::new("XAUUSD", 2300.0, 2.0)];
        assert!(CurrencyStrengthEngine::compute(&basket).is_empty());
        assert!(CurrencyStrengthEngine::compute(&[]).is_empty());
    }
}
