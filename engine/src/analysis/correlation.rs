//! Pairwise correlation between instruments

use crate::data::PriceSeries;
use serde::{Deserialize, Serialize};

/// Minimum number of overlapping returns for a coefficient
pub const MIN_OVERLAP: usize = 3;

/// Discrete bucket of `|correlation|`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationStrength {
    Weak,
    Moderate,
    Strong,
}

impl CorrelationStrength {
    /// Weak below 0.3, Moderate below 0.7, Strong otherwise
    pub fn from_coefficient(coefficient: f64) -> Self {
        let magnitude = coefficient.abs();
        if magnitude >= 0.7 {
            Self::Strong
        } else if magnitude >= 0.3 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }
}

/// Correlation between two instruments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPair {
    pub pair1: String,
    pub pair2: String,
    /// Coefficient in `-1..=1`
    pub correlation: f64,
    pub strength: CorrelationStrength,
}

impl CorrelationPair {
    /// Build from a coefficient, clamping it into `-1..=1`
    pub fn new(pair1: impl Into<String>, pair2: impl Into<String>, correlation: f64) -> Self {
        let correlation = if correlation.is_finite() {
            correlation.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        Self {
            pair1: pair1.into(),
            pair2: pair2.into(),
            correlation,
            strength: CorrelationStrength::from_coefficient(correlation),
        }
    }
}

/// Pearson coefficient of two equally long samples; 0 when undefined
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return 0.0;
    }
    let (xs, ys) = (&xs[xs.len() - n..], &ys[ys.len() - n..]);

    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let (dx, dy) = (x - mean_x, y - mean_y);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return 0.0;
    }
    (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0)
}

/// Computes correlation between the series of a basket
pub struct CorrelationEngine;

impl CorrelationEngine {
    /// Correlation of two series' returns over their aligned tails
    pub fn correlate(first: &PriceSeries, second: &PriceSeries) -> CorrelationPair {
        let (a, b) = (first.returns(), second.returns());
        let coefficient = if a.len().min(b.len()) < MIN_OVERLAP {
            0.0
        } else {
            pearson(&a, &b)
        };
        CorrelationPair::new(first.symbol.clone(), second.symbol.clone(), coefficient)
    }

    /// Every unordered pair of the basket once, in basket order
    pub fn compute(basket: &[PriceSeries]) -> Vec<CorrelationPair> {
        let mut pairs = Vec::new();
        for (i, first) in basket.iter().enumerate() {
            for second in &basket[i + 1..] {
                pairs.push(Self::correlate(first, second));
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_buckets() {
        assert_eq!(CorrelationStrength::from_coefficient(0.75), CorrelationStrength::Strong);
        assert_eq!(CorrelationStrength::from_coefficient(0.5), CorrelationStrength::Moderate);
        assert_eq!(CorrelationStrength::from_coefficient(0.1), CorrelationStrength::Weak);
        assert_eq!(CorrelationStrength::from_coefficient(-0.85), CorrelationStrength::Strong);
        assert_eq!(CorrelationStrength::from_coefficient(0.3), CorrelationStrength::Moderate);
        assert_eq!(CorrelationStrength::from_coefficient(0.7), CorrelationStrength::Strong);
    }

    #[test]
    fn test_pearson_perfect() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [2.0, 4.0, 6.0, 8.0];
        let inverse = [8.0, 6.0, 4.0, 2.0];

        assert!((pearson(&xs, &ys) - 1.0).abs() < 1e-12);
        assert!((pearson(&xs, &inverse) + 1.0).abs() < 1e-12);
        assert_eq!(pearson(&xs, &[5.0; 4]), 0.0);
        assert_eq!(pearson(&[1.0], &[1.0]), 0.0);
    }

    #[test]
    fn test_correlate_series() {
        let eur = PriceSeries::from_prices("EUR/USD", 50, &[1.00, 1.01, 1.00, 1.02, 1.01, 1.03]);
        let gbp = PriceSeries::from_prices("GBP/USD", 50, &[1.20, 1.212, 1.20, 1.224, 1.212, 1.236]);
        let chf = PriceSeries::from_prices("USD/CHF", 50, &[0.90, 0.891, 0.90, 0.882, 0.891, 0.873]);

        let pairs = CorrelationEngine::compute(&[eur, gbp, chf]);
        assert_eq!(pairs.len(), 3);
        assert_eq!((pairs[0].pair1.as_str(), pairs[0].pair2.as_str()), ("EUR/USD", "GBP/USD"));
        assert_eq!(pairs[0].strength, CorrelationStrength::Strong);
        assert!(pairs[0].correlation > 0.9);
        assert!(pairs[1].correlation < -0.9);
        assert_eq!(pairs[1].strength, CorrelationStrength::Strong);
    }

    #[test]
    fn test_correlate_short_series_is_weak() {
        let a = PriceSeries::from_prices("A/B", 10, &[1.0, 2.0, 3.0]);
        let b = PriceSeries::from_prices("C/D", 10, &[1.0, 2.0, 3.0]);
        let pair = CorrelationEngine::correlate(&a, &b);
        assert_eq!(pair.correlation, 0.0);
        assert_eq!(pair.strength, CorrelationStrength::Weak);
    }
}
