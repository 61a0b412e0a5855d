//! RSI (Relative Strength Index) indicator

use crate::config::IndicatorConfig;
use crate::indicators::{Indicator, IndicatorSignal};

/// RSI returned when there are not enough samples
pub const NEUTRAL_RSI: f64 = 50.0;

/// RSI over the last `period` deltas
///
/// Average gain over average loss of the tail window. Needs `period + 1`
/// prices; with fewer (or a zero period) it returns exactly [`NEUTRAL_RSI`].
pub fn rsi(prices: &[f64], period: usize) -> f64 {
    if period == 0 || prices.len() < period + 1 {
        return NEUTRAL_RSI;
    }

    let window = &prices[prices.len() - (period + 1)..];
    let (gains, losses) = window
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .fold((0.0, 0.0), |(gains, losses), delta| {
            if delta > 0.0 {
                (gains + delta, losses)
            } else {
                (gains, losses - delta)
            }
        });

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;

    if avg_loss == 0.0 {
        return if avg_gain == 0.0 { NEUTRAL_RSI } else { 100.0 };
    }

    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

/// RSI reading with overbought/oversold classification
pub fn rsi_indicator(prices: &[f64], config: &IndicatorConfig) -> Indicator {
    let value = rsi(prices, config.rsi_period);

    let (signal, description) = if value > config.rsi_overbought {
        (IndicatorSignal::Bearish, format!("RSI overbought: {:.2} > {}", value, config.rsi_overbought))
    } else if value < config.rsi_oversold {
        (IndicatorSignal::Bullish, format!("RSI oversold: {:.2} < {}", value, config.rsi_oversold))
    } else {
        (IndicatorSignal::Neutral, format!("RSI in neutral zone: {:.2}", value))
    };

    Indicator::new("RSI", value, signal, (value - 50.0).abs() * 2.0, description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_not_enough_samples() {
        let values = vec![100.0, 102.0, 101.0, 103.0, 105.0, 104.0, 106.0];
        // period 14 needs 15 samples
        assert_eq!(rsi(&values, 14), 50.0);
        assert_eq!(rsi(&[], 14), 50.0);
        assert_eq!(rsi(&values, 0), 50.0);
    }

    #[test]
    fn test_rsi_extremes() {
        let rising: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let falling: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        let flat = vec![100.0; 20];

        assert_eq!(rsi(&rising, 14), 100.0);
        assert_eq!(rsi(&falling, 14), 0.0);
        assert_eq!(rsi(&flat, 14), 50.0);
    }

    #[test]
    fn test_rsi_balanced_moves() {
        // 7 up moves and 7 down moves of equal size
        let mut prices = vec![100.0];
        for i in 0..14 {
            let last = *prices.last().unwrap();
            prices.push(if i % 2 == 0 { last + 1.0 } else { last - 1.0 });
        }
        assert!((rsi(&prices, 14) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_rsi_indicator_classification() {
        let config = IndicatorConfig::default();
        let rising: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let falling: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();

        let overbought = rsi_indicator(&rising, &config);
        assert_eq!(overbought.signal, IndicatorSignal::Bearish);
        assert_eq!(overbought.strength, 100.0);

        let oversold = rsi_indicator(&falling, &config);
        assert_eq!(oversold.signal, IndicatorSignal::Bullish);

        let neutral = rsi_indicator(&[1.0, 2.0], &config);
        assert_eq!(neutral.value, 50.0);
        assert_eq!(neutral.signal, IndicatorSignal::Neutral);
        assert_eq!(neutral.strength, 0.0);
    }
}
