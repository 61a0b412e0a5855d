//! Indicator configuration

use serde::{Deserialize, Serialize};

/// Indicator periods and signal thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// RSI lookback (number of deltas)
    pub rsi_period: usize,
    /// RSI above this is overbought (bearish)
    pub rsi_overbought: f64,
    /// RSI below this is oversold (bullish)
    pub rsi_oversold: f64,
    /// Fast SMA period for MACD
    pub macd_fast_period: usize,
    /// Slow SMA period for MACD
    pub macd_slow_period: usize,
    /// Signal line factor applied to the MACD line
    pub macd_signal_factor: f64,
    /// Bollinger middle band period
    pub bollinger_period: usize,
    /// Bollinger band width in standard deviations
    pub bollinger_std_dev: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
            macd_fast_period: 12,
            macd_slow_period: 26,
            macd_signal_factor: 0.8,
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
        }
    }
}
