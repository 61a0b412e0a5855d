//! Fallback signal configuration

use serde::{Deserialize, Serialize};

/// Parameters of the heuristic signal generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Absolute change percent above which an instrument counts as volatile
    pub volatility_threshold: f64,
    /// Base confidence before volatility and jitter
    pub base_confidence: f64,
    /// Confidence added per percent of volatility
    pub volatility_weight: f64,
    /// Upper bound of the random jitter added to confidence
    pub max_jitter: f64,
    /// Confidence ceiling
    pub max_confidence: f64,
    /// Stop distance (percent of price) for volatile instruments
    pub volatile_stop_pct: f64,
    /// Target distance (percent of price) for volatile instruments
    pub volatile_target_pct: f64,
    /// Stop distance (percent of price) for calm instruments
    pub calm_stop_pct: f64,
    /// Target distance (percent of price) for calm instruments
    pub calm_target_pct: f64,
    /// Range RSI is drawn from when the series is too short
    pub fallback_rsi_range: (f64, f64),
    /// Half-width of the range MACD is drawn from when the series is too short
    pub fallback_macd_amplitude: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            volatility_threshold: 1.0,
            base_confidence: 60.0,
            volatility_weight: 10.0,
            max_jitter: 10.0,
            max_confidence: 95.0,
            volatile_stop_pct: 1.5,
            volatile_target_pct: 2.5,
            calm_stop_pct: 0.8,
            calm_target_pct: 1.5,
            fallback_rsi_range: (30.0, 70.0),
            fallback_macd_amplitude: 0.001,
        }
    }
}
