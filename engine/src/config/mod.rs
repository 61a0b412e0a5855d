//! Configuration module

pub mod indicator;
pub mod risk;
pub mod signal;

pub use indicator::*;
pub use risk::*;
pub use signal::*;

use serde::{Deserialize, Serialize};

/// Top-level engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Indicator periods and thresholds
    #[serde(default)]
    pub indicators: IndicatorConfig,
    /// Fallback signal heuristic parameters
    #[serde(default)]
    pub signal: SignalConfig,
    /// Reward-ratio classification thresholds
    #[serde(default)]
    pub risk: RiskConfig,
    /// Maximum samples kept per price series
    #[serde(default = "default_series_capacity")]
    pub series_capacity: usize,
}

fn default_series_capacity() -> usize {
    100
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            indicators: IndicatorConfig::default(),
            signal: SignalConfig::default(),
            risk: RiskConfig::default(),
            series_capacity: default_series_capacity(),
        }
    }
}
