//! Risk management configuration

use serde::{Deserialize, Serialize};

/// Reward-ratio classification thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Reward ratio at or above this is excellent
    pub excellent_reward_ratio: f64,
    /// Reward ratio at or above this is acceptable
    pub acceptable_reward_ratio: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            excellent_reward_ratio: 2.0,
            acceptable_reward_ratio: 1.5,
        }
    }
}
