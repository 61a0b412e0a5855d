//! Risk management
//!
//! Position sizing from account balance, risk percentage and the distance
//! between entry and stop. Pure: the same input always gives the same output.

use crate::config::RiskConfig;
use crate::error::EngineError;
use crate::strategy::Signal;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Inputs of a position-sizing calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskInput {
    pub account_balance: f64,
    /// Risk per trade in percent of the balance (e.g., 2.0 = 2%)
    pub risk_percentage: f64,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub target_price: f64,
}

impl RiskInput {
    /// Size the trade a signal proposes
    pub fn from_signal(account_balance: f64, risk_percentage: f64, signal: &Signal) -> Self {
        Self {
            account_balance,
            risk_percentage,
            entry_price: signal.entry_price,
            stop_loss: signal.stop_loss,
            target_price: signal.take_profit,
        }
    }
}

/// Result of a position-sizing calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskCalculation {
    pub account_balance: f64,
    pub risk_percentage: f64,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub target_price: f64,
    /// Units to trade so that hitting the stop loses `risk_amount`
    pub position_size: f64,
    /// Money at risk
    pub risk_amount: f64,
    /// Distance between entry and stop
    pub pip_value: f64,
    /// Target distance over stop distance
    pub reward_ratio: f64,
}

/// Quality of a trade's reward ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardQuality {
    Excellent,
    Acceptable,
    Poor,
}

/// Risk calculator
#[derive(Debug, Clone, Default)]
pub struct RiskCalculator {
    config: RiskConfig,
}

impl RiskCalculator {
    /// Create new risk calculator
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    /// Calculate position size and reward ratio
    ///
    /// Fails with [`EngineError::InvalidInput`] when entry equals stop (no
    /// distance to size against), when balance or risk percentage is not
    /// positive, or when any input is not finite.
    pub fn calculate(&self, input: &RiskInput) -> Result<RiskCalculation> {
        let values = [
            input.account_balance,
            input.risk_percentage,
            input.entry_price,
            input.stop_loss,
            input.target_price,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(EngineError::invalid_input("risk inputs must be finite numbers"));
        }
        if input.account_balance <= 0.0 {
            return Err(EngineError::invalid_input(format!(
                "account balance must be positive, got {}",
                input.account_balance
            )));
        }
        if input.risk_percentage <= 0.0 {
            return Err(EngineError::invalid_input(format!(
                "risk percentage must be positive, got {}",
                input.risk_percentage
            )));
        }

        let pip_value = (input.entry_price - input.stop_loss).abs();
        if pip_value == 0.0 {
            return Err(EngineError::invalid_input(
                "entry price equals stop loss; cannot size a position without stop distance",
            ));
        }

        let risk_amount = input.account_balance * input.risk_percentage / 100.0;

        Ok(RiskCalculation {
            account_balance: input.account_balance,
            risk_percentage: input.risk_percentage,
            entry_price: input.entry_price,
            stop_loss: input.stop_loss,
            target_price: input.target_price,
            position_size: risk_amount / pip_value,
            risk_amount,
            pip_value,
            reward_ratio: (input.target_price - input.entry_price).abs() / pip_value,
        })
    }

    /// Classify a reward ratio: at least 2 is excellent, at least 1.5 acceptable
    pub fn classify(&self, reward_ratio: f64) -> RewardQuality {
        if reward_ratio >= self.config.excellent_reward_ratio {
            RewardQuality::Excellent
        } else if reward_ratio >= self.config.acceptable_reward_ratio {
            RewardQuality::Acceptable
        } else {
            RewardQuality::Poor
        }
    }
}
