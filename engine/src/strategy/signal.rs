//! Trading signal model

use crate::indicators::Indicator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recommended action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalAction {
    /// Buy/Long signal
    Buy,
    /// Sell/Short signal
    Sell,
    /// Hold/No action
    Hold,
}

impl fmt::Display for SignalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::Hold => "HOLD",
        };
        f.write_str(label)
    }
}

/// Risk attached to a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Where a signal came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Local heuristic generator
    Heuristic,
    /// External AI analyst
    External,
}

/// Trading signal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    /// Symbol (e.g., "EUR/USD")
    pub symbol: String,
    /// Recommended action
    pub action: SignalAction,
    /// Confidence in `0..=100`
    pub confidence: f64,
    /// Entry price
    pub entry_price: f64,
    /// Stop loss price
    pub stop_loss: f64,
    /// Take profit price
    pub take_profit: f64,
    /// Risk level
    pub risk_level: RiskLevel,
    /// Reason for signal
    pub reasoning: String,
    /// Indicators the decision was based on
    pub indicators: Vec<Indicator>,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    /// Source of the signal
    pub provenance: Provenance,
}

impl Signal {
    /// Distance between entry and stop loss
    pub fn risk_distance(&self) -> f64 {
        (self.entry_price - self.stop_loss).abs()
    }

    /// Distance between entry and take profit
    pub fn reward_distance(&self) -> f64 {
        (self.take_profit - self.entry_price).abs()
    }

    /// Reward distance over risk distance; 0 when there is no stop distance
    pub fn reward_ratio(&self) -> f64 {
        let risk = self.risk_distance();
        if risk == 0.0 {
            return 0.0;
        }
        self.reward_distance() / risk
    }

    /// Buy or sell, as opposed to hold
    pub fn is_actionable(&self) -> bool {
        self.action != SignalAction::Hold
    }

    /// Mark the signal as coming from the given source
    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }
}
