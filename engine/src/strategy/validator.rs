//! Signal validation

use crate::error::EngineError;
use crate::strategy::{Signal, SignalAction};
use crate::Result;

/// Signal validator
pub struct SignalValidator;

impl SignalValidator {
    /// Validate signal
    ///
    /// Confidence must lie in `0..=100`, prices must be finite and positive,
    /// and for buys and sells the stop and target must sit on the correct side
    /// of the entry.
    pub fn validate(signal: &Signal) -> Result<()> {
        if !(0.0..=100.0).contains(&signal.confidence) {
            return Err(EngineError::invalid_input(format!(
                "confidence {} outside 0..=100",
                signal.confidence
            )));
        }

        for (label, price) in [
            ("entry price", signal.entry_price),
            ("stop loss", signal.stop_loss),
            ("take profit", signal.take_profit),
        ] {
            if !price.is_finite() || price <= 0.0 {
                return Err(EngineError::invalid_input(format!("{} {} is not a positive price", label, price)));
            }
        }

        let (entry, stop, target) = (signal.entry_price, signal.stop_loss, signal.take_profit);
        match signal.action {
            SignalAction::Buy if !(stop < entry && entry < target) => Err(EngineError::invalid_input(format!(
                "BUY needs stop < entry < target, got {} / {} / {}",
                stop, entry, target
            ))),
            SignalAction::Sell if !(target < entry && entry < stop) => Err(EngineError::invalid_input(format!(
                "SELL needs target < entry < stop, got {} / {} / {}",
                target, entry, stop
            ))),
            _ => Ok(()),
        }
    }

    /// Check if signal is actionable
    pub fn is_actionable(signal: &Signal, min_confidence: f64) -> bool {
        Self::validate(signal).is_ok()
            && signal.confidence >= min_confidence
            && signal.is_actionable()
    }

    /// Whether a signal agrees with the heuristic baseline
    ///
    /// Holding always agrees; otherwise the actions must match.
    pub fn agrees_with(signal: &Signal, baseline: &Signal) -> bool {
        signal.action == SignalAction::Hold
            || baseline.action == SignalAction::Hold
            || signal.action == baseline.action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{Provenance, RiskLevel};
    use chrono::Utc;

    fn signal(action: SignalAction, confidence: f64, entry: f64, stop: f64, target: f64) -> Signal {
        Signal {
            symbol: "EUR/USD".to_string(),
            action,
            confidence,
            entry_price: entry,
            stop_loss: stop,
            take_profit: target,
            risk_level: RiskLevel::Medium,
            reasoning: String::new(),
            indicators: Vec::new(),
            timestamp: Utc::now(),
            provenance: Provenance::External,
        }
    }

    #[test]
    fn test_validate_sides() {
        assert!(SignalValidator::validate(&signal(SignalAction::Buy, 70.0, 1.0, 0.99, 1.02)).is_ok());
        assert!(SignalValidator::validate(&signal(SignalAction::Buy, 70.0, 1.0, 1.01, 1.02)).is_err());
        assert!(SignalValidator::validate(&signal(SignalAction::Sell, 70.0, 1.0, 1.01, 0.98)).is_ok());
        assert!(SignalValidator::validate(&signal(SignalAction::Sell, 70.0, 1.0, 0.99, 0.98)).is_err());
        assert!(SignalValidator::validate(&signal(SignalAction::Hold, 50.0, 1.0, 1.01, 0.98)).is_ok());
    }

    #[test]
    fn test_validate_ranges() {
        assert!(SignalValidator::validate(&signal(SignalAction::Buy, 120.0, 1.0, 0.99, 1.02)).is_err());
        assert!(SignalValidator::validate(&signal(SignalAction::Buy, 70.0, 0.0, 0.99, 1.02)).is_err());
        assert!(SignalValidator::validate(&signal(SignalAction::Buy, 70.0, 1.0, f64::NAN, 1.02)).is_err());
    }

    #[test]
    fn test_actionable_and_agreement() {
        let buy = signal(SignalAction::Buy, 70.0, 1.0, 0.99, 1.02);
        let sell = signal(SignalAction::Sell, 70.0, 1.0, 1.01, 0.98);
        let hold = signal(SignalAction::Hold, 90.0, 1.0, 0.99, 1.02);

        assert!(SignalValidator::is_actionable(&buy, 60.0));
        assert!(!SignalValidator::is_actionable(&buy, 80.0));
        assert!(!SignalValidator::is_actionable(&hold, 10.0));

        assert!(SignalValidator::agrees_with(&buy, &buy));
        assert!(SignalValidator::agrees_with(&hold, &sell));
        assert!(!SignalValidator::agrees_with(&buy, &sell));
    }
}
