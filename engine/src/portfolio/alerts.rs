//! Signal alert tracking
//!
//! [`AlertHistory`] is a plain context object owned by the caller. Records
//! loaded from elsewhere can be fed to [`AlertStatistics::from_records`]
//! without going through a history at all.

use crate::error::EngineError;
use crate::strategy::{Signal, SignalAction};
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of a closed alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertOutcome {
    Win,
    Loss,
    Breakeven,
}

impl AlertOutcome {
    /// Outcome from a profit figure
    pub fn from_pnl(pnl: f64) -> Self {
        if pnl > 0.0 {
            Self::Win
        } else if pnl < 0.0 {
            Self::Loss
        } else {
            Self::Breakeven
        }
    }
}

/// Result attached to a closed alert
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertResult {
    pub exit_price: f64,
    pub pnl: f64,
    pub outcome: AlertOutcome,
}

/// A signal alert and, once closed, its result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRecord {
    pub id: Uuid,
    pub symbol: String,
    pub action: SignalAction,
    pub confidence: f64,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub result: Option<AlertResult>,
}

impl AlertRecord {
    /// New open alert for a signal
    pub fn from_signal(signal: &Signal) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: signal.symbol.clone(),
            action: signal.action,
            confidence: signal.confidence,
            entry_price: signal.entry_price,
            stop_loss: signal.stop_loss,
            take_profit: signal.take_profit,
            created_at: signal.timestamp,
            closed_at: None,
            result: None,
        }
    }

    /// Check if alert has a result
    pub fn is_closed(&self) -> bool {
        self.result.is_some()
    }

    /// Whether `price` has reached the stop or the target
    ///
    /// Hold alerts never trigger.
    pub fn is_triggered(&self, price: f64) -> bool {
        match self.action {
            SignalAction::Buy => price <= self.stop_loss || price >= self.take_profit,
            SignalAction::Sell => price >= self.stop_loss || price <= self.take_profit,
            SignalAction::Hold => false,
        }
    }
}

/// Aggregate figures over a set of alerts
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertStatistics {
    pub total: usize,
    pub active: usize,
    pub closed: usize,
    pub wins: usize,
    pub losses: usize,
    /// `wins / closed * 100`, 0 when nothing is closed
    pub win_rate: f64,
    /// Sum of `result.pnl` over closed alerts
    pub total_pnl: f64,
}

impl AlertStatistics {
    /// Statistics over any collection of records
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a AlertRecord>) -> Self {
        let mut stats = Self::default();
        for record in records {
            stats.total += 1;
            match &record.result {
                Some(result) => {
                    stats.closed += 1;
                    stats.total_pnl += result.pnl;
                    match result.outcome {
                        AlertOutcome::Win => stats.wins += 1,
                        AlertOutcome::Loss => stats.losses += 1,
                        AlertOutcome::Breakeven => {}
                    }
                }
                None => stats.active += 1,
            }
        }

        stats.win_rate = if stats.closed == 0 {
            0.0
        } else {
            stats.wins as f64 / stats.closed as f64 * 100.0
        };
        stats
    }
}

/// In-memory alert history
#[derive(Debug, Clone, Default)]
pub struct AlertHistory {
    records: Vec<AlertRecord>,
}

impl AlertHistory {
    /// Create new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from previously stored records
    pub fn from_records(records: Vec<AlertRecord>) -> Self {
        Self { records }
    }

    /// Record an alert for a signal, returning its id
    pub fn record(&mut self, signal: &Signal) -> Uuid {
        let record = AlertRecord::from_signal(signal);
        let id = record.id;
        self.records.push(record);
        id
    }

    /// Close an alert at an exit price
    ///
    /// P&L is per unit: `exit - entry` for buys, `entry - exit` for sells.
    /// Hold alerts, unknown ids and already closed alerts are rejected.
    pub fn close(&mut self, id: Uuid, exit_price: f64) -> Result<AlertResult> {
        let record = self.open_record(id)?;
        let pnl = match record.action {
            SignalAction::Buy => exit_price - record.entry_price,
            SignalAction::Sell => record.entry_price - exit_price,
            SignalAction::Hold => {
                return Err(EngineError::invalid_input(format!("alert {} is a HOLD and cannot be closed", id)))
            }
        };
        Ok(Self::settle(record, exit_price, pnl))
    }

    /// Close every open alert on `symbol` whose stop or target `price` has reached
    pub fn close_triggered(&mut self, symbol: &str, price: f64) -> Result<Vec<AlertResult>> {
        let triggered: Vec<Uuid> = self
            .active()
            .filter(|r| r.symbol == symbol && r.is_triggered(price))
            .map(|r| r.id)
            .collect();

        triggered.into_iter().map(|id| self.close(id, price)).collect()
    }

    /// Close an alert with a P&L computed elsewhere (e.g. sized by quantity)
    pub fn close_with_pnl(&mut self, id: Uuid, exit_price: f64, pnl: f64) -> Result<AlertResult> {
        let record = self.open_record(id)?;
        Ok(Self::settle(record, exit_price, pnl))
    }

    /// Get alert by id
    pub fn get(&self, id: Uuid) -> Option<&AlertRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// All records, oldest first
    pub fn records(&self) -> &[AlertRecord] {
        &self.records
    }

    /// Alerts still open
    pub fn active(&self) -> impl Iterator<Item = &AlertRecord> {
        self.records.iter().filter(|r| !r.is_closed())
    }

    /// Aggregate statistics
    pub fn statistics(&self) -> AlertStatistics {
        AlertStatistics::from_records(&self.records)
    }

    /// Get number of alerts
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if history is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn open_record(&mut self, id: Uuid) -> Result<&mut AlertRecord> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| EngineError::invalid_input(format!("unknown alert {}", id)))?;
        if record.is_closed() {
            return Err(EngineError::invalid_input(format!("alert {} is already closed", id)));
        }
        Ok(record)
    }

    fn settle(record: &mut AlertRecord, exit_price: f64, pnl: f64) -> AlertResult {
        let result = AlertResult {
            exit_price,
            pnl,
            outcome: AlertOutcome::from_pnl(pnl),
        };
        record.closed_at = Some(Utc::now());
        record.result = Some(result);
        result
    }
}
