//! Bounded price series

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Append-only price history for one instrument
///
/// Holds at most `capacity` samples; pushing beyond that drops the oldest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Symbol (e.g., "EUR/USD")
    pub symbol: String,
    capacity: usize,
    prices: VecDeque<f64>,
}

impl PriceSeries {
    /// Create new empty series; a zero capacity is bumped to one
    pub fn new(symbol: impl Into<String>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            symbol: symbol.into(),
            capacity,
            prices: VecDeque::with_capacity(capacity),
        }
    }

    /// Create from existing prices, keeping only the newest `capacity`
    pub fn from_prices(symbol: impl Into<String>, capacity: usize, prices: &[f64]) -> Self {
        let mut series = Self::new(symbol, capacity);
        series.extend(prices.iter().copied());
        series
    }

    /// Append a price sample
    pub fn push(&mut self, price: f64) {
        if self.prices.len() == self.capacity {
            self.prices.pop_front();
        }
        self.prices.push_back(price);
    }

    /// Append several samples, oldest first
    pub fn extend(&mut self, prices: impl IntoIterator<Item = f64>) {
        for price in prices {
            self.push(price);
        }
    }

    /// Get number of samples
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Check if series is empty
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Maximum number of samples retained
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Latest price
    pub fn latest(&self) -> Option<f64> {
        self.prices.back().copied()
    }

    /// Oldest retained price
    pub fn first(&self) -> Option<f64> {
        self.prices.front().copied()
    }

    /// Prices as a contiguous vector, oldest first
    pub fn prices(&self) -> Vec<f64> {
        self.prices.iter().copied().collect()
    }

    /// Percent change from the oldest to the latest sample
    pub fn change_percent(&self) -> f64 {
        match (self.first(), self.latest()) {
            (Some(first), Some(last)) if first != 0.0 => (last - first) / first * 100.0,
            _ => 0.0,
        }
    }

    /// Simple period returns; pairs with a zero base price are skipped
    pub fn returns(&self) -> Vec<f64> {
        self.prices
            .iter()
            .zip(self.prices.iter().skip(1))
            .filter(|(prev, _)| **prev != 0.0)
            .map(|(prev, next)| (next - prev) / prev)
            .collect()
    }
}
