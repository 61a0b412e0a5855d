//! Price series storage

use crate::data::PriceSeries;
use std::collections::HashMap;

/// In-memory store of rolling price histories, one per symbol
///
/// Owned by the caller; computations run on [`PriceSeriesStore::snapshot`]
/// copies so a refresh never observes a half-updated series.
#[derive(Debug, Clone)]
pub struct PriceSeriesStore {
    capacity: usize,
    series: HashMap<String, PriceSeries>,
    /// Insertion order of symbols, so baskets come out stable
    order: Vec<String>,
}

impl PriceSeriesStore {
    /// Create new store where every series keeps at most `capacity` samples
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            series: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Record a price for a symbol, creating its series on first use
    pub fn record(&mut self, symbol: &str, price: f64) {
        if !self.series.contains_key(symbol) {
            self.order.push(symbol.to_string());
        }
        let capacity = self.capacity;
        self.series
            .entry(symbol.to_string())
            .or_insert_with(|| PriceSeries::new(symbol, capacity))
            .push(price);
    }

    /// Get series for symbol
    pub fn series(&self, symbol: &str) -> Option<&PriceSeries> {
        self.series.get(symbol)
    }

    /// Get latest price for symbol
    pub fn latest_price(&self, symbol: &str) -> Option<f64> {
        self.series(symbol)?.latest()
    }

    /// Symbols in the order they were first recorded
    pub fn symbols(&self) -> &[String] {
        &self.order
    }

    /// Owned copy of every series, in insertion order
    pub fn snapshot(&self) -> Vec<PriceSeries> {
        self.order
            .iter()
            .filter_map(|symbol| self.series.get(symbol).cloned())
            .collect()
    }

    /// Clear all data
    pub fn clear(&mut self) {
        self.series.clear();
        self.order.clear();
    }

    /// Get number of tracked symbols
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Check if storage is empty
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
