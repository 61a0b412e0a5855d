//! SMA (Simple Moving Average) and standard deviation helpers

use ta::indicators::{SimpleMovingAverage, StandardDeviation};
use ta::Next;

/// SMA of the last `period` values; `None` when there are fewer samples
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    let window = tail(values, period)?;
    let mut inner = SimpleMovingAverage::new(period).ok()?;
    window.iter().map(|&value| inner.next(value)).last()
}

/// Population standard deviation of the last `period` values
pub fn std_dev(values: &[f64], period: usize) -> Option<f64> {
    let window = tail(values, period)?;
    let mut inner = StandardDeviation::new(period).ok()?;
    window.iter().map(|&value| inner.next(value)).last()
}

fn tail(values: &[f64], period: usize) -> Option<&[f64]> {
    if period == 0 || values.len() < period {
        return None;
    }
    Some(&values[values.len() - period..])
}
