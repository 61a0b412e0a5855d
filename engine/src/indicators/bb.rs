//! Bollinger Bands indicator

use crate::config::IndicatorConfig;
use crate::indicators::{sma, std_dev, Indicator, IndicatorSignal};

/// Strength reported when price is outside the bands
pub const OUTSIDE_BAND_STRENGTH: f64 = 80.0;
/// Strength reported when price is inside the bands
pub const INSIDE_BAND_STRENGTH: f64 = 30.0;

/// Bollinger Bands result structure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerOutput {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    /// Position of the latest price within the band, in percent
    pub percent_b: f64,
}

/// Bands around the SMA; `None` with fewer than `bollinger_period` samples
pub fn bollinger_bands(prices: &[f64], config: &IndicatorConfig) -> Option<BollingerOutput> {
    let middle = sma(prices, config.bollinger_period)?;
    let deviation = std_dev(prices, config.bollinger_period)?;
    let price = *prices.last()?;

    let upper = middle + config.bollinger_std_dev * deviation;
    let lower = middle - config.bollinger_std_dev * deviation;
    let width = upper - lower;
    let percent_b = if width > 0.0 {
        (price - lower) / width * 100.0
    } else {
        50.0
    };

    Some(BollingerOutput {
        upper,
        middle,
        lower,
        percent_b,
    })
}

/// Bollinger reading; strength is two-tier (outside vs inside the bands)
pub fn bollinger_indicator(prices: &[f64], config: &IndicatorConfig) -> Indicator {
    let Some(bands) = bollinger_bands(prices, config) else {
        return Indicator::new(
            "Bollinger Bands",
            50.0,
            IndicatorSignal::Neutral,
            0.0,
            format!("Bollinger Bands need {} samples, have {}", config.bollinger_period, prices.len()),
        );
    };

    let price = prices.last().copied().unwrap_or(bands.middle);
    let (signal, strength, description) = if price > bands.upper {
        (
            IndicatorSignal::Bearish,
            OUTSIDE_BAND_STRENGTH,
            format!("Price {:.5} above upper band {:.5}", price, bands.upper),
        )
    } else if price < bands.lower {
        (
            IndicatorSignal::Bullish,
            OUTSIDE_BAND_STRENGTH,
            format!("Price {:.5} below lower band {:.5}", price, bands.lower),
        )
    } else {
        (
            IndicatorSignal::Neutral,
            INSIDE_BAND_STRENGTH,
            format!("Price within bands ({:.1}% of width)", bands.percent_b),
        )
    };

    Indicator::new("Bollinger Bands", bands.percent_b, signal, strength, description)
}
