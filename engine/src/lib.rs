//! Market-Engine: analysis and signal calculations for forex/crypto dashboards
//!
//! This crate turns rolling price histories into the numbers a market
//! dashboard renders:
//! - [ta-rs](https://github.com/greyblake/ta-rs) moving averages and deviation
//!   back the technical indicators
//! - every computation is synchronous and works on a caller-owned snapshot
//!
//! # Features
//!
//! - **Price Series**: bounded per-instrument price history
//! - **Technical Indicators**: RSI, MACD, Bollinger Bands
//! - **Market Analysis**: sentiment, currency strength, pair correlation
//! - **Signal Generation**: heuristic BUY/SELL/HOLD with entry/stop/target
//! - **Portfolio**: position sizing, reward ratio and alert statistics
//! - **Economic Events**: impact and direction of calendar events and news
//!
//! # Example
//!
//! ```no_run
//! use market_engine::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let engine = MarketEngine::new(EngineConfig::default());
//!     let mut series = PriceSeries::new("EUR/USD", 100);
//!     for i in 0..40 {
//!         series.push(1.0850 + i as f64 * 0.0001);
//!     }
//!     let snapshot = MarketSnapshot::from_series(&series).expect("series is not empty");
//!     let signal = engine.generate_signal(&snapshot, &series, &mut StdRandom::from_entropy());
//!     let risk = engine.calculate_risk(&RiskInput::from_signal(10_000.0, 2.0, &signal))?;
//!     println!("{:?} size={:.0}", signal.action, risk.position_size);
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod events;
pub mod indicators;
pub mod portfolio;
pub mod random;
pub mod strategy;

// Re-export commonly used types
pub mod prelude {
    pub use crate::analysis::*;
    pub use crate::config::*;
    pub use crate::data::*;
    pub use crate::engine::*;
    pub use crate::error::*;
    pub use crate::events::*;
    pub use crate::indicators::*;
    pub use crate::portfolio::*;
    pub use crate::random::*;
    pub use crate::strategy::*;

    pub use crate::Result;
}

/// Result type alias
pub type Result<T> = std::result::Result<T, error::EngineError>;
