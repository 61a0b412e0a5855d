//! Analyst: the asynchronous edge of the market engine
//!
//! Wraps the optional external AI analyst and the refresh scheduler around the
//! synchronous calculations in `market-engine`.

pub mod config;
pub mod services;

pub use config::AnalystConfig;
pub use services::{AiAnalystService, SignalService, SimulatedFeed};
