//! Strategy engine module
//!
//! Provides the trading signal model, the heuristic signal generator and
//! signal validation.

pub mod generator;
pub mod signal;
pub mod validator;

pub use generator::*;
pub use signal::*;
pub use validator::*;
