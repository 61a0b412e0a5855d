//! Portfolio management module
//!
//! Position sizing for a proposed trade and statistics over signal alerts.

pub mod alerts;
pub mod risk;

pub use alerts::*;
pub use risk::*;
