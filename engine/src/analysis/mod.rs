//! Market analysis module
//!
//! Aggregates indicators and baskets of instruments into the summaries shown
//! on sentiment, strength and correlation screens.

pub mod correlation;
pub mod sentiment;
pub mod strength;

pub use correlation::*;
pub use sentiment::*;
pub use strength::*;
