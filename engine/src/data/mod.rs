//! Data management module
//!
//! Handles rolling price histories and the latest quote per instrument.

pub mod quote;
pub mod series;
pub mod storage;

pub use quote::*;
pub use series::*;
pub use storage::*;
