//! Technical indicator implementations.

pub mod rsi;
pub mod sma;
pub mod vwap;

pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
pub use vwap::calculate_vwap;
