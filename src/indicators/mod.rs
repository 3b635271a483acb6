//! Rolling trend indicators derived from raw price history.

pub mod calculator;
pub mod error;
pub mod sma;

pub use calculator::{IndicatorCalculator, MIN_CANDLES};
pub use error::IndicatorError;
pub use sma::rolling_sma;
