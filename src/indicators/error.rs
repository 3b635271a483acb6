//! Indicator computation errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndicatorError {
    /// The series is too short for the largest configured window. Callers
    /// treat this as "not evaluable" for the asset, not as a fault.
    #[error("insufficient data: {actual} candles, {required} required")]
    InsufficientData { required: usize, actual: usize },
}
