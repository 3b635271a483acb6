//! Weighted trend-template scoring.

pub mod criteria;
pub mod evaluator;

pub use criteria::Criterion;
pub use evaluator::{
    CriteriaReport, CriterionCheck, ScoreError, ScoreEvaluator, TREND_REFERENCE_DAYS,
    YEAR_LOW_MARGIN, YEAR_LOW_WINDOW,
};
