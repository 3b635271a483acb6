//! Daily trend-template screening for a universe of traded assets.
//!
//! The engine fetches daily candles per symbol, derives the template's
//! moving averages, scores each asset against six weighted criteria, and
//! ranks the universe by composite score under bounded concurrency.
//!
//! Layers, leaves first:
//! - [`models`]: candles, validated price series, indicator sets, results
//! - [`indicators`]: rolling averages over a price series
//! - [`scoring`]: the fixed criteria and the weighted evaluation
//! - [`analysis`]: the per-asset pipeline plus commentary collaborators
//! - [`scanner`]: bounded worker-pool fan-out and ranking
//! - [`services`]: market data providers (Upbit REST, in-memory)

pub mod analysis;
pub mod config;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod scanner;
pub mod scoring;
pub mod services;

pub use analysis::AssetAnalyzer;
pub use config::{Config, ScanConfig};
pub use models::{AnalysisOutcome, AnalysisResult, ScanOutcome};
pub use scanner::{ScanError, ScanProgress, UniverseScanner};
pub use scoring::{Criterion, ScoreEvaluator};
pub use services::{MarketDataProvider, UpbitProvider};
