//! Fans the per-asset analysis out across the universe and ranks the
//! qualifying results.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::analysis::analyzer::AssetAnalyzer;
use crate::config::ScanConfig;
use crate::models::analysis::{AnalysisOutcome, AnalysisResult, ScanOutcome};
use crate::scanner::pool::WorkerPool;
use crate::scoring::evaluator::ScoreError;
use crate::services::market_data::{FetchError, MarketDataProvider};

/// Completed-count out of the universe total. Updated on every
/// resolution, success or failure, so long scans stay observably alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanProgress {
    pub completed: usize,
    pub total: usize,
}

impl ScanProgress {
    pub fn start(total: usize) -> Self {
        Self {
            completed: 0,
            total,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.completed >= self.total
    }
}

#[derive(Debug, Error)]
pub enum ScanError {
    /// Evaluation contract violation bubbled up from a worker; a
    /// programming error, never a data-quality condition.
    #[error(transparent)]
    Evaluation(#[from] ScoreError),
    /// Listing the universe itself failed.
    #[error("failed to list universe symbols: {0}")]
    Universe(#[from] FetchError),
}

/// Scans a symbol universe under bounded concurrency.
///
/// The scanner holds no state across invocations; every call owns its
/// pool, its progress channel, and its collected results.
pub struct UniverseScanner {
    provider: Arc<dyn MarketDataProvider + Send + Sync>,
    config: ScanConfig,
}

impl UniverseScanner {
    pub fn new(provider: Arc<dyn MarketDataProvider + Send + Sync>, config: ScanConfig) -> Self {
        Self { provider, config }
    }

    /// List the universe from the provider, then scan it.
    pub async fn scan_universe(&self) -> Result<ScanOutcome, ScanError> {
        let symbols = self.provider.list_symbols().await?;
        self.scan(symbols).await
    }

    /// Scan the given symbols without external progress observation.
    pub async fn scan(&self, universe: Vec<String>) -> Result<ScanOutcome, ScanError> {
        let (progress_tx, _progress_rx) = watch::channel(ScanProgress::start(universe.len()));
        self.scan_with_progress(universe, progress_tx).await
    }

    /// Scan the given symbols, publishing progress after every resolved
    /// asset.
    ///
    /// One asset's fetch failure or ineligibility never aborts the scan;
    /// both are counted and excluded from the ranking. An empty universe
    /// yields an empty outcome.
    pub async fn scan_with_progress(
        &self,
        universe: Vec<String>,
        progress: watch::Sender<ScanProgress>,
    ) -> Result<ScanOutcome, ScanError> {
        let started = Instant::now();
        let total = universe.len();
        let _ = progress.send(ScanProgress::start(total));

        info!(
            universe = total,
            workers = self.config.workers,
            "starting universe scan"
        );

        let analyzer = Arc::new(AssetAnalyzer::new(
            Arc::clone(&self.provider),
            self.config.lookback_days,
        ));
        let tasks: Vec<(usize, String)> = universe.into_iter().enumerate().collect();
        let pool = WorkerPool::new(self.config.workers);
        let mut receiver = pool.dispatch(tasks, move |(index, symbol): (usize, String)| {
            let analyzer = Arc::clone(&analyzer);
            async move { (index, analyzer.analyze(&symbol).await) }
        });

        // the collector is the sole owner of the progress counter
        let mut completed = 0usize;
        let mut collected: Vec<(usize, AnalysisOutcome)> = Vec::with_capacity(total);
        let mut violation: Option<ScoreError> = None;

        while let Some((index, resolved)) = receiver.recv().await {
            completed += 1;
            let _ = progress.send(ScanProgress { completed, total });

            match resolved {
                Ok(outcome) => {
                    log_outcome(&outcome);
                    collected.push((index, outcome));
                }
                Err(error) => {
                    // remember the violation; remaining read-only
                    // analyses still drain
                    warn!(%error, "evaluation contract violated");
                    violation.get_or_insert(error);
                }
            }
        }

        if let Some(error) = violation {
            return Err(error.into());
        }

        // restore universe enumeration order before the stable score sort
        collected.sort_by_key(|(index, _)| *index);

        let mut results: Vec<AnalysisResult> = Vec::new();
        let mut fetch_failures = 0usize;
        let mut ineligible = 0usize;
        for (_, outcome) in collected {
            match outcome {
                AnalysisOutcome::Qualified(result) => results.push(result),
                AnalysisOutcome::Ineligible { .. } => ineligible += 1,
                AnalysisOutcome::FetchFailed { .. } => fetch_failures += 1,
            }
        }

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        let outcome = ScanOutcome {
            results,
            universe_size: total,
            fetch_failures,
            ineligible,
            elapsed: started.elapsed(),
        };

        info!(
            qualified = outcome.results.len(),
            ineligible = outcome.ineligible,
            fetch_failures = outcome.fetch_failures,
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            "universe scan finished"
        );

        Ok(outcome)
    }
}

fn log_outcome(outcome: &AnalysisOutcome) {
    match outcome {
        AnalysisOutcome::Qualified(result) => {
            debug!(symbol = %result.symbol, score = result.score, "asset qualified");
        }
        AnalysisOutcome::Ineligible { symbol, reason } => {
            debug!(%symbol, %reason, "asset ineligible");
        }
        AnalysisOutcome::FetchFailed { symbol, error } => {
            warn!(%symbol, %error, "fetch failed, skipping asset");
        }
    }
}
