//! Concurrent fan-out of the analysis across the asset universe.

pub mod pool;
pub mod universe;

pub use pool::WorkerPool;
pub use universe::{ScanError, ScanProgress, UniverseScanner};
