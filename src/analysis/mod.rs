//! Per-asset analysis pipeline and its collaborators.

pub mod analyzer;
pub mod characteristics;
pub mod opinion;

pub use analyzer::AssetAnalyzer;
pub use characteristics::{LONG_VOLUME_WINDOW, SHORT_VOLUME_WINDOW};
pub use opinion::{HeuristicOpinion, OpinionProvider, StaticOpinionTable};
