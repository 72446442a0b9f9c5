// Analyzer module: liquidity derivation, alignment and statistics.

pub mod aligner;
pub mod correlation;
pub mod liquidity;
pub mod statistics;

pub use aligner::align;
pub use correlation::CorrelationAnalyzer;
pub use liquidity::net_liquidity;
pub use statistics::{LatestSnapshot, Statistics};
