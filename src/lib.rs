pub mod analyzer;
pub mod config;
pub mod model;
pub mod report;
pub mod roster;
pub mod source;
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerOptions, CohortAnalyzer};
pub use model::{AnalysisOutcome, CohortAnalysis, RawRecord, RiskLevel, ScoredRecord};
