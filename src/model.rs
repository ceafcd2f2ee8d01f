// Core structs: RawRecord, ScoredRecord, CohortAnalysis
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;
use thiserror::Error;

/// One input row: column name -> raw cell value, in source key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    cells: Map<String, Value>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let cells = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { cells }
    }

    /// Builder-style insert, mostly useful when assembling fixtures.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.cells.insert(column.into(), value.into());
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.cells.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(cells: Map<String, Value>) -> Self {
        Self { cells }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// A RawRecord annotated with its composite score and risk tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: RawRecord,
    pub overall_score: f64,
    pub risk_level: RiskLevel,
    /// Number of numeric cells that contributed to `overall_score`.
    #[serde(skip)]
    pub valid_fields: usize,
}

impl ScoredRecord {
    /// False when no numeric cell parsed and the score fell back to 0.
    pub fn has_score(&self) -> bool {
        self.valid_fields > 0
    }
}

/// Labelled series, the shape chart consumers read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series<T> {
    pub labels: Vec<String>,
    pub data: Vec<T>,
}

/// Cohort-wide aggregate. Field names are read by presentation code and
/// `risk_distribution` is indexed positionally as `[low, medium, high]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortAnalysis {
    pub total_students: usize,
    pub average_performance: f64,
    pub at_risk_students: usize,
    pub performance_distribution: Series<usize>,
    pub risk_distribution: [usize; 3],
    pub top_performers: u32,
    pub needs_attention: u32,
    pub performance_insight: String,
    /// Synthetic placeholder, not derived from the data.
    pub performance_trend: Series<f64>,
    /// Synthetic placeholder, not derived from the data.
    pub skill_coverage: Option<u32>,
    /// Synthetic placeholder, not derived from the data.
    pub improvement_rate: Option<u32>,
}

/// Side information about how the engine read the dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDiagnostics {
    pub sampled_row: usize,
    pub numeric_columns: Vec<String>,
    pub unparsable_cells: usize,
    pub missing_cells: usize,
    pub unscored_rows: usize,
    pub heterogeneous_rows: usize,
}

/// Everything one engine invocation produces.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    pub analysis: CohortAnalysis,
    pub records: Vec<ScoredRecord>,
    pub diagnostics: AnalysisDiagnostics,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("dataset contains no records")]
    EmptyDataset,
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset {path} is not a list of records: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("dataset {path}, line {line}: {source}")]
    Line {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("report serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_record_keeps_source_key_order() {
        let record: RawRecord =
            serde_json::from_value(json!({"zeta": "1", "alpha": "2", "mid": null})).unwrap();
        let columns: Vec<&str> = record.columns().collect();
        assert_eq!(columns, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn scored_record_serializes_annotations_next_to_cells() {
        let scored = ScoredRecord {
            record: RawRecord::new().with("name", "Ada").with("math", "80"),
            overall_score: 80.0,
            risk_level: RiskLevel::Medium,
            valid_fields: 1,
        };
        let value = serde_json::to_value(&scored).unwrap();
        assert_eq!(
            value,
            json!({"name": "Ada", "math": "80", "overallScore": 80.0, "riskLevel": "medium"})
        );
    }

    #[test]
    fn risk_level_serializes_lowercase() {
        assert_eq!(serde_json::to_value(RiskLevel::High).unwrap(), json!("high"));
        assert_eq!(RiskLevel::Low.as_str(), "low");
    }
}
