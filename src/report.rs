use crate::analyzer::synthetic::SYNTHETIC_FIELDS;
use crate::model::{
    AnalysisDiagnostics, AnalysisOutcome, CohortAnalysis, ReportError, ScoredRecord,
};
use crate::roster::{self, RosterQuery};
use crate::utils::to_kebab_case;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Structure written to disk for one analysed dataset.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport<'a> {
    pub dataset: &'a str,
    pub generated_at: DateTime<Utc>,
    /// Fields of `analysis` that carry placeholder values.
    pub synthetic_fields: &'static [&'static str],
    pub analysis: &'a CohortAnalysis,
    pub diagnostics: &'a AnalysisDiagnostics,
    pub records: &'a [ScoredRecord],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roster: Option<Vec<&'a ScoredRecord>>,
}

impl<'a> AnalysisReport<'a> {
    pub fn new(
        dataset: &'a str,
        outcome: &'a AnalysisOutcome,
        roster_query: Option<&RosterQuery>,
    ) -> Self {
        Self {
            dataset,
            generated_at: Utc::now(),
            synthetic_fields: &SYNTHETIC_FIELDS,
            analysis: &outcome.analysis,
            diagnostics: &outcome.diagnostics,
            records: &outcome.records,
            roster: roster_query.map(|q| roster::query(&outcome.records, q)),
        }
    }
}

pub fn report_path(output_dir: &Path, dataset: &str) -> PathBuf {
    let stem = to_kebab_case(dataset);
    let stem = if stem.is_empty() { "dataset".to_string() } else { stem };
    output_dir.join(format!("{}.json", stem))
}

/// Writes `report` as pretty JSON under `output_dir`, creating it if needed.
pub async fn write_report(
    output_dir: &Path,
    report: &AnalysisReport<'_>,
) -> Result<PathBuf, ReportError> {
    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|source| ReportError::Io {
            path: output_dir.to_path_buf(),
            source,
        })?;
    let path = report_path(output_dir, report.dataset);
    let body = serde_json::to_vec_pretty(report)?;
    tokio::fs::write(&path, body)
        .await
        .map_err(|source| ReportError::Io {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}

/// Logs the headline figures of an analysis.
pub fn log_summary(dataset: &str, outcome: &AnalysisOutcome) {
    let analysis = &outcome.analysis;
    let [low, medium, high] = analysis.risk_distribution;
    info!(
        "[{}] Students: {} | Average: {:.2} | Risk low/medium/high: {}/{}/{}",
        dataset, analysis.total_students, analysis.average_performance, low, medium, high
    );
    info!(
        "[{}] Top performers: {}% | Needs attention: {}% | Numeric columns: {:?}",
        dataset,
        analysis.top_performers,
        analysis.needs_attention,
        outcome.diagnostics.numeric_columns
    );
    if outcome.diagnostics.unscored_rows > 0 || outcome.diagnostics.unparsable_cells > 0 {
        info!(
            "[{}] {} rows without a valid score, {} unparsable cells",
            dataset, outcome.diagnostics.unscored_rows, outcome.diagnostics.unparsable_cells
        );
    }
    info!("[{}] {}", dataset, analysis.performance_insight);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_path_uses_kebab_stem() {
        let path = report_path(Path::new("out"), "Spring Term 2024");
        assert_eq!(path, PathBuf::from("out/spring-term-2024.json"));
        assert_eq!(report_path(Path::new("out"), "!!"), PathBuf::from("out/dataset.json"));
    }
}
