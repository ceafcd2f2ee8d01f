// Analyzer module: aggregates submodules for the stages of the analysis.

pub mod cohort;
pub mod columns;
pub mod risk;
pub mod scoring;
pub mod synthetic;

use crate::model::{
    AnalysisDiagnostics, AnalysisError, AnalysisOutcome, CohortAnalysis, RawRecord, ScoredRecord,
};
use columns::discover_numeric_columns;
use risk::{RiskTally, RiskThresholds};
use scoring::{RowScore, score_record};
use synthetic::{FixedSynthetic, SyntheticMetricsProvider};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyzerOptions {
    /// Row used to decide which columns are numeric. Out-of-range values
    /// fall back to row 0.
    pub sample_row: usize,
}

/// Trait defining the interface for a dataset analyzer.
pub trait Analyzer {
    /// Runs the full pipeline. The records are consumed; the returned
    /// `ScoredRecord`s map 1:1 onto them in the same order. Callers that
    /// still need the raw rows must clone them first.
    fn try_analyze(&mut self, records: Vec<RawRecord>) -> Result<AnalysisOutcome, AnalysisError>;

    /// Like `try_analyze`, but an empty dataset yields the all-zero outcome.
    fn analyze(&mut self, records: Vec<RawRecord>) -> AnalysisOutcome {
        match self.try_analyze(records) {
            Ok(outcome) => outcome,
            Err(AnalysisError::EmptyDataset) => AnalysisOutcome::empty(),
        }
    }
}

/// Implementation of the cohort analyzer.
pub struct CohortAnalyzer {
    options: AnalyzerOptions,
    synthetic: Box<dyn SyntheticMetricsProvider + Send>,
}

impl CohortAnalyzer {
    pub fn new(
        options: AnalyzerOptions,
        synthetic: impl SyntheticMetricsProvider + Send + 'static,
    ) -> Self {
        Self {
            options,
            synthetic: Box::new(synthetic),
        }
    }

    fn sample_index(&self, len: usize) -> usize {
        if self.options.sample_row < len {
            self.options.sample_row
        } else {
            warn!(
                "Sample row {} is out of range for {} records, using row 0",
                self.options.sample_row, len
            );
            0
        }
    }
}

impl Default for CohortAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerOptions::default(), FixedSynthetic)
    }
}

/// True when `row` has exactly the columns of `sample`, in any order.
fn same_columns(row: &RawRecord, sample: &RawRecord) -> bool {
    row.len() == sample.len() && sample.columns().all(|c| row.contains(c))
}

impl Analyzer for CohortAnalyzer {
    fn try_analyze(&mut self, records: Vec<RawRecord>) -> Result<AnalysisOutcome, AnalysisError> {
        if records.is_empty() {
            return Err(AnalysisError::EmptyDataset);
        }

        let total = records.len();
        let sampled_row = self.sample_index(total);
        let sample = &records[sampled_row];
        let numeric_columns = discover_numeric_columns(sample);
        debug!("Numeric columns from row {}: {:?}", sampled_row, numeric_columns);

        let mut diagnostics = AnalysisDiagnostics {
            sampled_row,
            ..AnalysisDiagnostics::default()
        };

        let mut row_scores: Vec<RowScore> = Vec::with_capacity(total);
        for (index, record) in records.iter().enumerate() {
            if !same_columns(record, sample) {
                debug!("Row {} has a different column set than row {}", index, sampled_row);
                diagnostics.heterogeneous_rows += 1;
            }
            let score = score_record(record, &numeric_columns);
            diagnostics.unparsable_cells += score.unparsable;
            diagnostics.missing_cells += score.missing;
            if score.value().is_none() {
                diagnostics.unscored_rows += 1;
            }
            row_scores.push(score);
        }

        let defined: Vec<f64> = row_scores.iter().filter_map(RowScore::value).collect();
        let average = cohort::average_performance(&defined);
        let thresholds = RiskThresholds::from_average(average);

        // Tiers are counted in the same pass that assigns them.
        let mut tally = RiskTally::default();
        let scored: Vec<ScoredRecord> = records
            .into_iter()
            .zip(row_scores)
            .map(|(record, score)| {
                let overall_score = score.overall_score();
                let risk_level = thresholds.classify(overall_score);
                tally.record(risk_level);
                ScoredRecord {
                    record,
                    overall_score,
                    risk_level,
                    valid_fields: score.valid(),
                }
            })
            .collect();

        let synthetic = self.synthetic.generate(average);
        let analysis = cohort::aggregate(total, average, &defined, &tally, synthetic);
        diagnostics.numeric_columns = numeric_columns;

        Ok(AnalysisOutcome {
            analysis,
            records: scored,
            diagnostics,
        })
    }
}

impl AnalysisOutcome {
    pub fn empty() -> Self {
        Self {
            analysis: CohortAnalysis::empty(),
            records: Vec::new(),
            diagnostics: AnalysisDiagnostics::default(),
        }
    }
}
