use crate::analyzer::columns::{is_blank, numeric_value};
use crate::model::RawRecord;
use crate::utils::Mean;
use tracing::debug;

/// Accumulated numeric cells of one row.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RowScore {
    pub cells: Mean,
    /// Present but not parseable as a finite number.
    pub unparsable: usize,
    /// Absent, `null` or blank.
    pub missing: usize,
}

impl RowScore {
    /// Number of cells that parsed.
    pub fn valid(&self) -> usize {
        self.cells.count()
    }

    /// Mean of the valid cells, `None` when there were none.
    pub fn value(&self) -> Option<f64> {
        self.cells.value()
    }

    /// Mean of the valid cells, 0 when there were none.
    pub fn overall_score(&self) -> f64 {
        self.value().unwrap_or(0.0)
    }
}

/// Scores `record` over `columns`. Cells that fail to parse are skipped.
pub fn score_record(record: &RawRecord, columns: &[String]) -> RowScore {
    let mut score = RowScore::default();
    for column in columns {
        match record.get(column) {
            None => score.missing += 1,
            Some(value) if is_blank(value) => score.missing += 1,
            Some(value) => match numeric_value(value) {
                Some(v) => score.cells.push(v),
                None => {
                    debug!("Skipping unparsable cell in column '{}': {}", column, value);
                    score.unparsable += 1;
                }
            },
        }
    }
    score
}
