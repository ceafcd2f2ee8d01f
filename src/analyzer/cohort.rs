use crate::analyzer::risk::RiskTally;
use crate::analyzer::synthetic::SyntheticMetrics;
use crate::model::{CohortAnalysis, Series};
use crate::utils::{Mean, percentage, round_to};

pub const PERFORMANCE_BINS: [&str; 4] = ["0-40", "41-60", "61-80", "81-100"];
pub const TOP_PERFORMER_RATIO: f64 = 1.2;

pub const INSIGHT_EXCELLENT: &str =
    "Overall performance is excellent with most students exceeding expectations.";
pub const INSIGHT_SATISFACTORY: &str =
    "Performance is satisfactory with opportunities for targeted improvements.";
pub const INSIGHT_INTERVENTION: &str =
    "Performance indicates need for comprehensive intervention strategies.";
pub const INSIGHT_NO_DATA: &str = "No data available for analysis";

/// Mean of the defined row scores, rounded to 2 decimals; 0 when there are none.
pub fn average_performance(scores: &[f64]) -> f64 {
    let mean: Mean = scores.iter().copied().collect();
    mean.value().map(|avg| round_to(avg, 2)).unwrap_or(0.0)
}

/// Bin of `score` in `PERFORMANCE_BINS`. Upper bounds are inclusive.
pub fn performance_bin(score: f64) -> usize {
    if score <= 40.0 {
        0
    } else if score <= 60.0 {
        1
    } else if score <= 80.0 {
        2
    } else {
        3
    }
}

pub fn performance_histogram(scores: &[f64]) -> [usize; 4] {
    let mut bins = [0; 4];
    for &score in scores {
        bins[performance_bin(score)] += 1;
    }
    bins
}

pub fn performance_insight(average_performance: f64) -> &'static str {
    if average_performance > 80.0 {
        INSIGHT_EXCELLENT
    } else if average_performance > 60.0 {
        INSIGHT_SATISFACTORY
    } else {
        INSIGHT_INTERVENTION
    }
}

fn distribution_series(bins: [usize; 4]) -> Series<usize> {
    Series {
        labels: PERFORMANCE_BINS.iter().map(|l| l.to_string()).collect(),
        data: bins.to_vec(),
    }
}

/// Builds the cohort aggregate.
///
/// `scores` holds the defined row scores only; rows without any valid
/// numeric cell are counted in `total` and `tally` but not binned.
pub fn aggregate(
    total: usize,
    average_performance: f64,
    scores: &[f64],
    tally: &RiskTally,
    synthetic: SyntheticMetrics,
) -> CohortAnalysis {
    let top_cutoff = average_performance * TOP_PERFORMER_RATIO;
    let top = scores.iter().filter(|&&s| s > top_cutoff).count();

    CohortAnalysis {
        total_students: total,
        average_performance,
        at_risk_students: tally.high,
        performance_distribution: distribution_series(performance_histogram(scores)),
        risk_distribution: tally.distribution(),
        top_performers: percentage(top, total),
        needs_attention: percentage(tally.needing_attention(), total),
        performance_insight: performance_insight(average_performance).to_string(),
        performance_trend: synthetic.performance_trend,
        skill_coverage: synthetic.skill_coverage,
        improvement_rate: synthetic.improvement_rate,
    }
}

impl CohortAnalysis {
    /// The all-zero analysis reported for an empty dataset.
    pub fn empty() -> Self {
        Self {
            total_students: 0,
            average_performance: 0.0,
            at_risk_students: 0,
            performance_distribution: distribution_series([0; 4]),
            risk_distribution: [0; 3],
            top_performers: 0,
            needs_attention: 0,
            performance_insight: INSIGHT_NO_DATA.to_string(),
            performance_trend: Series::default(),
            skill_coverage: None,
            improvement_rate: None,
        }
    }
}
