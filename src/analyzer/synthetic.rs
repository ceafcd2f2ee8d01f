// Placeholder metrics with no data dependency: trend, skill coverage and
// improvement rate. Kept behind a provider so the deterministic pipeline can
// be tested without them.

use crate::model::Series;
use crate::utils::round_to;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const TREND_LABELS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];

/// Field names of `CohortAnalysis` that are filled by a provider.
pub const SYNTHETIC_FIELDS: [&str; 3] = ["performanceTrend", "skillCoverage", "improvementRate"];

const TREND_SPREAD: f64 = 10.0;
const SKILL_COVERAGE_BASE: f64 = 70.0;
const SKILL_COVERAGE_SPREAD: f64 = 25.0;
const IMPROVEMENT_BASE: f64 = 75.0;
const IMPROVEMENT_SPREAD: f64 = 20.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyntheticMetrics {
    pub performance_trend: Series<f64>,
    pub skill_coverage: Option<u32>,
    pub improvement_rate: Option<u32>,
}

pub trait SyntheticMetricsProvider {
    fn generate(&mut self, average_performance: f64) -> SyntheticMetrics;
}

impl<P: SyntheticMetricsProvider + ?Sized> SyntheticMetricsProvider for Box<P> {
    fn generate(&mut self, average_performance: f64) -> SyntheticMetrics {
        (**self).generate(average_performance)
    }
}

fn trend_labels() -> Vec<String> {
    TREND_LABELS.iter().map(|l| l.to_string()).collect()
}

/// Random jitter around the cohort average.
pub struct RandomSynthetic {
    rng: StdRng,
}

impl RandomSynthetic {
    pub fn new() -> Self {
        Self { rng: StdRng::from_os_rng() }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for RandomSynthetic {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticMetricsProvider for RandomSynthetic {
    fn generate(&mut self, average_performance: f64) -> SyntheticMetrics {
        let data = TREND_LABELS
            .iter()
            .map(|_| {
                let jitter = (self.rng.random::<f64>() - 0.5) * TREND_SPREAD;
                round_to(average_performance + jitter, 2)
            })
            .collect();
        let skill = SKILL_COVERAGE_BASE + self.rng.random::<f64>() * SKILL_COVERAGE_SPREAD;
        let improvement = IMPROVEMENT_BASE + self.rng.random::<f64>() * IMPROVEMENT_SPREAD;

        SyntheticMetrics {
            performance_trend: Series { labels: trend_labels(), data },
            skill_coverage: Some(skill.round() as u32),
            improvement_rate: Some(improvement.round() as u32),
        }
    }
}

/// The expected value of `RandomSynthetic`, with no randomness.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSynthetic;

impl SyntheticMetricsProvider for FixedSynthetic {
    fn generate(&mut self, average_performance: f64) -> SyntheticMetrics {
        let skill = SKILL_COVERAGE_BASE + SKILL_COVERAGE_SPREAD / 2.0;
        let improvement = IMPROVEMENT_BASE + IMPROVEMENT_SPREAD / 2.0;
        SyntheticMetrics {
            performance_trend: Series {
                labels: trend_labels(),
                data: vec![average_performance; TREND_LABELS.len()],
            },
            skill_coverage: Some(skill.round() as u32),
            improvement_rate: Some(improvement.round() as u32),
        }
    }
}

/// Leaves every synthetic field empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledSynthetic;

impl SyntheticMetricsProvider for DisabledSynthetic {
    fn generate(&mut self, _average_performance: f64) -> SyntheticMetrics {
        SyntheticMetrics::default()
    }
}
