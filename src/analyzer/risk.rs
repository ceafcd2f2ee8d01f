use crate::model::RiskLevel;

pub const HIGH_RISK_RATIO: f64 = 0.7;
pub const MEDIUM_RISK_RATIO: f64 = 0.85;

/// Cutoffs relative to the cohort average.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskThresholds {
    pub high: f64,
    pub medium: f64,
}

impl RiskThresholds {
    /// With an average of 0 both cutoffs are 0 and every non-negative score
    /// lands in `Low`.
    pub fn from_average(average_performance: f64) -> Self {
        Self {
            high: average_performance * HIGH_RISK_RATIO,
            medium: average_performance * MEDIUM_RISK_RATIO,
        }
    }

    pub fn classify(&self, score: f64) -> RiskLevel {
        if score < self.high {
            RiskLevel::High
        } else if score < self.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Tier counts, filled in the same pass that assigns the tiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiskTally {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl RiskTally {
    pub fn record(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Low => self.low += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::High => self.high += 1,
        }
    }

    /// `[low, medium, high]`
    pub fn distribution(&self) -> [usize; 3] {
        [self.low, self.medium, self.high]
    }

    pub fn needing_attention(&self) -> usize {
        self.medium + self.high
    }
}
