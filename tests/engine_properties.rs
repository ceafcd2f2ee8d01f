use cohort_lens::analyzer::risk::RiskThresholds;
use cohort_lens::{Analyzer, CohortAnalyzer, RawRecord};
use proptest::prelude::*;

fn huge() -> impl Strategy<Value = String> {
    prop_oneof![
        (1e300f64..f64::MAX).prop_map(|v| format!("{:e}", v)),
        (-f64::MAX..-1e300f64).prop_map(|v| format!("{:e}", v)),
    ]
}

fn cell() -> impl Strategy<Value = String> {
    prop_oneof![
        6 => (-20.0f64..150.0).prop_map(|v| format!("{:.1}", v)),
        1 => huge(),
        1 => Just(String::new()),
        1 => "[a-z]{1,6}",
    ]
}

fn rows_of(cell: impl Strategy<Value = String>) -> impl Strategy<Value = Vec<RawRecord>> {
    prop::collection::vec(prop::collection::vec(cell, 3), 1..40).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, cells)| {
                let numeric = cells
                    .into_iter()
                    .enumerate()
                    .map(|(c, value)| (format!("col{}", c), value));
                let id = std::iter::once(("id".to_string(), format!("S{}", i)));
                RawRecord::from_pairs(id.chain(numeric))
            })
            .collect()
    })
}

fn dataset() -> impl Strategy<Value = Vec<RawRecord>> {
    rows_of(cell())
}

proptest! {
    #[test]
    fn risk_distribution_sums_to_total(records in dataset()) {
        let outcome = CohortAnalyzer::default().analyze(records);
        let [low, medium, high] = outcome.analysis.risk_distribution;
        prop_assert_eq!(low + medium + high, outcome.analysis.total_students);
    }

    #[test]
    fn every_row_matches_threshold_rule(records in dataset()) {
        let outcome = CohortAnalyzer::default().analyze(records);
        let thresholds = RiskThresholds::from_average(outcome.analysis.average_performance);
        for row in &outcome.records {
            prop_assert!(row.overall_score.is_finite());
            prop_assert_eq!(row.risk_level, thresholds.classify(row.overall_score));
        }
    }

    #[test]
    fn histogram_counts_scored_rows(records in dataset()) {
        let outcome = CohortAnalyzer::default().analyze(records);
        let binned: usize = outcome.analysis.performance_distribution.data.iter().sum();
        let scored = outcome.records.iter().filter(|r| r.has_score()).count();
        prop_assert_eq!(binned, scored);
        prop_assert_eq!(outcome.analysis.performance_distribution.data.len(), 4);
    }

    #[test]
    fn output_is_one_to_one_with_input(records in dataset()) {
        let expected = records.clone();
        let outcome = CohortAnalyzer::default().analyze(records);
        prop_assert_eq!(outcome.records.len(), expected.len());
        for (scored, raw) in outcome.records.iter().zip(&expected) {
            prop_assert_eq!(&scored.record, raw);
        }
    }

    #[test]
    fn repeated_runs_agree(records in dataset()) {
        let a = CohortAnalyzer::default().analyze(records.clone());
        let b = CohortAnalyzer::default().analyze(records);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn percentages_stay_in_range(records in dataset()) {
        let analysis = CohortAnalyzer::default().analyze(records).analysis;
        prop_assert!(analysis.top_performers <= 100);
        prop_assert!(analysis.needs_attention <= 100);
        prop_assert!(analysis.average_performance.is_finite());
    }

    #[test]
    fn near_max_cells_keep_scores_finite(records in rows_of(huge())) {
        let outcome = CohortAnalyzer::default().analyze(records);
        prop_assert!(outcome.analysis.average_performance.is_finite());
        for row in &outcome.records {
            prop_assert!(row.overall_score.is_finite());
        }
        let [low, medium, high] = outcome.analysis.risk_distribution;
        prop_assert_eq!(low + medium + high, outcome.analysis.total_students);
    }
}
