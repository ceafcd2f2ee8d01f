//! Search and sort over scored records, the way the student table presents them.

use crate::model::ScoredRecord;
use serde::Deserialize;
use serde_json::Value;
use std::cmp::Ordering;

pub const SCORE_FIELD: &str = "overallScore";
pub const RISK_FIELD: &str = "riskLevel";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort_field: Option<String>,
    #[serde(default)]
    pub sort_direction: SortDirection,
}

/// Columns shown for the roster: the first record's columns without the
/// two annotation fields.
pub fn display_columns(records: &[ScoredRecord]) -> Vec<&str> {
    records
        .first()
        .map(|r| {
            r.record
                .columns()
                .filter(|c| *c != SCORE_FIELD && *c != RISK_FIELD)
                .collect()
        })
        .unwrap_or_default()
}

enum SortKey<'a> {
    Number(f64),
    Text(String),
    Raw(&'a Value),
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn sort_key<'a>(record: &'a ScoredRecord, field: &str) -> SortKey<'a> {
    match field {
        SCORE_FIELD => SortKey::Number(record.overall_score),
        RISK_FIELD => SortKey::Text(record.risk_level.as_str().to_string()),
        _ => match record.record.get(field) {
            Some(Value::Number(n)) => n
                .as_f64()
                .map(SortKey::Number)
                .unwrap_or_else(|| SortKey::Text(n.to_string())),
            Some(value) => SortKey::Raw(value),
            None => SortKey::Text(String::new()),
        },
    }
}

fn key_text(key: &SortKey<'_>) -> String {
    match key {
        SortKey::Number(n) => n.to_string(),
        SortKey::Text(s) => s.to_lowercase(),
        SortKey::Raw(v) => cell_text(v).to_lowercase(),
    }
}

fn compare(a: &SortKey<'_>, b: &SortKey<'_>) -> Ordering {
    match (a, b) {
        (SortKey::Number(x), SortKey::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        _ => key_text(a).cmp(&key_text(b)),
    }
}

fn matches(record: &ScoredRecord, term: &str) -> bool {
    record
        .record
        .values()
        .map(cell_text)
        .chain([
            record.overall_score.to_string(),
            record.risk_level.as_str().to_string(),
        ])
        .any(|text| text.to_lowercase().contains(term))
}

/// Filters by `query.search` (case-insensitive, any cell) and then sorts by
/// `query.sort_field`. The sort is stable; without a sort field the input
/// order is kept.
pub fn query<'a>(records: &'a [ScoredRecord], query: &RosterQuery) -> Vec<&'a ScoredRecord> {
    let term = query
        .search
        .as_deref()
        .map(str::trim)
        .unwrap_or("")
        .to_lowercase();

    let mut rows: Vec<&ScoredRecord> = records
        .iter()
        .filter(|r| term.is_empty() || matches(r, &term))
        .collect();

    if let Some(field) = query.sort_field.as_deref() {
        rows.sort_by(|a, b| {
            let ordering = compare(&sort_key(a, field), &sort_key(b, field));
            match query.sort_direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RawRecord, RiskLevel};
    use serde_json::json;

    fn scored(name: &str, grade: Value, score: f64, risk: RiskLevel) -> ScoredRecord {
        ScoredRecord {
            record: RawRecord::new().with("name", name).with("grade", grade),
            overall_score: score,
            risk_level: risk,
            valid_fields: 1,
        }
    }

    fn roster() -> Vec<ScoredRecord> {
        vec![
            scored("bob", json!("72"), 72.0, RiskLevel::Low),
            scored("Alice", json!("35"), 35.0, RiskLevel::High),
            scored("carol", json!("55"), 55.0, RiskLevel::Medium),
        ]
    }

    fn names(rows: &[&ScoredRecord]) -> Vec<String> {
        rows.iter()
            .map(|r| r.record.get("name").and_then(Value::as_str).unwrap_or("").to_string())
            .collect()
    }

    #[test]
    fn display_columns_hide_annotations() {
        let mut records = roster();
        records[0].record = records[0].record.clone().with(SCORE_FIELD, 1).with(RISK_FIELD, "x");
        assert_eq!(display_columns(&records), vec!["name", "grade"]);
        assert!(display_columns(&[]).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_and_covers_annotations() {
        let records = roster();
        let search = |term: &str| RosterQuery {
            search: Some(term.into()),
            ..Default::default()
        };

        let by_name = query(&records, &search("ALI"));
        assert_eq!(names(&by_name), vec!["Alice"]);

        let by_risk = query(&records, &search("medium"));
        assert_eq!(names(&by_risk), vec!["carol"]);

        let all = query(&records, &search("  "));
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn sorts_scores_numerically() {
        let records = roster();
        let q = RosterQuery {
            sort_field: Some(SCORE_FIELD.into()),
            sort_direction: SortDirection::Desc,
            ..Default::default()
        };
        assert_eq!(names(&query(&records, &q)), vec!["bob", "carol", "Alice"]);
    }

    #[test]
    fn sorts_text_ignoring_case() {
        let records = roster();
        let q = RosterQuery { sort_field: Some("name".into()), ..Default::default() };
        assert_eq!(names(&query(&records, &q)), vec!["Alice", "bob", "carol"]);

        let q = RosterQuery { sort_direction: SortDirection::Asc.toggled(), ..q };
        assert_eq!(names(&query(&records, &q)), vec!["carol", "bob", "Alice"]);
    }

    #[test]
    fn no_sort_field_keeps_input_order() {
        let records = roster();
        assert_eq!(
            names(&query(&records, &RosterQuery::default())),
            vec!["bob", "Alice", "carol"]
        );
    }
}
