//! Progress Aggregator: summary statistics over a user's skill progress records
//! and the level-increment rule.

use serde::{Deserialize, Serialize};

use crate::models::progress::ProgressRecord;
use crate::stats::rounded_mean;

/// A record at or above this percentage counts as mastered.
pub const MASTERED_THRESHOLD: i32 = 80;
const PROGRESSING_THRESHOLD: i32 = 50;
pub const MAX_LEVEL: i32 = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    pub count: usize,
    pub average_percentage: i32,
    pub mastered_count: usize,
    pub total_achievements: usize,
}

/// Averages treat a missing percentage as 0.
pub fn summarize(records: &[ProgressRecord]) -> ProgressSummary {
    ProgressSummary {
        count: records.len(),
        average_percentage: rounded_mean(
            records.iter().map(|r| r.progress_percentage.unwrap_or(0)),
        ),
        mastered_count: records
            .iter()
            .filter(|r| r.progress_percentage.unwrap_or(0) >= MASTERED_THRESHOLD)
            .count(),
        total_achievements: records.iter().map(|r| r.achievements.len()).sum(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    Mastered,
    Progressing,
    Learning,
}

pub fn status_for(progress_percentage: Option<i32>) -> ProgressStatus {
    match progress_percentage.unwrap_or(0) {
        p if p >= MASTERED_THRESHOLD => ProgressStatus::Mastered,
        p if p >= PROGRESSING_THRESHOLD => ProgressStatus::Progressing,
        _ => ProgressStatus::Learning,
    }
}

/// The increments a user can apply to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "i32")]
pub enum ProgressStep {
    Ten,
    TwentyFive,
}

impl ProgressStep {
    pub fn amount(self) -> i32 {
        match self {
            ProgressStep::Ten => 10,
            ProgressStep::TwentyFive => 25,
        }
    }
}

impl TryFrom<i32> for ProgressStep {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            10 => Ok(ProgressStep::Ten),
            25 => Ok(ProgressStep::TwentyFive),
            other => Err(format!("unsupported progress step {other} (expected 10 or 25)")),
        }
    }
}

/// New level after applying `step` to `current_level`, capped at 100.
/// The result is written to both `current_level` and `progress_percentage`.
pub fn increment_level(current_level: Option<i32>, step: ProgressStep) -> i32 {
    current_level
        .unwrap_or(0)
        .saturating_add(step.amount())
        .min(MAX_LEVEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::progress::ProgressRow;
    use crate::models::TrackedItem;
    use serde_json::{json, Value};
    use uuid::Uuid;

    fn make_record(pct: Option<i32>, achievements: Option<Value>) -> ProgressRecord {
        ProgressRecord::from(ProgressRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            skill_name: "Rust".to_string(),
            current_level: pct,
            target_level: Some(100),
            progress_percentage: pct,
            achievements,
            completed_courses: None,
            learning_resources: None,
            last_updated: None,
            created_at: None,
        })
    }

    #[test]
    fn test_empty_summary_is_zero() {
        assert_eq!(
            summarize(&[]),
            ProgressSummary {
                count: 0,
                average_percentage: 0,
                mastered_count: 0,
                total_achievements: 0,
            }
        );
    }

    #[test]
    fn test_summary_counts() {
        let records = vec![
            make_record(Some(80), Some(json!(["first", "second"]))),
            make_record(Some(45), Some(json!("not a list"))),
            make_record(Some(90), None),
            make_record(Some(20), Some(json!([{"title": "Badge"}]))),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.count, 4);
        // (80 + 45 + 90 + 20) / 4 = 58.75
        assert_eq!(summary.average_percentage, 59);
        assert_eq!(summary.mastered_count, 2);
        assert_eq!(summary.total_achievements, 3);
    }

    #[test]
    fn test_missing_percentage_counts_as_zero() {
        let records = vec![make_record(None, None), make_record(Some(50), None)];
        let summary = summarize(&records);
        assert_eq!(summary.average_percentage, 25);
        assert_eq!(summary.mastered_count, 0);
    }

    #[test]
    fn test_summary_is_order_independent() {
        let mut records = vec![
            make_record(Some(10), None),
            make_record(Some(55), None),
            make_record(Some(100), None),
        ];
        let forward = summarize(&records);
        records.reverse();
        assert_eq!(summarize(&records), forward);
        records.swap(0, 1);
        assert_eq!(summarize(&records), forward);
    }

    #[test]
    fn test_increment_clamps_at_100() {
        assert_eq!(increment_level(Some(90), ProgressStep::TwentyFive), 100);
        assert_eq!(increment_level(Some(95), ProgressStep::Ten), 100);
    }

    #[test]
    fn test_increment_from_missing_level() {
        assert_eq!(increment_level(None, ProgressStep::Ten), 10);
        assert_eq!(increment_level(Some(40), ProgressStep::TwentyFive), 65);
    }

    #[test]
    fn test_step_parsing() {
        let step: ProgressStep = serde_json::from_value(json!(25)).unwrap();
        assert_eq!(step, ProgressStep::TwentyFive);
        assert!(serde_json::from_value::<ProgressStep>(json!(15)).is_err());
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(status_for(Some(80)), ProgressStatus::Mastered);
        assert_eq!(status_for(Some(79)), ProgressStatus::Progressing);
        assert_eq!(status_for(Some(50)), ProgressStatus::Progressing);
        assert_eq!(status_for(Some(49)), ProgressStatus::Learning);
        assert_eq!(status_for(None), ProgressStatus::Learning);
    }

    #[test]
    fn test_achievement_items_are_typed() {
        let record = make_record(Some(10), Some(json!(["Shipped", {"title": "Talk"}])));
        assert_eq!(record.achievements[0], TrackedItem::Named("Shipped".into()));
    }
}
