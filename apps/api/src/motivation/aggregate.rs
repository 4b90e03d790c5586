//! Motivation Aggregator: rolling averages and the chart series over a user's
//! daily motivation log.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::motivation::MotivationEntry;
use crate::stats::rounded_mean;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub date: Option<NaiveDate>,
    /// Short axis label, e.g. "Oct 16".
    pub label: String,
    pub motivation: i32,
    pub engagement: i32,
}

impl From<&MotivationEntry> for ChartPoint {
    fn from(entry: &MotivationEntry) -> Self {
        ChartPoint {
            date: entry.date,
            label: entry
                .date
                .map(|d| d.format("%b %-d").to_string())
                .unwrap_or_default(),
            motivation: entry.motivation_score.unwrap_or(0),
            engagement: entry.engagement_score.unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MotivationSummary {
    pub average_motivation: i32,
    pub average_engagement: i32,
    /// The latest `window` entries, oldest first.
    pub chart_series: Vec<ChartPoint>,
}

/// Averages cover every supplied entry (missing scores count as 0). The chart
/// series keeps the `window` most recent dated entries in chronological order;
/// undated entries sort as oldest.
pub fn summarize(entries: &[MotivationEntry], window: usize) -> MotivationSummary {
    let mut newest_first: Vec<&MotivationEntry> = entries.iter().collect();
    // Stable sort keeps insertion order between entries sharing a date.
    newest_first.sort_by(|a, b| b.date.cmp(&a.date));

    let mut chart_series: Vec<ChartPoint> = newest_first
        .into_iter()
        .take(window)
        .map(ChartPoint::from)
        .collect();
    chart_series.reverse();

    MotivationSummary {
        average_motivation: rounded_mean(entries.iter().map(|e| e.motivation_score.unwrap_or(0))),
        average_engagement: rounded_mean(entries.iter().map(|e| e.engagement_score.unwrap_or(0))),
        chart_series,
    }
}

/// The entry logged on `today`, if any. Exact calendar-date equality.
pub fn today_entry(entries: &[MotivationEntry], today: NaiveDate) -> Option<&MotivationEntry> {
    entries.iter().find(|e| e.date == Some(today))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MotivationLevel {
    Excellent,
    Good,
    Moderate,
    NeedsAttention,
}

pub fn level_for(score: i32) -> MotivationLevel {
    match score {
        s if s >= 80 => MotivationLevel::Excellent,
        s if s >= 60 => MotivationLevel::Good,
        s if s >= 40 => MotivationLevel::Moderate,
        _ => MotivationLevel::NeedsAttention,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn make_entry(date: Option<NaiveDate>, motivation: Option<i32>, engagement: Option<i32>) -> MotivationEntry {
        MotivationEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            date,
            motivation_score: motivation,
            engagement_score: engagement,
            heart_rate: None,
            spo2_level: None,
            activity_level: None,
            notes: None,
            wearable_data: None,
            created_at: None,
        }
    }

    fn day(d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 10, d)
    }

    #[test]
    fn test_average_of_three_days() {
        let entries = vec![
            make_entry(day(16), Some(80), Some(70)),
            make_entry(day(15), Some(60), Some(50)),
            make_entry(day(14), Some(40), Some(30)),
        ];
        let summary = summarize(&entries, 14);
        assert_eq!(summary.average_motivation, 60);
        assert_eq!(summary.average_engagement, 50);
    }

    #[test]
    fn test_empty_entries() {
        let summary = summarize(&[], 7);
        assert_eq!(summary.average_motivation, 0);
        assert_eq!(summary.average_engagement, 0);
        assert!(summary.chart_series.is_empty());
    }

    #[test]
    fn test_averages_are_order_independent() {
        let mut entries = vec![
            make_entry(day(1), Some(13), Some(90)),
            make_entry(day(2), Some(57), None),
            make_entry(day(3), Some(99), Some(4)),
        ];
        let forward = summarize(&entries, 10);
        entries.reverse();
        let reversed = summarize(&entries, 10);
        assert_eq!(forward.average_motivation, reversed.average_motivation);
        assert_eq!(forward.average_engagement, reversed.average_engagement);
        assert_eq!(forward.chart_series, reversed.chart_series);
    }

    #[test]
    fn test_chart_window_is_latest_entries_chronological() {
        let entries = vec![
            make_entry(day(16), Some(90), Some(90)),
            make_entry(day(15), Some(50), Some(50)),
            make_entry(day(14), Some(10), Some(10)),
        ];
        let summary = summarize(&entries, 2);
        let dates: Vec<_> = summary.chart_series.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![day(15), day(16)]);
        assert_eq!(summary.chart_series[1].label, "Oct 16");
        assert_eq!(summary.chart_series[0].motivation, 50);
        // Averages still use every entry.
        assert_eq!(summary.average_motivation, 50);
    }

    #[test]
    fn test_missing_scores_chart_as_zero() {
        let entries = vec![make_entry(day(3), None, None)];
        let point = &summarize(&entries, 7).chart_series[0];
        assert_eq!(point.motivation, 0);
        assert_eq!(point.engagement, 0);
        assert_eq!(point.label, "Oct 3");
    }

    #[test]
    fn test_today_entry_requires_exact_date() {
        let today = NaiveDate::from_ymd_opt(2024, 10, 16).unwrap();
        let yesterday_only = vec![make_entry(day(15), Some(70), Some(70))];
        assert!(today_entry(&yesterday_only, today).is_none());

        let with_today = vec![
            make_entry(day(15), Some(70), Some(70)),
            make_entry(day(16), Some(20), Some(30)),
        ];
        let found = today_entry(&with_today, today).unwrap();
        assert_eq!(found.motivation_score, Some(20));
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(level_for(80), MotivationLevel::Excellent);
        assert_eq!(level_for(79), MotivationLevel::Good);
        assert_eq!(level_for(60), MotivationLevel::Good);
        assert_eq!(level_for(40), MotivationLevel::Moderate);
        assert_eq!(level_for(39), MotivationLevel::NeedsAttention);
        assert_eq!(level_for(-5), MotivationLevel::NeedsAttention);
    }
}
