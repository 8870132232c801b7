//! Time-based planned progress
//!
//! The planned percent of a task is how much of its scheduled duration has
//! elapsed at the as-of date:
//!
//! ```text
//! planned % = clamp((today - start) / (end - start) * 100, 0, 100)
//! ```
//!
//! Missing dates and non-positive durations give 0.

use chrono::NaiveDate;
use statusdeck_core::WorkstreamTask;

/// A task paired with its derived planned percent
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EstimatedTask<'a> {
    pub task: &'a WorkstreamTask,
    /// Always in [0, 100]
    pub planned_percent: f64,
}

/// Planned completion percent of a task at `today`
pub fn planned_percent(task: &WorkstreamTask, today: NaiveDate) -> f64 {
    let (Some(start), Some(end)) = (task.planned_start, task.planned_end) else {
        return 0.0;
    };
    let duration = (end - start).num_days();
    if duration <= 0 {
        return 0.0;
    }
    let elapsed = (today - start).num_days();
    let percent = elapsed as f64 / duration as f64 * 100.0;
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}

/// Estimate every task independently
pub fn estimate_all(tasks: &[WorkstreamTask], today: NaiveDate) -> Vec<EstimatedTask<'_>> {
    tasks
        .iter()
        .map(|task| EstimatedTask {
            task,
            planned_percent: planned_percent(task, today),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn task(start: NaiveDate, end: NaiveDate) -> WorkstreamTask {
        WorkstreamTask::new("t").planned(start, end)
    }

    #[test]
    fn halfway_through() {
        let t = task(date(2024, 3, 1), date(2024, 3, 11));
        assert_eq!(planned_percent(&t, date(2024, 3, 6)), 50.0);
    }

    #[test]
    fn before_start_clamps_to_zero() {
        let t = task(date(2024, 3, 1), date(2024, 3, 11));
        assert_eq!(planned_percent(&t, date(2024, 2, 1)), 0.0);
    }

    #[test]
    fn after_end_clamps_to_hundred() {
        let t = task(date(2024, 3, 1), date(2024, 3, 11));
        assert_eq!(planned_percent(&t, date(2024, 6, 1)), 100.0);
        assert_eq!(planned_percent(&t, date(2024, 3, 11)), 100.0);
    }

    #[test]
    fn zero_duration_is_zero() {
        let t = task(date(2024, 3, 1), date(2024, 3, 1));
        assert_eq!(planned_percent(&t, date(2024, 3, 20)), 0.0);
    }

    #[test]
    fn negative_duration_is_zero() {
        let t = task(date(2024, 3, 10), date(2024, 3, 1));
        assert_eq!(planned_percent(&t, date(2024, 3, 20)), 0.0);
    }

    #[test]
    fn missing_dates_are_zero() {
        let mut t = WorkstreamTask::new("t");
        assert_eq!(planned_percent(&t, date(2024, 3, 20)), 0.0);
        t.planned_start = Some(date(2024, 3, 1));
        assert_eq!(planned_percent(&t, date(2024, 3, 20)), 0.0);
        t.planned_start = None;
        t.planned_end = Some(date(2024, 3, 31));
        assert_eq!(planned_percent(&t, date(2024, 3, 20)), 0.0);
    }

    #[test]
    fn always_within_bounds() {
        let t = task(date(2024, 1, 1), date(2024, 12, 31));
        let mut day = date(2023, 6, 1);
        while day < date(2025, 6, 1) {
            let p = planned_percent(&t, day);
            assert!((0.0..=100.0).contains(&p), "{day}: {p}");
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn estimate_all_preserves_order() {
        let tasks = vec![
            task(date(2024, 3, 1), date(2024, 3, 11)).workstream("A"),
            WorkstreamTask::new("undated").workstream("B"),
        ];
        let estimated = estimate_all(&tasks, date(2024, 3, 6));
        assert_eq!(estimated.len(), 2);
        assert_eq!(estimated[0].planned_percent, 50.0);
        assert_eq!(estimated[1].planned_percent, 0.0);
        assert_eq!(estimated[1].task.activity, "undated");
    }
}
