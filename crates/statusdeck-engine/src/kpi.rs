//! KPI counts and the "tasks this month" list

use statusdeck_core::{KpiSummary, ProjectData, ReportingWindow, TaskRow, WorkstreamTask};
use tracing::debug;

use crate::risk;

/// Tasks whose planned interval overlaps the window, in input order
pub fn tasks_in_window<'a>(
    tasks: &'a [WorkstreamTask],
    window: &'a ReportingWindow,
) -> impl Iterator<Item = &'a WorkstreamTask> {
    tasks.iter().filter(move |t| t.overlaps(window))
}

/// Table rows for the tasks active in the window
pub fn task_rows(tasks: &[WorkstreamTask], window: &ReportingWindow) -> Vec<TaskRow> {
    tasks_in_window(tasks, window)
        .map(|t| TaskRow {
            activity: t.activity.clone(),
            progress: t.progress,
        })
        .collect()
}

/// Compute the KPI card counts
pub fn summarize(data: &ProjectData, window: &ReportingWindow) -> KpiSummary {
    let task_count = tasks_in_window(&data.tasks, window).count();
    let open_issue_count = data.issues.iter().filter(|i| i.is_open()).count();
    let open_risk_count = data.risks.iter().filter(|r| r.is_open()).count();
    let risk_color = risk::risk_color(&data.risks);

    debug!(
        task_count,
        open_issue_count,
        open_risk_count,
        risk_color = %risk_color,
        "KPIs computed"
    );

    KpiSummary {
        task_count,
        open_issue_count,
        open_risk_count,
        risk_color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use statusdeck_core::{BadgeColor, IssueItem, RiskItem, Severity};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn march() -> ReportingWindow {
        ReportingWindow::containing(date(2024, 3, 15))
    }

    #[test]
    fn empty_data_yields_zeros() {
        let kpis = summarize(&ProjectData::new(), &march());
        assert_eq!(
            kpis,
            KpiSummary {
                task_count: 0,
                open_issue_count: 0,
                open_risk_count: 0,
                risk_color: BadgeColor::Secondary,
            }
        );
    }

    #[test]
    fn task_count_uses_closed_overlap() {
        let mut data = ProjectData::new();
        data.tasks = vec![
            // Partially overlapping from before
            WorkstreamTask::new("a").planned(date(2024, 2, 15), date(2024, 3, 10)),
            // Fully inside
            WorkstreamTask::new("b").planned(date(2024, 3, 5), date(2024, 3, 6)),
            // Partially overlapping into April
            WorkstreamTask::new("c").planned(date(2024, 3, 31), date(2024, 4, 20)),
            // Fully outside
            WorkstreamTask::new("d").planned(date(2024, 1, 1), date(2024, 2, 29)),
            WorkstreamTask::new("e").planned(date(2024, 4, 1), date(2024, 4, 30)),
            // Undated
            WorkstreamTask::new("f"),
        ];
        let kpis = summarize(&data, &march());
        assert_eq!(kpis.task_count, 3);

        let rows = task_rows(&data.tasks, &march());
        let names: Vec<_> = rows.iter().map(|r| r.activity.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn open_counts_normalize_status() {
        let mut data = ProjectData::new();
        data.issues = vec![
            IssueItem::new("Open"),
            IssueItem::new(" open "),
            IssueItem::new("Closed"),
            IssueItem { status: None },
        ];
        data.risks = vec![
            RiskItem::new("OPEN", Severity::Medium),
            RiskItem::new("Closed", Severity::High),
        ];
        let kpis = summarize(&data, &march());
        assert_eq!(kpis.open_issue_count, 2);
        assert_eq!(kpis.open_risk_count, 1);
        assert_eq!(kpis.risk_color, BadgeColor::Warning);
    }

    #[test]
    fn task_rows_carry_progress() {
        let tasks = vec![
            WorkstreamTask::new("a")
                .planned(date(2024, 3, 1), date(2024, 3, 2))
                .progress(75.0),
            WorkstreamTask::new("b").planned(date(2024, 3, 1), date(2024, 3, 2)),
        ];
        assert_eq!(
            task_rows(&tasks, &march()),
            vec![
                TaskRow {
                    activity: "a".into(),
                    progress: Some(75.0)
                },
                TaskRow {
                    activity: "b".into(),
                    progress: None
                },
            ]
        );
    }
}
