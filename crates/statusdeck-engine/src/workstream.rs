//! Workstream progress aggregation
//!
//! Tasks are grouped by workstream label. Each group reports the mean planned
//! percent over all its tasks and the mean actual progress over the tasks
//! that report one; the absolute gap between the two decides the band.
//!
//! Tasks without a workstream label belong to no group.

use std::collections::HashMap;

use statusdeck_core::WorkstreamProgress;
use tracing::debug;

use crate::progress::EstimatedTask;

#[derive(Default)]
struct Accumulator {
    planned_sum: f64,
    planned_count: usize,
    actual_sum: f64,
    actual_count: usize,
}

impl Accumulator {
    fn add(&mut self, estimated: &EstimatedTask<'_>) {
        self.planned_sum += estimated.planned_percent;
        self.planned_count += 1;
        if let Some(actual) = estimated.task.progress {
            self.actual_sum += actual;
            self.actual_count += 1;
        }
    }

    fn mean_planned(&self) -> f64 {
        if self.planned_count == 0 {
            0.0
        } else {
            self.planned_sum / self.planned_count as f64
        }
    }

    fn mean_actual(&self) -> Option<f64> {
        (self.actual_count > 0).then(|| self.actual_sum / self.actual_count as f64)
    }
}

/// One record per workstream, in order of first appearance
pub fn aggregate(tasks: &[EstimatedTask<'_>]) -> Vec<WorkstreamProgress> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Accumulator> = HashMap::new();

    for estimated in tasks {
        let label = estimated.task.workstream.trim();
        if label.is_empty() {
            continue;
        }
        groups
            .entry(label)
            .or_insert_with(|| {
                order.push(label);
                Accumulator::default()
            })
            .add(estimated);
    }

    let result: Vec<WorkstreamProgress> = order
        .into_iter()
        .filter_map(|label| {
            let acc = groups.get(label)?;
            Some(WorkstreamProgress::new(label, acc.mean_planned(), acc.mean_actual()))
        })
        .collect();

    debug!(workstreams = result.len(), "workstreams aggregated");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use statusdeck_core::{DeviationBand, WorkstreamTask};

    fn estimated(task: &WorkstreamTask, planned: f64) -> EstimatedTask<'_> {
        EstimatedTask {
            task,
            planned_percent: planned,
        }
    }

    #[test]
    fn design_workstream_at_risk() {
        let a = WorkstreamTask::new("a").workstream("Design").progress(30.0);
        let b = WorkstreamTask::new("b").workstream("Design").progress(50.0);
        let result = aggregate(&[estimated(&a, 50.0), estimated(&b, 70.0)]);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].label, "Design");
        assert_eq!(result[0].mean_planned, 60.0);
        assert_eq!(result[0].mean_actual, Some(40.0));
        assert_eq!(result[0].band, DeviationBand::AtRisk);
    }

    #[test]
    fn missing_actual_excluded_from_actual_mean_only() {
        let a = WorkstreamTask::new("a").workstream("Build").progress(40.0);
        let b = WorkstreamTask::new("b").workstream("Build");
        let result = aggregate(&[estimated(&a, 40.0), estimated(&b, 60.0)]);

        assert_eq!(result[0].mean_planned, 50.0);
        assert_eq!(result[0].mean_actual, Some(40.0));
        assert_eq!(result[0].band, DeviationBand::OnTrack);
    }

    #[test]
    fn group_without_any_actual() {
        let a = WorkstreamTask::new("a").workstream("Ops");
        let result = aggregate(&[estimated(&a, 10.0)]);
        assert_eq!(result[0].mean_actual, None);
        assert_eq!(result[0].band, DeviationBand::OffTrack);
    }

    #[test]
    fn first_appearance_order() {
        let tasks = [
            WorkstreamTask::new("1").workstream("Test").progress(0.0),
            WorkstreamTask::new("2").workstream("Design").progress(0.0),
            WorkstreamTask::new("3").workstream("Test ").progress(0.0),
            WorkstreamTask::new("4").workstream("Build").progress(0.0),
        ];
        let rows: Vec<_> = tasks.iter().map(|t| estimated(t, 0.0)).collect();
        let labels: Vec<_> = aggregate(&rows).into_iter().map(|w| w.label).collect();
        assert_eq!(labels, vec!["Test", "Design", "Build"]);
    }

    #[test]
    fn unlabeled_tasks_are_skipped() {
        let a = WorkstreamTask::new("a").progress(10.0);
        let b = WorkstreamTask::new("b").workstream("  ").progress(10.0);
        assert!(aggregate(&[estimated(&a, 0.0), estimated(&b, 0.0)]).is_empty());
    }

    #[test]
    fn off_track_when_far_behind() {
        let a = WorkstreamTask::new("a").workstream("Migration").progress(10.0);
        let result = aggregate(&[estimated(&a, 90.0)]);
        assert_eq!(result[0].band, DeviationBand::OffTrack);
    }
}
