//! # statusdeck-engine
//!
//! Derives a project status report from a `ProjectData` snapshot.
//!
//! This crate provides:
//! - Reporting window resolution and injectable clocks
//! - Time-based planned progress per task
//! - KPI counts and open-risk badge classification
//! - Workstream aggregation with deviation banding
//! - Active team member resolution
//!
//! The current date is read from the clock exactly once per run and passed
//! explicitly to every stage, so all numbers in a report describe the same
//! instant.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use statusdeck_core::{ProjectData, WorkstreamTask};
//! use statusdeck_engine::{FixedClock, ReportEngine};
//!
//! let mut data = ProjectData::new();
//! data.tasks.push(
//!     WorkstreamTask::new("Wireframes")
//!         .workstream("Design")
//!         .planned(
//!             NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
//!             NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
//!         )
//!         .progress(50.0),
//! );
//!
//! let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
//! let report = ReportEngine::new().run(&data, &clock);
//! assert_eq!(report.kpis.task_count, 1);
//! assert_eq!(report.workstreams[0].mean_planned, 50.0);
//! ```

pub mod kpi;
pub mod members;
pub mod progress;
pub mod risk;
pub mod window;
pub mod workstream;

pub use members::MemberStrategy;
pub use progress::{planned_percent, EstimatedTask};
pub use window::{reporting_window, FixedClock, SystemClock};

use chrono::NaiveDate;
use statusdeck_core::{Clock, ProjectData, StatusReport};
use tracing::info;

/// Runs the full derivation pipeline
#[derive(Clone, Debug, Default)]
pub struct ReportEngine {
    /// How active members are selected
    pub member_strategy: MemberStrategy,
}

impl ReportEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the member resolution strategy
    pub fn member_strategy(mut self, strategy: MemberStrategy) -> Self {
        self.member_strategy = strategy;
        self
    }

    /// Build a report, reading "now" once from `clock`
    pub fn run(&self, data: &ProjectData, clock: &dyn Clock) -> StatusReport {
        self.report_as_of(data, clock.today())
    }

    /// Build a report for an explicit as-of date
    pub fn report_as_of(&self, data: &ProjectData, today: NaiveDate) -> StatusReport {
        let window = window::reporting_window(today);
        info!(%today, %window, "building status report");

        let estimated = progress::estimate_all(&data.tasks, today);
        let kpis = kpi::summarize(data, &window);
        let tasks = kpi::task_rows(&data.tasks, &window);
        let workstreams = workstream::aggregate(&estimated);
        let members = members::resolve(data, &window, self.member_strategy);

        StatusReport {
            as_of: today,
            window,
            kpis,
            workstreams,
            tasks,
            members,
        }
    }
}
