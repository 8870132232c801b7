//! # statusdeck-core
//!
//! Core domain model and traits for the statusdeck reporting engine.
//!
//! This crate provides:
//! - Input records: `WorkstreamTask`, `RiskItem`, `IssueItem`, `ResourceMember`, `AssignmentRecord`
//! - The per-render snapshot `ProjectData` and the `ReportingWindow`
//! - Report output types (see [`status`])
//! - Core traits: `Clock`, `PhotoLookup`, `Renderer`
//! - Error types
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use statusdeck_core::{ProjectData, ReportingWindow, WorkstreamTask};
//!
//! let mut data = ProjectData::new();
//! data.tasks.push(
//!     WorkstreamTask::new("Wireframes")
//!         .workstream("Design")
//!         .planned(
//!             NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
//!             NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
//!         )
//!         .progress(40.0),
//! );
//!
//! let window = ReportingWindow::containing(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
//! assert!(data.tasks[0].overlaps(&window));
//! ```

pub mod status;

pub use status::{
    ActiveMember, BadgeColor, DeviationBand, KpiSummary, StatusReport, TaskRow,
    WorkstreamProgress,
};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Type Aliases
// ============================================================================

/// Reference to a member photo asset (path or URL)
pub type AssetRef = String;

// ============================================================================
// Normalization
// ============================================================================

/// Normalize a free-text status for comparison (trim + lowercase)
pub fn normalize_status(status: &str) -> String {
    status.trim().to_lowercase()
}

/// Normalize a person name for matching across sheets (trim + lowercase)
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

fn is_open(status: Option<&str>) -> bool {
    status.map_or(false, |s| normalize_status(s) == "open")
}

// ============================================================================
// Reporting Window
// ============================================================================

/// The calendar month used to decide which tasks and assignments are current.
///
/// Both bounds are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingWindow {
    /// First day of the month
    pub start: NaiveDate,
    /// Last day of the month
    pub end: NaiveDate,
}

impl ReportingWindow {
    /// Window for the calendar month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let (year, month) = if date.month() == 12 {
            (date.year() + 1, 1)
        } else {
            (date.year(), date.month() + 1)
        };
        let end = NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|next| next.pred_opt())
            .unwrap_or(date);
        Self { start, end }
    }

    /// Closed-interval overlap: `start <= window.end && end >= window.start`.
    ///
    /// An interval with either bound missing never overlaps.
    pub fn overlaps(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
        match (start, end) {
            (Some(s), Some(e)) => s <= self.end && e >= self.start,
            _ => false,
        }
    }

    /// Number of days in the window
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl std::fmt::Display for ReportingWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

// ============================================================================
// Workstream Tasks
// ============================================================================

/// A scheduled activity from the Workstreams sheet
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkstreamTask {
    /// Activity name (also the join key for assignments)
    pub activity: String,
    /// Workstream group label
    pub workstream: String,
    /// Planned start date, `None` when missing or unparseable
    pub planned_start: Option<NaiveDate>,
    /// Planned end date, `None` when missing or unparseable
    pub planned_end: Option<NaiveDate>,
    /// Reported progress (0-100), `None` when missing
    pub progress: Option<f64>,
}

impl WorkstreamTask {
    pub fn new(activity: impl Into<String>) -> Self {
        Self {
            activity: activity.into(),
            workstream: String::new(),
            planned_start: None,
            planned_end: None,
            progress: None,
        }
    }

    /// Set the workstream label
    pub fn workstream(mut self, label: impl Into<String>) -> Self {
        self.workstream = label.into();
        self
    }

    /// Set planned start and end dates
    pub fn planned(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.planned_start = Some(start);
        self.planned_end = Some(end);
        self
    }

    /// Set reported progress
    pub fn progress(mut self, percent: f64) -> Self {
        self.progress = Some(percent);
        self
    }

    /// Planned duration in days, if both dates are known
    pub fn duration_days(&self) -> Option<i64> {
        Some((self.planned_end? - self.planned_start?).num_days())
    }

    /// Whether the planned interval intersects the window
    pub fn overlaps(&self, window: &ReportingWindow) -> bool {
        window.overlaps(self.planned_start, self.planned_end)
    }
}

// ============================================================================
// Risks and Issues
// ============================================================================

/// Closed severity vocabulary for risk scores.
///
/// Labels are matched trimmed and case-insensitively; any other value,
/// numeric scores included, is `Unrecognized`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
    Unrecognized,
}

impl Severity {
    /// Parse a risk score label
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "high" => Severity::High,
            "medium" => Severity::Medium,
            "low" => Severity::Low,
            _ => Severity::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Unrecognized => "Unrecognized",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A row of the risk register
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskItem {
    pub status: Option<String>,
    pub severity: Severity,
}

impl RiskItem {
    pub fn new(status: impl Into<String>, severity: Severity) -> Self {
        Self {
            status: Some(status.into()),
            severity,
        }
    }

    pub fn is_open(&self) -> bool {
        is_open(self.status.as_deref())
    }
}

/// A row of the issue tracker
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IssueItem {
    pub status: Option<String>,
}

impl IssueItem {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
        }
    }

    pub fn is_open(&self) -> bool {
        is_open(self.status.as_deref())
    }
}

// ============================================================================
// Resources and Assignments
// ============================================================================

/// A person on the resource roster
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceMember {
    pub name: String,
    pub role: String,
    /// Allocated/used hours; missing or invalid values load as zero
    pub hours: f64,
}

impl ResourceMember {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            hours: 0.0,
        }
    }

    /// Set allocated/used hours
    pub fn hours(mut self, hours: f64) -> Self {
        self.hours = hours;
        self
    }
}

/// A budget/actuals row linking an activity to up to two people
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub activity: String,
    pub assigned_person_1: Option<String>,
    pub assigned_person_2: Option<String>,
}

impl AssignmentRecord {
    pub fn new(activity: impl Into<String>) -> Self {
        Self {
            activity: activity.into(),
            ..Self::default()
        }
    }

    /// Add an assignee to the first free slot. Extra names are ignored.
    pub fn assign(mut self, person: impl Into<String>) -> Self {
        if self.assigned_person_1.is_none() {
            self.assigned_person_1 = Some(person.into());
        } else if self.assigned_person_2.is_none() {
            self.assigned_person_2 = Some(person.into());
        }
        self
    }

    /// Iterate over the assigned names that are present
    pub fn assignees(&self) -> impl Iterator<Item = &str> {
        [&self.assigned_person_1, &self.assigned_person_2]
            .into_iter()
            .filter_map(|p| p.as_deref())
    }
}

// ============================================================================
// Project Data
// ============================================================================

/// Immutable snapshot of all input collections for a single render
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProjectData {
    pub tasks: Vec<WorkstreamTask>,
    pub risks: Vec<RiskItem>,
    pub issues: Vec<IssueItem>,
    pub resources: Vec<ResourceMember>,
    pub assignments: Vec<AssignmentRecord>,
}

impl ProjectData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the tasks carrying the given activity name
    pub fn tasks_named<'a>(&'a self, activity: &'a str) -> impl Iterator<Item = &'a WorkstreamTask> {
        let key = activity.trim();
        self.tasks.iter().filter(move |t| t.activity.trim() == key)
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Source of the "now" reading for a render
pub trait Clock {
    /// The current date. Read once per render.
    fn today(&self) -> NaiveDate;
}

/// Resolves a member name to a photo asset
pub trait PhotoLookup {
    /// Returns `None` when no photo is known for `name`
    fn lookup_photo(&self, name: &str) -> Option<AssetRef>;
}

/// Lookup that never finds a photo
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPhotos;

impl PhotoLookup for NoPhotos {
    fn lookup_photo(&self, _name: &str) -> Option<AssetRef> {
        None
    }
}

impl<L: PhotoLookup + ?Sized> PhotoLookup for &L {
    fn lookup_photo(&self, name: &str) -> Option<AssetRef> {
        (**self).lookup_photo(name)
    }
}

/// Output rendering
pub trait Renderer {
    type Output;

    /// Render a status report to the output format
    fn render(&self, report: &StatusReport) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn window_for_mid_month() {
        let window = ReportingWindow::containing(date(2024, 3, 17));
        assert_eq!(window.start, date(2024, 3, 1));
        assert_eq!(window.end, date(2024, 3, 31));
        assert_eq!(window.days(), 31);
    }

    #[test]
    fn window_for_december_rolls_year() {
        let window = ReportingWindow::containing(date(2025, 12, 31));
        assert_eq!(window.start, date(2025, 12, 1));
        assert_eq!(window.end, date(2025, 12, 31));
    }

    #[test]
    fn window_for_leap_february() {
        let window = ReportingWindow::containing(date(2024, 2, 1));
        assert_eq!(window.end, date(2024, 2, 29));

        let window = ReportingWindow::containing(date(2023, 2, 28));
        assert_eq!(window.end, date(2023, 2, 28));
    }

    #[test]
    fn window_overlap_is_closed_interval() {
        let window = ReportingWindow::containing(date(2024, 3, 10));

        // Ends exactly on the first day
        assert!(window.overlaps(Some(date(2024, 2, 1)), Some(date(2024, 3, 1))));
        // Starts exactly on the last day
        assert!(window.overlaps(Some(date(2024, 3, 31)), Some(date(2024, 4, 30))));
        // Spans the whole month
        assert!(window.overlaps(Some(date(2024, 1, 1)), Some(date(2024, 12, 31))));
        // Entirely before / after
        assert!(!window.overlaps(Some(date(2024, 1, 1)), Some(date(2024, 2, 29))));
        assert!(!window.overlaps(Some(date(2024, 4, 1)), Some(date(2024, 4, 2))));
        // Missing bounds
        assert!(!window.overlaps(None, Some(date(2024, 3, 15))));
        assert!(!window.overlaps(Some(date(2024, 3, 15)), None));
    }

    #[test]
    fn severity_labels_are_normalized() {
        assert_eq!(Severity::from_label("High"), Severity::High);
        assert_eq!(Severity::from_label("  high "), Severity::High);
        assert_eq!(Severity::from_label("MEDIUM"), Severity::Medium);
        assert_eq!(Severity::from_label("Low"), Severity::Low);
        assert_eq!(Severity::from_label("Critical"), Severity::Unrecognized);
        assert_eq!(Severity::from_label("12"), Severity::Unrecognized);
        assert_eq!(Severity::from_label(""), Severity::Unrecognized);
    }

    #[test]
    fn open_status_ignores_case_and_whitespace() {
        assert!(IssueItem::new("Open").is_open());
        assert!(IssueItem::new("  OPEN\t").is_open());
        assert!(!IssueItem::new("Closed").is_open());
        assert!(!IssueItem::new("Reopened").is_open());
        assert!(!IssueItem { status: None }.is_open());
        assert!(RiskItem::new(" open", Severity::Low).is_open());
    }

    #[test]
    fn assignment_assignees_skip_missing_slots() {
        let record = AssignmentRecord {
            activity: "Build".into(),
            assigned_person_1: None,
            assigned_person_2: Some("Jane Doe".into()),
        };
        assert_eq!(record.assignees().collect::<Vec<_>>(), vec!["Jane Doe"]);

        let record = AssignmentRecord::new("Build").assign("A").assign("B").assign("C");
        assert_eq!(record.assignees().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn task_duration_requires_both_dates() {
        let task = WorkstreamTask::new("t").planned(date(2024, 3, 1), date(2024, 3, 11));
        assert_eq!(task.duration_days(), Some(10));
        assert_eq!(WorkstreamTask::new("t").duration_days(), None);
    }

    #[test]
    fn tasks_named_trims_activity() {
        let mut data = ProjectData::new();
        data.tasks.push(WorkstreamTask::new("Build "));
        data.tasks.push(WorkstreamTask::new("Test"));
        assert_eq!(data.tasks_named(" Build").count(), 1);
        assert_eq!(data.tasks_named("Deploy").count(), 0);
    }

    #[test]
    fn name_normalization() {
        assert_eq!(normalize_name(" Jane Doe "), "jane doe");
        assert_eq!(normalize_name("JANE DOE"), "jane doe");
    }

    #[test]
    fn no_photos_lookup() {
        assert_eq!(NoPhotos.lookup_photo("Jane Doe"), None);
    }
}
