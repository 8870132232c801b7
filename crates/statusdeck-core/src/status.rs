//! Project Status Report
//!
//! Types produced by the engine for one render and consumed by renderers.
//! A status report answers: "What is happening on the project this month?"
//!
//! # Core Concepts
//!
//! - **StatusReport**: everything the dashboard displays, for one as-of date
//! - **DeviationBand**: On Track, At Risk, or Off Track classification of a workstream
//! - **BadgeColor**: display priority of the open-risk KPI
//!
//! # Example
//!
//! ```rust
//! use statusdeck_core::status::{DeviationBand, WorkstreamProgress};
//!
//! let design = WorkstreamProgress::new("Design", 60.0, Some(40.0));
//! assert_eq!(design.deviation(), 20.0);
//! assert_eq!(design.band, DeviationBand::AtRisk);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ReportingWindow;

// ============================================================================
// Classifications
// ============================================================================

/// Upper bound (inclusive) of the on-track deviation band, in percentage points
pub const ON_TRACK_MAX_DEVIATION: f64 = 15.0;

/// Upper bound (inclusive) of the at-risk deviation band, in percentage points
pub const AT_RISK_MAX_DEVIATION: f64 = 30.0;

/// How far a workstream's actual progress is from its time-based expectation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviationBand {
    /// deviation <= 15
    OnTrack,
    /// 15 < deviation <= 30
    AtRisk,
    /// deviation > 30
    OffTrack,
}

impl DeviationBand {
    /// Classify an absolute deviation in percentage points.
    ///
    /// A NaN deviation is `OffTrack`.
    pub fn from_deviation(deviation: f64) -> Self {
        if deviation <= ON_TRACK_MAX_DEVIATION {
            DeviationBand::OnTrack
        } else if deviation <= AT_RISK_MAX_DEVIATION {
            DeviationBand::AtRisk
        } else {
            DeviationBand::OffTrack
        }
    }

    /// Get the display string for this band
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviationBand::OnTrack => "on track",
            DeviationBand::AtRisk => "at risk",
            DeviationBand::OffTrack => "off track",
        }
    }

    /// Chart color for the actual-progress bar
    pub fn color(&self) -> &'static str {
        match self {
            DeviationBand::OnTrack => "green",
            DeviationBand::AtRisk => "orange",
            DeviationBand::OffTrack => "red",
        }
    }
}

impl std::fmt::Display for DeviationBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display color of the open-risk badge
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Danger,
    Warning,
    Secondary,
}

impl BadgeColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeColor::Danger => "danger",
            BadgeColor::Warning => "warning",
            BadgeColor::Secondary => "secondary",
        }
    }

    /// CSS color used by the HTML and XLSX renderers
    pub fn hex(&self) -> &'static str {
        match self {
            BadgeColor::Danger => "#dc3545",
            BadgeColor::Warning => "#ffc107",
            BadgeColor::Secondary => "#6c757d",
        }
    }
}

impl std::fmt::Display for BadgeColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Report Sections
// ============================================================================

/// Headline counts for the KPI card
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiSummary {
    /// Tasks whose planned interval overlaps the reporting window
    pub task_count: usize,
    pub open_issue_count: usize,
    pub open_risk_count: usize,
    pub risk_color: BadgeColor,
}

/// Planned vs actual progress for one workstream
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkstreamProgress {
    pub label: String,
    /// Mean time-based planned percent over all tasks
    pub mean_planned: f64,
    /// Mean reported progress over tasks that report one
    pub mean_actual: Option<f64>,
    pub band: DeviationBand,
}

impl WorkstreamProgress {
    /// Build a record and classify its band.
    ///
    /// With no reported progress the deviation is undefined and the
    /// workstream is `OffTrack`.
    pub fn new(label: impl Into<String>, mean_planned: f64, mean_actual: Option<f64>) -> Self {
        let mut progress = Self {
            label: label.into(),
            mean_planned,
            mean_actual,
            band: DeviationBand::OffTrack,
        };
        progress.band = DeviationBand::from_deviation(progress.deviation());
        progress
    }

    /// |mean planned - mean actual|, NaN when no actual progress is known
    pub fn deviation(&self) -> f64 {
        self.mean_actual
            .map_or(f64::NAN, |actual| (self.mean_planned - actual).abs())
    }
}

/// A row of the "tasks this month" table
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskRow {
    pub activity: String,
    pub progress: Option<f64>,
}

/// A team member active in the reporting window
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveMember {
    pub name: String,
    pub role: String,
}

/// Everything a renderer needs for one report
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    /// The "now" reading the report was computed against
    pub as_of: NaiveDate,
    pub window: ReportingWindow,
    pub kpis: KpiSummary,
    pub workstreams: Vec<WorkstreamProgress>,
    pub tasks: Vec<TaskRow>,
    pub members: Vec<ActiveMember>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries() {
        assert_eq!(DeviationBand::from_deviation(0.0), DeviationBand::OnTrack);
        assert_eq!(DeviationBand::from_deviation(15.0), DeviationBand::OnTrack);
        assert_eq!(DeviationBand::from_deviation(15.1), DeviationBand::AtRisk);
        assert_eq!(DeviationBand::from_deviation(30.0), DeviationBand::AtRisk);
        assert_eq!(DeviationBand::from_deviation(30.1), DeviationBand::OffTrack);
        assert_eq!(DeviationBand::from_deviation(100.0), DeviationBand::OffTrack);
    }

    #[test]
    fn workstream_band_follows_deviation() {
        let cases = [
            (60.0, Some(40.0), DeviationBand::AtRisk),
            (10.0, None, DeviationBand::OffTrack),
            (50.0, Some(45.0), DeviationBand::OnTrack),
            (20.0, Some(55.0), DeviationBand::OffTrack),
        ];
        for (planned, actual, band) in cases {
            let progress = WorkstreamProgress::new("Design", planned, actual);
            assert_eq!(progress.band, band);
            assert_eq!(progress.band, DeviationBand::from_deviation(progress.deviation()));
        }
    }

    #[test]
    fn band_for_nan_is_off_track() {
        assert_eq!(DeviationBand::from_deviation(f64::NAN), DeviationBand::OffTrack);
    }

    #[test]
    fn workstream_without_actual_progress() {
        let ws = WorkstreamProgress::new("Ops", 10.0, None);
        assert!(ws.deviation().is_nan());
        assert_eq!(ws.band, DeviationBand::OffTrack);
    }

    #[test]
    fn workstream_ahead_of_plan_uses_absolute_deviation() {
        let ws = WorkstreamProgress::new("Build", 20.0, Some(60.0));
        assert_eq!(ws.deviation(), 40.0);
        assert_eq!(ws.band, DeviationBand::OffTrack);
    }

    #[test]
    fn display_strings() {
        assert_eq!(DeviationBand::OnTrack.to_string(), "on track");
        assert_eq!(DeviationBand::AtRisk.color(), "orange");
        assert_eq!(BadgeColor::Danger.to_string(), "danger");
        assert_eq!(BadgeColor::Secondary.as_str(), "secondary");
    }

    #[test]
    fn badge_color_serializes_lowercase() {
        let json = serde_json::to_string(&BadgeColor::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
        let json = serde_json::to_string(&DeviationBand::OffTrack).unwrap();
        assert_eq!(json, "\"off_track\"");
    }
}
