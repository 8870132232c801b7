//! Row to domain-model conversion
//!
//! Each sheet's rows map onto one record type. Conversion never fails: bad
//! cells coerce to absent values, and rows that cannot describe anything
//! (a roster row without a name) are skipped.

use statusdeck_core::{
    AssignmentRecord, IssueItem, ResourceMember, RiskItem, Severity, WorkstreamTask,
};
use tracing::warn;

use crate::coerce;
use crate::workbook::Row;

/// Column headers of the input sheets
pub mod columns {
    pub const ACTIVITY_NAME: &str = "Activity Name";
    pub const WORKSTREAM: &str = "Work-stream";
    pub const PLANNED_START: &str = "Planned Start Date";
    pub const PLANNED_END: &str = "Planned End Date";
    pub const PROGRESS: &str = "Progress %";
    pub const STATUS: &str = "Status";
    pub const RISK_SCORE: &str = "Risk Score";
    pub const PERSON_NAME: &str = "Person Name";
    pub const ROLE: &str = "Role";
    pub const HOURS: &str = "Allocated/Used Hours";
    pub const ASSIGNED_PERSON_1: &str = "Assigned Person 1";
    pub const ASSIGNED_PERSON_2: &str = "Assigned Person 2";
}

use columns::*;

/// Read a date column, warning when a non-blank value does not parse
fn date_column(row: &Row, column: &str, index: usize) -> Option<chrono::NaiveDate> {
    let cell = row.get(column);
    let parsed = coerce::date(cell);
    if parsed.is_none() && coerce::is_present(cell) {
        warn!(row = index, column, "unparseable date treated as missing");
    }
    parsed
}

/// Read the progress column, warning when a non-blank value is not numeric
fn progress_column(row: &Row, index: usize) -> Option<f64> {
    let cell = row.get(PROGRESS);
    let parsed = coerce::number(cell);
    if parsed.is_none() && coerce::is_present(cell) {
        warn!(row = index, column = PROGRESS, "non-numeric progress treated as missing");
    }
    parsed
}

/// Convert a Workstreams row
pub fn task(row: &Row, index: usize) -> WorkstreamTask {
    WorkstreamTask {
        activity: coerce::text(row.get(ACTIVITY_NAME)).unwrap_or_default(),
        workstream: coerce::text(row.get(WORKSTREAM)).unwrap_or_default(),
        planned_start: date_column(row, PLANNED_START, index),
        planned_end: date_column(row, PLANNED_END, index),
        progress: progress_column(row, index),
    }
}

/// Convert a Risk_Register row
pub fn risk(row: &Row) -> RiskItem {
    RiskItem {
        status: coerce::text(row.get(STATUS)),
        severity: coerce::text(row.get(RISK_SCORE))
            .map(|label| Severity::from_label(&label))
            .unwrap_or(Severity::Unrecognized),
    }
}

/// Convert an Issue_Tracker row
pub fn issue(row: &Row) -> IssueItem {
    IssueItem {
        status: coerce::text(row.get(STATUS)),
    }
}

/// Convert a Resources row; rows without a person name are skipped
pub fn resource(row: &Row, index: usize) -> Option<ResourceMember> {
    let Some(name) = coerce::text(row.get(PERSON_NAME)) else {
        warn!(row = index, "resource row without a person name skipped");
        return None;
    };
    Some(ResourceMember {
        name,
        role: coerce::text(row.get(ROLE)).unwrap_or_default(),
        hours: coerce::number(row.get(HOURS)).unwrap_or(0.0),
    })
}

/// Convert a Budget_Assignments row
pub fn assignment(row: &Row) -> AssignmentRecord {
    AssignmentRecord {
        activity: coerce::text(row.get(ACTIVITY_NAME)).unwrap_or_default(),
        assigned_person_1: coerce::text(row.get(ASSIGNED_PERSON_1)),
        assigned_person_2: coerce::text(row.get(ASSIGNED_PERSON_2)),
    }
}
