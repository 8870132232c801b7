//! # statusdeck-loader
//!
//! Loads the project workbook and converts its rows into the domain model.
//!
//! This crate provides:
//! - JSON workbook parsing (one list of rows per sheet)
//! - Lenient cell coercion for dates, numbers and text
//! - Row to record conversion producing a `ProjectData` snapshot
//!
//! ## Example
//!
//! ```rust
//! use statusdeck_loader::load_str;
//!
//! let input = r#"{
//!     "Workstreams": [
//!         {"Activity Name": "Wireframes", "Work-stream": "Design",
//!          "Planned Start Date": "2024-02-15", "Planned End Date": "2024-03-10",
//!          "Progress %": 40}
//!     ],
//!     "Risk_Register": [],
//!     "Issue_Tracker": [{"Status": "Open"}],
//!     "Resources": []
//! }"#;
//!
//! let data = load_str(input).unwrap();
//! assert_eq!(data.tasks.len(), 1);
//! assert_eq!(data.issues.len(), 1);
//! ```

pub mod coerce;
pub mod rows;
pub mod workbook;

pub use workbook::{Cell, Row, Workbook};

use statusdeck_core::ProjectData;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Sheet names of the input workbook
pub mod sheets {
    pub const WORKSTREAMS: &str = "Workstreams";
    pub const RISK_REGISTER: &str = "Risk_Register";
    pub const ISSUE_TRACKER: &str = "Issue_Tracker";
    pub const RESOURCES: &str = "Resources";
    pub const BUDGET_ASSIGNMENTS: &str = "Budget_Assignments";

    /// Sheets every workbook must carry
    pub const REQUIRED: [&str; 4] = [WORKSTREAMS, RISK_REGISTER, ISSUE_TRACKER, RESOURCES];
}

/// Loading error
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid workbook JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing required sheet: {0}")]
    MissingSheet(String),

    #[error("Sheet {sheet} is not a list of rows: {source}")]
    MalformedSheet {
        sheet: String,
        #[source]
        source: serde_json::Error,
    },
}

fn sheet_rows(workbook: &Workbook, sheet: &str) -> Result<Vec<Row>, LoadError> {
    workbook
        .rows(sheet)
        .map_err(|source| LoadError::MalformedSheet {
            sheet: sheet.to_string(),
            source,
        })
        .map(Option::unwrap_or_default)
}

/// Convert a parsed workbook into a project snapshot
pub fn from_workbook(workbook: &Workbook) -> Result<ProjectData, LoadError> {
    if let Some(missing) = sheets::REQUIRED
        .iter()
        .copied()
        .find(|s| !workbook.has_sheet(s))
    {
        return Err(LoadError::MissingSheet(missing.to_string()));
    }

    let tasks = sheet_rows(workbook, sheets::WORKSTREAMS)?
        .iter()
        .enumerate()
        .map(|(i, row)| rows::task(row, i))
        .collect();
    let risks = sheet_rows(workbook, sheets::RISK_REGISTER)?
        .iter()
        .map(rows::risk)
        .collect();
    let issues = sheet_rows(workbook, sheets::ISSUE_TRACKER)?
        .iter()
        .map(rows::issue)
        .collect();
    let resources = sheet_rows(workbook, sheets::RESOURCES)?
        .iter()
        .enumerate()
        .filter_map(|(i, row)| rows::resource(row, i))
        .collect();
    let assignments = sheet_rows(workbook, sheets::BUDGET_ASSIGNMENTS)?
        .iter()
        .map(rows::assignment)
        .collect();

    let data = ProjectData {
        tasks,
        risks,
        issues,
        resources,
        assignments,
    };
    debug!(
        tasks = data.tasks.len(),
        risks = data.risks.len(),
        issues = data.issues.len(),
        resources = data.resources.len(),
        assignments = data.assignments.len(),
        "workbook loaded"
    );
    Ok(data)
}

/// Parse a workbook from JSON text
pub fn load_str(input: &str) -> Result<ProjectData, LoadError> {
    let workbook: Workbook = serde_json::from_str(input)?;
    from_workbook(&workbook)
}

/// Load a workbook file
pub fn load_file(path: &Path) -> Result<ProjectData, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_str(&content)
}
