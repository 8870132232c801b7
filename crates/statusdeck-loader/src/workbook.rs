//! Raw workbook representation
//!
//! A workbook is a JSON object keyed by sheet name; each sheet is a list of
//! rows and each row maps a column header to a cell.
//!
//! ```text
//! {
//!   "Workstreams": [
//!     { "Activity Name": "Wireframes", "Work-stream": "Design",
//!       "Planned Start Date": "2024-02-15", "Planned End Date": "2024-03-10",
//!       "Progress %": 40 }
//!   ],
//!   "Risk_Register": [ { "Status": "Open", "Risk Score": "High" } ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single spreadsheet cell
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    /// Nested arrays or objects; never coerces to a value
    Other(serde_json::Value),
}

/// One row: column header -> cell, ordered by header
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(BTreeMap<String, Cell>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell (builder style, mostly for tests)
    pub fn with(mut self, column: impl Into<String>, cell: Cell) -> Self {
        self.0.insert(column.into(), cell);
        self
    }

    /// Look up a column.
    ///
    /// Exact header match first, then a trimmed case-insensitive match so
    /// that `" status "` still finds `Status`. When several headers
    /// normalize alike, the first in header order wins.
    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.0.get(column).or_else(|| {
            let wanted = column.trim().to_lowercase();
            self.0
                .iter()
                .find(|(header, _)| header.trim().to_lowercase() == wanted)
                .map(|(_, cell)| cell)
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A parsed workbook: sheet name -> rows
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Workbook {
    sheets: BTreeMap<String, serde_json::Value>,
}

impl Workbook {
    /// Names of all sheets present
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(|s| s.as_str())
    }

    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheets.contains_key(name)
    }

    /// Insert a sheet (for building workbooks in code)
    pub fn insert_sheet(&mut self, name: impl Into<String>, rows: Vec<Row>) {
        let value = serde_json::to_value(rows).unwrap_or(serde_json::Value::Array(Vec::new()));
        self.sheets.insert(name.into(), value);
    }

    /// Decode a sheet into rows.
    ///
    /// Returns `Ok(None)` when the sheet is absent and an error when it is
    /// present but not a list of row objects.
    pub fn rows(&self, name: &str) -> Result<Option<Vec<Row>>, serde_json::Error> {
        self.sheets
            .get(name)
            .map(|value| Vec::<Row>::deserialize(value))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_deserialize_untagged() {
        let row: Row = serde_json::from_str(
            r#"{"a": null, "b": true, "c": 4.5, "d": "text"}"#,
        )
        .unwrap();
        assert_eq!(row.get("a"), Some(&Cell::Null));
        assert_eq!(row.get("b"), Some(&Cell::Bool(true)));
        assert_eq!(row.get("c"), Some(&Cell::Number(4.5)));
        assert_eq!(row.get("d"), Some(&Cell::Text("text".into())));
        assert_eq!(row.get("e"), None);
    }

    #[test]
    fn nested_cells_do_not_fail_the_row() {
        let row: Row = serde_json::from_str(r#"{"a": [50], "b": {"x": 1}, "c": 2}"#).unwrap();
        assert_eq!(row.get("a"), Some(&Cell::Other(serde_json::json!([50]))));
        assert!(matches!(row.get("b"), Some(Cell::Other(_))));
        assert_eq!(row.get("c"), Some(&Cell::Number(2.0)));
    }

    #[test]
    fn header_lookup_is_lenient() {
        let row = Row::new().with(" Status ", Cell::Text("Open".into()));
        assert_eq!(row.get("Status"), Some(&Cell::Text("Open".into())));
        assert_eq!(row.get("status"), Some(&Cell::Text("Open".into())));
    }

    #[test]
    fn colliding_headers_resolve_in_header_order() {
        let row = Row::new()
            .with("status ", Cell::Text("Closed".into()))
            .with(" Status", Cell::Text("Open".into()));
        assert_eq!(row.get("STATUS"), Some(&Cell::Text("Open".into())));
        assert_eq!(row.get("status "), Some(&Cell::Text("Closed".into())));
    }

    #[test]
    fn rows_of_missing_sheet() {
        let workbook: Workbook = serde_json::from_str(r#"{"Resources": []}"#).unwrap();
        assert!(workbook.rows("Workstreams").unwrap().is_none());
        assert_eq!(workbook.rows("Resources").unwrap(), Some(Vec::new()));
    }

    #[test]
    fn rows_of_malformed_sheet() {
        let workbook: Workbook = serde_json::from_str(r#"{"Resources": 42}"#).unwrap();
        assert!(workbook.rows("Resources").is_err());
    }

    #[test]
    fn insert_sheet_round_trips_rows() {
        let mut workbook = Workbook::default();
        workbook.insert_sheet("Issue_Tracker", vec![Row::new().with("Status", Cell::Text("Open".into()))]);
        let rows = workbook.rows("Issue_Tracker").unwrap().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Status"), Some(&Cell::Text("Open".into())));
    }
}
