//! Lenient cell coercion
//!
//! Spreadsheet data is messy. Every coercion here returns `None` for a value
//! it cannot interpret instead of failing the load.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

use crate::workbook::Cell;

/// Excel's day zero for serial dates (accounts for the 1900 leap-year bug)
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Largest serial Excel accepts (9999-12-31)
const EXCEL_MAX_SERIAL: f64 = 2_958_465.0;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Coerce a cell to a date.
///
/// Accepts ISO dates, ISO datetimes (time discarded), RFC 3339 timestamps,
/// US-style `MM/DD/YYYY`, and numeric Excel serial day numbers.
pub fn date(cell: Option<&Cell>) -> Option<NaiveDate> {
    match cell? {
        Cell::Text(s) => parse_date(s),
        Cell::Number(n) => excel_serial(*n),
        Cell::Null | Cell::Bool(_) | Cell::Other(_) => None,
    }
}

/// Parse a date string in any of the accepted formats
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// Convert an Excel serial day number; fractional days are truncated
pub fn excel_serial(serial: f64) -> Option<NaiveDate> {
    if !(1.0..=EXCEL_MAX_SERIAL).contains(&serial) {
        return None;
    }
    let (y, m, d) = EXCEL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(y, m, d)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}

/// Coerce a cell to a finite number.
///
/// Numeric strings are accepted with surrounding whitespace and an optional
/// trailing `%` (`"40%"` is 40.0).
pub fn number(cell: Option<&Cell>) -> Option<f64> {
    let value = match cell? {
        Cell::Number(n) => *n,
        Cell::Text(s) => {
            let s = s.trim();
            let s = s.strip_suffix('%').unwrap_or(s).trim_end();
            s.parse::<f64>().ok()?
        }
        Cell::Null | Cell::Bool(_) | Cell::Other(_) => return None,
    };
    value.is_finite().then_some(value)
}

/// Integers beyond this are not exact in an f64
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Coerce a cell to non-blank text.
///
/// Integral numbers render without a fractional part so that numeric
/// activity names (`101`) join like their text form.
pub fn text(cell: Option<&Cell>) -> Option<String> {
    match cell? {
        Cell::Text(s) if s.trim().is_empty() => None,
        Cell::Text(s) => Some(s.clone()),
        Cell::Number(n) if n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER => {
            Some(format!("{}", *n as i64))
        }
        Cell::Number(n) if n.is_finite() => Some(n.to_string()),
        Cell::Number(_) | Cell::Null | Cell::Other(_) => None,
        Cell::Bool(b) => Some(b.to_string()),
    }
}

/// True when the cell carries something other than blank
pub fn is_present(cell: Option<&Cell>) -> bool {
    match cell {
        None | Some(Cell::Null) => false,
        Some(Cell::Text(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}
