//! # statusdeck-render
//!
//! Output backends for status reports.
//!
//! This crate provides:
//! - HTML dashboard with an inline SVG workstream chart
//! - Excel status workbook
//! - JSON for downstream tooling
//! - Text-based output for the console
//!
//! ## Example
//!
//! ```rust,ignore
//! use statusdeck_core::Renderer;
//! use statusdeck_render::{ExcelRenderer, HtmlDashboardRenderer, PhotoDirectory};
//!
//! let photos = PhotoDirectory::new().with("Jane Doe", "assets/jane.png");
//! let html = HtmlDashboardRenderer::new().photos(photos).render(&report)?;
//!
//! let xlsx_bytes = ExcelRenderer::new().render(&report)?;
//! std::fs::write("status.xlsx", xlsx_bytes)?;
//! ```

pub mod chart;
pub mod excel;
pub mod html;
pub mod photos;

pub use chart::WorkstreamChart;
pub use excel::ExcelRenderer;
pub use html::HtmlDashboardRenderer;
pub use photos::PhotoDirectory;

use std::fmt::Write as _;

use statusdeck_core::{RenderError, Renderer, StatusReport};

/// Format a percent with at most one decimal place
pub(crate) fn format_percent(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}%")
    } else {
        format!("{rounded:.1}%")
    }
}

/// Plain text renderer for console output
#[derive(Clone, Debug)]
pub struct TextRenderer {
    pub title: String,
    /// Width of the progress bars in characters
    pub bar_width: usize,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            title: "Client Dashboard".into(),
            bar_width: 20,
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    fn bar(&self, percent: f64) -> String {
        let p = if percent.is_finite() {
            percent.clamp(0.0, 100.0)
        } else {
            0.0
        };
        let filled = ((p / 100.0) * self.bar_width as f64).round() as usize;
        format!(
            "{}{}",
            "█".repeat(filled),
            "░".repeat(self.bar_width.saturating_sub(filled))
        )
    }
}

impl Renderer for TextRenderer {
    type Output = String;

    fn render(&self, report: &StatusReport) -> Result<String, RenderError> {
        let mut out = String::new();
        let kpis = &report.kpis;

        // Writing to a String cannot fail
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out, "As of {} ({})", report.as_of, report.window);
        let _ = writeln!(out);
        let _ = writeln!(out, "Tasks this month: {}", kpis.task_count);
        let _ = writeln!(
            out,
            "Open risks:       {} [{}]",
            kpis.open_risk_count, kpis.risk_color
        );
        let _ = writeln!(out, "Open issues:      {}", kpis.open_issue_count);

        let _ = writeln!(out);
        let _ = writeln!(out, "Workstreams");
        if report.workstreams.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for ws in &report.workstreams {
            let actual = ws
                .mean_actual
                .map_or_else(|| "n/a".to_string(), format_percent);
            let _ = writeln!(
                out,
                "  {:<18} {} planned {:>6}  actual {:>6}  {}",
                chart::truncate(&ws.label, 18),
                self.bar(ws.mean_planned),
                format_percent(ws.mean_planned),
                actual,
                ws.band.as_str(),
            );
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Tasks This Month");
        if report.tasks.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for task in &report.tasks {
            let progress = task.progress.map(format_percent).unwrap_or_default();
            let _ = writeln!(out, "  {:<36} {:>6}", task.activity, progress);
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Active Team Members");
        if report.members.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for member in &report.members {
            if member.role.is_empty() {
                let _ = writeln!(out, "  {}", member.name);
            } else {
                let _ = writeln!(out, "  {} ({})", member.name, member.role);
            }
        }

        Ok(out)
    }
}

/// JSON renderer, one pretty-printed document per report
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonRenderer {
    pub compact: bool,
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compact(mut self) -> Self {
        self.compact = true;
        self
    }
}

impl Renderer for JsonRenderer {
    type Output = String;

    fn render(&self, report: &StatusReport) -> Result<String, RenderError> {
        let result = if self.compact {
            serde_json::to_string(report)
        } else {
            serde_json::to_string_pretty(report)
        };
        result.map_err(|e| RenderError::Format(format!("Failed to write JSON: {e}")))
    }
}
