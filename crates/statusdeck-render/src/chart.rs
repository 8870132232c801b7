//! SVG workstream progress chart
//!
//! One row per workstream with two overlaid horizontal bars on a 0-100 scale:
//! the planned percent in blue and, on top of it, the actual percent colored
//! by deviation band.
//!
//! ```text
//! Design       ██████████████████████░░░░░░░░   planned 83%
//!              ███████████████                  actual 55% (orange)
//! ```

use svg::node::element::{Group, Line, Rectangle, Text};
use svg::Document;
use statusdeck_core::{RenderError, WorkstreamProgress};

/// Workstream chart configuration
#[derive(Clone, Debug)]
pub struct WorkstreamChart {
    /// Width of the bar area (excluding labels) in pixels
    pub chart_width: u32,
    /// Height per workstream row in pixels
    pub row_height: u32,
    /// Width of the label column in pixels
    pub label_width: u32,
    /// Header height in pixels
    pub header_height: u32,
    /// Padding around the chart
    pub padding: u32,
    /// Color of the planned bar
    pub planned_color: String,
    /// Grid line color
    pub grid_color: String,
    /// Text color
    pub text_color: String,
    /// Font family
    pub font_family: String,
    /// Font size in pixels
    pub font_size: u32,
}

impl Default for WorkstreamChart {
    fn default() -> Self {
        Self {
            chart_width: 420,
            row_height: 36,
            label_width: 140,
            header_height: 40,
            padding: 16,
            planned_color: "#1f4e9c".into(),
            grid_color: "#ecf0f1".into(),
            text_color: "#2c3e50".into(),
            font_family: "system-ui, -apple-system, sans-serif".into(),
            font_size: 12,
        }
    }
}

impl WorkstreamChart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure chart width
    pub fn chart_width(mut self, width: u32) -> Self {
        self.chart_width = width;
        self
    }

    /// Configure row height
    pub fn row_height(mut self, height: u32) -> Self {
        self.row_height = height;
        self
    }

    fn total_width(&self) -> u32 {
        self.padding * 2 + self.label_width + self.chart_width
    }

    fn total_height(&self, rows: usize) -> u32 {
        self.padding * 2 + self.header_height + rows.max(1) as u32 * self.row_height
    }

    /// Convert a percent (clamped to 0-100) to a bar width
    fn percent_to_width(&self, percent: f64) -> f64 {
        let p = if percent.is_finite() {
            percent.clamp(0.0, 100.0)
        } else {
            0.0
        };
        self.chart_width as f64 * p / 100.0
    }

    fn chart_left(&self) -> u32 {
        self.padding + self.label_width
    }

    /// Scale ticks at 0, 25, 50, 75 and 100 percent
    fn render_scale(&self, rows: usize) -> Group {
        let mut group = Group::new().set("class", "scale");
        let top = self.padding + self.header_height;
        let bottom = top + rows.max(1) as u32 * self.row_height;

        for tick in [0u32, 25, 50, 75, 100] {
            let x = self.chart_left() as f64 + self.percent_to_width(tick as f64);
            group = group.add(
                Line::new()
                    .set("x1", x)
                    .set("y1", top)
                    .set("x2", x)
                    .set("y2", bottom)
                    .set("stroke", self.grid_color.as_str())
                    .set("stroke-width", 1),
            );
            group = group.add(
                Text::new(format!("{tick}%"))
                    .set("x", x)
                    .set("y", top - 6)
                    .set("font-family", self.font_family.as_str())
                    .set("font-size", self.font_size - 2)
                    .set("fill", self.text_color.as_str())
                    .set("text-anchor", "middle"),
            );
        }
        group
    }

    fn render_row(&self, ws: &WorkstreamProgress, row: usize) -> Group {
        let mut group = Group::new()
            .set("class", "workstream")
            .set("data-band", ws.band.as_str());

        let y = self.padding + self.header_height + row as u32 * self.row_height;
        let planned_height = (self.row_height as f64 * 0.6) as u32;
        let planned_y = y + (self.row_height - planned_height) / 2;
        let actual_height = planned_height / 2;
        let actual_y = planned_y + (planned_height - actual_height) / 2;

        group = group.add(
            Text::new(truncate(&ws.label, 18))
                .set("x", self.padding)
                .set("y", y + self.row_height / 2 + 4)
                .set("font-family", self.font_family.as_str())
                .set("font-size", self.font_size)
                .set("fill", self.text_color.as_str()),
        );

        group = group.add(
            Rectangle::new()
                .set("class", "planned")
                .set("x", self.chart_left())
                .set("y", planned_y)
                .set("width", self.percent_to_width(ws.mean_planned))
                .set("height", planned_height)
                .set("fill", self.planned_color.as_str())
                .set("fill-opacity", 0.35),
        );

        if let Some(actual) = ws.mean_actual {
            group = group.add(
                Rectangle::new()
                    .set("class", "actual")
                    .set("x", self.chart_left())
                    .set("y", actual_y)
                    .set("width", self.percent_to_width(actual))
                    .set("height", actual_height)
                    .set("fill", ws.band.color()),
            );
        }

        group
    }

    /// Render the chart as a standalone SVG document
    pub fn render(&self, workstreams: &[WorkstreamProgress]) -> Result<String, RenderError> {
        let width = self.total_width();
        let height = self.total_height(workstreams.len());

        let mut document = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", (0, 0, width, height))
            .set("xmlns", "http://www.w3.org/2000/svg");

        document = document.add(self.render_scale(workstreams.len()));

        if workstreams.is_empty() {
            document = document.add(
                Text::new("No workstreams")
                    .set("x", self.chart_left() + self.chart_width / 2)
                    .set("y", self.padding + self.header_height + self.row_height / 2 + 4)
                    .set("font-family", self.font_family.as_str())
                    .set("font-size", self.font_size)
                    .set("fill", self.text_color.as_str())
                    .set("text-anchor", "middle"),
            );
        }

        for (row, ws) in workstreams.iter().enumerate() {
            document = document.add(self.render_row(ws, row));
        }

        let mut output = Vec::new();
        svg::write(&mut output, &document)
            .map_err(|e| RenderError::Format(format!("Failed to write SVG: {}", e)))?;

        String::from_utf8(output).map_err(|e| RenderError::Format(format!("Invalid UTF-8: {}", e)))
    }
}

/// Truncate a string to a maximum number of characters with ellipsis
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
