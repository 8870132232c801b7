//! HTML dashboard renderer
//!
//! Generates a standalone HTML page laid out as a two-by-two grid:
//! - KPI Summary: tasks this month, open risks (colored badge), open issues
//! - Workstream Progress: inline SVG chart
//! - Tasks This Month: activity and reported progress
//! - Active Team Members: cards with photo or placeholder
//!
//! Member photos come from an injected [`PhotoLookup`]; the renderer knows no
//! names of its own.

use statusdeck_core::{
    ActiveMember, KpiSummary, NoPhotos, PhotoLookup, RenderError, Renderer, StatusReport, TaskRow,
};

use tracing::debug;

use crate::chart::WorkstreamChart;
use crate::format_percent;

/// Shown when a member has no photo
const PHOTO_PLACEHOLDER: &str = "👷";

/// HTML dashboard renderer configuration
#[derive(Clone, Debug)]
pub struct HtmlDashboardRenderer<P = NoPhotos> {
    /// Page heading
    pub title: String,
    /// Workstream chart settings
    pub chart: WorkstreamChart,
    photos: P,
}

impl Default for HtmlDashboardRenderer<NoPhotos> {
    fn default() -> Self {
        Self {
            title: "Client Dashboard".into(),
            chart: WorkstreamChart::default(),
            photos: NoPhotos,
        }
    }
}

impl HtmlDashboardRenderer<NoPhotos> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: PhotoLookup> HtmlDashboardRenderer<P> {
    /// Set the page heading
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Use a different photo lookup
    pub fn photos<Q: PhotoLookup>(self, photos: Q) -> HtmlDashboardRenderer<Q> {
        HtmlDashboardRenderer {
            title: self.title,
            chart: self.chart,
            photos,
        }
    }

    fn kpi_card(&self, kpis: &KpiSummary) -> String {
        format!(
            r#"<div class="card">
      <div class="card-header">KPI Summary</div>
      <div class="card-body kpis">
        <div class="kpi"><h2 class="text-primary">{tasks}</h2><p class="text-muted">Tasks This Month</p></div>
        <div class="kpi"><h2><span class="badge badge-{color}" style="background-color:{hex}">{risks}</span></h2><p class="text-muted">Open Risks</p></div>
        <div class="kpi"><h2 class="text-primary">{issues}</h2><p class="text-muted">Open Issues</p></div>
      </div>
    </div>"#,
            tasks = kpis.task_count,
            color = kpis.risk_color.as_str(),
            hex = kpis.risk_color.hex(),
            risks = kpis.open_risk_count,
            issues = kpis.open_issue_count,
        )
    }

    fn task_table(&self, tasks: &[TaskRow]) -> String {
        let mut rows = String::new();
        for task in tasks {
            rows.push_str(&format!(
                "          <tr><td>{}</td><td>{}</td></tr>\n",
                html_escape(&task.activity),
                task.progress.map(format_percent).unwrap_or_default(),
            ));
        }
        format!(
            r#"<div class="card">
      <div class="card-header">Tasks This Month</div>
      <div class="card-body">
        <table class="table">
          <thead><tr><th>Activity Name</th><th>Progress %</th></tr></thead>
          <tbody>
{rows}          </tbody>
        </table>
      </div>
    </div>"#
        )
    }

    fn member_card(&self, member: &ActiveMember) -> String {
        let avatar = match self.photos.lookup_photo(&member.name) {
            Some(asset) => format!(
                r#"<img class="avatar" src="{}" alt="{}">"#,
                html_escape(&asset),
                html_escape(&member.name)
            ),
            None => format!(r#"<div class="avatar placeholder">{PHOTO_PLACEHOLDER}</div>"#),
        };
        format!(
            r#"        <div class="member">{avatar}<div><strong>{name}</strong><br><small class="text-muted">{role}</small></div></div>
"#,
            name = html_escape(&member.name),
            role = html_escape(&member.role),
        )
    }

    fn members_card(&self, members: &[ActiveMember]) -> String {
        let cards: String = members.iter().map(|m| self.member_card(m)).collect();
        format!(
            r#"<div class="card">
      <div class="card-header">Active Team Members</div>
      <div class="card-body">
{cards}      </div>
    </div>"#
        )
    }
}

impl<P: PhotoLookup> Renderer for HtmlDashboardRenderer<P> {
    type Output = String;

    fn render(&self, report: &StatusReport) -> Result<String, RenderError> {
        let chart = self.chart.render(&report.workstreams)?;
        debug!(
            members = report.members.len(),
            chart_bytes = chart.len(),
            "Rendering HTML dashboard"
        );

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <style>
{css}
  </style>
</head>
<body>
  <h2 class="page-title">{title}</h2>
  <p class="text-muted as-of">As of {as_of} &middot; {start} to {end}</p>
  <div class="grid">
    {kpis}
    <div class="card">
      <div class="card-header">Workstream Progress</div>
      <div class="card-body chart">
{chart}
      </div>
    </div>
    {tasks}
    {members}
  </div>
</body>
</html>
"#,
            title = html_escape(&self.title),
            css = DASHBOARD_CSS,
            as_of = report.as_of,
            start = report.window.start,
            end = report.window.end,
            kpis = self.kpi_card(&report.kpis),
            chart = chart,
            tasks = self.task_table(&report.tasks),
            members = self.members_card(&report.members),
        ))
    }
}

const DASHBOARD_CSS: &str = r#"    body { font-family: system-ui, -apple-system, sans-serif; margin: 0 auto; padding: 1rem 2rem; max-width: 1280px; color: #212529; }
    .page-title { text-align: center; margin: 1.5rem 0 0.25rem; }
    .as-of { text-align: center; margin-bottom: 1.5rem; }
    .grid { display: grid; grid-template-columns: 1fr 1fr; gap: 1.5rem; }
    .card { border: 1px solid #dee2e6; border-radius: 0.375rem; box-shadow: 0 0.125rem 0.25rem rgba(0,0,0,0.075); }
    .card-header { padding: 0.5rem 1rem; background: #f8f9fa; border-bottom: 1px solid #dee2e6; font-weight: 600; }
    .card-body { padding: 1rem; }
    .kpis { display: flex; justify-content: center; gap: 2rem; }
    .kpi { text-align: center; }
    .kpi h2 { margin: 0; }
    .text-primary { color: #0d6efd; }
    .text-muted { color: #6c757d; }
    .badge { display: inline-block; padding: 0.4rem 1rem; border-radius: 50rem; color: #fff; }
    .badge-warning { color: #212529; }
    .table { width: 100%; border-collapse: collapse; }
    .table th, .table td { border: 1px solid #dee2e6; padding: 0.4rem 0.6rem; text-align: left; }
    .table tbody tr:nth-child(odd) { background: #f2f2f2; }
    .member { display: flex; align-items: center; gap: 0.75rem; padding: 0.5rem; margin-bottom: 0.5rem; border: 1px solid #dee2e6; border-radius: 0.375rem; }
    .avatar { width: 48px; height: 48px; border-radius: 50%; object-fit: cover; }
    .placeholder { font-size: 2rem; line-height: 48px; text-align: center; }"#;

/// HTML-escape a string
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
