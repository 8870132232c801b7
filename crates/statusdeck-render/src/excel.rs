//! Excel status workbook renderer
//!
//! Generates an XLSX file with one sheet per dashboard section:
//! - Summary: reporting window and KPI counts, risk badge as a colored cell
//! - Workstreams: mean planned vs actual percent, deviation and band
//! - Tasks: activities in the reporting window with their progress
//! - Members: active team members and roles
//!
//! ```text
//! Sheet: Workstreams
//! | Workstream | Planned % | Actual % | Deviation | Status   |
//! |------------|-----------|----------|-----------|----------|
//! | Design     | 83.3      | 55.0     | 28.3      | at risk  |
//! | Build      | 20.0      | 25.0     | 5.0       | on track |
//! ```

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use tracing::debug;
use statusdeck_core::{
    ActiveMember, BadgeColor, DeviationBand, RenderError, Renderer, StatusReport, TaskRow,
    WorkstreamProgress,
};

/// Excel status workbook renderer
#[derive(Clone, Debug)]
pub struct ExcelRenderer {
    /// Title written at the top of the Summary sheet
    pub title: String,
    /// Whether to include the Members sheet
    pub include_members: bool,
}

impl Default for ExcelRenderer {
    fn default() -> Self {
        Self {
            title: "Client Dashboard".into(),
            include_members: true,
        }
    }
}

/// Reusable cell formats
struct ExcelFormats {
    header: Format,
    text: Format,
    number: Format,
    integer: Format,
    title: Format,
}

fn xlsx_err(e: rust_xlsxwriter::XlsxError) -> RenderError {
    RenderError::Format(e.to_string())
}

fn band_background(band: DeviationBand) -> u32 {
    match band {
        DeviationBand::OnTrack => 0xC6EFCE,
        DeviationBand::AtRisk => 0xFFEB9C,
        DeviationBand::OffTrack => 0xFFC7CE,
    }
}

fn badge_background(color: BadgeColor) -> u32 {
    match color {
        BadgeColor::Danger => 0xDC3545,
        BadgeColor::Warning => 0xFFC107,
        BadgeColor::Secondary => 0x6C757D,
    }
}

impl ExcelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Summary sheet title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Leave out the Members sheet
    pub fn no_members(mut self) -> Self {
        self.include_members = false;
        self
    }

    /// Render the report into XLSX bytes
    pub fn render_to_bytes(&self, report: &StatusReport) -> Result<Vec<u8>, RenderError> {
        debug!(
            workstreams = report.workstreams.len(),
            tasks = report.tasks.len(),
            "Rendering status workbook"
        );
        let mut workbook = Workbook::new();
        let formats = Self::create_formats();

        self.add_summary_sheet(&mut workbook, report, &formats)?;
        Self::add_workstreams_sheet(&mut workbook, &report.workstreams, &formats)?;
        Self::add_tasks_sheet(&mut workbook, &report.tasks, &formats)?;
        if self.include_members {
            Self::add_members_sheet(&mut workbook, &report.members, &formats)?;
        }

        workbook
            .save_to_buffer()
            .map_err(|e| RenderError::Format(format!("Failed to create Excel: {e}")))
    }

    fn create_formats() -> ExcelFormats {
        ExcelFormats {
            header: Format::new()
                .set_bold()
                .set_align(FormatAlign::Center)
                .set_background_color(0x4472C4)
                .set_font_color(0xFFFFFF)
                .set_border(FormatBorder::Thin),
            text: Format::new().set_border(FormatBorder::Thin),
            number: Format::new()
                .set_num_format("0.0")
                .set_border(FormatBorder::Thin),
            integer: Format::new()
                .set_num_format("0")
                .set_border(FormatBorder::Thin),
            title: Format::new().set_bold().set_font_size(14),
        }
    }

    fn write_headers(
        sheet: &mut Worksheet,
        headers: &[&str],
        formats: &ExcelFormats,
    ) -> Result<(), RenderError> {
        for (col, header) in headers.iter().enumerate() {
            sheet
                .write_with_format(0, col as u16, *header, &formats.header)
                .map_err(xlsx_err)?;
        }
        Ok(())
    }

    fn add_summary_sheet(
        &self,
        workbook: &mut Workbook,
        report: &StatusReport,
        formats: &ExcelFormats,
    ) -> Result<(), RenderError> {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Summary").map_err(xlsx_err)?;
        sheet.set_column_width(0, 22).ok();
        sheet.set_column_width(1, 16).ok();

        sheet
            .write_with_format(0, 0, &self.title, &formats.title)
            .map_err(xlsx_err)?;

        let dates = [
            ("As of", report.as_of),
            ("Window start", report.window.start),
            ("Window end", report.window.end),
        ];
        let mut row = 2u32;
        for (label, date) in dates {
            sheet
                .write_with_format(row, 0, label, &formats.text)
                .map_err(xlsx_err)?;
            sheet
                .write_with_format(row, 1, date.format("%Y-%m-%d").to_string(), &formats.text)
                .map_err(xlsx_err)?;
            row += 1;
        }

        row += 1;
        let counts = [
            ("Tasks This Month", report.kpis.task_count),
            ("Open Issues", report.kpis.open_issue_count),
        ];
        for (label, count) in counts {
            sheet
                .write_with_format(row, 0, label, &formats.text)
                .map_err(xlsx_err)?;
            sheet
                .write_with_format(row, 1, count as f64, &formats.integer)
                .map_err(xlsx_err)?;
            row += 1;
        }

        let badge = Format::new()
            .set_num_format("0")
            .set_border(FormatBorder::Thin)
            .set_bold()
            .set_font_color(0xFFFFFF)
            .set_background_color(badge_background(report.kpis.risk_color));
        sheet
            .write_with_format(row, 0, "Open Risks", &formats.text)
            .map_err(xlsx_err)?;
        sheet
            .write_with_format(row, 1, report.kpis.open_risk_count as f64, &badge)
            .map_err(xlsx_err)?;

        Ok(())
    }

    fn add_workstreams_sheet(
        workbook: &mut Workbook,
        workstreams: &[WorkstreamProgress],
        formats: &ExcelFormats,
    ) -> Result<(), RenderError> {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Workstreams").map_err(xlsx_err)?;
        Self::write_headers(
            sheet,
            &["Workstream", "Planned %", "Actual %", "Deviation", "Status"],
            formats,
        )?;
        sheet.set_column_width(0, 24).ok();
        for col in 1..=4 {
            sheet.set_column_width(col, 12).ok();
        }

        for (i, ws) in workstreams.iter().enumerate() {
            let row = i as u32 + 1;
            sheet
                .write_with_format(row, 0, &ws.label, &formats.text)
                .map_err(xlsx_err)?;
            sheet
                .write_with_format(row, 1, ws.mean_planned, &formats.number)
                .map_err(xlsx_err)?;
            match ws.mean_actual {
                Some(actual) => {
                    sheet
                        .write_with_format(row, 2, actual, &formats.number)
                        .map_err(xlsx_err)?;
                    sheet
                        .write_with_format(row, 3, ws.deviation(), &formats.number)
                        .map_err(xlsx_err)?;
                }
                None => {
                    sheet.write_blank(row, 2, &formats.number).map_err(xlsx_err)?;
                    sheet.write_blank(row, 3, &formats.number).map_err(xlsx_err)?;
                }
            }
            let band = Format::new()
                .set_border(FormatBorder::Thin)
                .set_background_color(band_background(ws.band));
            sheet
                .write_with_format(row, 4, ws.band.as_str(), &band)
                .map_err(xlsx_err)?;
        }

        Ok(())
    }

    fn add_tasks_sheet(
        workbook: &mut Workbook,
        tasks: &[TaskRow],
        formats: &ExcelFormats,
    ) -> Result<(), RenderError> {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Tasks").map_err(xlsx_err)?;
        Self::write_headers(sheet, &["Activity Name", "Progress %"], formats)?;
        sheet.set_column_width(0, 36).ok();
        sheet.set_column_width(1, 12).ok();

        for (i, task) in tasks.iter().enumerate() {
            let row = i as u32 + 1;
            sheet
                .write_with_format(row, 0, &task.activity, &formats.text)
                .map_err(xlsx_err)?;
            match task.progress {
                Some(progress) => sheet
                    .write_with_format(row, 1, progress, &formats.number)
                    .map_err(xlsx_err)?,
                None => sheet.write_blank(row, 1, &formats.number).map_err(xlsx_err)?,
            };
        }

        Ok(())
    }

    fn add_members_sheet(
        workbook: &mut Workbook,
        members: &[ActiveMember],
        formats: &ExcelFormats,
    ) -> Result<(), RenderError> {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Members").map_err(xlsx_err)?;
        Self::write_headers(sheet, &["Person Name", "Role"], formats)?;
        sheet.set_column_width(0, 24).ok();
        sheet.set_column_width(1, 24).ok();

        for (i, member) in members.iter().enumerate() {
            let row = i as u32 + 1;
            sheet
                .write_with_format(row, 0, &member.name, &formats.text)
                .map_err(xlsx_err)?;
            sheet
                .write_with_format(row, 1, &member.role, &formats.text)
                .map_err(xlsx_err)?;
        }

        Ok(())
    }
}

impl Renderer for ExcelRenderer {
    type Output = Vec<u8>;

    fn render(&self, report: &StatusReport) -> Result<Vec<u8>, RenderError> {
        self.render_to_bytes(report)
    }
}
