//! Issue table export.
//!
//! Tables have the columns `[<id column>, column, level, message, value]`.
//! They are written as xlsx unless they would not fit on one sheet.

use crate::Result;
use pipecheck_core::{DataValue, Issue, IssueReport};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Row ceiling of an xlsx sheet.
pub const MAX_XLSX_ROWS: usize = 1_048_576;

const ISSUES_SHEET: &str = "ISSUES";

/// File format of an exported issue table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

impl ExportFormat {
    /// Picks the format for a table of `issue_count` rows.
    pub fn for_row_count(issue_count: usize) -> Self {
        if issue_count < MAX_XLSX_ROWS {
            ExportFormat::Xlsx
        } else {
            ExportFormat::Csv
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Writes `<dir>/<name>.xlsx`, or `<dir>/<name>.csv` for tables too large
/// for one sheet.
pub fn export_issues(report: &IssueReport, name: &str, dir: &Path) -> Result<(PathBuf, ExportFormat)> {
    let format = ExportFormat::for_row_count(report.len());
    let path = dir.join(format!("{}.{}", name, format.extension()));

    match format {
        ExportFormat::Xlsx => write_xlsx(report, &path)?,
        ExportFormat::Csv => {
            warn!(
                "{} issue(s) exceed the sheet row limit, exporting {} as CSV",
                report.len(),
                name
            );
            write_csv(report, &path)?;
        }
    }

    info!("Exported {} issue(s) to {}", report.len(), path.display());
    Ok((path, format))
}

fn header(report: &IssueReport) -> [&'static str; 5] {
    [report.id_column().name(), "column", "level", "message", "value"]
}

/// Writes the issue table as a single-sheet workbook.
pub fn write_xlsx(report: &IssueReport, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(ISSUES_SHEET)?;
    for (col, title) in (0u16..).zip(header(report)) {
        sheet.write_string_with_format(0, col, title, &bold)?;
    }
    for (row, issue) in (1u32..).zip(report.issues()) {
        write_issue(sheet, row, issue)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_issue(sheet: &mut Worksheet, row: u32, issue: &Issue) -> Result<()> {
    write_value(sheet, row, 0, &issue.entity_key)?;
    sheet.write_string(row, 1, &issue.column)?;
    sheet.write_string(row, 2, issue.level.as_str())?;
    sheet.write_string(row, 3, &issue.message)?;
    write_value(sheet, row, 4, &issue.value)?;
    Ok(())
}

fn write_value(sheet: &mut Worksheet, row: u32, col: u16, value: &DataValue) -> Result<()> {
    match value {
        DataValue::Null => {}
        DataValue::Int(i) => {
            sheet.write_number(row, col, *i as f64)?;
        }
        DataValue::Float(f) if f.is_finite() => {
            sheet.write_number(row, col, *f)?;
        }
        DataValue::Bool(b) => {
            sheet.write_boolean(row, col, *b)?;
        }
        other => {
            sheet.write_string(row, col, other.to_string())?;
        }
    }
    Ok(())
}

/// Writes the issue table as CSV. Null cells are empty.
pub fn write_csv(report: &IssueReport, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(header(report))?;
    for issue in report {
        writer.write_record([
            issue.entity_key.to_string(),
            issue.column.clone(),
            issue.level.to_string(),
            issue.message.clone(),
            issue.value.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_for_row_count() {
        assert_eq!(ExportFormat::for_row_count(0), ExportFormat::Xlsx);
        assert_eq!(ExportFormat::for_row_count(MAX_XLSX_ROWS - 1), ExportFormat::Xlsx);
        assert_eq!(ExportFormat::for_row_count(MAX_XLSX_ROWS), ExportFormat::Csv);
    }

    #[test]
    fn test_extension() {
        assert_eq!(ExportFormat::Xlsx.extension(), "xlsx");
        assert_eq!(ExportFormat::Csv.to_string(), "csv");
    }
}
