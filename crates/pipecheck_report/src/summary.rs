use crate::Result;
use pipecheck_core::{EntityKind, IssueReport};
use rust_xlsxwriter::{Format, Workbook};
use serde::Serialize;
use std::path::Path;
use tracing::info;

pub const SUMMARY_FILE: &str = "Summary.xlsx";
pub const SUMMARY_SHEET: &str = "SUMMARY";

const HEADER: [&str; 3] = ["Entity", "Errors", "Warnings"];

/// Issue counts of one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub entity: EntityKind,
    pub errors: usize,
    pub warnings: usize,
}

/// Issue counts of a whole run, one row per entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    rows: Vec<SummaryRow>,
}

impl Summary {
    /// Builds the summary from the four reports, given in entity order
    /// (pipes, CCTV, defects, hydraulic properties).
    pub fn build(reports: [&IssueReport; 4]) -> Self {
        let rows = EntityKind::ALL
            .into_iter()
            .zip(reports)
            .map(|(entity, report)| SummaryRow {
                entity,
                errors: report.error_count(),
                warnings: report.warning_count(),
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    pub fn total_errors(&self) -> usize {
        self.rows.iter().map(|row| row.errors).sum()
    }

    pub fn total_warnings(&self) -> usize {
        self.rows.iter().map(|row| row.warnings).sum()
    }
}

/// Writes the summary workbook.
pub fn write_summary(path: &Path, summary: &Summary) -> Result<()> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SUMMARY_SHEET)?;
    for (col, title) in (0u16..).zip(HEADER) {
        sheet.write_string_with_format(0, col, title, &bold)?;
    }
    for (row, entry) in (1u32..).zip(summary.rows()) {
        sheet.write_string(row, 0, entry.entity.sheet_name())?;
        sheet.write_number(row, 1, entry.errors as f64)?;
        sheet.write_number(row, 2, entry.warnings as f64)?;
    }

    workbook.save(path)?;
    info!("Summary written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipecheck_core::{DataValue, IdColumn, Issue};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_summary() {
        let pipes = IssueReport::from_issues(
            IdColumn::Pipe,
            vec![
                Issue::error("P1", "Diameter", "Value is below minimum (0).", -5),
                Issue::warning("P2", "Material", "The value is null", DataValue::Null),
                Issue::error("P3", "Slope", "The value is negative", -1),
            ],
        );
        let cctv = IssueReport::empty(IdColumn::Pipe);
        let defects = IssueReport::no_information(EntityKind::Defects);
        let hydraulics = IssueReport::no_information(EntityKind::Hydraulics);

        let summary = Summary::build([&pipes, &cctv, &defects, &hydraulics]);

        assert_eq!(
            summary.rows(),
            &[
                SummaryRow {
                    entity: EntityKind::Pipes,
                    errors: 2,
                    warnings: 1
                },
                SummaryRow {
                    entity: EntityKind::Cctv,
                    errors: 0,
                    warnings: 0
                },
                SummaryRow {
                    entity: EntityKind::Defects,
                    errors: 0,
                    warnings: 1
                },
                SummaryRow {
                    entity: EntityKind::Hydraulics,
                    errors: 0,
                    warnings: 1
                },
            ]
        );
        assert_eq!(summary.total_errors(), 2);
        assert_eq!(summary.total_warnings(), 3);
    }
}
