//! # pipecheck Report
//!
//! Turns issue reports into files:
//!
//! - `Summary.xlsx`: error and warning counts per entity
//! - one issue table per entity, as xlsx or CSV when too large for a sheet
//! - a best-effort helper opening the results in the OS shell

mod error;
mod export;
mod open;
mod summary;

pub use error::{ReportError, Result};
pub use export::{export_issues, write_csv, write_xlsx, ExportFormat, MAX_XLSX_ROWS};
pub use open::{open_path, OpenTarget};
pub use summary::{write_summary, Summary, SummaryRow, SUMMARY_FILE, SUMMARY_SHEET};
