use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors raised while writing report files.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
