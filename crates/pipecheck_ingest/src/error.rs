use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IngestError>;

/// Errors raised while loading input data.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Source kind is neither `database` nor `excel`
    #[error("Unsupported source type '{0}': expected 'database' or 'excel'")]
    UnsupportedSource(String),

    /// Excel input needs the list of sheets to read
    #[error("Sheet names must be provided when the source is an Excel workbook")]
    MissingSheetNames,

    /// A requested sheet is not in the workbook
    #[error("Sheet '{sheet}' not found in {}", path.display())]
    SheetNotFound { sheet: String, path: PathBuf },

    /// Input file does not exist
    #[error("Input file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// SQLite failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Workbook failure
    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    /// Background loading task failed
    #[error("Loading task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
