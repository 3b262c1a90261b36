//! Input loading for pipecheck.
//!
//! Reads the four entity datasets from either a SQLite database or an Excel
//! workbook.
//!
//! # Example
//!
//! ```no_run
//! use pipecheck_ingest::{load_input, SourceKind};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let kind: SourceKind = "excel".parse()?;
//! let sheets = vec!["PIPES".to_string(), "CCTV".to_string()];
//! let input = load_input(kind, "network.xlsx", &sheets).await?;
//!
//! println!("{} pipe rows", input.pipes.len());
//! # Ok(())
//! # }
//! ```

mod error;
mod excel;
mod input;
mod source;
mod sqlite;

pub use error::{IngestError, Result};
pub use excel::load_workbook;
pub use input::{load_input, InputData};
pub use source::SourceKind;
pub use sqlite::load_database;
