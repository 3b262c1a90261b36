//! Error types for pipecheck core operations.
//!
//! Data-quality findings are never errors; they are reported as
//! [`Issue`](crate::Issue)s. The errors here cover caller mistakes such as
//! naming an entity kind that does not exist.

use thiserror::Error;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Main error type for core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Entity kind name not recognized
    #[error("Unknown entity kind '{0}'. Expected one of: pipes, cctv, defects, hydraulics")]
    UnknownEntity(String),

    /// Issue level name not recognized
    #[error("Unknown issue level '{0}'. Expected 'error' or 'warning'")]
    UnknownLevel(String),
}
