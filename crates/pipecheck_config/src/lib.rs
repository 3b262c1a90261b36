//! Run configuration for pipecheck.
//!
//! A [`RunConfig`] says where the input lives, which sheets to read and
//! where results go. It can be built in code or loaded from a YAML or TOML
//! file.
//!
//! # Example
//!
//! ```rust
//! use pipecheck_config::parse_yaml;
//! use pipecheck_ingest::SourceKind;
//!
//! let yaml = r#"
//! source: excel
//! path: data/network.xlsx
//! sheet_names: [PIPES, CCTV]
//! output_dir: results
//! "#;
//!
//! let config = parse_yaml(yaml).expect("Failed to parse config");
//! assert_eq!(config.source, SourceKind::Excel);
//! assert_eq!(config.sheet_names.len(), 2);
//! ```

mod config;
mod parser;

pub use config::{RunConfig, RunConfigBuilder, DEFAULT_OUTPUT_DIR, OUTPUT_DIR_ENV};
pub use parser::{detect_format, parse_file, parse_toml, parse_yaml, ConfigFormat};

use thiserror::Error;

/// Errors raised while loading or checking a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// Input path not set
    #[error("An input path is required: pass --path or set 'path' in the config file")]
    MissingPath,

    /// Configuration values are inconsistent
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
