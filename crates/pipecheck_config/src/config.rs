//! Run configuration.

use crate::{ConfigError, Result};
use pipecheck_core::ValidationContext;
use pipecheck_ingest::SourceKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the output directory.
pub const OUTPUT_DIR_ENV: &str = "PIPECHECK_OUTPUT_DIR";

/// Output directory used when nothing else is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "Validation_Results";

fn default_true() -> bool {
    true
}

/// Settings of one validation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Kind of input
    #[serde(default)]
    pub source: SourceKind,

    /// Database or workbook to read
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Workbook sheets to read
    #[serde(default)]
    pub sheet_names: Vec<String>,

    /// Directory receiving the summary and issue tables
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Open the summary workbook when done
    #[serde(default)]
    pub open_report: bool,

    /// Open the output folder when done
    #[serde(default = "default_true")]
    pub open_folder: bool,

    /// Year `max_year_current` compares against; the current year if unset
    #[serde(default)]
    pub reference_year: Option<i32>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::default(),
            path: None,
            sheet_names: Vec::new(),
            output_dir: None,
            open_report: false,
            open_folder: true,
            reference_year: None,
        }
    }
}

impl RunConfig {
    /// Creates a new builder for `RunConfig`.
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::default()
    }

    /// Returns a builder seeded with this configuration.
    pub fn into_builder(self) -> RunConfigBuilder {
        RunConfigBuilder { config: self }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        match &self.path {
            None => return Err(ConfigError::MissingPath),
            Some(path) if path.as_os_str().is_empty() => return Err(ConfigError::MissingPath),
            Some(_) => {}
        }

        if let Some(year) = self
            .reference_year
            .filter(|year| !(1000..=9999).contains(year))
        {
            return Err(ConfigError::Invalid(format!(
                "reference_year must have four digits, got {}",
                year
            )));
        }

        if self.sheet_names.iter().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "sheet names cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Returns the input path.
    pub fn input_path(&self) -> Result<&Path> {
        self.path.as_deref().ok_or(ConfigError::MissingPath)
    }

    /// Resolves the output directory: the configured one, else
    /// `PIPECHECK_OUTPUT_DIR`, else `Validation_Results`.
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir_with(|key| std::env::var(key).ok())
    }

    fn output_dir_with(&self, lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
        self.output_dir
            .clone()
            .or_else(|| {
                lookup(OUTPUT_DIR_ENV)
                    .filter(|dir| !dir.trim().is_empty())
                    .map(PathBuf::from)
            })
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    /// Returns the validation context of the run.
    pub fn context(&self) -> ValidationContext {
        match self.reference_year {
            Some(year) => ValidationContext::for_year(year),
            None => ValidationContext::new(),
        }
    }
}

/// Builder for `RunConfig`.
#[derive(Debug, Clone, Default)]
pub struct RunConfigBuilder {
    config: RunConfig,
}

impl RunConfigBuilder {
    /// Sets the input kind.
    pub fn source(mut self, source: SourceKind) -> Self {
        self.config.source = source;
        self
    }

    /// Sets the input path.
    pub fn path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.path = Some(path.into());
        self
    }

    /// Adds a sheet to read.
    pub fn sheet<S: Into<String>>(mut self, name: S) -> Self {
        self.config.sheet_names.push(name.into());
        self
    }

    /// Replaces the sheets to read.
    pub fn sheet_names(mut self, names: Vec<String>) -> Self {
        self.config.sheet_names = names;
        self
    }

    /// Sets the output directory.
    pub fn output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.config.output_dir = Some(dir.into());
        self
    }

    /// Opens the summary workbook when done.
    pub fn open_report(mut self, open: bool) -> Self {
        self.config.open_report = open;
        self
    }

    /// Opens the output folder when done.
    pub fn open_folder(mut self, open: bool) -> Self {
        self.config.open_folder = open;
        self
    }

    /// Sets the reference year.
    pub fn reference_year(mut self, year: i32) -> Self {
        self.config.reference_year = Some(year);
        self
    }

    /// Builds the `RunConfig`.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> Result<RunConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder() {
        let config = RunConfig::builder()
            .source(SourceKind::Excel)
            .path("network.xlsx")
            .sheet("PIPES")
            .sheet("CCTV")
            .output_dir("out")
            .open_folder(false)
            .reference_year(2024)
            .build()
            .unwrap();

        assert_eq!(config.source, SourceKind::Excel);
        assert_eq!(config.sheet_names, vec!["PIPES", "CCTV"]);
        assert_eq!(config.output_dir(), PathBuf::from("out"));
        assert!(!config.open_folder);
        assert_eq!(config.context().reference_year, 2024);
    }

    #[test]
    fn test_path_is_required() {
        let result = RunConfig::builder().build();
        assert!(matches!(result, Err(ConfigError::MissingPath)));

        let result = RunConfig::builder().path("").build();
        assert!(matches!(result, Err(ConfigError::MissingPath)));
    }

    #[test]
    fn test_reference_year_must_have_four_digits() {
        let result = RunConfig::builder().path("a.db").reference_year(99).build();
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_blank_sheet_name_is_invalid() {
        let result = RunConfig::builder().path("a.xlsx").sheet(" ").build();
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_into_builder_overrides() {
        let base = RunConfig::builder()
            .path("a.db")
            .output_dir("from_file")
            .build()
            .unwrap();

        let config = base.into_builder().output_dir("from_flag").build().unwrap();

        assert_eq!(config.output_dir, Some(PathBuf::from("from_flag")));
        assert_eq!(config.path, Some(PathBuf::from("a.db")));
    }

    #[test]
    fn test_output_dir_fallbacks() {
        let config = RunConfig::default();

        assert_eq!(
            config.output_dir_with(|_| Some("env_dir".to_string())),
            PathBuf::from("env_dir")
        );
        assert_eq!(
            config.output_dir_with(|_| Some("  ".to_string())),
            PathBuf::from(DEFAULT_OUTPUT_DIR)
        );
        assert_eq!(config.output_dir_with(|_| None), PathBuf::from(DEFAULT_OUTPUT_DIR));

        let explicit = RunConfig {
            output_dir: Some(PathBuf::from("explicit")),
            ..RunConfig::default()
        };
        assert_eq!(
            explicit.output_dir_with(|_| Some("env_dir".to_string())),
            PathBuf::from("explicit")
        );
    }

    #[test]
    fn test_default_context_uses_current_year() {
        assert_eq!(
            RunConfig::default().context().reference_year,
            ValidationContext::new().reference_year
        );
    }
}
