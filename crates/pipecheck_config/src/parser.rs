use crate::{ConfigError, Result, RunConfig};
use std::path::Path;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// Parse a run configuration from a YAML string.
pub fn parse_yaml(content: &str) -> Result<RunConfig> {
    let config: RunConfig = serde_yaml_ng::from_str(content)?;
    Ok(config)
}

/// Parse a run configuration from a TOML string.
///
/// ```rust
/// use pipecheck_config::parse_toml;
///
/// let config = parse_toml(r#"
/// source = "database"
/// path = "network.db"
/// open_folder = false
/// "#).unwrap();
///
/// assert!(!config.open_folder);
/// ```
pub fn parse_toml(content: &str) -> Result<RunConfig> {
    toml::from_str(content).map_err(|e| ConfigError::TomlError(e.to_string()))
}

/// Detect the configuration format from a file extension.
///
/// # Errors
///
/// Returns `ConfigError::InvalidExtension` if the file has no extension.
/// Returns `ConfigError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<ConfigFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ConfigError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(ConfigFormat::Yaml),
        "toml" => Ok(ConfigFormat::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a run configuration from a file, picking the format from its
/// extension.
pub fn parse_file(path: &Path) -> Result<RunConfig> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        ConfigFormat::Yaml => parse_yaml(&content),
        ConfigFormat::Toml => parse_toml(&content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipecheck_ingest::SourceKind;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_yaml_full() {
        let yaml = r#"
source: excel
path: network.xlsx
sheet_names:
  - PIPES
  - DEFECTS
output_dir: out
open_report: true
open_folder: false
reference_year: 2024
"#;

        let config = parse_yaml(yaml).expect("Failed to parse YAML");

        assert_eq!(config.source, SourceKind::Excel);
        assert_eq!(config.path, Some(PathBuf::from("network.xlsx")));
        assert_eq!(config.sheet_names, vec!["PIPES", "DEFECTS"]);
        assert_eq!(config.output_dir, Some(PathBuf::from("out")));
        assert!(config.open_report);
        assert!(!config.open_folder);
        assert_eq!(config.reference_year, Some(2024));
    }

    #[test]
    fn test_parse_yaml_defaults() {
        let config = parse_yaml("path: network.db").expect("Failed to parse YAML");

        assert_eq!(config.source, SourceKind::Database);
        assert!(config.sheet_names.is_empty());
        assert!(!config.open_report);
        assert!(config.open_folder);
        assert_eq!(config.reference_year, None);
    }

    #[test]
    fn test_parse_yaml_unknown_source() {
        let result = parse_yaml("source: csv");
        assert!(matches!(result, Err(ConfigError::YamlError(_))));
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
source = "excel"
path = "network.xlsx"
sheet_names = ["PIPES"]
"#;

        let config = parse_toml(toml).expect("Failed to parse TOML");

        assert_eq!(config.source, SourceKind::Excel);
        assert_eq!(config.sheet_names, vec!["PIPES"]);
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = parse_toml("source = ");
        assert!(matches!(result, Err(ConfigError::TomlError(_))));
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(Path::new("run.yaml")).unwrap(), ConfigFormat::Yaml);
        assert_eq!(detect_format(Path::new("run.YML")).unwrap(), ConfigFormat::Yaml);
        assert_eq!(detect_format(Path::new("run.toml")).unwrap(), ConfigFormat::Toml);
        assert!(matches!(
            detect_format(Path::new("run.json")),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "json"
        ));
        assert!(matches!(
            detect_format(Path::new("run")),
            Err(ConfigError::InvalidExtension)
        ));
    }

    #[test]
    fn test_parse_file() {
        let mut file = NamedTempFile::with_suffix(".yml").unwrap();
        writeln!(file, "source: database\npath: assets.db").unwrap();

        let config = parse_file(file.path()).expect("Failed to parse file");

        assert_eq!(config.path, Some(PathBuf::from("assets.db")));
    }

    #[test]
    fn test_parse_missing_file() {
        let result = parse_file(Path::new("/nonexistent/run.toml"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
