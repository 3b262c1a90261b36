use crate::IngestError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of input the datasets are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// SQLite database with one table per entity
    #[default]
    Database,
    /// Excel workbook with one sheet per entity
    Excel,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Database => "database",
            SourceKind::Excel => "excel",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "database" => Ok(SourceKind::Database),
            "excel" => Ok(SourceKind::Excel),
            _ => Err(IngestError::UnsupportedSource(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source_kind() {
        assert_eq!("database".parse::<SourceKind>().ok(), Some(SourceKind::Database));
        assert_eq!(" Excel ".parse::<SourceKind>().ok(), Some(SourceKind::Excel));
    }

    #[test]
    fn test_unsupported_source() {
        let err = "csv".parse::<SourceKind>().unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedSource(ref s) if s == "csv"));
        assert_eq!(
            err.to_string(),
            "Unsupported source type 'csv': expected 'database' or 'excel'"
        );
    }
}
