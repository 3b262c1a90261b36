//! Entity kinds and their identifying columns.

use crate::CoreError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Column that identifies the row an issue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IdColumn {
    /// `Pipe_ID`, used for pipes, inspections and hydraulic properties
    #[serde(rename = "Pipe_ID")]
    Pipe,
    /// `Defect_ID`, used for defects
    #[serde(rename = "Defect_ID")]
    Defect,
}

impl IdColumn {
    /// Returns the column name.
    pub fn name(&self) -> &'static str {
        match self {
            IdColumn::Pipe => "Pipe_ID",
            IdColumn::Defect => "Defect_ID",
        }
    }
}

impl fmt::Display for IdColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The four kinds of asset record pipecheck validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    /// Pipe network segments
    Pipes,
    /// CCTV inspections
    Cctv,
    /// Defects observed during inspections
    Defects,
    /// Hydraulic properties of pipes
    #[serde(rename = "HYDRAULIC_PROPERTIES")]
    Hydraulics,
}

impl EntityKind {
    /// All entity kinds, in report order.
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Pipes,
        EntityKind::Cctv,
        EntityKind::Defects,
        EntityKind::Hydraulics,
    ];

    /// Returns the column that identifies rows of this kind.
    pub fn id_column(&self) -> IdColumn {
        match self {
            EntityKind::Defects => IdColumn::Defect,
            _ => IdColumn::Pipe,
        }
    }

    /// Returns the database table holding this kind.
    pub fn table_name(&self) -> &'static str {
        match self {
            EntityKind::Pipes => "pipe",
            EntityKind::Cctv => "inspection",
            EntityKind::Defects => "defect",
            EntityKind::Hydraulics => "hydraulic_properties",
        }
    }

    /// Returns the workbook sheet holding this kind. Also used as the
    /// entity label in summaries.
    pub fn sheet_name(&self) -> &'static str {
        match self {
            EntityKind::Pipes => "PIPES",
            EntityKind::Cctv => "CCTV",
            EntityKind::Defects => "DEFECTS",
            EntityKind::Hydraulics => "HYDRAULIC_PROPERTIES",
        }
    }

    /// Returns the file stem used when exporting this kind's issues.
    pub fn export_name(&self) -> &'static str {
        match self {
            EntityKind::Pipes => "pipes_issues",
            EntityKind::Cctv => "cctv_issues",
            EntityKind::Defects => "defects_issues",
            EntityKind::Hydraulics => "hydraulics_issues",
        }
    }

    /// Finds the entity kind stored in the given workbook sheet.
    pub fn from_sheet_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.sheet_name() == name)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sheet_name())
    }
}

impl FromStr for EntityKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pipes" | "pipe" => Ok(EntityKind::Pipes),
            "cctv" | "inspection" | "inspections" => Ok(EntityKind::Cctv),
            "defects" | "defect" => Ok(EntityKind::Defects),
            "hydraulics" | "hydraulic_properties" => Ok(EntityKind::Hydraulics),
            _ => Err(CoreError::UnknownEntity(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_columns() {
        assert_eq!(EntityKind::Pipes.id_column().name(), "Pipe_ID");
        assert_eq!(EntityKind::Cctv.id_column().name(), "Pipe_ID");
        assert_eq!(EntityKind::Hydraulics.id_column().name(), "Pipe_ID");
        assert_eq!(EntityKind::Defects.id_column().name(), "Defect_ID");
    }

    #[test]
    fn test_parse_entity() {
        assert_eq!("pipes".parse::<EntityKind>(), Ok(EntityKind::Pipes));
        assert_eq!("Inspection".parse::<EntityKind>(), Ok(EntityKind::Cctv));
        assert_eq!(
            "hydraulic_properties".parse::<EntityKind>(),
            Ok(EntityKind::Hydraulics)
        );
        assert!(matches!(
            "manholes".parse::<EntityKind>(),
            Err(CoreError::UnknownEntity(_))
        ));
    }

    #[test]
    fn test_sheet_lookup() {
        assert_eq!(
            EntityKind::from_sheet_name("DEFECTS"),
            Some(EntityKind::Defects)
        );
        assert_eq!(EntityKind::from_sheet_name("defects"), None);
    }

    #[test]
    fn test_serialize_label() {
        let json = serde_json::to_string(&EntityKind::Hydraulics).unwrap();
        assert_eq!(json, r#""HYDRAULIC_PROPERTIES""#);
    }
}
