//! Schema registry.
//!
//! One static rule schema per entity kind. Columns are listed in the order
//! their checks run and their issues are collected.

use pipecheck_core::{ColumnRules, EntityKind, RuleSet, Schema};

const ID: RuleSet = RuleSet::new().required().null_warning().duplicate_error();
const REQUIRED_TEXT: RuleSet = RuleSet::new().required().null_warning();
const TEXT: RuleSet = RuleSet::new().null_warning();
const NUMBER: RuleSet = RuleSet::new().numeric().null_warning();
const POSITIVE_NUMBER: RuleSet = RuleSet::new().numeric().non_negative().null_warning();
const UNCHECKED: RuleSet = RuleSet::new();

const PIPES_COLUMNS: &[ColumnRules] = &[
    ColumnRules::new("Pipe_ID", ID),
    ColumnRules::new("Manhole_up_ID", TEXT),
    ColumnRules::new("Manhole_down_ID", TEXT),
    ColumnRules::new(
        "Diameter",
        RuleSet::new()
            .numeric()
            .integer()
            .min(0.0)
            .max(4000.0)
            .null_warning(),
    ),
    ColumnRules::new("Pipe_length", POSITIVE_NUMBER),
    ColumnRules::new("Slope", POSITIVE_NUMBER),
    ColumnRules::new("Depth", POSITIVE_NUMBER),
    ColumnRules::new("Material", REQUIRED_TEXT),
    ColumnRules::new("UP_invert", NUMBER),
    ColumnRules::new("DW_invert", NUMBER),
    ColumnRules::new("DEM", NUMBER),
    ColumnRules::new(
        "Installation_year",
        RuleSet::new()
            .required()
            .numeric()
            .integer()
            .four_digits()
            .max_year_current()
            .non_negative()
            .null_warning(),
    ),
    ColumnRules::new("GWL", NUMBER),
    ColumnRules::new("GWL_from_pipe", NUMBER),
    ColumnRules::new("Land_cover_s", TEXT),
    ColumnRules::new("Land_cover_group", TEXT),
    ColumnRules::new("Lan_use_s", TEXT),
    ColumnRules::new("Land_use_group", TEXT),
    ColumnRules::new("Soil_type", TEXT),
    ColumnRules::new("Distance_seawater", POSITIVE_NUMBER),
    ColumnRules::new("Liq_vul_num", NUMBER),
    ColumnRules::new("Traffic_num", NUMBER),
    ColumnRules::new("Mean_annual", POSITIVE_NUMBER),
    ColumnRules::new("Road_num", POSITIVE_NUMBER),
    ColumnRules::new("Restaurants", POSITIVE_NUMBER),
    ColumnRules::new("Properties", POSITIVE_NUMBER),
    ColumnRules::new("Laundries", POSITIVE_NUMBER),
    ColumnRules::new("Sewage_type", TEXT),
    ColumnRules::new("Sewer_category", TEXT),
    ColumnRules::new("Weather_station_ID", TEXT),
];

const CCTV_COLUMNS: &[ColumnRules] = &[
    ColumnRules::new("Inspection_ID", ID),
    ColumnRules::new("Pipe_ID", REQUIRED_TEXT),
    ColumnRules::new("Date", RuleSet::new().null_warning().date_format()),
    ColumnRules::new(
        "Age_CCTV",
        RuleSet::new()
            .numeric()
            .integer()
            .non_negative()
            .null_warning(),
    ),
    ColumnRules::new("Inspection_direction", REQUIRED_TEXT),
    ColumnRules::new("Inspection_status", TEXT),
    ColumnRules::new("Survey_length", POSITIVE_NUMBER),
    ColumnRules::new(
        "Condition_rating",
        RuleSet::new()
            .numeric()
            .integer()
            .min(0.0)
            .max(5.0)
            .null_warning(),
    ),
    ColumnRules::new("Shape", TEXT),
    ColumnRules::new("Comments", UNCHECKED),
];

const DEFECTS_COLUMNS: &[ColumnRules] = &[
    ColumnRules::new("Defect_ID", ID),
    ColumnRules::new("Pipe_ID", REQUIRED_TEXT),
    ColumnRules::new("Defect_code", REQUIRED_TEXT),
    ColumnRules::new("Characterization_code", UNCHECKED),
    ColumnRules::new("Quantification", UNCHECKED),
    ColumnRules::new("Defect_length", RuleSet::new().numeric().non_negative()),
    ColumnRules::new("Longitudinal_distance", POSITIVE_NUMBER),
    ColumnRules::new(
        "Longitudinal_distance_normalized",
        RuleSet::new().numeric().min(0.0).max(1.0).null_warning(),
    ),
    ColumnRules::new(
        "Circumferential_start",
        RuleSet::new().numeric().min(0.0).max(12.0),
    ),
    ColumnRules::new(
        "Circumferential_end",
        RuleSet::new().numeric().min(0.0).max(12.0),
    ),
    ColumnRules::new("Observation_inspection", TEXT),
    ColumnRules::new("Comments", UNCHECKED),
];

const HYDRAULICS_COLUMNS: &[ColumnRules] = &[
    ColumnRules::new("Pipe_ID", REQUIRED_TEXT),
    ColumnRules::new("Wet_peak_flow_rate", POSITIVE_NUMBER),
    ColumnRules::new("Dry_peak_flow_rate", POSITIVE_NUMBER),
    ColumnRules::new("Wet_peak_velocity", POSITIVE_NUMBER),
    ColumnRules::new("Dry_peak_velocity", POSITIVE_NUMBER),
    ColumnRules::new("Pipe_capacity", POSITIVE_NUMBER),
];

/// Rules for pipe network segments.
pub static PIPES_SCHEMA: Schema = Schema::new(EntityKind::Pipes, PIPES_COLUMNS);

/// Rules for CCTV inspections.
pub static CCTV_SCHEMA: Schema = Schema::new(EntityKind::Cctv, CCTV_COLUMNS);

/// Rules for inspection defects.
pub static DEFECTS_SCHEMA: Schema = Schema::new(EntityKind::Defects, DEFECTS_COLUMNS);

/// Rules for pipe hydraulic properties.
pub static HYDRAULICS_SCHEMA: Schema = Schema::new(EntityKind::Hydraulics, HYDRAULICS_COLUMNS);

/// Returns the schema of an entity kind.
pub fn schema_for(entity: EntityKind) -> &'static Schema {
    match entity {
        EntityKind::Pipes => &PIPES_SCHEMA,
        EntityKind::Cctv => &CCTV_SCHEMA,
        EntityKind::Defects => &DEFECTS_SCHEMA,
        EntityKind::Hydraulics => &HYDRAULICS_SCHEMA,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_schema_sizes() {
        assert_eq!(PIPES_SCHEMA.len(), 31);
        assert_eq!(CCTV_SCHEMA.len(), 10);
        assert_eq!(DEFECTS_SCHEMA.len(), 12);
        assert_eq!(HYDRAULICS_SCHEMA.len(), 6);
    }

    #[test]
    fn test_required_columns() {
        assert_eq!(
            PIPES_SCHEMA.required_columns().collect::<Vec<_>>(),
            vec!["Pipe_ID", "Material", "Installation_year"]
        );
        assert_eq!(
            CCTV_SCHEMA.required_columns().collect::<Vec<_>>(),
            vec!["Inspection_ID", "Pipe_ID", "Inspection_direction"]
        );
        assert_eq!(
            DEFECTS_SCHEMA.required_columns().collect::<Vec<_>>(),
            vec!["Defect_ID", "Pipe_ID", "Defect_code"]
        );
        assert_eq!(
            HYDRAULICS_SCHEMA.required_columns().collect::<Vec<_>>(),
            vec!["Pipe_ID"]
        );
    }

    #[test]
    fn test_schema_lookup_by_entity() {
        for entity in EntityKind::ALL {
            assert_eq!(schema_for(entity).entity(), entity);
        }
    }

    #[test]
    fn test_column_names_are_unique() {
        for entity in EntityKind::ALL {
            let schema = schema_for(entity);
            let mut names: Vec<&str> = schema.columns().iter().map(|c| c.name).collect();
            names.sort();
            names.dedup();
            assert_eq!(names.len(), schema.len(), "{} has duplicate columns", entity);
        }
    }

    #[test]
    fn test_installation_year_rules() {
        let rules = PIPES_SCHEMA.get("Installation_year").copied().unwrap_or_default();
        assert!(rules.required && rules.numeric && rules.integer);
        assert!(rules.four_digits && rules.max_year_current && rules.non_negative);
        assert!(rules.null_warning);
        assert!(!rules.duplicate_error);
    }

    #[test]
    fn test_unchecked_columns() {
        assert!(CCTV_SCHEMA.get("Comments").is_some_and(|r| r.is_empty()));
        assert!(DEFECTS_SCHEMA.get("Quantification").is_some_and(|r| r.is_empty()));
        assert!(
            DEFECTS_SCHEMA
                .get("Defect_length")
                .is_some_and(|r| !r.null_warning)
        );
    }
}
