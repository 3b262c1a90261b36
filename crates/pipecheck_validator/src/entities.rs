//! Entity validators.
//!
//! Each entity kind is validated against its schema by the shared engine.
//! Defects carry one extra rule that does not fit the schema model: the
//! `Quantification` column only accepts the codes `S`, `M` and `L`.

use crate::{schema_for, DataSet, SchemaEngine};
use pipecheck_core::{DataValue, EntityKind, IdColumn, Issue, IssueReport, ValidationContext};
use tracing::debug;

pub const MSG_QUANTIFICATION: &str = "Quantification must be S, M or L.";

const QUANTIFICATION_COLUMN: &str = "Quantification";
const QUANTIFICATION_CODES: [&str; 3] = ["S", "M", "L"];

/// Outcome of validating one entity dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityValidation {
    /// Kind of the validated records
    pub entity: EntityKind,
    /// The input dataset, unchanged
    pub dataset: DataSet,
    /// Issues found, sorted
    pub issues: IssueReport,
    /// True when no error-level issue was found
    pub ok: bool,
}

impl EntityValidation {
    fn new(entity: EntityKind, dataset: DataSet, issues: IssueReport) -> Self {
        let ok = !issues.has_errors();
        Self {
            entity,
            dataset,
            issues,
            ok,
        }
    }
}

/// Validates entity datasets against their schemas.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityValidator {
    engine: SchemaEngine,
}

impl EntityValidator {
    /// Creates a new validator.
    pub fn new() -> Self {
        Self {
            engine: SchemaEngine::new(),
        }
    }

    /// Validates a dataset of the given entity kind.
    ///
    /// A dataset without rows yields the single "No information uploaded"
    /// warning instead of a schema pass.
    pub fn validate(
        &self,
        entity: EntityKind,
        dataset: DataSet,
        context: &ValidationContext,
    ) -> EntityValidation {
        if dataset.is_empty() {
            debug!("No {} rows to validate", entity);
            return EntityValidation::new(entity, dataset, IssueReport::no_information(entity));
        }

        let id_column = entity.id_column();
        let mut issues = self
            .engine
            .validate(&dataset, schema_for(entity), id_column, context);

        if entity == EntityKind::Defects {
            let extra = check_quantification(&dataset, id_column);
            if !extra.is_empty() {
                debug!("{} invalid Quantification value(s)", extra.len());
                issues.extend(extra);
                issues.sort();
            }
        }

        EntityValidation::new(entity, dataset, issues)
    }

    /// Validates pipe network segments.
    pub fn validate_pipes(&self, dataset: DataSet, context: &ValidationContext) -> EntityValidation {
        self.validate(EntityKind::Pipes, dataset, context)
    }

    /// Validates CCTV inspections.
    pub fn validate_cctv(&self, dataset: DataSet, context: &ValidationContext) -> EntityValidation {
        self.validate(EntityKind::Cctv, dataset, context)
    }

    /// Validates inspection defects, including the `Quantification` codes.
    pub fn validate_defects(
        &self,
        dataset: DataSet,
        context: &ValidationContext,
    ) -> EntityValidation {
        self.validate(EntityKind::Defects, dataset, context)
    }

    /// Validates pipe hydraulic properties.
    pub fn validate_hydraulics(
        &self,
        dataset: DataSet,
        context: &ValidationContext,
    ) -> EntityValidation {
        self.validate(EntityKind::Hydraulics, dataset, context)
    }
}

/// Validates pipe network segments.
pub fn validate_pipes(dataset: DataSet, context: &ValidationContext) -> EntityValidation {
    EntityValidator::new().validate_pipes(dataset, context)
}

/// Validates CCTV inspections.
pub fn validate_cctv(dataset: DataSet, context: &ValidationContext) -> EntityValidation {
    EntityValidator::new().validate_cctv(dataset, context)
}

/// Validates inspection defects.
pub fn validate_defects(dataset: DataSet, context: &ValidationContext) -> EntityValidation {
    EntityValidator::new().validate_defects(dataset, context)
}

/// Validates pipe hydraulic properties.
pub fn validate_hydraulics(dataset: DataSet, context: &ValidationContext) -> EntityValidation {
    EntityValidator::new().validate_hydraulics(dataset, context)
}

/// Validates a dataset of any entity kind.
pub fn validate_entity(
    entity: EntityKind,
    dataset: DataSet,
    context: &ValidationContext,
) -> EntityValidation {
    EntityValidator::new().validate(entity, dataset, context)
}

/// Flags non-null `Quantification` values outside the accepted codes.
fn check_quantification(dataset: &DataSet, id_column: IdColumn) -> Vec<Issue> {
    if !dataset.has_column(QUANTIFICATION_COLUMN) {
        return Vec::new();
    }

    (0..dataset.len())
        .filter_map(|row| {
            let value = dataset.value(row, QUANTIFICATION_COLUMN);
            let missing = value.is_null() || matches!(value, DataValue::Float(f) if f.is_nan());
            if missing || is_quantification_code(value) {
                return None;
            }
            Some(Issue::error(
                dataset.value(row, id_column.name()).clone(),
                QUANTIFICATION_COLUMN,
                MSG_QUANTIFICATION,
                value.clone(),
            ))
        })
        .collect()
}

fn is_quantification_code(value: &DataValue) -> bool {
    value
        .as_string()
        .is_some_and(|code| QUANTIFICATION_CODES.contains(&code))
}
