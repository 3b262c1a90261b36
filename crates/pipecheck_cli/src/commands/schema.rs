use anyhow::{Context, Result};
use pipecheck_core::EntityKind;
use pipecheck_validator::schema_for;
use tracing::debug;

use crate::output;

pub fn execute(entity: &str, format: &str) -> Result<()> {
    let kind: EntityKind = entity
        .parse()
        .with_context(|| format!("Cannot show schema for '{}'", entity))?;
    debug!("Printing schema of {}", kind);

    output::print_schema(schema_for(kind), format)
}
