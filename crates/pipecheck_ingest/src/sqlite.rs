//! SQLite input.
//!
//! Each entity is read with `SELECT *` from its table. Cells are mapped by
//! their storage class. `TEXT` cells in columns declared as a date or
//! datetime become timestamps when they hold an ISO date or datetime; other
//! text stays a string so the date check still sees it.

use crate::{InputData, Result};
use chrono::{NaiveDate, NaiveDateTime};
use pipecheck_core::{DataValue, EntityKind};
use pipecheck_validator::{DataRow, DataSet};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Row, TypeInfo, ValueRef};
use std::path::Path;
use tracing::{debug, info, warn};

const DATE_TYPES: [&str; 3] = ["DATE", "DATETIME", "TIMESTAMP"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Loads the four entity tables of a SQLite database.
///
/// `pipe`, `inspection` and `defect` must exist. A missing
/// `hydraulic_properties` table reads as an empty dataset.
pub async fn load_database(path: &Path) -> Result<InputData> {
    let options = SqliteConnectOptions::new().filename(path).read_only(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    let mut input = InputData::default();
    for entity in [EntityKind::Pipes, EntityKind::Cctv, EntityKind::Defects] {
        input.set(entity, read_table(&pool, entity.table_name()).await?);
    }

    let hydraulics = EntityKind::Hydraulics.table_name();
    match read_table(&pool, hydraulics).await {
        Ok(dataset) => input.set(EntityKind::Hydraulics, dataset),
        Err(e) => warn!("Could not read table '{}', treating it as empty: {}", hydraulics, e),
    }

    pool.close().await;
    Ok(input)
}

async fn read_table(pool: &SqlitePool, table: &str) -> std::result::Result<DataSet, sqlx::Error> {
    let query = format!("SELECT * FROM \"{}\"", table);
    let rows = sqlx::query(&query).fetch_all(pool).await?;

    let columns: Vec<String> = rows
        .first()
        .map(|row| row.columns().iter().map(|c| c.name().to_string()).collect())
        .unwrap_or_default();

    let mut records = Vec::with_capacity(rows.len());
    for row in &rows {
        records.push(decode_row(row)?);
    }

    info!("Read {} row(s) from table '{}'", records.len(), table);
    Ok(DataSet::new(columns, records))
}

fn decode_row(row: &SqliteRow) -> std::result::Result<DataRow, sqlx::Error> {
    let mut record = DataRow::with_capacity(row.len());
    for (index, column) in row.columns().iter().enumerate() {
        let declared = column.type_info().name().to_ascii_uppercase();
        record.insert(column.name().to_string(), decode_cell(row, index, &declared)?);
    }
    Ok(record)
}

fn decode_cell(
    row: &SqliteRow,
    index: usize,
    declared: &str,
) -> std::result::Result<DataValue, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(DataValue::Null);
    }
    let storage = raw.type_info().name().to_string();

    let value = match storage.as_str() {
        "INTEGER" if declared == "BOOLEAN" => DataValue::Bool(row.try_get_unchecked(index)?),
        "INTEGER" => DataValue::Int(row.try_get_unchecked(index)?),
        "REAL" => DataValue::Float(row.try_get_unchecked(index)?),
        "TEXT" if DATE_TYPES.contains(&declared) => {
            let text: String = row.try_get_unchecked(index)?;
            if is_iso_timestamp(&text) {
                DataValue::Timestamp(text)
            } else {
                DataValue::String(text)
            }
        }
        "TEXT" => DataValue::String(row.try_get_unchecked(index)?),
        other => {
            debug!("Reading {} cell as text", other);
            let bytes: Vec<u8> = row.try_get_unchecked(index)?;
            DataValue::String(String::from_utf8_lossy(&bytes).into_owned())
        }
    };
    Ok(value)
}

/// Returns true for `YYYY-MM-DD` dates and ISO datetimes.
fn is_iso_timestamp(text: &str) -> bool {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
        || DATETIME_FORMATS
            .iter()
            .any(|format| NaiveDateTime::parse_from_str(text, format).is_ok())
}
