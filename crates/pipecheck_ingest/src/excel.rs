//! Excel workbook input.

use crate::{IngestError, InputData, Result};
use calamine::{open_workbook_auto, Data, DataType, Range, Reader};
use chrono::NaiveTime;
use pipecheck_core::{DataValue, EntityKind};
use pipecheck_validator::{DataRow, DataSet};
use std::path::Path;
use tracing::{info, warn};

/// Loads the requested sheets of a workbook.
///
/// Every name in `sheet_names` must be a sheet of the workbook. Entities
/// whose sheet was not requested read as empty datasets.
pub fn load_workbook(path: &Path, sheet_names: &[String]) -> Result<InputData> {
    if sheet_names.is_empty() {
        return Err(IngestError::MissingSheetNames);
    }

    let mut workbook = open_workbook_auto(path)?;
    let available = workbook.sheet_names();

    let mut input = InputData::default();
    for sheet in sheet_names {
        if !available.contains(sheet) {
            return Err(IngestError::SheetNotFound {
                sheet: sheet.clone(),
                path: path.to_path_buf(),
            });
        }

        let Some(entity) = EntityKind::from_sheet_name(sheet) else {
            warn!("Sheet '{}' does not hold a known entity, skipping", sheet);
            continue;
        };

        let range = workbook.worksheet_range(sheet)?;
        let dataset = range_to_dataset(&range);
        info!("Read {} row(s) from sheet '{}'", dataset.len(), sheet);
        input.set(entity, dataset);
    }

    Ok(input)
}

/// Converts a sheet to a dataset. The first row is the header.
fn range_to_dataset(range: &Range<Data>) -> DataSet {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return DataSet::empty();
    };

    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(index, cell)| match cell_to_value(cell).to_text() {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => format!("Unnamed: {}", index),
        })
        .collect();

    let records: Vec<DataRow> = rows
        .filter(|cells| !cells.iter().all(|cell| matches!(cell, Data::Empty)))
        .map(|cells| {
            columns
                .iter()
                .zip(cells.iter().map(cell_to_value).chain(std::iter::repeat(DataValue::Null)))
                .map(|(column, value)| (column.clone(), value))
                .collect()
        })
        .collect();

    DataSet::new(columns, records)
}

fn cell_to_value(cell: &Data) -> DataValue {
    match cell {
        Data::Empty | Data::Error(_) => DataValue::Null,
        Data::Int(i) => DataValue::Int(*i),
        Data::Float(f) => DataValue::Float(*f),
        Data::Bool(b) => DataValue::Bool(*b),
        Data::String(s) => DataValue::String(s.clone()),
        Data::DateTimeIso(s) => DataValue::Timestamp(s.clone()),
        Data::DurationIso(s) => DataValue::String(s.clone()),
        Data::DateTime(_) => match cell.as_datetime() {
            Some(dt) if dt.time() == NaiveTime::MIN => {
                DataValue::Timestamp(dt.format("%Y-%m-%d").to_string())
            }
            Some(dt) => DataValue::Timestamp(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => DataValue::Null,
        },
    }
}
