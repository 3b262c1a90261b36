//! Loading datasets from real SQLite databases and Excel workbooks.

use pipecheck_core::{DataValue, EntityKind};
use pipecheck_core::ValidationContext;
use pipecheck_ingest::{load_input, IngestError, SourceKind};
use pipecheck_validator::validate_cctv;
use pretty_assertions::assert_eq;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;
use tempfile::TempDir;

async fn create_database(path: &Path, with_hydraulics: bool) {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();

    let mut statements = vec![
        "CREATE TABLE pipe (Pipe_ID TEXT, Material TEXT, Installation_year INTEGER, Slope REAL)",
        "INSERT INTO pipe VALUES ('P1', 'PVC', 1995, 0.5), ('P2', NULL, 2099, -1.0)",
        "CREATE TABLE inspection (Inspection_ID TEXT, Pipe_ID TEXT, Date DATE)",
        "INSERT INTO inspection VALUES ('I1', 'P1', '2023-01-15')",
        "CREATE TABLE defect (Defect_ID TEXT, Pipe_ID TEXT, Quantification TEXT)",
    ];
    if with_hydraulics {
        statements.push("CREATE TABLE hydraulic_properties (Pipe_ID TEXT, Pipe_capacity REAL)");
        statements.push("INSERT INTO hydraulic_properties VALUES ('P1', 12.5)");
    }

    for statement in statements {
        sqlx::query(statement).execute(&pool).await.unwrap();
    }
    pool.close().await;
}

fn create_workbook(path: &Path) {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    let pipes = workbook.add_worksheet();
    pipes.set_name("PIPES").unwrap();
    pipes.write_string(0, 0, "Pipe_ID").unwrap();
    pipes.write_string(0, 1, "Diameter").unwrap();
    pipes.write_string(1, 0, "P1").unwrap();
    pipes.write_number(1, 1, 300).unwrap();
    pipes.write_string(3, 0, "P2").unwrap();

    let cctv = workbook.add_worksheet();
    cctv.set_name("CCTV").unwrap();
    cctv.write_string(0, 0, "Inspection_ID").unwrap();
    cctv.write_string(0, 1, "Date").unwrap();
    cctv.write_string(1, 0, "I1").unwrap();
    let date = ExcelDateTime::from_ymd(2023, 1, 15).unwrap();
    cctv.write_datetime_with_format(1, 1, &date, &date_format)
        .unwrap();

    let defects = workbook.add_worksheet();
    defects.set_name("DEFECTS").unwrap();
    defects.write_string(0, 0, "Defect_ID").unwrap();
    defects.write_string(1, 0, "D1").unwrap();

    workbook.save(path).unwrap();
}

#[tokio::test]
async fn test_load_database() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("network.db");
    create_database(&path, true).await;

    let input = load_input(SourceKind::Database, &path, &[]).await.unwrap();

    assert_eq!(
        input.pipes.columns(),
        &["Pipe_ID", "Material", "Installation_year", "Slope"].map(String::from)
    );
    assert_eq!(input.pipes.len(), 2);
    assert_eq!(input.pipes.value(0, "Installation_year"), &DataValue::Int(1995));
    assert_eq!(input.pipes.value(1, "Material"), &DataValue::Null);
    assert_eq!(input.pipes.value(1, "Slope"), &DataValue::Float(-1.0));
    assert_eq!(
        input.cctv.value(0, "Date"),
        &DataValue::Timestamp("2023-01-15".to_string())
    );
    assert!(input.defects.is_empty());
    assert_eq!(input.hydraulics.len(), 1);
}

#[tokio::test]
async fn test_malformed_date_column_values_stay_text() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("network.db");
    create_database(&path, true).await;

    let options = SqliteConnectOptions::new().filename(&path);
    let pool = SqlitePoolOptions::new().connect_with(options).await.unwrap();
    sqlx::query(
        "INSERT INTO inspection VALUES ('I2', 'P1', '15/01/2023'), ('I3', 'P2', 'not a date'), ('I4', 'P2', '2023-01-15 08:30:00')",
    )
    .execute(&pool)
    .await
    .unwrap();
    pool.close().await;

    let input = load_input(SourceKind::Database, &path, &[]).await.unwrap();

    assert_eq!(input.cctv.value(1, "Date"), &DataValue::from("15/01/2023"));
    assert_eq!(input.cctv.value(2, "Date"), &DataValue::from("not a date"));
    assert_eq!(
        input.cctv.value(3, "Date"),
        &DataValue::Timestamp("2023-01-15 08:30:00".to_string())
    );

    let result = validate_cctv(input.cctv, &ValidationContext::for_year(2024));
    let flagged: Vec<DataValue> = result
        .issues
        .iter()
        .filter(|issue| issue.column == "Date")
        .map(|issue| issue.value.clone())
        .collect();
    assert_eq!(
        flagged,
        vec![DataValue::from("15/01/2023"), DataValue::from("not a date")]
    );
}

#[tokio::test]
async fn test_missing_hydraulics_table_reads_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("network.db");
    create_database(&path, false).await;

    let input = load_input(SourceKind::Database, &path, &[]).await.unwrap();

    assert!(input.get(EntityKind::Hydraulics).is_empty());
    assert_eq!(input.pipes.len(), 2);
}

#[tokio::test]
async fn test_missing_mandatory_table_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.db");
    let options = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await.unwrap();
    sqlx::query("CREATE TABLE other (id INTEGER)")
        .execute(&pool)
        .await
        .unwrap();
    pool.close().await;

    let err = load_input(SourceKind::Database, &path, &[]).await.unwrap_err();

    assert!(matches!(err, IngestError::Database(_)));
}

#[tokio::test]
async fn test_load_workbook() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("network.xlsx");
    create_workbook(&path);

    let sheets = vec!["PIPES".to_string(), "CCTV".to_string()];
    let input = load_input(SourceKind::Excel, &path, &sheets).await.unwrap();

    assert_eq!(input.pipes.len(), 2);
    assert_eq!(input.pipes.value(0, "Pipe_ID"), &DataValue::from("P1"));
    assert_eq!(input.pipes.value(1, "Diameter"), &DataValue::Null);
    assert_eq!(
        input.cctv.value(0, "Date"),
        &DataValue::Timestamp("2023-01-15".to_string())
    );
    assert!(input.defects.is_empty(), "unrequested sheet is not read");
    assert!(input.hydraulics.is_empty());
}

#[tokio::test]
async fn test_requested_sheet_must_exist() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("network.xlsx");
    create_workbook(&path);

    let sheets = vec!["HYDRAULIC_PROPERTIES".to_string()];
    let err = load_input(SourceKind::Excel, &path, &sheets).await.unwrap_err();

    assert!(
        matches!(err, IngestError::SheetNotFound { ref sheet, .. } if sheet == "HYDRAULIC_PROPERTIES")
    );
}
