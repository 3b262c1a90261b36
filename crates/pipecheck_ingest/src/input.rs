use crate::{load_database, load_workbook, IngestError, Result, SourceKind};
use pipecheck_core::EntityKind;
use pipecheck_validator::DataSet;
use std::path::{Path, PathBuf};
use tracing::info;

/// The four entity datasets of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputData {
    pub pipes: DataSet,
    pub cctv: DataSet,
    pub defects: DataSet,
    pub hydraulics: DataSet,
}

impl InputData {
    /// Returns the dataset of an entity kind.
    pub fn get(&self, entity: EntityKind) -> &DataSet {
        match entity {
            EntityKind::Pipes => &self.pipes,
            EntityKind::Cctv => &self.cctv,
            EntityKind::Defects => &self.defects,
            EntityKind::Hydraulics => &self.hydraulics,
        }
    }

    /// Replaces the dataset of an entity kind.
    pub fn set(&mut self, entity: EntityKind, dataset: DataSet) {
        match entity {
            EntityKind::Pipes => self.pipes = dataset,
            EntityKind::Cctv => self.cctv = dataset,
            EntityKind::Defects => self.defects = dataset,
            EntityKind::Hydraulics => self.hydraulics = dataset,
        }
    }

    /// Splits the input into `(kind, dataset)` pairs in entity order.
    pub fn into_datasets(self) -> [(EntityKind, DataSet); 4] {
        [
            (EntityKind::Pipes, self.pipes),
            (EntityKind::Cctv, self.cctv),
            (EntityKind::Defects, self.defects),
            (EntityKind::Hydraulics, self.hydraulics),
        ]
    }
}

/// Loads the four datasets from a database or a workbook.
///
/// `sheet_names` is only used for workbooks, where it is mandatory.
pub async fn load_input(
    kind: SourceKind,
    path: impl AsRef<Path>,
    sheet_names: &[String],
) -> Result<InputData> {
    let path = path.as_ref();
    if kind == SourceKind::Excel && sheet_names.is_empty() {
        return Err(IngestError::MissingSheetNames);
    }
    if !path.exists() {
        return Err(IngestError::FileNotFound(path.to_path_buf()));
    }

    info!("Loading {} input from {}", kind, path.display());

    match kind {
        SourceKind::Database => load_database(path).await,
        SourceKind::Excel => {
            let path: PathBuf = path.to_path_buf();
            let sheets = sheet_names.to_vec();
            tokio::task::spawn_blocking(move || load_workbook(&path, &sheets)).await?
        }
    }
}
