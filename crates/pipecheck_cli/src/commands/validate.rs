use anyhow::{Context, Result};
use pipecheck_config::{parse_file, RunConfig};
use pipecheck_core::{EntityKind, ValidationContext};
use pipecheck_ingest::{load_input, SourceKind};
use pipecheck_report::{
    export_issues, open_path, write_summary, ExportFormat, OpenTarget, Summary, SUMMARY_FILE,
};
use pipecheck_validator::{validate_entity, DataSet, EntityValidation};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::output;

/// Command-line values of `pipecheck validate`. Set values override the
/// configuration file.
pub struct ValidateArgs {
    pub config: Option<PathBuf>,
    pub source: Option<String>,
    pub path: Option<PathBuf>,
    pub sheets: Vec<String>,
    pub output_dir: Option<PathBuf>,
    pub open_report: bool,
    pub no_open_folder: bool,
    pub reference_year: Option<i32>,
}

/// Files written by a run.
pub struct RunOutput {
    pub summary: Summary,
    pub summary_path: PathBuf,
    pub exports: Vec<(EntityKind, PathBuf, ExportFormat)>,
    pub results: [EntityValidation; 4],
}

pub async fn execute(args: ValidateArgs, format: &str) -> Result<()> {
    match run(args, format).await {
        Ok(()) => Ok(()),
        Err(e) => {
            output::print_error(&format!("Validation failed: {:#}", e));
            std::process::exit(1);
        }
    }
}

async fn run(args: ValidateArgs, format: &str) -> Result<()> {
    let config = resolve_config(args)?;
    let input_path = config.input_path()?.to_path_buf();
    let output_dir = config.output_dir();
    let context = config.context();

    info!("Validating {} input: {}", config.source, input_path.display());
    info!("Reference year: {}", context.reference_year);

    let input = load_input(config.source, &input_path, &config.sheet_names)
        .await
        .with_context(|| format!("Failed to load input from {}", input_path.display()))?;

    std::fs::create_dir_all(&output_dir).with_context(|| {
        format!("Failed to create output directory {}", output_dir.display())
    })?;

    let results = validate_all(input.into_datasets(), context).await?;
    let run_output = write_reports(results, &output_dir)?;

    output::print_run_report(&run_output, format)?;

    if config.open_report {
        open_path(&run_output.summary_path, OpenTarget::File);
    } else if config.open_folder {
        open_path(&output_dir, OpenTarget::Folder);
    }

    Ok(())
}

/// Merges the configuration file with the command-line values.
fn resolve_config(args: ValidateArgs) -> Result<RunConfig> {
    let base = match &args.config {
        Some(path) => parse_file(path)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?,
        None => RunConfig::default(),
    };

    let mut builder = base.into_builder();
    if let Some(source) = &args.source {
        let kind: SourceKind = source.parse()?;
        builder = builder.source(kind);
    }
    if let Some(path) = args.path {
        builder = builder.path(path);
    }
    if !args.sheets.is_empty() {
        builder = builder.sheet_names(args.sheets);
    }
    if let Some(dir) = args.output_dir {
        builder = builder.output_dir(dir);
    }
    if args.open_report {
        builder = builder.open_report(true);
    }
    if args.no_open_folder {
        builder = builder.open_folder(false);
    }
    if let Some(year) = args.reference_year {
        builder = builder.reference_year(year);
    }

    Ok(builder.build()?)
}

/// Runs the four validators on the blocking pool and joins them in entity
/// order.
async fn validate_all(
    datasets: [(EntityKind, DataSet); 4],
    context: ValidationContext,
) -> Result<[EntityValidation; 4]> {
    let [pipes, cctv, defects, hydraulics] = datasets.map(|(kind, dataset)| {
        tokio::task::spawn_blocking(move || validate_entity(kind, dataset, &context))
    });

    Ok([
        pipes.await.context("Pipe validation task failed")?,
        cctv.await.context("CCTV validation task failed")?,
        defects.await.context("Defect validation task failed")?,
        hydraulics.await.context("Hydraulics validation task failed")?,
    ])
}

fn write_reports(results: [EntityValidation; 4], output_dir: &Path) -> Result<RunOutput> {
    let summary = Summary::build(results.each_ref().map(|result| &result.issues));

    let summary_path = output_dir.join(SUMMARY_FILE);
    write_summary(&summary_path, &summary).context("Failed to write summary workbook")?;

    let mut exports = Vec::with_capacity(results.len());
    for result in &results {
        let kind = result.entity;
        let (path, format) = export_issues(&result.issues, kind.export_name(), output_dir)
            .with_context(|| format!("Failed to export {} issues", kind))?;
        exports.push((kind, path, format));
    }

    Ok(RunOutput {
        summary,
        summary_path,
        exports,
        results,
    })
}
