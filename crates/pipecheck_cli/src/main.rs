mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pipecheck")]
#[command(version, about = "Validate pipe, CCTV, defect and hydraulic asset data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate asset data and write the issue report
    Validate {
        /// Run configuration file (YAML or TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Input kind: database, excel
        #[arg(short, long)]
        source: Option<String>,

        /// SQLite database or Excel workbook to read
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Workbook sheet to read (repeatable)
        #[arg(long = "sheet", value_name = "NAME")]
        sheets: Vec<String>,

        /// Directory receiving the report files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Open the summary workbook when done
        #[arg(long)]
        open_report: bool,

        /// Do not open the output folder when done
        #[arg(long)]
        no_open_folder: bool,

        /// Year that installation years may not exceed (defaults to the current year)
        #[arg(long)]
        reference_year: Option<i32>,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Print the rule schema of an entity
    Schema {
        /// Entity: pipes, cctv, defects, hydraulics
        entity: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    // Execute command
    match cli.command {
        Commands::Validate {
            config,
            source,
            path,
            sheets,
            output_dir,
            open_report,
            no_open_folder,
            reference_year,
            format,
        } => {
            let args = commands::validate::ValidateArgs {
                config,
                source,
                path,
                sheets,
                output_dir,
                open_report,
                no_open_folder,
                reference_year,
            };
            commands::validate::execute(args, &format).await
        }

        Commands::Schema { entity, format } => commands::schema::execute(&entity, &format),
    }
}
