use anyhow::Result;
use colored::*;
use pipecheck_core::Schema;
use serde_json::json;

use crate::commands::validate::RunOutput;

pub fn print_run_report(run: &RunOutput, format: &str) -> Result<()> {
    match format {
        "json" => print_json_report(run),
        _ => {
            print_text_report(run);
            Ok(())
        }
    }
}

fn print_text_report(run: &RunOutput) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION SUMMARY".bold());
    println!("{}", "═".repeat(60));

    println!(
        "\n  {:<24} {:>8} {:>10}",
        "Entity".bold(),
        "Errors".bold(),
        "Warnings".bold()
    );
    for row in run.summary.rows() {
        let errors = row.errors.to_string();
        let warnings = row.warnings.to_string();
        println!(
            "  {:<24} {:>8} {:>10}",
            row.entity.sheet_name(),
            if row.errors > 0 { errors.red() } else { errors.normal() },
            if row.warnings > 0 {
                warnings.yellow()
            } else {
                warnings.normal()
            },
        );
    }

    if run.results.iter().all(|result| result.ok) {
        println!("\n{} {}", "✓".green().bold(), "No errors found".green().bold());
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            format!("{} error(s) found", run.summary.total_errors())
                .red()
                .bold()
        );
    }

    println!("\n{}", "Files:".bold());
    for (_, path, _) in &run.exports {
        println!("  {}", path.display());
    }
    println!("{}", "═".repeat(60));

    print_success(&format!(
        "Report written to {}",
        run.summary_path.display()
    ));
}

fn print_json_report(run: &RunOutput) -> Result<()> {
    let output = json!({
        "ok": run.results.iter().all(|result| result.ok),
        "report": run.summary_path.display().to_string(),
        "summary": run.summary.rows(),
        "exports": run.exports.iter().map(|(entity, path, format)| json!({
            "entity": entity,
            "path": path.display().to_string(),
            "format": format.extension(),
        })).collect::<Vec<_>>(),
        "totals": {
            "errors": run.summary.total_errors(),
            "warnings": run.summary.total_warnings(),
        }
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn print_schema(schema: &Schema, format: &str) -> Result<()> {
    match format {
        "json" => {
            let output = json!({
                "entity": schema.entity(),
                "id_column": schema.entity().id_column().name(),
                "columns": schema.columns().iter().map(|column| json!({
                    "name": column.name,
                    "rules": column.rules.rules().iter().map(|rule| rule.to_string()).collect::<Vec<_>>(),
                })).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => {
            let entity = schema.entity();
            println!(
                "\n{} {}",
                entity.sheet_name().bold(),
                format!("(id column: {})", entity.id_column()).dimmed()
            );
            for column in schema.columns() {
                let rules: Vec<String> = column.rules.rules().iter().map(|r| r.to_string()).collect();
                let rules = if rules.is_empty() {
                    "-".dimmed().to_string()
                } else {
                    rules.join(", ")
                };
                println!("  {:<34} {}", column.name, rules);
            }
        }
    }
    Ok(())
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}
