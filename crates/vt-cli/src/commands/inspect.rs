//! Inspect command: metadata and preview of a local file

use anyhow::{Context, Result};
use serde::Serialize;
use vt_core::table::serialize_records;
use vt_core::{Metadata, Table};

use crate::cli::{GlobalArgs, InspectArgs, InspectOutput};
use crate::commands::common::{load_config, read_table};

/// Per-column summary
#[derive(Debug, Serialize)]
struct ColumnSummary<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    column_type: String,
    missing: usize,
}

/// JSON document printed by `vt inspect --output json`
#[derive(Debug, Serialize)]
struct InspectReport<'a> {
    #[serde(flatten)]
    metadata: &'a Metadata,
    column_types: Vec<ColumnSummary<'a>>,
    #[serde(serialize_with = "serialize_records")]
    preview: Table,
}

/// Execute the inspect command
pub async fn execute(args: &InspectArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let (table, metadata) = read_table(&args.input, &config)?;
    let preview = table.head(args.rows);

    match args.output {
        InspectOutput::Json => {
            let report = InspectReport {
                metadata: &metadata,
                column_types: column_summaries(&table),
                preview,
            };
            let json =
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            println!("{}", json);
        }
        InspectOutput::Table => {
            println!("File:    {}", metadata.name);
            println!("Size:    {} bytes", metadata.size);
            println!("Rows:    {}", metadata.rows);
            println!("Columns: {}", metadata.columns);
            println!();
            for summary in column_summaries(&table) {
                println!(
                    "  {:<24} {:<8} {} missing",
                    summary.name, summary.column_type, summary.missing
                );
            }
            println!();
            print!("{}", render_table(&preview));
        }
    }

    Ok(())
}

fn column_summaries(table: &Table) -> Vec<ColumnSummary<'_>> {
    table
        .columns()
        .iter()
        .map(|column| ColumnSummary {
            name: column.name(),
            column_type: column.column_type().to_string(),
            missing: column.missing_count(),
        })
        .collect()
}

/// Render rows as left-aligned columns separated by two spaces
pub(crate) fn render_table(table: &Table) -> String {
    if table.column_count() == 0 {
        return String::new();
    }

    let rendered: Vec<Vec<String>> = table
        .rows()
        .map(|row| row.cells().map(|(_, cell)| cell.render()).collect())
        .collect();

    let widths: Vec<usize> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rendered
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(column.name().chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header: Vec<&str> = table.column_names();
    push_line(&mut out, header.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, rule.iter().map(String::as_str), &widths);
    for row in &rendered {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
#[path = "inspect_test.rs"]
mod tests;
