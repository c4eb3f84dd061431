//! Clean command: run the cleaning pipeline on a local file

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use vt_core::service::{sanitize_filename, CLEANED_PREFIX};
use vt_core::{clean, to_csv_bytes, CleaningOperations};

use crate::cli::{CleanArgs, GlobalArgs};
use crate::commands::common::{load_config, read_table};

/// Execute the clean command
pub async fn execute(args: &CleanArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let (table, metadata) = read_table(&args.input, &config)?;

    let operations = CleaningOperations {
        remove_missing: args.remove_missing,
        remove_duplicates: args.remove_duplicates,
        columns: args.columns.clone(),
    };
    if operations.is_noop() && global.verbose {
        println!("No cleaning operations selected; output will match the input");
    }

    let cleaned = clean(&table, &operations)
        .with_context(|| format!("Failed to clean {}", args.input.display()))?;
    let bytes = to_csv_bytes(&cleaned)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    fs::write(&output, &bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Cleaned: {}", metadata.name);
    println!(
        "  Rows:    {} -> {} ({} removed)",
        table.row_count(),
        cleaned.row_count(),
        table.row_count() - cleaned.row_count()
    );
    println!("  Columns: {}", cleaned.column_count());
    println!("  Output:  {} ({} bytes)", output.display(), bytes.len());

    Ok(())
}

/// `cleaned_<name>` in the input's directory
pub(crate) fn default_output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = format!("{}{}", CLEANED_PREFIX, sanitize_filename(&name));
    match input.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

#[cfg(test)]
#[path = "clean_test.rs"]
mod tests;
