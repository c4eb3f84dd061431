//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use vt_core::{ingest_with_limit, Config, Metadata, Table};

use crate::cli::GlobalArgs;

/// Load configuration from `--config`, or `./veritemiz.yml` when present
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    match &global.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Config::discover(Path::new(".")).context("Failed to load config"),
    }
}

/// Read and parse a CSV file under the configured upload ceiling
pub(crate) fn read_table(path: &Path, config: &Config) -> Result<(Table, Metadata)> {
    let raw = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    ingest_with_limit(&raw, &name, config.upload.max_bytes)
        .with_context(|| format!("Failed to parse {}", path.display()))
}
