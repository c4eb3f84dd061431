//! CSV ingestion
//!
//! Turns uploaded bytes into a [`Table`]. The first record names the columns,
//! every later record is data. Column types are inferred per column: all
//! integers, else all numbers, else text.

use crate::error::{CoreError, CoreResult};
use crate::table::{Cell, Column, ColumnType, Metadata, Table};
use std::collections::{HashMap, HashSet};

/// Upload size ceiling (10 MiB)
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Field values read as the missing-value marker
pub const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Parse raw CSV bytes using the default size ceiling
pub fn ingest(raw: &[u8], name: &str) -> CoreResult<(Table, Metadata)> {
    ingest_with_limit(raw, name, MAX_UPLOAD_BYTES)
}

/// Parse raw CSV bytes, rejecting input larger than `limit` before parsing
pub fn ingest_with_limit(raw: &[u8], name: &str, limit: usize) -> CoreResult<(Table, Metadata)> {
    if raw.len() > limit {
        log::warn!(
            "Rejected {}: {} bytes exceeds the {} byte limit",
            name,
            raw.len(),
            limit
        );
        return Err(CoreError::PayloadTooLarge {
            size: raw.len(),
            limit,
        });
    }

    let text = std::str::from_utf8(raw).map_err(|e| CoreError::ParseError {
        message: format!("file is not valid UTF-8: {}", e),
    })?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let table = parse_table(text)?;
    let metadata = table.metadata(name, raw.len());

    log::debug!(
        "Parsed {}: {} bytes, {} rows, {} columns",
        name,
        metadata.size,
        metadata.rows,
        metadata.columns
    );

    Ok((table, metadata))
}

fn parse_table(text: &str) -> CoreResult<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(text.as_bytes());
    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => record.map_err(parse_error)?,
        None => return Err(CoreError::EmptyOrInvalidInput),
    };
    let names = normalize_headers(&header);

    let mut values: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];
    for record in records {
        let record = record.map_err(parse_error)?;
        for (column, field) in values.iter_mut().zip(record.iter()) {
            column.push((!is_na(field)).then(|| field.to_string()));
        }
    }

    Table::new(
        names
            .into_iter()
            .zip(values)
            .map(|(name, values)| parse_column(name, values))
            .collect(),
    )
}

fn parse_error(err: csv::Error) -> CoreError {
    let message = match err.kind() {
        csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => {
            let line = pos.as_ref().map_or(0, |p| p.line());
            format!(
                "line {}: expected {} fields, found {}",
                line, expected_len, len
            )
        }
        _ => err.to_string(),
    };
    CoreError::ParseError { message }
}

fn is_na(field: &str) -> bool {
    NA_VALUES.contains(&field)
}

/// Make header names usable as unique column names.
///
/// Blank headers become `Unnamed: <index>`; repeats get a `.N` suffix.
fn normalize_headers(header: &csv::StringRecord) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::with_capacity(header.len());
    let mut counters: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(header.len());

    for (index, raw) in header.iter().enumerate() {
        let base = if raw.is_empty() {
            format!("Unnamed: {}", index)
        } else {
            raw.to_string()
        };

        let mut name = base.clone();
        if used.contains(&name) {
            let counter = counters.entry(base.clone()).or_insert(0);
            loop {
                *counter += 1;
                name = format!("{}.{}", base, counter);
                if !used.contains(&name) {
                    break;
                }
            }
        }

        used.insert(name.clone());
        names.push(name);
    }

    names
}

fn parse_column(name: String, values: Vec<Option<String>>) -> Column {
    let mut present = values.iter().flatten();
    let column_type = if present.clone().next().is_none() {
        ColumnType::Empty
    } else if present.clone().all(|v| v.parse::<i64>().is_ok()) {
        ColumnType::Integer
    } else if present.all(|v| v.parse::<f64>().is_ok()) {
        ColumnType::Float
    } else {
        ColumnType::Text
    };

    let cells = values
        .into_iter()
        .map(|value| match value {
            None => Cell::Missing,
            Some(value) => parse_cell(value, column_type),
        })
        .collect();

    Column::with_type(name, column_type, cells)
}

fn parse_cell(value: String, column_type: ColumnType) -> Cell {
    match column_type {
        ColumnType::Integer => match value.parse::<i64>() {
            Ok(v) => Cell::Integer(v),
            Err(_) => Cell::Text(value),
        },
        ColumnType::Float => match value.parse::<f64>() {
            Ok(v) => Cell::Float(v),
            Err(_) => Cell::Text(value),
        },
        ColumnType::Text | ColumnType::Empty => Cell::Text(value),
    }
}

#[cfg(test)]
#[path = "ingest_test.rs"]
mod tests;
