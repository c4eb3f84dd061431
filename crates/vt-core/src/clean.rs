//! Cleaning engine
//!
//! Row-level cleaning operations over a [`Table`]: drop rows with missing
//! values, then drop duplicate rows. Both steps can be scoped to a subset of
//! columns. Cleaning never mutates its input; it always returns a new table.

use crate::error::{CoreError, CoreResult};
use crate::table::{Cell, Table};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashSet;

/// Declarative set of cleaning operations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningOperations {
    /// Drop rows containing a missing value in the scoped columns
    #[serde(default)]
    pub remove_missing: bool,

    /// Drop rows repeating an earlier row's values in the scoped columns
    #[serde(default)]
    pub remove_duplicates: bool,

    /// Columns to consider (default: all columns)
    #[serde(default)]
    pub columns: Option<Vec<String>>,
}

impl CleaningOperations {
    /// True when no row-dropping operation is requested
    pub fn is_noop(&self) -> bool {
        !self.remove_missing && !self.remove_duplicates
    }
}

/// Apply `operations` to `table`, returning the cleaned table.
///
/// Missing-value removal runs first; duplicate removal then sees its output.
/// A table with no rows is returned unchanged.
pub fn clean(table: &Table, operations: &CleaningOperations) -> CoreResult<Table> {
    table.validate()?;

    if table.is_empty() {
        log::warn!("Received a table with no rows; nothing to clean");
        return Ok(table.clone());
    }

    let columns = operations.columns.as_deref();
    resolve_scope(table, columns)?;

    let mut cleaned = Cow::Borrowed(table);
    if operations.remove_missing {
        cleaned = Cow::Owned(remove_missing_rows(&cleaned, columns)?);
    }
    if operations.remove_duplicates {
        cleaned = Cow::Owned(remove_duplicate_rows(&cleaned, columns)?);
    }

    Ok(cleaned.into_owned())
}

/// Drop every row that has a missing cell in the scoped columns
pub fn remove_missing_rows(table: &Table, columns: Option<&[String]>) -> CoreResult<Table> {
    let scope = resolve_scope(table, columns)?;
    let cols = table.columns();

    let keep: Vec<bool> = (0..table.row_count())
        .map(|row| scope.iter().all(|&c| !cols[c].cells()[row].is_missing()))
        .collect();

    let cleaned = table.select_rows(&keep);
    let removed = table.row_count() - cleaned.row_count();
    if removed > 0 {
        log::info!("Removed {} rows with missing values", removed);
    }
    Ok(cleaned)
}

/// Drop every row whose scoped values equal those of an earlier row
pub fn remove_duplicate_rows(table: &Table, columns: Option<&[String]>) -> CoreResult<Table> {
    let scope = resolve_scope(table, columns)?;
    let cols = table.columns();

    let mut seen: HashSet<Vec<&Cell>> = HashSet::with_capacity(table.row_count());
    let keep: Vec<bool> = (0..table.row_count())
        .map(|row| seen.insert(scope.iter().map(|&c| &cols[c].cells()[row]).collect()))
        .collect();

    let cleaned = table.select_rows(&keep);
    let removed = table.row_count() - cleaned.row_count();
    if removed > 0 {
        log::info!("Removed {} duplicate rows", removed);
    }
    Ok(cleaned)
}

/// Resolve the scoped column names to indices; `None` means every column
fn resolve_scope(table: &Table, columns: Option<&[String]>) -> CoreResult<Vec<usize>> {
    let Some(names) = columns else {
        return Ok((0..table.column_count()).collect());
    };

    if names.is_empty() {
        return Err(CoreError::invalid_input(
            "'columns' must name at least one column; omit it to use all columns",
        ));
    }

    names
        .iter()
        .map(|name| {
            table
                .column_index(name)
                .ok_or_else(|| CoreError::UnknownColumn {
                    name: name.clone(),
                    available: table.column_names().join(", "),
                })
        })
        .collect()
}

#[cfg(test)]
#[path = "clean_test.rs"]
mod tests;
