//! In-memory table model
//!
//! A [`Table`] is an ordered list of named [`Column`]s. Every column holds the
//! same number of [`Cell`]s, and column names are unique within a table.
//! Absent values are represented by [`Cell::Missing`], which is distinct from
//! an empty string or zero.

use crate::error::{CoreError, CoreResult};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single table value
#[derive(Debug, Clone)]
pub enum Cell {
    /// Missing-value marker
    Missing,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    /// Check whether this cell is the missing-value marker
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Render the cell as a CSV field.
    ///
    /// Missing cells render as an empty field. Integral floats keep a
    /// fractional part (`1.0`) so the column is read back as floating point.
    pub fn render(&self) -> String {
        match self {
            Cell::Missing => String::new(),
            Cell::Integer(v) => v.to_string(),
            Cell::Float(v) if v.is_finite() && v.fract() == 0.0 => format!("{:.1}", v),
            Cell::Float(v) => v.to_string(),
            Cell::Text(v) => v.clone(),
        }
    }
}

/// Bit pattern used for float equality and hashing; folds `-0.0` into `0.0`
/// and every NaN payload into one.
fn float_key(v: f64) -> u64 {
    if v == 0.0 {
        0.0f64.to_bits()
    } else if v.is_nan() {
        f64::NAN.to_bits()
    } else {
        v.to_bits()
    }
}

// Missing == Missing so rows that are absent in the same places count as
// duplicates of each other.
impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Cell::Missing, Cell::Missing) => true,
            (Cell::Integer(a), Cell::Integer(b)) => a == b,
            (Cell::Float(a), Cell::Float(b)) => float_key(*a) == float_key(*b),
            (Cell::Text(a), Cell::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Cell::Missing => {}
            Cell::Integer(v) => v.hash(state),
            Cell::Float(v) => float_key(*v).hash(state),
            Cell::Text(v) => v.hash(state),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Missing => serializer.serialize_none(),
            Cell::Integer(v) => serializer.serialize_i64(*v),
            Cell::Float(v) => serializer.serialize_f64(*v),
            Cell::Text(v) => serializer.serialize_str(v),
        }
    }
}

/// Type assigned to a column when it is parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Float,
    Text,
    /// Every cell is missing
    Empty,
}

impl ColumnType {
    /// Infer the narrowest type that holds every present cell
    pub fn infer<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> Self {
        let mut inferred = ColumnType::Empty;
        for cell in cells {
            inferred = match (inferred, cell) {
                (_, Cell::Missing) => inferred,
                (_, Cell::Text(_)) | (ColumnType::Text, _) => return ColumnType::Text,
                (ColumnType::Empty | ColumnType::Integer, Cell::Integer(_)) => {
                    ColumnType::Integer
                }
                (_, Cell::Float(_)) | (ColumnType::Float, Cell::Integer(_)) => ColumnType::Float,
            };
        }
        inferred
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Integer => write!(f, "integer"),
            ColumnType::Float => write!(f, "float"),
            ColumnType::Text => write!(f, "text"),
            ColumnType::Empty => write!(f, "empty"),
        }
    }
}

/// A named, typed sequence of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    column_type: ColumnType,
    cells: Vec<Cell>,
}

impl Column {
    /// Create a column, inferring its type from the cells
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        let column_type = ColumnType::infer(&cells);
        Self::with_type(name, column_type, cells)
    }

    /// Create a column with an already-known type
    pub fn with_type(name: impl Into<String>, column_type: ColumnType, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            column_type,
            cells,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of missing cells in this column
    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_missing()).count()
    }
}

/// An ordered collection of equally long, uniquely named columns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table, checking that columns are equally long and uniquely named
    pub fn new(columns: Vec<Column>) -> CoreResult<Self> {
        let table = Self { columns };
        table.validate()?;
        Ok(table)
    }

    /// Build a table from a header and row-major data
    pub fn from_rows(headers: &[&str], rows: Vec<Vec<Cell>>) -> CoreResult<Self> {
        let mut columns: Vec<Vec<Cell>> = vec![Vec::with_capacity(rows.len()); headers.len()];
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != headers.len() {
                return Err(CoreError::invalid_input(format!(
                    "row {} has {} values, expected {}",
                    index,
                    row.len(),
                    headers.len()
                )));
            }
            for (column, cell) in columns.iter_mut().zip(row) {
                column.push(cell);
            }
        }
        Self::new(
            headers
                .iter()
                .zip(columns)
                .map(|(name, cells)| Column::new(*name, cells))
                .collect(),
        )
    }

    /// Check the table invariants
    pub fn validate(&self) -> CoreResult<()> {
        let expected = self.row_count();
        let mut seen = HashSet::with_capacity(self.columns.len());
        for column in &self.columns {
            if column.len() != expected {
                return Err(CoreError::invalid_input(format!(
                    "column '{}' has {} cells, expected {}",
                    column.name,
                    column.len(),
                    expected
                )));
            }
            if !seen.insert(column.name.as_str()) {
                return Err(CoreError::invalid_input(format!(
                    "duplicate column name '{}'",
                    column.name
                )));
            }
        }
        Ok(())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// True when the table has no rows (it may still have columns)
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        (index < self.row_count()).then_some(Row { table: self, index })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        (0..self.row_count()).map(move |index| Row { table: self, index })
    }

    /// First `n` rows as a new table
    pub fn head(&self, n: usize) -> Table {
        let keep: Vec<bool> = (0..self.row_count()).map(|i| i < n).collect();
        self.select_rows(&keep)
    }

    /// Keep the rows whose mask entry is true, preserving order
    pub(crate) fn select_rows(&self, keep: &[bool]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|column| Column {
                name: column.name.clone(),
                column_type: column.column_type,
                cells: column
                    .cells
                    .iter()
                    .zip(keep)
                    .filter(|(_, keep)| **keep)
                    .map(|(cell, _)| cell.clone())
                    .collect(),
            })
            .collect();
        Table { columns }
    }

    /// Summarize this table under the given name and byte size
    pub fn metadata(&self, name: impl Into<String>, size: usize) -> Metadata {
        Metadata {
            name: name.into(),
            size,
            rows: self.row_count(),
            columns: self.column_count(),
            column_names: self.columns.iter().map(|c| c.name.clone()).collect(),
        }
    }
}

/// Borrowed view of one table row
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    index: usize,
}

impl<'a> Row<'a> {
    /// Position of this row in its table
    pub fn index(&self) -> usize {
        self.index
    }

    /// Value of the named column in this row
    pub fn get(&self, column: &str) -> Option<&'a Cell> {
        self.table.column(column).map(|c| &c.cells[self.index])
    }

    /// `(column name, cell)` pairs in column order
    pub fn cells(&self) -> impl Iterator<Item = (&'a str, &'a Cell)> + 'a {
        let index = self.index;
        self.table
            .columns
            .iter()
            .map(move |c| (c.name.as_str(), &c.cells[index]))
    }
}

/// Serialized as a mapping from column name to value, in column order
impl Serialize for Row<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.table.column_count()))?;
        for (name, cell) in self.cells() {
            map.serialize_entry(name, cell)?;
        }
        map.end()
    }
}

/// Serialize a table as a sequence of row records (`[{"a": 1, ...}, ...]`)
pub fn serialize_records<S: Serializer>(table: &Table, serializer: S) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(table.row_count()))?;
    for row in table.rows() {
        seq.serialize_element(&row)?;
    }
    seq.end()
}

/// Summary of a parsed or derived table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    /// Declared or derived file name
    pub name: String,
    /// Size in bytes
    pub size: usize,
    pub rows: usize,
    pub columns: usize,
    pub column_names: Vec<String>,
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
