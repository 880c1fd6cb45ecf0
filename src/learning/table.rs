//! table.rs
//! Columnar tabular data handed to the structure learner.

use crate::error::StructureError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Missing,
    Numeric(f64),
    Categorical(String),
}

impl Cell {
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing) || matches!(self, Cell::Numeric(v) if v.is_nan())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
    pub cells: Vec<Cell>,
}

impl Column {
    /// A numeric column; `None` marks a missing cell.
    pub fn numeric<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let cells = values.into_iter().map(|v| v.map_or(Cell::Missing, Cell::Numeric)).collect();
        Self { name: name.into(), kind: ColumnKind::Numeric, cells }
    }

    /// A categorical column. Categories are stored by their string form, so `3` and `"3"`
    /// are the same category.
    pub fn categorical<I, T>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<T>>,
        T: ToString,
    {
        let cells = values
            .into_iter()
            .map(|v| v.map_or(Cell::Missing, |x| Cell::Categorical(x.to_string())))
            .collect();
        Self { name: name.into(), kind: ColumnKind::Categorical, cells }
    }

    pub fn len(&self) -> usize { self.cells.len() }

    pub fn is_empty(&self) -> bool { self.cells.is_empty() }
}

/// A rectangular table: uniquely named columns of equal length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Result<Self, StructureError> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(StructureError::InvalidInput(format!("duplicate column '{}'", column.name)));
            }
            let bad_cell = column.cells.iter().any(|cell| match (column.kind, cell) {
                (ColumnKind::Numeric, Cell::Categorical(_)) => true,
                (ColumnKind::Categorical, Cell::Numeric(_)) => true,
                _ => false,
            });
            if bad_cell {
                return Err(StructureError::InvalidInput(format!(
                    "column '{}' holds cells that do not match its {:?} kind",
                    column.name, column.kind
                )));
            }
        }
        if let Some(first) = columns.first() {
            if let Some(ragged) = columns.iter().find(|c| c.len() != first.len()) {
                return Err(StructureError::InvalidInput(format!(
                    "column '{}' has {} rows, expected {}",
                    ragged.name,
                    ragged.len(),
                    first.len()
                )));
            }
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[Column] { &self.columns }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column_count(&self) -> usize { self.columns.len() }

    pub fn row_count(&self) -> usize { self.columns.first().map_or(0, Column::len) }

    /// Copy of the table without the rows that hold a missing cell.
    pub fn drop_missing_rows(&self) -> Table {
        let keep: Vec<bool> = (0..self.row_count())
            .map(|row| self.columns.iter().all(|c| !c.cells[row].is_missing()))
            .collect();

        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                name: c.name.clone(),
                kind: c.kind,
                cells: c.cells.iter().zip(&keep).filter(|(_, k)| **k).map(|(cell, _)| cell.clone()).collect(),
            })
            .collect();
        Table { columns }
    }

    /// Copy of the table with every categorical value rewritten to `{prefix}{value}`.
    /// Missing cells and numeric columns are left alone.
    pub fn tokenize_categories(&self, prefix: &str) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|c| match c.kind {
                ColumnKind::Numeric => c.clone(),
                ColumnKind::Categorical => Column {
                    name: c.name.clone(),
                    kind: c.kind,
                    cells: c
                        .cells
                        .iter()
                        .map(|cell| match cell {
                            Cell::Categorical(v) => Cell::Categorical(format!("{}{}", prefix, v)),
                            other => other.clone(),
                        })
                        .collect(),
                },
            })
            .collect();
        Table { columns }
    }
}
