//! In-memory tabular model built from a JSON document.
//!
//! Two input shapes are accepted: an array of objects (one object per row)
//! and an object of equal-length arrays (one array per column). Cells must
//! be scalars; anything nested is rejected. Columns are ordered by name so
//! the output is deterministic regardless of input key order.

use std::collections::BTreeSet;
use std::fmt;

use serde_json::{Map, Value};

use crate::error::ConvertError;

// ---------------------------------------------------------------------------
// Cells and columns
// ---------------------------------------------------------------------------

/// A single scalar table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// The logical type of a column after inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Bool,
    Int,
    Float,
    Utf8,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Bool => write!(f, "bool"),
            ColumnType::Int => write!(f, "int"),
            ColumnType::Float => write!(f, "float"),
            ColumnType::Utf8 => write!(f, "string"),
        }
    }
}

/// A named column holding one cell per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Cell>,
}

impl Column {
    /// Infer the column type from its cells.
    ///
    /// `None` means the column is entirely null. Int promotes to Float when
    /// mixed; any other mix is a shape error.
    pub fn infer_type(&self) -> Result<Option<ColumnType>, ConvertError> {
        let mut inferred: Option<ColumnType> = None;
        for cell in &self.values {
            let cell_type = match cell {
                Cell::Null => continue,
                Cell::Bool(_) => ColumnType::Bool,
                Cell::Int(_) => ColumnType::Int,
                Cell::Float(_) => ColumnType::Float,
                Cell::Str(_) => ColumnType::Utf8,
            };
            inferred = Some(match (inferred, cell_type) {
                (None, next) => next,
                (Some(current), next) if current == next => current,
                (Some(ColumnType::Int), ColumnType::Float)
                | (Some(ColumnType::Float), ColumnType::Int) => ColumnType::Float,
                (Some(current), next) => {
                    return Err(ConvertError::Shape(format!(
                        "column '{}' mixes {current} and {next} values",
                        self.name
                    )))
                }
            });
        }
        Ok(inferred)
    }

    /// Whether any cell is null (the Arrow field must then be nullable).
    pub fn has_nulls(&self) -> bool {
        self.values.iter().any(|cell| matches!(cell, Cell::Null))
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// A rectangular collection of named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<Column>,
    pub row_count: usize,
}

impl Table {
    /// Build a table from a parsed JSON document.
    pub fn from_json(value: &Value) -> Result<Self, ConvertError> {
        match value {
            Value::Array(rows) => Self::from_rows(rows),
            Value::Object(map) => Self::from_columns(map),
            _ => Err(ConvertError::Shape(
                "top-level JSON must be an array of objects or an object of arrays".to_string(),
            )),
        }
    }

    /// Array-of-objects orientation: one object per row.
    ///
    /// The column set is the union of keys across all rows; keys missing
    /// from a row become null cells.
    fn from_rows(rows: &[Value]) -> Result<Self, ConvertError> {
        let mut names = BTreeSet::new();
        for (index, row) in rows.iter().enumerate() {
            let Value::Object(object) = row else {
                return Err(ConvertError::Shape(format!(
                    "row {index} is not a JSON object"
                )));
            };
            names.extend(object.keys().cloned());
        }

        let mut columns: Vec<Column> = names
            .into_iter()
            .map(|name| Column {
                name,
                values: Vec::with_capacity(rows.len()),
            })
            .collect();

        for row in rows {
            let Value::Object(object) = row else {
                continue;
            };
            for column in &mut columns {
                let cell = match object.get(&column.name) {
                    Some(value) => cell_from_value(value, &column.name)?,
                    None => Cell::Null,
                };
                column.values.push(cell);
            }
        }

        Ok(Table {
            columns,
            row_count: rows.len(),
        })
    }

    /// Object-of-arrays orientation: one array per column.
    ///
    /// All arrays must share one length.
    fn from_columns(map: &Map<String, Value>) -> Result<Self, ConvertError> {
        let mut columns = Vec::with_capacity(map.len());
        let mut row_count: Option<usize> = None;

        for (name, value) in map {
            let Value::Array(items) = value else {
                return Err(ConvertError::Shape(format!(
                    "column '{name}' is not a JSON array"
                )));
            };
            match row_count {
                None => row_count = Some(items.len()),
                Some(expected) if expected != items.len() => {
                    return Err(ConvertError::Shape(format!(
                        "column '{name}' has {} values, expected {expected}",
                        items.len()
                    )));
                }
                Some(_) => {}
            }

            let values = items
                .iter()
                .map(|item| cell_from_value(item, name))
                .collect::<Result<Vec<_>, _>>()?;
            columns.push(Column {
                name: name.clone(),
                values,
            });
        }

        Ok(Table {
            columns,
            row_count: row_count.unwrap_or(0),
        })
    }
}

fn cell_from_value(value: &Value, column: &str) -> Result<Cell, ConvertError> {
    match value {
        Value::Null => Ok(Cell::Null),
        Value::Bool(b) => Ok(Cell::Bool(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Cell::Int(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Cell::Float(f))
            } else {
                Err(ConvertError::Shape(format!(
                    "column '{column}' holds an unrepresentable number: {n}"
                )))
            }
        }
        Value::String(s) => Ok(Cell::Str(s.clone())),
        Value::Array(_) | Value::Object(_) => Err(ConvertError::Shape(format!(
            "column '{column}' holds a nested value; only scalars are tabular"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
