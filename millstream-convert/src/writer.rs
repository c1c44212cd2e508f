//! Parquet serialization of a [`Table`].
//!
//! The file is written to `<path>.millstream.tmp` and renamed onto the
//! final path, so a failed write never leaves a partial output behind.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanBuilder, Float64Builder, Int64Builder, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use crate::error::{io_err, ConvertError};
use crate::table::{Cell, Column, ColumnType, Table};

/// Serialize `table` as a Parquet file at `path`, overwriting any
/// previous output.
pub fn write_parquet(table: &Table, path: &Path) -> Result<(), ConvertError> {
    // Parquet requires at least one column in the schema.
    if table.columns.is_empty() {
        return Err(ConvertError::Shape(
            "document contains no columns to write".to_string(),
        ));
    }

    let (schema, arrays) = build_arrow(table)?;
    let schema = Arc::new(schema);
    let batch = if table.row_count == 0 {
        RecordBatch::new_empty(schema.clone())
    } else {
        RecordBatch::try_new(schema.clone(), arrays)?
    };

    let tmp = PathBuf::from(format!("{}.millstream.tmp", path.display()));
    let file = File::create(&tmp).map_err(|e| io_err(&tmp, e))?;

    let write_result = (|| {
        let mut writer = ArrowWriter::try_new(file, schema, None)?;
        writer.write(&batch)?;
        writer.close()?;
        Ok::<(), ConvertError>(())
    })();
    if let Err(err) = write_result {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }

    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(path, err));
    }

    Ok(())
}

/// Build the Arrow schema and one array per column.
fn build_arrow(table: &Table) -> Result<(Schema, Vec<ArrayRef>), ConvertError> {
    let mut fields = Vec::with_capacity(table.columns.len());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(table.columns.len());

    for column in &table.columns {
        // An all-null column carries no type information; store it as a
        // null-filled string column.
        let column_type = column.infer_type()?.unwrap_or(ColumnType::Utf8);
        let (data_type, array) = build_array(column, column_type)?;
        fields.push(Field::new(column.name.as_str(), data_type, column.has_nulls()));
        arrays.push(array);
    }

    Ok((Schema::new(fields), arrays))
}

fn build_array(
    column: &Column,
    column_type: ColumnType,
) -> Result<(DataType, ArrayRef), ConvertError> {
    let mismatch = |cell: &Cell| {
        ConvertError::Shape(format!(
            "column '{}' cell {cell:?} does not fit inferred type {column_type}",
            column.name
        ))
    };

    match column_type {
        ColumnType::Bool => {
            let mut builder = BooleanBuilder::with_capacity(column.values.len());
            for cell in &column.values {
                match cell {
                    Cell::Null => builder.append_null(),
                    Cell::Bool(v) => builder.append_value(*v),
                    other => return Err(mismatch(other)),
                }
            }
            Ok((DataType::Boolean, Arc::new(builder.finish())))
        }
        ColumnType::Int => {
            let mut builder = Int64Builder::with_capacity(column.values.len());
            for cell in &column.values {
                match cell {
                    Cell::Null => builder.append_null(),
                    Cell::Int(v) => builder.append_value(*v),
                    other => return Err(mismatch(other)),
                }
            }
            Ok((DataType::Int64, Arc::new(builder.finish())))
        }
        ColumnType::Float => {
            let mut builder = Float64Builder::with_capacity(column.values.len());
            for cell in &column.values {
                match cell {
                    Cell::Null => builder.append_null(),
                    Cell::Int(v) => builder.append_value(*v as f64),
                    Cell::Float(v) => builder.append_value(*v),
                    other => return Err(mismatch(other)),
                }
            }
            Ok((DataType::Float64, Arc::new(builder.finish())))
        }
        ColumnType::Utf8 => {
            let mut builder = StringBuilder::new();
            for cell in &column.values {
                match cell {
                    Cell::Null => builder.append_null(),
                    Cell::Str(v) => builder.append_value(v),
                    other => return Err(mismatch(other)),
                }
            }
            Ok((DataType::Utf8, Arc::new(builder.finish())))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
