//! INSERT statement resolution.

use alloc::rc::Rc;
use alloc::string::ToString;
use alloc::vec::Vec;
use cinder_core::parse::{format_float_general, parse_float_prefix, parse_int_prefix};
use cinder_core::schema::{Catalog, Column, Table};
use cinder_core::{DataType, Error, Result, Row, RowId, Value};
use log::warn;

/// A resolved INSERT: the target table and one value per column, already
/// converted to the column types.
#[derive(Clone, Debug)]
pub struct InsertStmt {
    table: Rc<Table>,
    values: Vec<Value>,
}

impl InsertStmt {
    /// Resolves an INSERT of `values` into `table_name`.
    ///
    /// Values whose type differs from their column are converted when a
    /// conversion exists:
    /// text to int or float (unparsable text becomes 0), int or float to
    /// text, float to int (rounding half away from zero) and int to float.
    pub fn create(catalog: &Catalog, table_name: &str, values: &[Value]) -> Result<Self> {
        if table_name.is_empty() || values.is_empty() {
            warn!(
                "invalid argument. table_name={:?}, value_num={}",
                table_name,
                values.len()
            );
            return Err(Error::invalid_argument("insert needs a table and values"));
        }

        let table = catalog.find_table(table_name).ok_or_else(|| {
            warn!("no such table. table_name={}", table_name);
            Error::table_not_found(table_name)
        })?;

        if table.column_count() != values.len() {
            warn!(
                "schema mismatch. value num={}, field num in schema={}",
                values.len(),
                table.column_count()
            );
            return Err(Error::field_count_mismatch(
                table_name,
                table.column_count(),
                values.len(),
            ));
        }

        let values = table
            .columns()
            .iter()
            .zip(values)
            .map(|(column, value)| coerce(&table, column, value))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { table, values })
    }

    pub fn table(&self) -> &Rc<Table> {
        &self.table
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Turns the statement into a stored row with id `id`.
    pub fn into_row(self, id: RowId) -> Row {
        Row::new(id, self.values)
    }
}

fn coerce(table: &Table, column: &Column, value: &Value) -> Result<Value> {
    let target = column.data_type();
    if value.attr_type() == target {
        return Ok(value.clone());
    }
    let coerced = match (value, target) {
        (Value::Null, _) if column.is_nullable() => Value::Null,
        (Value::Null, _) => return Err(Error::null_constraint(column.name())),
        (Value::Chars(_), DataType::Ints) => {
            let text = value.get_string();
            Value::Int(
                parse_int_prefix(&text)
                    .and_then(|v| i32::try_from(v).ok())
                    .unwrap_or_else(|| {
                        warn!("unable to convert '{}' to int", text);
                        0
                    }),
            )
        }
        (Value::Chars(_), DataType::Floats) => {
            let text = value.get_string();
            Value::Float(parse_float_prefix(&text).unwrap_or_else(|| {
                warn!("unable to convert '{}' to float", text);
                0.0
            }))
        }
        (Value::Int(v), DataType::Chars) => Value::chars(v.to_string()),
        (Value::Float(v), DataType::Chars) => Value::chars(format_float_general(*v)),
        (Value::Float(v), DataType::Ints) => Value::Int(libm::roundf(*v) as i32),
        (Value::Int(v), DataType::Floats) => Value::Float(*v as f32),
        _ => {
            warn!(
                "field type mismatch. table={}, field={}, field type={}, value_type={}",
                table.name(),
                column.name(),
                target,
                value.attr_type()
            );
            return Err(Error::type_mismatch(target, value.attr_type()));
        }
    };
    Ok(coerced)
}
