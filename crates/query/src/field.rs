//! Column references with an optional aggregation function.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use cinder_core::schema::{Column, Table};
use cinder_core::{DataType, Error, Result};
use core::fmt;

/// Aggregation function applied to a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AggregationType {
    #[default]
    None,
    Max,
    Min,
    Count,
    Avg,
    Sum,
}

impl AggregationType {
    /// Returns the SQL spelling of the function, or `None` for plain fields.
    pub fn func_name(&self) -> Option<&'static str> {
        match self {
            AggregationType::None => None,
            AggregationType::Max => Some("MAX"),
            AggregationType::Min => Some("MIN"),
            AggregationType::Count => Some("COUNT"),
            AggregationType::Avg => Some("AVG"),
            AggregationType::Sum => Some("SUM"),
        }
    }
}

impl fmt::Display for AggregationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.func_name().unwrap_or("NONE"))
    }
}

/// A column of a table, optionally wrapped in an aggregation function.
///
/// The column is an index into the table's column list; `None` stands for
/// every column (the `COUNT(*)` case).
#[derive(Clone, Debug)]
pub struct Field {
    table: Rc<Table>,
    column: Option<usize>,
    aggregation: AggregationType,
    display_name: String,
}

impl Field {
    /// Creates a field over `column` of `table`.
    pub fn new(
        table: Rc<Table>,
        column: Option<usize>,
        aggregation: AggregationType,
    ) -> Result<Self> {
        if let Some(index) = column {
            if index >= table.column_count() {
                return Err(Error::invalid_argument(format!(
                    "column index {} out of range for table {}",
                    index,
                    table.name()
                )));
            }
        }
        let display_name = Self::synthesize_name(&table, column, aggregation);
        Ok(Self {
            table,
            column,
            aggregation,
            display_name,
        })
    }

    /// Creates a field by column name.
    pub fn named(table: Rc<Table>, column: &str, aggregation: AggregationType) -> Result<Self> {
        let index = table
            .get_column_index(column)
            .ok_or_else(|| Error::column_not_found(table.name(), column))?;
        Self::new(table, Some(index), aggregation)
    }

    /// Creates a `COUNT(*)` field.
    pub fn count_star(table: Rc<Table>) -> Self {
        let display_name = Self::synthesize_name(&table, None, AggregationType::Count);
        Self {
            table,
            column: None,
            aggregation: AggregationType::Count,
            display_name,
        }
    }

    fn synthesize_name(
        table: &Table,
        column: Option<usize>,
        aggregation: AggregationType,
    ) -> String {
        let column_name = column
            .map(|i| table.columns()[i].name())
            .unwrap_or("*");
        match aggregation.func_name() {
            Some(func) => format!("{}({})", func, column_name),
            None => String::from(column_name),
        }
    }

    pub fn table(&self) -> &Rc<Table> {
        &self.table
    }

    pub fn table_name(&self) -> &str {
        self.table.name()
    }

    /// Column metadata, `None` for count-star.
    pub fn meta(&self) -> Option<&Column> {
        self.column.map(|i| &self.table.columns()[i])
    }

    /// Attribute type of the underlying column.
    pub fn attr_type(&self) -> DataType {
        self.meta()
            .map(Column::data_type)
            .unwrap_or(DataType::Undefined)
    }

    /// The column name for plain fields, `FUNC(column)` for aggregated ones.
    pub fn field_name(&self) -> &str {
        &self.display_name
    }

    pub fn aggregation(&self) -> AggregationType {
        self.aggregation
    }

    /// Changes the aggregation function and renames the field to match.
    pub fn set_aggregation(&mut self, aggregation: AggregationType) {
        self.aggregation = aggregation;
        self.display_name = Self::synthesize_name(&self.table, self.column, aggregation);
    }
}
