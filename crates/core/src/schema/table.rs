//! Table definition for Cinder schemas.

use super::column::Column;
use crate::error::{Error, Result};
use crate::types::DataType;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;

/// A table definition in the database schema.
#[derive(Clone, Debug)]
pub struct Table {
    /// Table name.
    name: String,
    /// Column definitions, in record order.
    columns: Vec<Column>,
    /// Column position by name.
    positions: HashMap<String, usize>,
    /// Total byte size of one record.
    record_size: usize,
}

impl Table {
    /// Returns the table name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the columns.
    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the number of columns.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns the byte size of one record.
    #[inline]
    pub fn record_size(&self) -> usize {
        self.record_size
    }

    /// Gets a column by name.
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.get_column_index(name).map(|i| &self.columns[i])
    }

    /// Gets a column index by name.
    pub fn get_column_index(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }
}

/// Builder for creating table definitions.
pub struct TableBuilder {
    name: String,
    columns: Vec<Column>,
}

impl TableBuilder {
    /// Creates a new table builder.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        Self::check_naming_rules(&name)?;
        Ok(Self {
            name,
            columns: Vec::new(),
        })
    }

    /// Validates a name follows naming rules.
    fn check_naming_rules(name: &str) -> Result<()> {
        let Some(first) = name.chars().next() else {
            return Err(Error::invalid_schema("Name cannot be empty"));
        };
        if !first.is_ascii_alphabetic() && first != '_' {
            return Err(Error::invalid_schema(format!(
                "Name must start with letter or underscore: {}",
                name
            )));
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(Error::invalid_schema(format!(
                "Name contains invalid characters: {}",
                name
            )));
        }
        Ok(())
    }

    /// Adds a fixed-size column to the table.
    pub fn add_column(self, name: impl Into<String>, data_type: DataType) -> Result<Self> {
        match data_type {
            DataType::Undefined => Err(Error::invalid_schema("Column type is undefined")),
            DataType::Chars => Err(Error::invalid_schema(
                "Chars columns need a declared length",
            )),
            _ => self.push(Column::new(name, data_type)),
        }
    }

    /// Adds a `chars` column holding at most `len` bytes.
    pub fn add_chars(self, name: impl Into<String>, len: usize) -> Result<Self> {
        if len == 0 {
            return Err(Error::invalid_schema("Chars column length must be positive"));
        }
        self.push(Column::new(name, DataType::Chars).len(len))
    }

    /// Marks columns as nullable.
    pub fn add_nullable(mut self, columns: &[&str]) -> Self {
        for name in columns {
            if let Some(col) = self.columns.iter_mut().find(|c| c.name() == *name) {
                *col = col.clone().nullable(true);
            }
        }
        self
    }

    fn push(mut self, column: Column) -> Result<Self> {
        Self::check_naming_rules(column.name())?;
        if self.columns.iter().any(|c| c.name() == column.name()) {
            return Err(Error::invalid_schema(format!(
                "Column already exists: {}",
                column.name()
            )));
        }
        self.columns.push(column);
        Ok(self)
    }

    /// Builds the table definition, assigning record offsets in column order.
    pub fn build(self) -> Result<Table> {
        if self.columns.is_empty() {
            return Err(Error::invalid_schema(format!(
                "Table has no columns: {}",
                self.name
            )));
        }

        let mut offset = 0;
        let mut positions = HashMap::with_capacity(self.columns.len());
        let columns: Vec<Column> = self
            .columns
            .into_iter()
            .enumerate()
            .map(|(i, c)| {
                let placed = c.with_layout(i, offset);
                offset += placed.byte_len();
                positions.insert(String::from(placed.name()), i);
                placed
            })
            .collect();

        Ok(Table {
            name: self.name,
            columns,
            positions,
            record_size: offset,
        })
    }
}
