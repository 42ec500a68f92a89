//! Column metadata for Cinder table schemas.

use crate::types::DataType;
use alloc::string::String;

/// Byte length reserved for fixed-size column types.
pub const FIXED_COLUMN_LEN: usize = 4;

/// A column definition in a table schema.
#[derive(Clone, Debug)]
pub struct Column {
    /// Column name.
    name: String,
    /// Attribute type of the column.
    data_type: DataType,
    /// Byte offset of the column inside a record.
    offset: usize,
    /// Byte length of the column inside a record.
    len: usize,
    /// Whether this column allows null values.
    nullable: bool,
    /// Column index in the table (0-based).
    index: usize,
}

impl Column {
    /// Creates a new column definition.
    ///
    /// Fixed-size types get a 4-byte slot; `Chars` columns start with an empty
    /// slot until a length is declared with [`Column::len`].
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        let len = if data_type.is_fixed_size() {
            FIXED_COLUMN_LEN
        } else {
            0
        };
        Self {
            name: name.into(),
            data_type,
            offset: 0,
            len,
            nullable: false,
            index: 0,
        }
    }

    /// Sets whether this column is nullable.
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Declares the byte length of this column.
    pub fn len(mut self, len: usize) -> Self {
        self.len = len;
        self
    }

    /// Places the column inside the record layout.
    pub(crate) fn with_layout(mut self, index: usize, offset: usize) -> Self {
        self.index = index;
        self.offset = offset;
        self
    }

    /// Returns the column name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the attribute type.
    #[inline]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Returns the byte offset inside a record.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the byte length inside a record.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.len
    }

    /// Returns whether this column is nullable.
    #[inline]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Returns the column index.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.data_type == other.data_type
    }
}
