//! Error types for Cinder.

use crate::types::DataType;
use crate::row::RowId;
use alloc::string::String;
use core::fmt;

/// Result type alias for Cinder operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for Cinder operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Type mismatch error.
    TypeMismatch {
        expected: DataType,
        got: DataType,
    },
    /// Two values whose tags cannot be ordered against each other.
    NotComparable {
        left: DataType,
        right: DataType,
    },
    /// Aggregation function or input type with no implementation.
    Unimplemented {
        message: String,
    },
    /// Malformed input to a constructor or statement.
    InvalidArgument {
        message: String,
    },
    /// Null constraint violation.
    NullConstraint {
        column: String,
    },
    /// No stored row with this id.
    RowNotFound {
        table: String,
        row: RowId,
    },
    /// Invalid schema definition.
    InvalidSchema {
        message: String,
    },
    /// Column not found.
    ColumnNotFound {
        table: String,
        column: String,
    },
    /// Table not found.
    TableNotFound {
        name: String,
    },
    /// Number of supplied values differs from the table's column count.
    FieldCountMismatch {
        table: String,
        expected: usize,
        got: usize,
    },
    /// Invalid operation.
    InvalidOperation {
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TypeMismatch { expected, got } => {
                write!(f, "Type mismatch: expected {}, got {}", expected, got)
            }
            Error::NotComparable { left, right } => {
                write!(f, "Cannot compare {} with {}", left, right)
            }
            Error::Unimplemented { message } => {
                write!(f, "Unimplemented: {}", message)
            }
            Error::InvalidArgument { message } => {
                write!(f, "Invalid argument: {}", message)
            }
            Error::NullConstraint { column } => {
                write!(f, "Null constraint violation on column: {}", column)
            }
            Error::RowNotFound { table, row } => {
                write!(f, "Row {} not found in table {}", row, table)
            }
            Error::InvalidSchema { message } => {
                write!(f, "Invalid schema: {}", message)
            }
            Error::ColumnNotFound { table, column } => {
                write!(f, "Column {} not found in table {}", column, table)
            }
            Error::TableNotFound { name } => {
                write!(f, "Table not found: {}", name)
            }
            Error::FieldCountMismatch {
                table,
                expected,
                got,
            } => {
                write!(
                    f,
                    "Table {} expects {} values, got {}",
                    table, expected, got
                )
            }
            Error::InvalidOperation { message } => {
                write!(f, "Invalid operation: {}", message)
            }
        }
    }
}

impl Error {
    /// Creates a type mismatch error.
    pub fn type_mismatch(expected: DataType, got: DataType) -> Self {
        Error::TypeMismatch { expected, got }
    }

    /// Creates a not-comparable error.
    pub fn not_comparable(left: DataType, right: DataType) -> Self {
        Error::NotComparable { left, right }
    }

    /// Creates an unimplemented error.
    pub fn unimplemented(message: impl Into<String>) -> Self {
        Error::Unimplemented {
            message: message.into(),
        }
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a null constraint error.
    pub fn null_constraint(column: impl Into<String>) -> Self {
        Error::NullConstraint {
            column: column.into(),
        }
    }

    /// Creates a row not found error.
    pub fn row_not_found(table: impl Into<String>, row: RowId) -> Self {
        Error::RowNotFound {
            table: table.into(),
            row,
        }
    }

    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Self {
        Error::InvalidSchema {
            message: message.into(),
        }
    }

    /// Creates a column not found error.
    pub fn column_not_found(table: impl Into<String>, column: impl Into<String>) -> Self {
        Error::ColumnNotFound {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Creates a table not found error.
    pub fn table_not_found(name: impl Into<String>) -> Self {
        Error::TableNotFound { name: name.into() }
    }

    /// Creates a field count mismatch error.
    pub fn field_count_mismatch(table: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::FieldCountMismatch {
            table: table.into(),
            expected,
            got,
        }
    }

    /// Creates an invalid operation error.
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Error::InvalidOperation {
            message: message.into(),
        }
    }
}
