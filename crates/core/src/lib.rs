//! Cinder Core - Value and schema types for the Cinder query engine.
//!
//! This crate provides the foundational types shared by every operator:
//!
//! - `DataType`: The attribute type tag (chars, ints, dates, floats, null, booleans)
//! - `Value`: A typed scalar with best-effort conversion and strict comparison
//! - `Row`: A stored record with a unique identifier
//! - `parse`: Prefix number parsing and `YYYY-MM-DD` date parsing
//! - `schema`: Column, table and catalog metadata
//! - `Error`: Error types for engine operations
//!
//! # Example
//!
//! ```rust
//! use cinder_core::{DataType, Value, Row};
//! use cinder_core::schema::TableBuilder;
//!
//! let table = TableBuilder::new("orders")
//!     .unwrap()
//!     .add_column("id", DataType::Ints)
//!     .unwrap()
//!     .add_chars("placed", 10)
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! // Text that looks like a date becomes a date.
//! let placed = Value::from("2024-03-01");
//! assert_eq!(placed.attr_type(), DataType::Dates);
//!
//! let row = Row::new(1, vec![Value::Int(1), placed]);
//! assert_eq!(row.get(1).unwrap().to_string(), "2024-03-01");
//! assert_eq!(table.get_column_index("placed"), Some(1));
//! ```

#![no_std]

extern crate alloc;

mod error;
pub mod parse;
mod row;
pub mod schema;
mod types;
mod value;

pub use error::{Error, Result};
pub use row::{Row, RowId};
pub use types::{DataType, ATTR_TYPE_NAMES};
pub use value::{Value, EPSILON};
