//! Schema module for Cinder.
//!
//! This module contains the table metadata consulted during planning and
//! execution: columns, tables and the catalog that owns them.

mod catalog;
mod column;
mod table;

pub use catalog::Catalog;
pub use column::{Column, FIXED_COLUMN_LEN};
pub use table::{Table, TableBuilder};
