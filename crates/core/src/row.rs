//! Row structure for Cinder.
//!
//! This module defines the `Row` struct, one stored record of a table.

use crate::value::Value;
use alloc::vec::Vec;

/// Unique identifier for a row.
pub type RowId = u64;

/// A row in a database table.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    /// Unique identifier for this row.
    id: RowId,
    /// Values stored in this row, indexed by column position.
    values: Vec<Value>,
}

impl Row {
    /// Creates a new row with the given ID and values.
    pub fn new(id: RowId, values: Vec<Value>) -> Self {
        Self { id, values }
    }

    /// Returns the row ID.
    #[inline]
    pub fn id(&self) -> RowId {
        self.id
    }

    /// Returns a reference to the values.
    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Gets a value at the given column index.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Sets a value at the given column index.
    pub fn set(&mut self, index: usize, value: Value) -> bool {
        if index < self.values.len() {
            self.values[index] = value;
            true
        } else {
            false
        }
    }

    /// Returns the number of values in this row.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if this row has no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
