//! Tuples: the rows flowing between physical operators.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use cinder_core::schema::Table;
use cinder_core::{Error, Result, Row, Value};

/// Lookup key for a tuple cell: a `(table, column)` pair.
///
/// Aggregation output cells have no table; their `field` is the display name
/// such as `SUM(price)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TupleCellSpec {
    pub table: String,
    pub field: String,
}

impl TupleCellSpec {
    pub fn new(table: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            field: field.into(),
        }
    }

    /// A spec that only names a cell, with no owning table.
    pub fn named(field: impl Into<String>) -> Self {
        Self::new(String::new(), field)
    }
}

/// A row of cells produced by an operator.
pub trait Tuple {
    /// Number of cells.
    fn cell_num(&self) -> usize;

    /// Returns the cell at `index`.
    fn cell_at(&self, index: usize) -> Result<Value>;

    /// Returns the cell matching `spec`.
    fn find_cell(&self, spec: &TupleCellSpec) -> Result<Value>;

    /// The stored row behind this tuple, when there is one.
    fn record(&self) -> Option<&Row> {
        None
    }

    /// Copies every cell out, in order.
    fn cells(&self) -> Result<Vec<Value>> {
        (0..self.cell_num()).map(|i| self.cell_at(i)).collect()
    }
}

/// A tuple backed by a stored row of a table.
#[derive(Clone, Debug)]
pub struct RowTuple {
    table: Rc<Table>,
    row: Rc<Row>,
}

impl RowTuple {
    pub fn new(table: Rc<Table>, row: Rc<Row>) -> Self {
        Self { table, row }
    }

    pub fn table(&self) -> &Rc<Table> {
        &self.table
    }
}

impl Tuple for RowTuple {
    fn cell_num(&self) -> usize {
        self.row.len()
    }

    fn cell_at(&self, index: usize) -> Result<Value> {
        self.row.get(index).cloned().ok_or_else(|| {
            Error::invalid_argument(format!(
                "cell index {} out of range for table {}",
                index,
                self.table.name()
            ))
        })
    }

    fn find_cell(&self, spec: &TupleCellSpec) -> Result<Value> {
        if spec.table != self.table.name() {
            return Err(Error::column_not_found(&spec.table, &spec.field));
        }
        let index = self
            .table
            .get_column_index(&spec.field)
            .ok_or_else(|| Error::column_not_found(&spec.table, &spec.field))?;
        self.cell_at(index)
    }

    fn record(&self) -> Option<&Row> {
        Some(&self.row)
    }
}

/// The single output row of an aggregation, one labelled cell per field.
#[derive(Clone, Debug, Default)]
pub struct AggregationTuple {
    specs: Vec<TupleCellSpec>,
    cells: Vec<Value>,
}

impl AggregationTuple {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a cell label.
    pub fn add_cell_spec(&mut self, name: impl Into<String>) {
        self.specs.push(TupleCellSpec::named(name));
    }

    /// Replaces the cell values; they line up with the labels by position.
    pub fn set_cells(&mut self, cells: Vec<Value>) {
        self.cells = cells;
    }

    pub fn specs(&self) -> &[TupleCellSpec] {
        &self.specs
    }
}

impl Tuple for AggregationTuple {
    fn cell_num(&self) -> usize {
        self.cells.len()
    }

    fn cell_at(&self, index: usize) -> Result<Value> {
        self.cells.get(index).cloned().ok_or_else(|| {
            Error::invalid_argument(format!("cell index {} out of range", index))
        })
    }

    fn find_cell(&self, spec: &TupleCellSpec) -> Result<Value> {
        self.specs
            .iter()
            .position(|s| s.field == spec.field && (spec.table.is_empty() || s.table == spec.table))
            .map(|i| self.cell_at(i))
            .unwrap_or_else(|| Err(Error::column_not_found(&spec.table, &spec.field)))
    }
}
