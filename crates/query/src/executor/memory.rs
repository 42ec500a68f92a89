//! In-memory row storage used to feed plans and apply updates.

use crate::trx::Transaction;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use cinder_core::schema::Table;
use cinder_core::{Error, Result, Row};
use hashbrown::HashMap;
use log::trace;

/// Source of table rows for the planner's scans.
pub trait DataSource {
    /// Returns all rows of `table`, in storage order.
    fn table_rows(&self, table: &str) -> Result<Vec<Rc<Row>>>;
}

/// Rows kept in memory, grouped by table name.
#[derive(Default)]
pub struct InMemoryDataSource {
    tables: HashMap<String, Vec<Rc<Row>>>,
}

impl InMemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the rows of a table.
    pub fn add_table(&mut self, name: impl Into<String>, rows: Vec<Row>) {
        self.tables
            .insert(name.into(), rows.into_iter().map(Rc::new).collect());
    }

    /// Appends a row to an existing table.
    pub fn insert_row(&mut self, table: &str, row: Row) -> Result<()> {
        self.tables
            .get_mut(table)
            .ok_or_else(|| Error::table_not_found(table))?
            .push(Rc::new(row));
        Ok(())
    }
}

impl DataSource for InMemoryDataSource {
    fn table_rows(&self, table: &str) -> Result<Vec<Rc<Row>>> {
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| Error::table_not_found(table))
    }
}

impl Transaction for InMemoryDataSource {
    fn update_record(&mut self, table: &Table, old: &Row, new: &Row) -> Result<()> {
        let rows = self
            .tables
            .get_mut(table.name())
            .ok_or_else(|| Error::table_not_found(table.name()))?;
        let slot = rows
            .iter_mut()
            .find(|r| r.id() == old.id())
            .ok_or_else(|| Error::row_not_found(table.name(), old.id()))?;
        trace!("update row {} of {}", old.id(), table.name());
        *slot = Rc::new(new.clone());
        Ok(())
    }
}
