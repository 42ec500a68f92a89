//! Catalog of table definitions.

use super::table::Table;
use crate::error::{Error, Result};
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use hashbrown::HashMap;

/// Name-indexed registry of tables.
///
/// Tables are handed out as `Rc<Table>` so fields, tuples and operators can
/// keep referring to their metadata for as long as they live.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    tables: HashMap<String, Rc<Table>>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table and returns the shared handle.
    pub fn add_table(&mut self, table: Table) -> Result<Rc<Table>> {
        if self.tables.contains_key(table.name()) {
            return Err(Error::invalid_schema(alloc::format!(
                "Table already exists: {}",
                table.name()
            )));
        }
        let table = Rc::new(table);
        self.tables
            .insert(table.name().to_string(), Rc::clone(&table));
        Ok(table)
    }

    /// Looks up a table by name.
    pub fn find_table(&self, name: &str) -> Option<Rc<Table>> {
        self.tables.get(name).cloned()
    }

    /// Returns the sorted names of all registered tables.
    pub fn table_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
