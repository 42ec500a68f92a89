//! UPDATE statement resolution.

use crate::planner::LogicalPlan;
use alloc::rc::Rc;
use cinder_core::schema::{Catalog, Table};
use cinder_core::{Error, Result, Value};

/// A resolved `UPDATE table SET attribute = value`.
#[derive(Clone, Debug)]
pub struct UpdateStmt {
    table: Rc<Table>,
    column: usize,
    value: Value,
}

impl UpdateStmt {
    /// Resolves an UPDATE. The value must already have the column's type.
    pub fn create(
        catalog: &Catalog,
        table_name: &str,
        attribute: &str,
        value: Value,
    ) -> Result<Self> {
        let table = catalog
            .find_table(table_name)
            .ok_or_else(|| Error::table_not_found(table_name))?;
        let column = table
            .get_column(attribute)
            .ok_or_else(|| Error::column_not_found(table_name, attribute))?;
        if column.data_type() != value.attr_type() {
            return Err(Error::type_mismatch(column.data_type(), value.attr_type()));
        }
        let column = column.index();
        Ok(Self {
            table,
            column,
            value,
        })
    }

    pub fn table(&self) -> &Rc<Table> {
        &self.table
    }

    /// Position of the updated column.
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Plans the update over a full read of the table.
    pub fn logical_plan(&self) -> LogicalPlan {
        LogicalPlan::update(
            LogicalPlan::table_get(Rc::clone(&self.table)),
            Rc::clone(&self.table),
            self.column,
            self.value.clone(),
        )
    }
}
