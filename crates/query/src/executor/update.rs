//! Update operator.

use crate::executor::operator::{BoxedOperator, PhysicalOperator, PhysicalOperatorType};
use crate::trx::TrxRef;
use crate::tuple::Tuple;
use alloc::format;
use alloc::rc::Rc;
use alloc::vec::Vec;
use cinder_core::schema::Table;
use cinder_core::{Error, Result, Value};
use log::{debug, warn};

/// Overwrites one column of every row produced by its child.
///
/// Rows whose cell already holds the new bytes are left alone. The operator
/// never emits tuples: its single `next` applies the changes and reports end
/// of stream.
pub struct UpdatePhysicalOperator {
    table: Rc<Table>,
    column: usize,
    value: Value,
    children: Vec<BoxedOperator>,
    trx: Option<TrxRef>,
    updated: usize,
}

impl UpdatePhysicalOperator {
    /// Creates an update of column `column` of `table` to `value`.
    pub fn new(table: Rc<Table>, column: usize, value: Value) -> Self {
        Self {
            table,
            column,
            value,
            children: Vec::new(),
            trx: None,
            updated: 0,
        }
    }

    pub fn add_child(&mut self, child: BoxedOperator) {
        self.children.push(child);
    }

    /// Number of rows changed by the last run.
    pub fn updated_count(&self) -> usize {
        self.updated
    }
}

impl PhysicalOperator for UpdatePhysicalOperator {
    fn kind(&self) -> PhysicalOperatorType {
        PhysicalOperatorType::Update
    }

    fn open(&mut self, trx: &TrxRef) -> Result<()> {
        let Some(child) = self.children.first_mut() else {
            return Ok(());
        };
        child.open(trx).map_err(|e| {
            warn!("failed to open child operator: {}", e);
            e
        })?;
        self.trx = Some(Rc::clone(trx));
        self.updated = 0;
        Ok(())
    }

    fn next(&mut self) -> Result<bool> {
        let Some(child) = self.children.first_mut() else {
            return Ok(false);
        };
        let trx = self
            .trx
            .as_ref()
            .ok_or_else(|| Error::invalid_operation("update operator is not open"))?;
        let column = self.table.columns().get(self.column).ok_or_else(|| {
            Error::invalid_argument(format!(
                "column index {} out of range for table {}",
                self.column,
                self.table.name()
            ))
        })?;
        if self.value.length() > column.byte_len() {
            return Err(Error::invalid_argument(format!(
                "value of {} bytes does not fit {}.{} ({} bytes)",
                self.value.length(),
                self.table.name(),
                column.name(),
                column.byte_len()
            )));
        }
        let new_bytes = self.value.data();

        while child.next()? {
            let record = child
                .current_tuple()
                .and_then(|t| t.record())
                .ok_or_else(|| Error::invalid_operation("child produced no record"))?;
            let current = record
                .get(self.column)
                .ok_or_else(|| Error::column_not_found(self.table.name(), column.name()))?;
            if current.data() == new_bytes {
                continue;
            }

            let mut changed = record.clone();
            changed.set(self.column, self.value.clone());
            trx.borrow_mut()
                .update_record(&self.table, record, &changed)
                .map_err(|e| {
                    warn!("failed to update record: {}", e);
                    e
                })?;
            self.updated += 1;
        }
        debug!("updated {} rows of {}", self.updated, self.table.name());
        Ok(false)
    }

    fn close(&mut self) -> Result<()> {
        self.trx = None;
        for child in &mut self.children {
            child.close()?;
        }
        Ok(())
    }

    fn current_tuple(&self) -> Option<&dyn Tuple> {
        None
    }
}
