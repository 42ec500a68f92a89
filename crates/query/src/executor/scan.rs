//! Table scan operator.

use crate::executor::operator::{PhysicalOperator, PhysicalOperatorType};
use crate::trx::TrxRef;
use crate::tuple::{RowTuple, Tuple};
use alloc::rc::Rc;
use alloc::vec::Vec;
use cinder_core::schema::Table;
use cinder_core::{Error, Result, Row};
use log::debug;

/// Table scan operator - emits one tuple per stored row.
pub struct TableScanPhysicalOperator {
    table: Rc<Table>,
    rows: Vec<Rc<Row>>,
    position: usize,
    current: Option<RowTuple>,
    opened: bool,
}

impl TableScanPhysicalOperator {
    /// Creates a scan over pre-fetched rows of `table`.
    pub fn new(table: Rc<Table>, rows: Vec<Rc<Row>>) -> Self {
        Self {
            table,
            rows,
            position: 0,
            current: None,
            opened: false,
        }
    }

    pub fn table(&self) -> &Rc<Table> {
        &self.table
    }
}

impl PhysicalOperator for TableScanPhysicalOperator {
    fn kind(&self) -> PhysicalOperatorType {
        PhysicalOperatorType::TableScan
    }

    fn open(&mut self, _trx: &TrxRef) -> Result<()> {
        debug!("open table scan on {} ({} rows)", self.table.name(), self.rows.len());
        self.position = 0;
        self.current = None;
        self.opened = true;
        Ok(())
    }

    fn next(&mut self) -> Result<bool> {
        if !self.opened {
            return Err(Error::invalid_operation("table scan is not open"));
        }
        match self.rows.get(self.position) {
            Some(row) => {
                self.current = Some(RowTuple::new(Rc::clone(&self.table), Rc::clone(row)));
                self.position += 1;
                Ok(true)
            }
            None => {
                self.current = None;
                Ok(false)
            }
        }
    }

    fn close(&mut self) -> Result<()> {
        self.current = None;
        self.opened = false;
        Ok(())
    }

    fn current_tuple(&self) -> Option<&dyn Tuple> {
        self.current.as_ref().map(|t| t as &dyn Tuple)
    }
}
