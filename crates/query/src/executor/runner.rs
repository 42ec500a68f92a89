//! Plan runner - drives an operator tree to completion.

use crate::executor::operator::PhysicalOperator;
use crate::trx::TrxRef;
use alloc::vec::Vec;
use cinder_core::{Error, Result, Value};
use log::warn;

/// Runs physical operators through the open/next/close protocol.
pub struct PlanRunner {
    trx: TrxRef,
}

impl PlanRunner {
    /// Creates a runner whose operators execute under `trx`.
    pub fn new(trx: TrxRef) -> Self {
        Self { trx }
    }

    /// Executes `root` and collects the cells of every tuple it emits.
    ///
    /// The operator is closed even when a step fails; the first error wins.
    pub fn run(&self, root: &mut dyn PhysicalOperator) -> Result<Vec<Vec<Value>>> {
        root.open(&self.trx)?;
        let result = Self::drain(root);
        let closed = root.close();
        if let Err(e) = &result {
            warn!("{} operator failed: {}", root.kind(), e);
        }
        let rows = result?;
        closed?;
        Ok(rows)
    }

    fn drain(root: &mut dyn PhysicalOperator) -> Result<Vec<Vec<Value>>> {
        let mut rows = Vec::new();
        while root.next()? {
            let tuple = root
                .current_tuple()
                .ok_or_else(|| Error::invalid_operation("operator advanced without a tuple"))?;
            rows.push(tuple.cells()?);
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::memory::InMemoryDataSource;
    use crate::executor::scan::TableScanPhysicalOperator;
    use alloc::rc::Rc;
    use alloc::vec;
    use cinder_core::schema::TableBuilder;
    use cinder_core::{DataType, Row};
    use core::cell::RefCell;

    #[test]
    fn test_run_scan() {
        let table = Rc::new(
            TableBuilder::new("t")
                .unwrap()
                .add_column("a", DataType::Ints)
                .unwrap()
                .build()
                .unwrap(),
        );
        let rows = vec![
            Rc::new(Row::new(1, vec![Value::Int(1)])),
            Rc::new(Row::new(2, vec![Value::Int(2)])),
        ];
        let mut scan = TableScanPhysicalOperator::new(table, rows);
        let runner = PlanRunner::new(Rc::new(RefCell::new(InMemoryDataSource::new())));

        let result = runner.run(&mut scan).unwrap();
        assert_eq!(result, vec![vec![Value::Int(1)], vec![Value::Int(2)]]);
    }
}
