//! Logical to physical plan translation.

use crate::executor::{
    AggregationPhysicalOperator, BoxedOperator, DataSource, TableScanPhysicalOperator,
    UpdatePhysicalOperator,
};
use crate::planner::LogicalPlan;
use alloc::boxed::Box;
use alloc::rc::Rc;
use cinder_core::Result;
use log::debug;

/// Builds operator trees from logical plans, one operator per node.
pub struct PhysicalPlanGenerator<'a> {
    source: &'a dyn DataSource,
}

impl<'a> PhysicalPlanGenerator<'a> {
    /// Creates a generator whose scans read from `source`.
    pub fn new(source: &'a dyn DataSource) -> Self {
        Self { source }
    }

    /// Translates `plan` into an executable operator tree.
    pub fn create(&self, plan: &LogicalPlan) -> Result<BoxedOperator> {
        match plan {
            LogicalPlan::TableGet { table } => {
                let rows = self.source.table_rows(table.name())?;
                debug!("plan table scan on {}", table.name());
                Ok(Box::new(TableScanPhysicalOperator::new(Rc::clone(table), rows)))
            }
            LogicalPlan::Aggregation { input, aggregation } => {
                let mut op = AggregationPhysicalOperator::new(aggregation.fields().to_vec());
                op.add_child(self.create(input)?);
                Ok(Box::new(op))
            }
            LogicalPlan::Update {
                input,
                table,
                column,
                value,
            } => {
                let mut op = UpdatePhysicalOperator::new(Rc::clone(table), *column, value.clone());
                op.add_child(self.create(input)?);
                Ok(Box::new(op))
            }
        }
    }
}
