//! Logical query plan definitions.

use crate::field::Field;
use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec;
use alloc::vec::Vec;
use cinder_core::schema::Table;
use cinder_core::Value;

/// Planning-time description of an aggregation: the table and the fields to
/// compute, in output order.
#[derive(Clone, Debug)]
pub struct AggregationLogicalOperator {
    table: Rc<Table>,
    fields: Vec<Field>,
}

impl AggregationLogicalOperator {
    pub fn new(table: Rc<Table>, fields: Vec<Field>) -> Self {
        Self { table, fields }
    }

    pub fn table(&self) -> &Rc<Table> {
        &self.table
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

/// Logical query plan node.
#[derive(Clone, Debug)]
pub enum LogicalPlan {
    /// Read every row of a table.
    TableGet { table: Rc<Table> },

    /// Aggregate the input into a single row.
    Aggregation {
        input: Box<LogicalPlan>,
        aggregation: AggregationLogicalOperator,
    },

    /// Overwrite one column of every input row.
    Update {
        input: Box<LogicalPlan>,
        table: Rc<Table>,
        column: usize,
        value: Value,
    },
}

impl LogicalPlan {
    /// Creates a table read plan.
    pub fn table_get(table: Rc<Table>) -> Self {
        LogicalPlan::TableGet { table }
    }

    /// Creates an aggregation plan.
    pub fn aggregate(input: LogicalPlan, aggregation: AggregationLogicalOperator) -> Self {
        LogicalPlan::Aggregation {
            input: Box::new(input),
            aggregation,
        }
    }

    /// Creates an update plan.
    pub fn update(input: LogicalPlan, table: Rc<Table>, column: usize, value: Value) -> Self {
        LogicalPlan::Update {
            input: Box::new(input),
            table,
            column,
            value,
        }
    }

    /// Returns the child plans.
    pub fn inputs(&self) -> Vec<&LogicalPlan> {
        match self {
            LogicalPlan::TableGet { .. } => Vec::new(),
            LogicalPlan::Aggregation { input, .. } | LogicalPlan::Update { input, .. } => {
                vec![input.as_ref()]
            }
        }
    }
}
