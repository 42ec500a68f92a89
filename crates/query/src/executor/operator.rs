//! The pull-based iteration protocol shared by all physical operators.

use crate::trx::TrxRef;
use crate::tuple::Tuple;
use cinder_core::Result;
use core::fmt;

/// Kind tag of a physical operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhysicalOperatorType {
    TableScan,
    Aggregation,
    Update,
}

impl fmt::Display for PhysicalOperatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PhysicalOperatorType::TableScan => "TABLE_SCAN",
            PhysicalOperatorType::Aggregation => "AGGREGATION",
            PhysicalOperatorType::Update => "UPDATE",
        };
        f.write_str(name)
    }
}

/// A node of an executable plan.
///
/// Callers drive an operator with `open`, then `next` until it returns
/// `Ok(false)`, then `close`. After a successful `next`, the produced tuple is
/// available through `current_tuple`.
pub trait PhysicalOperator {
    fn kind(&self) -> PhysicalOperatorType;

    /// Prepares the operator (and its children) to run under `trx`.
    fn open(&mut self, trx: &TrxRef) -> Result<()>;

    /// Advances to the next tuple. `Ok(false)` signals end of stream.
    fn next(&mut self) -> Result<bool>;

    /// Releases the operator's resources and closes its children.
    fn close(&mut self) -> Result<()>;

    /// The tuple produced by the last successful `next`.
    fn current_tuple(&self) -> Option<&dyn Tuple>;
}

/// Boxed operator, the unit plans are built from.
pub type BoxedOperator = alloc::boxed::Box<dyn PhysicalOperator>;
