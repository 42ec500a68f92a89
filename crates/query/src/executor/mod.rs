//! Query executor module.

mod aggregate;
mod memory;
mod operator;
mod runner;
mod scan;
mod update;

pub use aggregate::AggregationPhysicalOperator;
pub use memory::{DataSource, InMemoryDataSource};
pub use operator::{BoxedOperator, PhysicalOperator, PhysicalOperatorType};
pub use runner::PlanRunner;
pub use scan::TableScanPhysicalOperator;
pub use update::UpdatePhysicalOperator;
