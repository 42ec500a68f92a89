//! Query planner module.

mod logical;
mod physical;

pub use logical::{AggregationLogicalOperator, LogicalPlan};
pub use physical::PhysicalPlanGenerator;
