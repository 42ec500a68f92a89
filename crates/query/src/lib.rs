//! Cinder Query - Operators and planning for the Cinder query engine.
//!
//! This crate provides the pull-based execution layer:
//!
//! - `field`: Column references with an optional aggregation function
//! - `tuple`: Tuples flowing between operators and their cell lookup keys
//! - `trx`: The transaction seam used by modifying operators
//! - `executor`: Physical operators (table scan, aggregation, update) and the plan runner
//! - `planner`: Logical plans and their translation to operator trees
//! - `stmt`: INSERT and UPDATE resolution against the catalog
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use cinder_core::schema::{Catalog, TableBuilder};
//! use cinder_core::{DataType, Row, Value};
//! use cinder_query::executor::{InMemoryDataSource, PlanRunner};
//! use cinder_query::field::{AggregationType, Field};
//! use cinder_query::planner::{AggregationLogicalOperator, LogicalPlan, PhysicalPlanGenerator};
//!
//! let mut catalog = Catalog::new();
//! let table = catalog
//!     .add_table(
//!         TableBuilder::new("orders")
//!             .unwrap()
//!             .add_column("amount", DataType::Ints)
//!             .unwrap()
//!             .build()
//!             .unwrap(),
//!     )
//!     .unwrap();
//!
//! let mut source = InMemoryDataSource::new();
//! source.add_table("orders", vec![
//!     Row::new(1, vec![Value::Int(10)]),
//!     Row::new(2, vec![Value::Int(32)]),
//! ]);
//!
//! let sum = Field::named(Rc::clone(&table), "amount", AggregationType::Sum).unwrap();
//! let plan = LogicalPlan::aggregate(
//!     LogicalPlan::table_get(Rc::clone(&table)),
//!     AggregationLogicalOperator::new(Rc::clone(&table), vec![sum]),
//! );
//!
//! let mut root = PhysicalPlanGenerator::new(&source).create(&plan).unwrap();
//! let runner = PlanRunner::new(Rc::new(RefCell::new(source)));
//! let rows = runner.run(root.as_mut()).unwrap();
//! assert_eq!(rows, vec![vec![Value::Int(42)]]);
//! ```

#![no_std]

extern crate alloc;

pub mod executor;
pub mod field;
pub mod planner;
pub mod stmt;
pub mod trx;
pub mod tuple;
