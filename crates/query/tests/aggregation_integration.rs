//! Integration tests for the aggregation and update pipelines.
//!
//! Plans are built through the planner and driven end to end, with a
//! counting child operator where the tests need to observe pulls.

use cinder_core::schema::{Catalog, Table, TableBuilder};
use cinder_core::{DataType, Error, Result, Row, Value};
use cinder_query::executor::{
    AggregationPhysicalOperator, DataSource, InMemoryDataSource, PhysicalOperator,
    PhysicalOperatorType, PlanRunner, TableScanPhysicalOperator,
};
use cinder_query::field::{AggregationType, Field};
use cinder_query::planner::{AggregationLogicalOperator, LogicalPlan, PhysicalPlanGenerator};
use cinder_query::stmt::{InsertStmt, UpdateStmt};
use cinder_query::trx::TrxRef;
use cinder_query::tuple::{Tuple, TupleCellSpec};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Helper to create a single-column table of the given type.
fn create_table(name: &str, data_type: DataType) -> Rc<Table> {
    let builder = TableBuilder::new(name).unwrap();
    let builder = match data_type {
        DataType::Chars => builder.add_chars("v", 16),
        other => builder.add_column("v", other),
    };
    Rc::new(builder.unwrap().add_nullable(&["v"]).build().unwrap())
}

fn create_rows(values: Vec<Value>) -> Vec<Rc<Row>> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| Rc::new(Row::new(i as u64, vec![v])))
        .collect()
}

fn trx() -> TrxRef {
    Rc::new(RefCell::new(InMemoryDataSource::new()))
}

/// Child operator wrapping a scan that counts how often it is pulled.
struct CountingScan {
    inner: TableScanPhysicalOperator,
    pulls: Rc<Cell<usize>>,
}

impl PhysicalOperator for CountingScan {
    fn kind(&self) -> PhysicalOperatorType {
        self.inner.kind()
    }

    fn open(&mut self, trx: &TrxRef) -> Result<()> {
        self.inner.open(trx)
    }

    fn next(&mut self) -> Result<bool> {
        self.pulls.set(self.pulls.get() + 1);
        self.inner.next()
    }

    fn close(&mut self) -> Result<()> {
        self.inner.close()
    }

    fn current_tuple(&self) -> Option<&dyn Tuple> {
        self.inner.current_tuple()
    }
}

/// Child operator that fails on its first pull.
struct FailingScan;

impl PhysicalOperator for FailingScan {
    fn kind(&self) -> PhysicalOperatorType {
        PhysicalOperatorType::TableScan
    }

    fn open(&mut self, _trx: &TrxRef) -> Result<()> {
        Ok(())
    }

    fn next(&mut self) -> Result<bool> {
        Err(Error::invalid_operation("disk on fire"))
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn current_tuple(&self) -> Option<&dyn Tuple> {
        None
    }
}

/// Builds an aggregation over `values` with one field per function.
fn aggregation(
    data_type: DataType,
    values: Vec<Value>,
    functions: &[AggregationType],
) -> (AggregationPhysicalOperator, Rc<Cell<usize>>) {
    let table = create_table("t", data_type);
    let fields = functions
        .iter()
        .map(|f| Field::named(Rc::clone(&table), "v", *f).unwrap())
        .collect();
    let pulls = Rc::new(Cell::new(0));
    let mut op = AggregationPhysicalOperator::new(fields);
    op.add_child(Box::new(CountingScan {
        inner: TableScanPhysicalOperator::new(table, create_rows(values)),
        pulls: Rc::clone(&pulls),
    }));
    (op, pulls)
}

fn run_single(data_type: DataType, values: Vec<Value>, function: AggregationType) -> Result<Value> {
    let (mut op, _) = aggregation(data_type, values, &[function]);
    let mut rows = PlanRunner::new(trx()).run(&mut op)?;
    assert_eq!(rows.len(), 1);
    Ok(rows.remove(0).remove(0))
}

fn ints(values: &[i32]) -> Vec<Value> {
    values.iter().map(|v| Value::Int(*v)).collect()
}

#[test]
fn test_int_aggregates() {
    let cases = [
        (AggregationType::Sum, Value::Int(6)),
        (AggregationType::Avg, Value::Float(2.0)),
        (AggregationType::Count, Value::Int(3)),
        (AggregationType::Max, Value::Int(3)),
        (AggregationType::Min, Value::Int(1)),
    ];
    for (function, expected) in cases {
        let result = run_single(DataType::Ints, ints(&[1, 2, 3]), function).unwrap();
        assert_eq!(result, expected, "{}", function);
    }
}

#[test]
fn test_all_functions_in_one_pass() {
    let functions = [
        AggregationType::Count,
        AggregationType::Sum,
        AggregationType::Min,
        AggregationType::Max,
        AggregationType::Avg,
    ];
    let (mut op, pulls) = aggregation(DataType::Ints, ints(&[4, 8, 6]), &functions);
    op.open(&trx()).unwrap();
    assert!(op.next().unwrap());

    let tuple = op.current_tuple().unwrap();
    assert_eq!(
        tuple.cells().unwrap(),
        vec![
            Value::Int(3),
            Value::Int(18),
            Value::Int(4),
            Value::Int(8),
            Value::Float(6.0),
        ]
    );
    assert_eq!(
        tuple.find_cell(&TupleCellSpec::named("SUM(v)")).unwrap(),
        Value::Int(18)
    );
    // Three rows plus the end-of-stream pull.
    assert_eq!(pulls.get(), 4);
}

#[test]
fn test_empty_input() {
    assert_eq!(
        run_single(DataType::Ints, Vec::new(), AggregationType::Count).unwrap(),
        Value::Int(0)
    );
    assert_eq!(
        run_single(DataType::Ints, Vec::new(), AggregationType::Avg).unwrap(),
        Value::Null
    );
    assert_eq!(
        run_single(DataType::Ints, Vec::new(), AggregationType::Sum).unwrap(),
        Value::Int(0)
    );
    assert_eq!(
        run_single(DataType::Ints, Vec::new(), AggregationType::Max).unwrap(),
        Value::Null
    );
}

#[test]
fn test_mixed_sum_keeps_every_row() {
    // The int part is not dropped when a float arrives, in either order.
    let mixed = vec![Value::Int(1), Value::Float(2.5)];
    assert_eq!(
        run_single(DataType::Floats, mixed, AggregationType::Sum).unwrap(),
        Value::Float(3.5)
    );
    let mixed = vec![Value::Float(2.5), Value::Int(1)];
    assert_eq!(
        run_single(DataType::Floats, mixed, AggregationType::Sum).unwrap(),
        Value::Float(3.5)
    );
}

#[test]
fn test_text_column() {
    let words = vec![Value::chars("pear"), Value::chars("apple"), Value::chars("fig")];
    assert_eq!(
        run_single(DataType::Chars, words.clone(), AggregationType::Max).unwrap(),
        Value::chars("pear")
    );
    assert_eq!(
        run_single(DataType::Chars, words, AggregationType::Min).unwrap(),
        Value::chars("apple")
    );

    let numbers = vec![Value::chars("1.5"), Value::chars("2.5x")];
    assert_eq!(
        run_single(DataType::Chars, numbers, AggregationType::Sum).unwrap(),
        Value::Float(4.0)
    );
}

#[test]
fn test_null_cells() {
    let values = vec![Value::Int(5), Value::Null, Value::Int(2)];
    assert_eq!(
        run_single(DataType::Ints, values.clone(), AggregationType::Min).unwrap(),
        Value::Int(2)
    );
    assert_eq!(
        run_single(DataType::Ints, values.clone(), AggregationType::Count).unwrap(),
        Value::Int(3)
    );
    assert!(matches!(
        run_single(DataType::Ints, values, AggregationType::Sum),
        Err(Error::Unimplemented { .. })
    ));
}

#[test]
fn test_second_next_is_end_of_stream() {
    let (mut op, pulls) = aggregation(DataType::Ints, ints(&[1, 2, 3]), &[AggregationType::Sum]);
    op.open(&trx()).unwrap();

    assert!(op.next().unwrap());
    let pulls_after_first = pulls.get();
    let first = op.current_tuple().unwrap().cells().unwrap();

    assert!(!op.next().unwrap());
    assert!(!op.next().unwrap());
    assert_eq!(pulls.get(), pulls_after_first);
    assert_eq!(op.current_tuple().unwrap().cells().unwrap(), first);
}

#[test]
fn test_current_tuple_after_close() {
    let (mut op, _) = aggregation(DataType::Ints, ints(&[1]), &[AggregationType::Count]);
    assert!(op.current_tuple().is_none());
    op.open(&trx()).unwrap();
    assert!(op.current_tuple().is_none());
    assert!(op.next().unwrap());
    op.close().unwrap();
    assert!(op.current_tuple().is_none());
}

#[test]
fn test_sum_over_dates_is_unimplemented() {
    let dates = vec![Value::from("2024-01-01")];
    let (mut op, pulls) = aggregation(DataType::Dates, dates, &[AggregationType::Sum]);
    op.open(&trx()).unwrap();
    assert!(matches!(op.next(), Err(Error::Unimplemented { .. })));

    // The failed pass is not retried.
    let pulls_after_failure = pulls.get();
    assert!(!op.next().unwrap());
    assert_eq!(pulls.get(), pulls_after_failure);
}

#[test]
fn test_none_aggregation_is_unimplemented() {
    let result = run_single(DataType::Ints, ints(&[1]), AggregationType::None);
    assert!(matches!(result, Err(Error::Unimplemented { .. })));
}

#[test]
fn test_count_star() {
    let table = create_table("t", DataType::Ints);
    let mut op = AggregationPhysicalOperator::new(vec![Field::count_star(Rc::clone(&table))]);
    op.add_child(Box::new(TableScanPhysicalOperator::new(
        Rc::clone(&table),
        create_rows(ints(&[7, 7])),
    )));
    let rows = PlanRunner::new(trx()).run(&mut op).unwrap();
    assert_eq!(rows, vec![vec![Value::Int(2)]]);

    let mut star = Field::count_star(Rc::clone(&table));
    star.set_aggregation(AggregationType::Sum);
    assert_eq!(star.field_name(), "SUM(*)");
    let mut op = AggregationPhysicalOperator::new(vec![star]);
    op.add_child(Box::new(TableScanPhysicalOperator::new(table, Vec::new())));
    assert!(matches!(
        PlanRunner::new(trx()).run(&mut op),
        Err(Error::InvalidArgument { .. })
    ));
}

#[test]
fn test_count_column_skips_cell_lookup() {
    // The child rows belong to `t`, so a cell of `other.v` can never be found.
    let scanned = create_table("t", DataType::Ints);
    let other = create_table("other", DataType::Ints);
    let count = Field::named(Rc::clone(&other), "v", AggregationType::Count).unwrap();
    let mut op = AggregationPhysicalOperator::new(vec![count]);
    op.add_child(Box::new(TableScanPhysicalOperator::new(
        Rc::clone(&scanned),
        create_rows(ints(&[1, 2, 3])),
    )));
    let rows = PlanRunner::new(trx()).run(&mut op).unwrap();
    assert_eq!(rows, vec![vec![Value::Int(3)]]);

    let max = Field::named(other, "v", AggregationType::Max).unwrap();
    let mut op = AggregationPhysicalOperator::new(vec![max]);
    op.add_child(Box::new(TableScanPhysicalOperator::new(
        scanned,
        create_rows(ints(&[1])),
    )));
    assert!(PlanRunner::new(trx()).run(&mut op).is_err());
}

#[test]
fn test_child_failure_propagates() {
    let table = create_table("t", DataType::Ints);
    let mut op = AggregationPhysicalOperator::new(vec![Field::count_star(table)]);
    op.add_child(Box::new(FailingScan));
    assert_eq!(
        PlanRunner::new(trx()).run(&mut op),
        Err(Error::invalid_operation("disk on fire"))
    );
}

#[test]
fn test_incomparable_values_abort_max() {
    let values = vec![Value::Int(1), Value::Date(20240101)];
    assert!(matches!(
        run_single(DataType::Ints, values, AggregationType::Max),
        Err(Error::NotComparable { .. })
    ));
}

#[test]
fn test_insert_update_aggregate_flow() {
    let mut catalog = Catalog::new();
    let table = catalog
        .add_table(
            TableBuilder::new("products")
                .unwrap()
                .add_column("qty", DataType::Ints)
                .unwrap()
                .add_column("price", DataType::Floats)
                .unwrap()
                .build()
                .unwrap(),
        )
        .unwrap();

    let source = Rc::new(RefCell::new(InMemoryDataSource::new()));
    source.borrow_mut().add_table("products", Vec::new());
    let inputs = [
        [Value::chars("3"), Value::Int(2)],
        [Value::Float(1.6), Value::chars("0.5")],
        [Value::Int(5), Value::Float(3.5)],
    ];
    for (id, values) in inputs.iter().enumerate() {
        let row = InsertStmt::create(&catalog, "products", values)
            .unwrap()
            .into_row(id as u64);
        source.borrow_mut().insert_row("products", row).unwrap();
    }

    let update = UpdateStmt::create(&catalog, "products", "qty", Value::Int(5)).unwrap();
    let mut update_op = PhysicalPlanGenerator::new(&*source.borrow())
        .create(&update.logical_plan())
        .unwrap();
    let trx: TrxRef = source.clone();
    let emitted = PlanRunner::new(Rc::clone(&trx)).run(update_op.as_mut()).unwrap();
    assert!(emitted.is_empty());

    let rows = source.borrow().table_rows("products").unwrap();
    assert!(rows.iter().all(|r| r.get(0) == Some(&Value::Int(5))));

    let fields = vec![
        Field::named(Rc::clone(&table), "qty", AggregationType::Sum).unwrap(),
        Field::named(Rc::clone(&table), "price", AggregationType::Avg).unwrap(),
    ];
    let plan = LogicalPlan::aggregate(
        LogicalPlan::table_get(Rc::clone(&table)),
        AggregationLogicalOperator::new(Rc::clone(&table), fields),
    );
    let mut root = PhysicalPlanGenerator::new(&*source.borrow())
        .create(&plan)
        .unwrap();
    let result = PlanRunner::new(trx).run(root.as_mut()).unwrap();
    assert_eq!(result, vec![vec![Value::Int(15), Value::Float(2.0)]]);
}
