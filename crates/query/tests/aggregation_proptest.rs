//! Property-based tests for the aggregation operator.
//!
//! Every function is checked against the same fold computed directly over
//! randomly generated integer columns.

use cinder_core::schema::TableBuilder;
use cinder_core::{DataType, Row, Value};
use cinder_query::executor::{
    AggregationPhysicalOperator, InMemoryDataSource, PlanRunner, TableScanPhysicalOperator,
};
use cinder_query::field::{AggregationType, Field};
use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Strategy for an integer column small enough that sums never overflow.
fn column_strategy(max_rows: usize) -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-10_000i32..10_000i32, 0..max_rows)
}

fn aggregate(values: &[i32], functions: &[AggregationType]) -> Vec<Value> {
    let table = Rc::new(
        TableBuilder::new("t")
            .unwrap()
            .add_column("v", DataType::Ints)
            .unwrap()
            .build()
            .unwrap(),
    );
    let rows = values
        .iter()
        .enumerate()
        .map(|(i, v)| Rc::new(Row::new(i as u64, vec![Value::Int(*v)])))
        .collect();
    let fields = functions
        .iter()
        .map(|f| Field::named(Rc::clone(&table), "v", *f).unwrap())
        .collect();

    let mut op = AggregationPhysicalOperator::new(fields);
    op.add_child(Box::new(TableScanPhysicalOperator::new(table, rows)));
    let runner = PlanRunner::new(Rc::new(RefCell::new(InMemoryDataSource::new())));
    let mut result = runner.run(&mut op).unwrap();
    assert_eq!(result.len(), 1);
    result.remove(0)
}

proptest! {
    #[test]
    fn count_sum_min_max_match_direct_fold(values in column_strategy(64)) {
        let cells = aggregate(
            &values,
            &[
                AggregationType::Count,
                AggregationType::Sum,
                AggregationType::Min,
                AggregationType::Max,
            ],
        );

        prop_assert_eq!(&cells[0], &Value::Int(values.len() as i32));
        prop_assert_eq!(&cells[1], &Value::Int(values.iter().sum::<i32>()));
        prop_assert_eq!(
            &cells[2],
            &values.iter().min().map(|v| Value::Int(*v)).unwrap_or(Value::Null)
        );
        prop_assert_eq!(
            &cells[3],
            &values.iter().max().map(|v| Value::Int(*v)).unwrap_or(Value::Null)
        );
    }

    #[test]
    fn avg_lies_between_min_and_max(values in column_strategy(64)) {
        let cells = aggregate(&values, &[AggregationType::Avg]);
        match (values.iter().min(), values.iter().max()) {
            (Some(min), Some(max)) => {
                let avg = cells[0].get_float();
                prop_assert!(avg >= *min as f32 - 1e-3);
                prop_assert!(avg <= *max as f32 + 1e-3);
            }
            _ => prop_assert_eq!(&cells[0], &Value::Null),
        }
    }

    #[test]
    fn field_order_is_output_order(values in column_strategy(16), flip in any::<bool>()) {
        let functions = if flip {
            [AggregationType::Max, AggregationType::Count]
        } else {
            [AggregationType::Count, AggregationType::Max]
        };
        let cells = aggregate(&values, &functions);
        let count_at = if flip { 1 } else { 0 };
        prop_assert_eq!(&cells[count_at], &Value::Int(values.len() as i32));
    }
}
