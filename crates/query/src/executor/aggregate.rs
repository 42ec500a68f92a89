//! Aggregation operator.
//!
//! Folds every tuple of its single child into one accumulator per field and
//! emits a single output tuple on the first `next`.

use crate::executor::operator::{BoxedOperator, PhysicalOperator, PhysicalOperatorType};
use crate::field::{AggregationType, Field};
use crate::trx::TrxRef;
use crate::tuple::{AggregationTuple, Tuple, TupleCellSpec};
use alloc::format;
use alloc::vec::Vec;
use cinder_core::{Error, Result, Value};
use core::cmp::Ordering;
use log::{debug, warn};

/// Running state of one aggregated field.
#[derive(Clone, Debug, Default)]
struct AggregationResult {
    tot_count: usize,
    int_sum: i64,
    float_sum: f64,
    is_float_sum: bool,
    max_or_min: Value,
    seen: bool,
}

impl AggregationResult {
    fn fold(&mut self, aggregation: AggregationType, cell: Value) -> Result<()> {
        match aggregation {
            AggregationType::Max => self.keep_extreme(cell, Ordering::Greater)?,
            AggregationType::Min => self.keep_extreme(cell, Ordering::Less)?,
            AggregationType::Count => self.tot_count += 1,
            AggregationType::Avg => {
                self.tot_count += 1;
                self.float_sum += f64::from(cell.get_float());
            }
            AggregationType::Sum => match &cell {
                Value::Int(v) => self.int_sum += i64::from(*v),
                Value::Float(v) => {
                    self.float_sum += f64::from(*v);
                    self.is_float_sum = true;
                }
                Value::Chars(_) => {
                    self.float_sum += f64::from(cell.get_float());
                    self.is_float_sum = true;
                }
                other => {
                    return Err(Error::unimplemented(format!(
                        "SUM over {} values",
                        other.attr_type()
                    )))
                }
            },
            AggregationType::None => {
                return Err(Error::unimplemented("aggregation function NONE"));
            }
        }
        Ok(())
    }

    fn keep_extreme(&mut self, cell: Value, wanted: Ordering) -> Result<()> {
        if cell.is_null() {
            return Ok(());
        }
        if !self.seen {
            self.max_or_min = cell;
            self.seen = true;
        } else if cell.compare(&self.max_or_min)? == wanted {
            self.max_or_min = cell;
        }
        Ok(())
    }

    fn finish(self, aggregation: AggregationType) -> Result<Value> {
        match aggregation {
            AggregationType::Max | AggregationType::Min => Ok(if self.seen {
                self.max_or_min
            } else {
                Value::Null
            }),
            AggregationType::Count => i32::try_from(self.tot_count)
                .map(Value::Int)
                .map_err(|_| Error::invalid_operation("COUNT overflows an int")),
            AggregationType::Avg => {
                if self.tot_count == 0 {
                    Ok(Value::Null)
                } else {
                    Ok(Value::Float((self.float_sum / self.tot_count as f64) as f32))
                }
            }
            AggregationType::Sum => {
                if self.is_float_sum {
                    Ok(Value::Float((self.int_sum as f64 + self.float_sum) as f32))
                } else {
                    i32::try_from(self.int_sum)
                        .map(Value::Int)
                        .map_err(|_| Error::invalid_operation("SUM overflows an int"))
                }
            }
            AggregationType::None => Err(Error::unimplemented("aggregation function NONE")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Unopened,
    Opened,
    Exhausted,
    Closed,
}

/// Aggregation operator over a single child.
pub struct AggregationPhysicalOperator {
    fields: Vec<Field>,
    children: Vec<BoxedOperator>,
    tuple: Option<AggregationTuple>,
    state: State,
}

impl AggregationPhysicalOperator {
    /// Creates an operator computing `fields`, in order.
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            fields,
            children: Vec::new(),
            tuple: None,
            state: State::Unopened,
        }
    }

    pub fn add_child(&mut self, child: BoxedOperator) {
        self.children.push(child);
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    fn check_fields(&self) -> Result<()> {
        for field in &self.fields {
            match field.aggregation() {
                AggregationType::None => {
                    return Err(Error::unimplemented(format!(
                        "aggregation function NONE on {}",
                        field.field_name()
                    )))
                }
                AggregationType::Count => {}
                _ if field.meta().is_none() => {
                    return Err(Error::invalid_argument(format!(
                        "{} needs a column",
                        field.field_name()
                    )))
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn aggregate(&mut self) -> Result<Vec<Value>> {
        self.check_fields()?;
        let child = self
            .children
            .first_mut()
            .ok_or_else(|| Error::invalid_operation("aggregation operator has no child"))?;

        // COUNT counts rows, so it never looks its cell up.
        let specs: Vec<Option<TupleCellSpec>> = self
            .fields
            .iter()
            .map(|f| {
                f.meta()
                    .filter(|_| f.aggregation() != AggregationType::Count)
                    .map(|column| TupleCellSpec::new(f.table_name(), column.name()))
            })
            .collect();
        let mut results = alloc::vec![AggregationResult::default(); self.fields.len()];

        while child.next()? {
            let tuple = child
                .current_tuple()
                .ok_or_else(|| Error::invalid_operation("child advanced without a tuple"))?;
            for ((field, spec), result) in self.fields.iter().zip(&specs).zip(&mut results) {
                let cell = match spec {
                    Some(spec) => tuple.find_cell(spec)?,
                    None => Value::Null,
                };
                result.fold(field.aggregation(), cell)?;
            }
        }

        self.fields
            .iter()
            .zip(results)
            .map(|(field, result)| result.finish(field.aggregation()))
            .collect()
    }
}

impl PhysicalOperator for AggregationPhysicalOperator {
    fn kind(&self) -> PhysicalOperatorType {
        PhysicalOperatorType::Aggregation
    }

    fn open(&mut self, trx: &TrxRef) -> Result<()> {
        if self.children.len() != 1 {
            return Err(Error::invalid_operation(format!(
                "aggregation operator needs one child, got {}",
                self.children.len()
            )));
        }
        self.children[0].open(trx)?;
        self.tuple = None;
        self.state = State::Opened;
        debug!("open aggregation over {} fields", self.fields.len());
        Ok(())
    }

    fn next(&mut self) -> Result<bool> {
        match self.state {
            State::Opened => {}
            State::Exhausted => return Ok(false),
            State::Unopened | State::Closed => {
                return Err(Error::invalid_operation("aggregation operator is not open"))
            }
        }
        self.state = State::Exhausted;

        let cells = self.aggregate().map_err(|e| {
            warn!("aggregation failed: {}", e);
            e
        })?;

        let mut tuple = AggregationTuple::new();
        for field in &self.fields {
            tuple.add_cell_spec(field.field_name());
        }
        tuple.set_cells(cells);
        self.tuple = Some(tuple);
        Ok(true)
    }

    fn close(&mut self) -> Result<()> {
        self.tuple = None;
        self.state = State::Closed;
        for child in &mut self.children {
            child.close()?;
        }
        Ok(())
    }

    fn current_tuple(&self) -> Option<&dyn Tuple> {
        self.tuple.as_ref().map(|t| t as &dyn Tuple)
    }
}
