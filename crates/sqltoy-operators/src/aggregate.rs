//! Aggregate functions over grouped tables.
//!
//! Each call adds one column, `NAME(column)`, to every group row and returns
//! the same table, so aggregates chain:
//!
//! ```ignore
//! let t = group_by(&employee, &["department_id"]);
//! let t = count(t, "name")?;
//! let t = max(t, "salary")?;
//! ```
//!
//! AVG, MIN, MAX and SUM skip nulls and fail on a group with no non-null
//! values. COUNT counts nulls. ARRAY_AGG renders all values as JSON text.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use sqltoy_core::{Table, Value};

use crate::traits::{trace_op, OpError, Operator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregateFn {
    ArrayAgg,
    Avg,
    Max,
    Min,
    Count,
    Sum,
}

impl AggregateFn {
    pub fn name(&self) -> &'static str {
        match self {
            AggregateFn::ArrayAgg => "ARRAY_AGG",
            AggregateFn::Avg => "AVG",
            AggregateFn::Max => "MAX",
            AggregateFn::Min => "MIN",
            AggregateFn::Count => "COUNT",
            AggregateFn::Sum => "SUM",
        }
    }

    /// Name of the column this aggregate writes, e.g. `COUNT(name)`.
    pub fn output_column(&self, column: &str) -> String {
        format!("{}({})", self.name(), column)
    }

    fn compute(&self, column: &str, values: &[&Value]) -> Result<Value, OpError> {
        match self {
            AggregateFn::ArrayAgg => Ok(Value::Str(
                serde_json::Value::Array(values.iter().map(|v| v.to_json()).collect()).to_string(),
            )),
            AggregateFn::Count => Ok(Value::from(values.len())),
            AggregateFn::Avg => {
                let numbers = self.numbers(column, values)?;
                if numbers.is_empty() {
                    return Err(self.empty(column));
                }
                let total: f64 = numbers.iter().map(|v| v.as_f64().unwrap_or(0.0)).sum();
                Ok(Value::Float(total / numbers.len() as f64))
            }
            AggregateFn::Sum => {
                let numbers = self.numbers(column, values)?;
                if numbers.is_empty() {
                    return Err(self.empty(column));
                }
                Ok(sum_numbers(&numbers))
            }
            AggregateFn::Max => self.extreme(column, values, Ordering::Greater),
            AggregateFn::Min => self.extreme(column, values, Ordering::Less),
        }
    }

    /// Non-null values, all of which must be numbers.
    fn numbers<'a>(&self, column: &str, values: &[&'a Value]) -> Result<Vec<&'a Value>, OpError> {
        let mut out = Vec::with_capacity(values.len());
        for value in values.iter().copied().filter(|v| !v.is_null()) {
            if !value.is_number() {
                return Err(OpError::NonNumeric {
                    aggregate: *self,
                    column: column.to_string(),
                    kind: value.kind(),
                    value: value.to_string(),
                });
            }
            out.push(value);
        }
        Ok(out)
    }

    /// Pairwise fold keeping the first value that wins in direction `want`.
    fn extreme(&self, column: &str, values: &[&Value], want: Ordering) -> Result<Value, OpError> {
        let mut best: Option<&Value> = None;
        for value in values.iter().copied().filter(|v| !v.is_null()) {
            best = match best {
                None => Some(value),
                Some(current) => match value.compare(current) {
                    Some(ord) if ord == want => Some(value),
                    Some(_) => Some(current),
                    None => {
                        return Err(OpError::Incomparable {
                            aggregate: *self,
                            column: column.to_string(),
                            left: current.kind(),
                            right: value.kind(),
                        })
                    }
                },
            };
        }
        best.cloned().ok_or_else(|| self.empty(column))
    }

    fn empty(&self, column: &str) -> OpError {
        OpError::EmptyGroupAggregate {
            aggregate: *self,
            column: column.to_string(),
        }
    }
}

impl fmt::Display for AggregateFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Integer sum while every value is an integer and nothing overflows,
/// float sum otherwise.
fn sum_numbers(numbers: &[&Value]) -> Value {
    let mut total: i64 = 0;
    for value in numbers {
        match value.as_i64().and_then(|i| total.checked_add(i)) {
            Some(next) => total = next,
            None => {
                return Value::Float(numbers.iter().map(|v| v.as_f64().unwrap_or(0.0)).sum());
            }
        }
    }
    Value::Int(total)
}

/// Add `func(column)` to every row of `table`, in place.
///
/// All results are computed before any row is written, so on error the
/// table is left exactly as it was.
pub fn annotate(table: &mut Table, func: AggregateFn, column: &str) -> Result<(), OpError> {
    let results = table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let members = row.members().ok_or_else(|| OpError::NotGrouped {
                aggregate: func,
                column: column.to_string(),
                row: i,
            })?;
            let values: Vec<&Value> = members.iter().map(|m| &m[column]).collect();
            func.compute(column, &values)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let output = func.output_column(column);
    for (row, value) in table.rows.iter_mut().zip(results) {
        row.insert(output.as_str(), value);
    }
    trace_op(func.name(), table.num_rows(), table.num_rows());
    Ok(())
}

/// Thread `table` through one aggregate and hand it back.
pub fn aggregate(mut table: Table, func: AggregateFn, column: &str) -> Result<Table, OpError> {
    annotate(&mut table, func, column)?;
    Ok(table)
}

pub fn array_agg(table: Table, column: &str) -> Result<Table, OpError> {
    aggregate(table, AggregateFn::ArrayAgg, column)
}

/// Mean over the non-null values, as in SQL: nulls are left out of both the
/// sum and the count.
pub fn avg(table: Table, column: &str) -> Result<Table, OpError> {
    aggregate(table, AggregateFn::Avg, column)
}

pub fn max(table: Table, column: &str) -> Result<Table, OpError> {
    aggregate(table, AggregateFn::Max, column)
}

pub fn min(table: Table, column: &str) -> Result<Table, OpError> {
    aggregate(table, AggregateFn::Min, column)
}

pub fn count(table: Table, column: &str) -> Result<Table, OpError> {
    aggregate(table, AggregateFn::Count, column)
}

pub fn sum(table: Table, column: &str) -> Result<Table, OpError> {
    aggregate(table, AggregateFn::Sum, column)
}

#[derive(Debug, Clone)]
pub struct Aggregate {
    pub func: AggregateFn,
    pub column: String,
}

impl Operator for Aggregate {
    fn name(&self) -> &'static str {
        self.func.name()
    }

    fn eval(&self, input: Table) -> Result<Table, OpError> {
        aggregate(input, self.func, &self.column)
    }
}
