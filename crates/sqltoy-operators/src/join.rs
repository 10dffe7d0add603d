//! Nested-loop joins over a materialized cross product.
//!
//! Every join starts from `cross_join`, whose rows carry the `RowId`s of the
//! pair they came from. Outer joins use that provenance, never row values, to
//! find which input rows went unmatched.

use serde::{Deserialize, Serialize};
use sqltoy_core::config::PaddingPolicy;
use sqltoy_core::id::RowId;
use sqltoy_core::{Provenance, Row, Table, Value};

use crate::traits::{trace_op, OpError, Operator, Predicate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinType {
    Cross,
    Inner,
    Left,
    Right,
    Full,
}

impl JoinType {
    pub fn op_name(&self) -> &'static str {
        match self {
            JoinType::Cross => "cross_join",
            JoinType::Inner => "inner_join",
            JoinType::Left => "left_join",
            JoinType::Right => "right_join",
            JoinType::Full => "full_join",
        }
    }
}

/// Cartesian product, row-major: outer loop over `a`, inner loop over `b`.
///
/// Columns are qualified by their table's name. The result table is unnamed.
pub fn cross_join(a: &Table, b: &Table) -> Table {
    let mut rows = Vec::with_capacity(a.num_rows().saturating_mul(b.num_rows()));
    for (xi, x) in a.enumerate() {
        for (yi, y) in b.enumerate() {
            let mut row = Row::with_capacity(x.len() + y.len());
            copy_qualified(&mut row, a, x);
            copy_qualified(&mut row, b, y);
            row.set_provenance(Provenance::pair(xi, yi));
            rows.push(row);
        }
    }
    trace_op("cross_join", a.num_rows() + b.num_rows(), rows.len());
    Table::with_rows("", rows)
}

/// Cross join filtered by `predicate`, in cross-join order.
pub fn inner_join(a: &Table, b: &Table, predicate: impl Fn(&Row) -> bool) -> Table {
    let mut out = cross_join(a, b);
    out.rows.retain(|row| predicate(row));
    trace_op("inner_join", a.num_rows() + b.num_rows(), out.num_rows());
    out
}

/// Left outer join with the default padding policy (error on an empty `b`).
pub fn left_join(a: &Table, b: &Table, predicate: impl Fn(&Row) -> bool) -> Result<Table, OpError> {
    left_join_with(a, b, predicate, PaddingPolicy::default())
}

/// Every row of `a` contributes its matches in cross-join order, or exactly
/// one padding row with nulls for the columns of `b`'s first row.
pub fn left_join_with(
    a: &Table,
    b: &Table,
    predicate: impl Fn(&Row) -> bool,
    padding: PaddingPolicy,
) -> Result<Table, OpError> {
    let product = cross_join(a, b);

    // Bucket matches by left RowId; the product is row-major so each bucket
    // stays in cross-join order.
    let mut matches: Vec<Vec<Row>> = vec![Vec::new(); a.num_rows()];
    for row in product.rows {
        let Some(left) = row.provenance().and_then(|p| p.left) else {
            continue;
        };
        if predicate(&row) {
            if let Some(bucket) = matches.get_mut(left.index()) {
                bucket.push(row);
            }
        }
    }

    let pad_columns = b.first_row_columns();
    let mut rows = Vec::with_capacity(a.num_rows());
    for ((id, a_row), found) in a.enumerate().zip(matches) {
        if found.is_empty() {
            let mut row = Row::with_capacity(a_row.len());
            copy_qualified(&mut row, a, a_row);
            pad_nulls(&mut row, b, pad_columns.as_deref(), padding)?;
            row.set_provenance(Provenance::left_only(id));
            rows.push(row);
        } else {
            rows.extend(found);
        }
    }

    trace_op("left_join", a.num_rows() + b.num_rows(), rows.len());
    Ok(Table::with_rows("", rows))
}

/// `left_join(b, a, predicate)`: operands swap, the predicate does not.
pub fn right_join(a: &Table, b: &Table, predicate: impl Fn(&Row) -> bool) -> Result<Table, OpError> {
    left_join(b, a, predicate)
}

pub fn right_join_with(
    a: &Table,
    b: &Table,
    predicate: impl Fn(&Row) -> bool,
    padding: PaddingPolicy,
) -> Result<Table, OpError> {
    left_join_with(b, a, predicate, padding)
}

/// Left join of `a` and `b`, then one padding row per row of `b` that matched
/// nothing. Those rows hold nulls for `a`'s first-row columns, then `b`'s fields.
pub fn full_join(
    a: &Table,
    b: &Table,
    predicate: impl Fn(&Row) -> bool,
    padding: PaddingPolicy,
) -> Result<Table, OpError> {
    let mut out = left_join_with(a, b, &predicate, padding)?;

    let mut matched = vec![false; b.num_rows()];
    for row in &out.rows {
        if let Some(right) = row.provenance().and_then(|p| p.right) {
            if let Some(seen) = matched.get_mut(right.index()) {
                *seen = true;
            }
        }
    }

    let pad_columns = a.first_row_columns();
    for (id, b_row) in b.enumerate() {
        if matched[id.index()] {
            continue;
        }
        out.push(right_padding_row(a, b, id, b_row, pad_columns.as_deref(), padding)?);
    }

    trace_op("full_join", a.num_rows() + b.num_rows(), out.num_rows());
    Ok(out)
}

/// Dispatch on `kind`. `Cross` ignores the predicate.
pub fn join(
    kind: JoinType,
    a: &Table,
    b: &Table,
    predicate: impl Fn(&Row) -> bool,
    padding: PaddingPolicy,
) -> Result<Table, OpError> {
    match kind {
        JoinType::Cross => Ok(cross_join(a, b)),
        JoinType::Inner => Ok(inner_join(a, b, predicate)),
        JoinType::Left => left_join_with(a, b, predicate, padding),
        JoinType::Right => right_join_with(a, b, predicate, padding),
        JoinType::Full => full_join(a, b, predicate, padding),
    }
}

fn copy_qualified(out: &mut Row, table: &Table, row: &Row) {
    for (column, value) in row.iter() {
        out.insert(table.qualify(column), value.clone());
    }
}

fn pad_nulls(
    out: &mut Row,
    table: &Table,
    columns: Option<&[String]>,
    padding: PaddingPolicy,
) -> Result<(), OpError> {
    match (columns, padding) {
        (Some(columns), _) => {
            for column in columns {
                out.insert(table.qualify(column), Value::Null);
            }
            Ok(())
        }
        (None, PaddingPolicy::LeftOnly) => Ok(()),
        (None, PaddingPolicy::Error) => Err(OpError::EmptyPaddingTable {
            table: table.name.clone(),
        }),
    }
}

fn right_padding_row(
    a: &Table,
    b: &Table,
    id: RowId,
    b_row: &Row,
    pad_columns: Option<&[String]>,
    padding: PaddingPolicy,
) -> Result<Row, OpError> {
    let mut row = Row::with_capacity(b_row.len());
    pad_nulls(&mut row, a, pad_columns, padding)?;
    copy_qualified(&mut row, b, b_row);
    row.set_provenance(Provenance::right_only(id));
    Ok(row)
}

/// Join stage: the pipeline input is the left operand, `right` is bound.
pub struct Join {
    pub kind: JoinType,
    pub right: Table,
    /// `None` matches every pair.
    pub predicate: Option<Predicate>,
    pub padding: PaddingPolicy,
}

impl Operator for Join {
    fn name(&self) -> &'static str {
        self.kind.op_name()
    }

    fn eval(&self, input: Table) -> Result<Table, OpError> {
        let predicate = |row: &Row| self.predicate.as_ref().map_or(true, |p| p(row));
        join(self.kind, &input, &self.right, predicate, self.padding)
    }
}
