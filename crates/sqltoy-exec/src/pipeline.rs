//! Sequential pipeline runtime.
//!
//! Stages run strictly in insertion order. Each stage consumes the previous
//! table and produces the next, so a grouped table flows through successive
//! aggregate stages and accumulates their columns.

use std::sync::Arc;

use serde::Serialize;
use sqltoy_core::config::EngineConfig;
use sqltoy_core::{Row, Table};
use sqltoy_operators::{
    by_columns, Aggregate, AggregateFn, Aliases, Distinct, Filter, GroupBy, Join, JoinType,
    Limit, OpError, Offset, Operator, Select, SortBy, SortKey,
};
use thiserror::Error;

use crate::metrics;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("stage {index} ({op}) failed: {source}")]
    Stage {
        index: usize,
        op: &'static str,
        #[source]
        source: OpError,
    },
}

/// One line of `Pipeline::explain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageInfo {
    pub index: usize,
    pub op: &'static str,
}

#[derive(Default)]
pub struct Pipeline {
    config: EngineConfig,
    stages: Vec<Box<dyn Operator>>,
}

impl Pipeline {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            stages: Vec::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Append any operator as the next stage.
    pub fn then(mut self, op: impl Operator) -> Self {
        self.stages.push(Box::new(op));
        self
    }

    /// Join the running table (left) with `right`. Outer joins pad according
    /// to the pipeline's config.
    pub fn join(
        self,
        kind: JoinType,
        right: Table,
        predicate: impl Fn(&Row) -> bool + Send + Sync + 'static,
    ) -> Self {
        let padding = self.config.outer_join_padding;
        self.then(Join {
            kind,
            right,
            predicate: Some(Arc::new(predicate)),
            padding,
        })
    }

    pub fn cross_join(self, right: Table) -> Self {
        let padding = self.config.outer_join_padding;
        self.then(Join {
            kind: JoinType::Cross,
            right,
            predicate: None,
            padding,
        })
    }

    pub fn filter(self, predicate: impl Fn(&Row) -> bool + Send + Sync + 'static) -> Self {
        self.then(Filter::new(Arc::new(predicate)))
    }

    pub fn group_by<S: AsRef<str>>(self, columns: &[S]) -> Self {
        self.then(GroupBy {
            columns: owned(columns),
        })
    }

    pub fn aggregate(self, func: AggregateFn, column: impl Into<String>) -> Self {
        self.then(Aggregate {
            func,
            column: column.into(),
        })
    }

    pub fn having(self, predicate: impl Fn(&Row) -> bool + Send + Sync + 'static) -> Self {
        self.then(Filter::having(Arc::new(predicate)))
    }

    pub fn distinct<S: AsRef<str>>(self, columns: &[S]) -> Self {
        self.then(Distinct {
            columns: owned(columns),
        })
    }

    pub fn select<S: AsRef<str>>(self, columns: &[S], aliases: Aliases) -> Self {
        self.then(Select {
            columns: owned(columns),
            aliases,
        })
    }

    pub fn sort_by(
        self,
        comparator: impl Fn(&Row, &Row) -> std::cmp::Ordering + Send + Sync + 'static,
    ) -> Self {
        self.then(SortBy {
            comparator: Arc::new(comparator),
        })
    }

    /// Sort by column keys, placing nulls per the pipeline's config.
    pub fn order_by(self, keys: &[SortKey]) -> Self {
        let comparator = by_columns(keys, self.config.null_ordering);
        self.sort_by(comparator)
    }

    pub fn offset(self, n: usize) -> Self {
        self.then(Offset(n))
    }

    pub fn limit(self, n: usize) -> Self {
        self.then(Limit(n))
    }

    pub fn explain(&self) -> Vec<StageInfo> {
        self.stages
            .iter()
            .enumerate()
            .map(|(index, stage)| StageInfo {
                index,
                op: stage.name(),
            })
            .collect()
    }

    /// Run every stage over `input`, in order.
    pub fn run(&self, input: Table) -> Result<Table, ExecError> {
        let mut table = input;
        for (index, stage) in self.stages.iter().enumerate() {
            let rows_in = table.num_rows();
            table = stage.eval(table).map_err(|source| ExecError::Stage {
                index,
                op: stage.name(),
                source,
            })?;
            metrics::emit_stage(stage.name(), index, rows_in, table.num_rows());
        }
        Ok(table)
    }
}

fn owned<S: AsRef<str>>(columns: &[S]) -> Vec<String> {
    columns.iter().map(|c| c.as_ref().to_string()).collect()
}
