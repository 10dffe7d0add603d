//! Engine configuration that downstream crates can serialize/deserialize.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// What an outer join does for an unmatched row when the other side has no
/// rows to take a column list from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaddingPolicy {
    /// Fail with an empty-padding-table error.
    #[default]
    Error,
    /// Emit the unmatched row with only its own side's columns.
    LeftOnly,
}

impl FromStr for PaddingPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(PaddingPolicy::Error),
            "left-only" | "left_only" => Ok(PaddingPolicy::LeftOnly),
            other => Err(Error::Config(format!("unknown padding policy '{other}'"))),
        }
    }
}

impl fmt::Display for PaddingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaddingPolicy::Error => write!(f, "error"),
            PaddingPolicy::LeftOnly => write!(f, "left-only"),
        }
    }
}

/// Placement of nulls in column-key sorts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NullOrdering {
    #[default]
    First,
    Last,
}

impl FromStr for NullOrdering {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(NullOrdering::First),
            "last" => Ok(NullOrdering::Last),
            other => Err(Error::Config(format!("unknown null ordering '{other}'"))),
        }
    }
}

impl fmt::Display for NullOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NullOrdering::First => write!(f, "first"),
            NullOrdering::Last => write!(f, "last"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Outer-join behavior when the padding side is empty.
    pub outer_join_padding: PaddingPolicy,

    /// Where nulls land in `sort::by_columns` comparators.
    pub null_ordering: NullOrdering,
}

impl EngineConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `SQLTOY_OUTER_JOIN_PADDING`: `error` or `left-only`
    /// - `SQLTOY_NULL_ORDERING`: `first` or `last`
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("SQLTOY_OUTER_JOIN_PADDING") {
            if let Ok(v) = s.parse::<PaddingPolicy>() {
                cfg.outer_join_padding = v;
            }
        }

        if let Ok(s) = std::env::var("SQLTOY_NULL_ORDERING") {
            if let Ok(v) = s.parse::<NullOrdering>() {
                cfg.null_ordering = v;
            }
        }

        cfg
    }
}
