//! Convenient re-exports for downstream crates.

pub use crate::config::{EngineConfig, NullOrdering, PaddingPolicy};
pub use crate::error::{Error, Result};
pub use crate::hash::{GroupKey, Hash256};
pub use crate::id::RowId;
pub use crate::row::{Provenance, Row};
pub use crate::table::Table;
pub use crate::value::Value;
