//! Table writers.

pub mod jsonl;
