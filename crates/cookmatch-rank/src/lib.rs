//! cookmatch-rank
//!
//! Stable ordering of annotated hits by the query's sort key.

pub mod order;

pub use order::{compare, rank};
