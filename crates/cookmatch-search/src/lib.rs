//! cookmatch-search
//!
//! Composes normalizer → predicates → distances → ranking into one call.

pub mod engine;
pub mod source;

pub use engine::{search, search_params, SearchEngine};
pub use source::InMemorySource;
