//! cookmatch-filter
//!
//! Non-geographic predicate evaluation. Families are AND-ed; the text term
//! matches if any searchable field contains it. A candidate lacking a
//! filtered value fails that filter, except for exclusions, which it passes.

pub mod predicate;

pub use predicate::{evaluate, matches_categorical, matches_coarse, matches_ranges, matches_text, passes_exclusion};
