use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use cookmatch_core::{Candidate, CoarseFilter, Exclusion, NumericField, NumericRange, QueryDescriptor, TagField};

/// `needle` must already be lowercased.
pub fn matches_text<C: Candidate>(candidate: &C, needle: &str) -> bool {
    candidate.searchable_text().into_iter().any(|field| field.to_lowercase().contains(needle))
}

pub fn matches_categorical<C: Candidate>(candidate: &C, filters: &BTreeMap<TagField, BTreeSet<String>>) -> bool {
    filters
        .iter()
        .all(|(field, accepted)| candidate.tags(*field).iter().any(|v| accepted.contains(v)))
}

pub fn matches_ranges<C: Candidate>(candidate: &C, ranges: &BTreeMap<NumericField, NumericRange>) -> bool {
    ranges
        .iter()
        .all(|(field, range)| candidate.numeric(*field).is_some_and(|v| range.contains(v)))
}

/// Exclusion values are trimmed and lowercased by the query builder.
pub fn passes_exclusion<C: Candidate>(candidate: &C, exclusion: Option<&Exclusion>) -> bool {
    let Some(exclusion) = exclusion else { return true };
    !candidate
        .tags(exclusion.field)
        .iter()
        .any(|v| exclusion.values.contains(&v.trim().to_lowercase()))
}

/// The structural predicates a candidate source may apply.
pub fn matches_coarse<C: Candidate>(candidate: &C, coarse: &CoarseFilter<'_>) -> bool {
    matches_categorical(candidate, coarse.categorical) && matches_ranges(candidate, coarse.ranges)
}

/// Keep the candidates satisfying every non-geographic predicate, in input order.
pub fn evaluate<'a, C: Candidate>(query: &QueryDescriptor, candidates: &'a [C]) -> Vec<&'a C> {
    let base: Vec<&C> = candidates
        .iter()
        .filter(|c| query.text_term().is_none_or(|needle| matches_text(*c, needle)))
        .filter(|c| matches_categorical(*c, query.categorical()))
        .filter(|c| matches_ranges(*c, query.ranges()))
        .collect();
    let base_len = base.len();

    // applied on top of the base result
    let survivors: Vec<&C> = base.into_iter().filter(|c| passes_exclusion(*c, query.exclusion())).collect();
    debug!(input = candidates.len(), base = base_len, survivors = survivors.len(), "predicates evaluated");
    survivors
}
