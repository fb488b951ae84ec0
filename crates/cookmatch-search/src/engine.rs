use std::marker::PhantomData;
use tracing::debug;

use cookmatch_core::{Candidate, CandidateSource, EntityProfile, Hit, QueryDescriptor, Ranked};
use cookmatch_query::{normalize, RawParams};

/// Run every stage over an already materialized candidate set.
pub fn search<'a, C: Candidate>(query: &QueryDescriptor, candidates: &'a [C]) -> Vec<Hit<'a, C>> {
    let survivors = cookmatch_filter::evaluate(query, candidates);
    let hits = cookmatch_geo::annotate(query.geo(), survivors);
    cookmatch_rank::rank(query, hits)
}

/// Normalize `params` with `C`'s built-in profile, then [`search`].
pub fn search_params<'a, C: Candidate>(params: &RawParams, candidates: &'a [C]) -> Vec<Hit<'a, C>> {
    let query = normalize(C::profile(), params);
    search(&query, candidates)
}

/// Pairs a candidate source with the profile used to read requests for it.
pub struct SearchEngine<C, S>
where
    C: Candidate,
    S: CandidateSource<C>,
{
    source: S,
    profile: EntityProfile,
    _candidate: PhantomData<fn() -> C>,
}

impl<C, S> SearchEngine<C, S>
where
    C: Candidate + Clone,
    S: CandidateSource<C>,
{
    pub fn new(source: S) -> Self { Self::with_profile(source, *C::profile()) }

    /// Use a profile other than `C`'s built-in one, e.g. with a configured default sort.
    pub fn with_profile(source: S, profile: EntityProfile) -> Self { Self { source, profile, _candidate: PhantomData } }

    pub fn profile(&self) -> &EntityProfile { &self.profile }

    pub fn normalize(&self, params: &RawParams) -> QueryDescriptor { normalize(&self.profile, params) }

    pub fn query(&self, params: &RawParams) -> anyhow::Result<Vec<Ranked<C>>> {
        let query = self.normalize(params);
        self.execute(&query)
    }

    pub fn execute(&self, query: &QueryDescriptor) -> anyhow::Result<Vec<Ranked<C>>> {
        let candidates = self.source.fetch(&query.coarse())?;
        debug!(kind = %query.kind(), fetched = candidates.len(), "candidates fetched");
        Ok(search(query, &candidates).into_iter().map(Hit::into_owned).collect())
    }
}
