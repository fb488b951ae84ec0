use cookmatch_core::{Candidate, CandidateSource, CoarseFilter};
use cookmatch_filter::matches_coarse;

/// Records held in memory. Applies the coarse filter before handing them over.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource<C> {
    records: Vec<C>,
}

impl<C> InMemorySource<C> {
    pub fn new(records: Vec<C>) -> Self { Self { records } }
}

impl<C: Candidate> FromIterator<C> for InMemorySource<C> {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self { Self::new(iter.into_iter().collect()) }
}

impl<C> CandidateSource<C> for InMemorySource<C>
where
    C: Candidate + Clone,
{
    fn fetch(&self, coarse: &CoarseFilter<'_>) -> anyhow::Result<Vec<C>> {
        Ok(self.records.iter().filter(|c| matches_coarse(*c, coarse)).cloned().collect())
    }
}
