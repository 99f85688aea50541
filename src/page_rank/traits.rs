use crate::{Corpus, Distribution};

pub trait PageRank {
    type Result: PageRankResult;

    /// `start` seeds the estimator: the initial rank vector of an iterative
    /// solver, the starting-page distribution of a sampler.
    fn calc(&self, start: &Distribution) -> crate::Result<Self::Result>;
}

pub trait PageRankResult {
    fn page_rank(&self) -> &Distribution;
    fn debug<'a>(&'a self, corpus: &'a Corpus) -> impl std::fmt::Debug + 'a;
}
