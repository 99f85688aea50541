use super::{transition::transition_weights, *};
use crate::{common::*, error::check_damping, Corpus, Page, RankError};
use rand::{
    distr::{weighted::WeightedIndex, Distribution as _},
    rngs::StdRng,
    Rng, SeedableRng,
};
use std::collections::HashMap;

/// Monte-Carlo estimate of PageRank: the visit frequencies of one long
/// random-surfer walk.
///
/// The transition row of a page with out-links is built the first time the
/// walk reaches it and reused for the rest of that walk; dangling pages all
/// share one uniform row. A walk therefore holds O(N) weights per distinct
/// linking page it visits, O(N²) in the worst case.
pub struct SampledPageRank<'a> {
    corpus: &'a Corpus,
    damping: f64,
    samples: usize,
    seed: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub samples: usize,
    /// Seed of the walk. Unseeded walks draw their seed from the OS.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            samples: DEFAULT_SAMPLES,
            seed: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Result {
    pub page_rank: Distribution,
    pub visits: HashMap<Page, usize, ahash::RandomState>,
}

impl<'a> SampledPageRank<'a> {
    pub fn new(corpus: &'a Corpus, config: &Config) -> crate::Result<Self> {
        if corpus.is_empty() {
            return Err(RankError::EmptyCorpus);
        }
        check_damping(config.damping)?;
        if config.samples == 0 {
            return Err(RankError::InvalidSampleCount);
        }
        Ok(Self {
            corpus,
            damping: config.damping,
            samples: config.samples,
            seed: config.seed,
        })
    }

    fn row(&self, u: usize) -> crate::Result<WeightedIndex<f64>> {
        let weights = transition_weights(self.corpus, Some(u), self.damping);
        WeightedIndex::<f64>::new(&weights).map_err(|e| RankError::Sampling(e.to_string()))
    }

    /// Walks with a caller-supplied generator; `seed` is ignored.
    pub fn calc_with_rng<R: Rng + ?Sized>(
        &self,
        start: &Distribution,
        rng: &mut R,
    ) -> crate::Result<self::Result> {
        let start = WeightedIndex::<f64>::new(dense(self.corpus, start))
            .map_err(|e| RankError::Sampling(format!("bad starting distribution: {e}")))?;
        let n = self.corpus.len();
        let jump = WeightedIndex::<f64>::new(uniform(n))
            .map_err(|e| RankError::Sampling(e.to_string()))?;
        let dangling: Vec<bool> = (0..n).map(|u| self.corpus.out_degree(u) == 0).collect();
        let mut rows: Vec<Option<WeightedIndex<f64>>> = (0..n).map(|_| None).collect();
        let mut visits = vec![0usize; n];
        let mut current = start.sample(rng);
        log::debug!(
            "sampling {} steps from {:?}",
            self.samples,
            self.corpus.page(current)
        );
        for _ in 0..self.samples {
            visits[current] += 1;
            current = if dangling[current] {
                jump.sample(rng)
            } else {
                let row = match &mut rows[current] {
                    Some(row) => row,
                    slot => slot.insert(self.row(current)?),
                };
                row.sample(rng)
            };
        }

        let total = self.samples as f64;
        let page_rank: Vec<f64> = visits.iter().map(|c| (*c as f64) / total).collect();
        Ok(self::Result {
            page_rank: sparse(self.corpus, &page_rank),
            visits: self
                .corpus
                .pages()
                .iter()
                .cloned()
                .zip(visits)
                .collect(),
        })
    }
}

impl PageRank for SampledPageRank<'_> {
    type Result = self::Result;

    fn calc(&self, start: &Distribution) -> crate::Result<Self::Result> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.calc_with_rng(start, &mut rng)
    }
}

/// Estimates PageRank from `n_samples` steps of a walk starting at a page
/// drawn uniformly at random.
pub fn sample_rank(corpus: &Corpus, damping: f64, n_samples: usize) -> crate::Result<Distribution> {
    let config = Config {
        damping,
        samples: n_samples,
        seed: None,
    };
    let spr = SampledPageRank::new(corpus, &config)?;
    Ok(spr.calc(&uniform_distribution(corpus))?.page_rank)
}

/// [`sample_rank`] with an explicit random source, for reproducible runs.
pub fn sample_rank_with_rng<R: Rng + ?Sized>(
    corpus: &Corpus,
    damping: f64,
    n_samples: usize,
    rng: &mut R,
) -> crate::Result<Distribution> {
    let config = Config {
        damping,
        samples: n_samples,
        seed: None,
    };
    let spr = SampledPageRank::new(corpus, &config)?;
    Ok(spr
        .calc_with_rng(&uniform_distribution(corpus), rng)?
        .page_rank)
}

impl PageRankResult for self::Result {
    fn page_rank(&self) -> &Distribution {
        &self.page_rank
    }

    fn debug<'a>(&'a self, corpus: &'a Corpus) -> impl std::fmt::Debug + 'a {
        ResultDebug {
            corpus,
            result: self,
        }
    }
}

pub struct ResultDebug<'a> {
    corpus: &'a Corpus,
    result: &'a self::Result,
}

impl std::fmt::Debug for ResultDebug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for page in self.corpus.pages() {
            let p = self.result.page_rank.get(page).unwrap();
            let c = self.result.visits.get(page).unwrap();
            writeln!(f, "{page}: {p:.6} ({c} visits)")?;
        }
        Ok(())
    }
}
