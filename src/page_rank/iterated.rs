use super::*;
use crate::{common::*, error::check_damping, Corpus, RankError};

/// Power-method PageRank with explicit dangling-mass redistribution.
///
/// Each round computes, for every page `p`,
///
/// ```text
/// r'(p) = (1 - d) t(p) + d D t(p) + d Σ_{q → p} r(q) / L(q)
/// ```
///
/// where `D` is the rank currently held by dangling pages and `t` is the
/// teleport vector (uniform unless personalized). Rounds stop once no page
/// moves by `epsilon` or more.
pub struct IteratedPageRank<'a> {
    corpus: &'a Corpus,
    damping: f64,
    epsilon: f64,
    max_iterations: Option<usize>,
    teleport: Vec<f64>,
    in_links: Vec<Vec<usize>>,
    out_degrees: Vec<usize>,
    dangling: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub epsilon: f64,
    /// Gives up with [`RankError::NotConverged`] after this many rounds.
    pub max_iterations: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            epsilon: DEFAULT_EPSILON,
            max_iterations: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Result {
    pub page_rank: Distribution,
    /// Previous minus final rank, per page, of the last round.
    pub delta: Distribution,
    pub iterations: usize,
}

impl<'a> IteratedPageRank<'a> {
    pub fn new(corpus: &'a Corpus, config: &Config) -> crate::Result<Self> {
        if corpus.is_empty() {
            return Err(RankError::EmptyCorpus);
        }
        check_damping(config.damping)?;
        let epsilon = config.epsilon;
        if !(epsilon > 0.0) {
            return Err(RankError::InvalidTolerance(epsilon));
        }
        let n = corpus.len();
        let in_links: Vec<Vec<usize>> = (0..n).map(|v| corpus.in_indices(v).collect()).collect();
        let out_degrees: Vec<usize> = (0..n).map(|u| corpus.out_degree(u)).collect();
        let dangling: Vec<usize> = (0..n).filter(|u| out_degrees[*u] == 0).collect();
        Ok(Self {
            corpus,
            damping: config.damping,
            epsilon,
            max_iterations: config.max_iterations,
            teleport: uniform(n),
            in_links,
            out_degrees,
            dangling,
        })
    }

    /// Biases random jumps, and the redistributed dangling mass, towards
    /// `teleport`. The weights are renormalized over the corpus pages; if
    /// they carry no mass the jumps stay uniform. Negative or non-finite
    /// weights are rejected.
    pub fn with_teleport(mut self, teleport: &Distribution) -> crate::Result<Self> {
        let unknown = teleport
            .keys()
            .filter(|p| !self.corpus.contains(p))
            .count();
        if unknown > 0 {
            log::debug!("ignoring {unknown} teleport weights for pages outside the corpus");
        }
        let t = dense(self.corpus, teleport);
        let sum: f64 = t.iter().sum();
        if !sum.is_finite() || t.iter().any(|w| *w < 0.0) {
            return Err(RankError::NotADistribution { sum });
        }
        match normalized(t) {
            Some(t) => self.teleport = t,
            None => {
                log::warn!("teleport vector has no positive mass, jumping uniformly");
                self.teleport = uniform(self.corpus.len());
            }
        }
        Ok(self)
    }

    /// One application of the recurrence to `ranks`, written into `next`.
    fn step(&self, ranks: &[f64], next: &mut [f64]) {
        let n = self.corpus.len();
        let damping = self.damping;
        let dangling_sum: f64 = self.dangling.iter().map(|u| ranks[*u]).sum();
        for (p, r) in next.iter_mut().enumerate() {
            let t = self.teleport[p];
            let link_sum: f64 = self.in_links[p]
                .iter()
                .map(|q| {
                    // Dangling pages spread over all N pages. They never
                    // appear as in-links, but the convention is kept.
                    let l = match self.out_degrees[*q] {
                        0 => n,
                        l => l,
                    };
                    ranks[*q] / (l as f64)
                })
                .sum();
            *r = (1.0 - damping) * t + damping * dangling_sum * t + damping * link_sum;
        }
    }
}

impl PageRank for IteratedPageRank<'_> {
    type Result = self::Result;

    fn calc(&self, start: &Distribution) -> crate::Result<Self::Result> {
        let mut p = dense(self.corpus, start);
        let p_sum: f64 = p.iter().sum();
        if (p_sum - 1.0).abs() >= 1e-7 {
            return Err(RankError::NotADistribution { sum: p_sum });
        }
        let mut r = vec![0.0; p.len()];
        let mut iterations = 0;
        loop {
            self.step(&p, &mut r);
            iterations += 1;

            let diff = max_abs_diff(&p, &r);
            log::trace!("round {iterations}: max delta {diff}");
            if diff.is_nan() {
                return Err(RankError::Diverged { iterations });
            }
            if diff < self.epsilon {
                log::debug!("converged after {iterations} rounds");
                let delta: Vec<f64> = p.iter().zip(r.iter()).map(|(a, b)| a - b).collect();
                return Ok(Self::Result {
                    page_rank: sparse(self.corpus, &r),
                    delta: sparse(self.corpus, &delta),
                    iterations,
                });
            }
            if let Some(max) = self.max_iterations {
                if iterations >= max {
                    return Err(RankError::NotConverged {
                        iterations,
                        delta: diff,
                    });
                }
            }

            std::mem::swap(&mut p, &mut r);
        }
    }
}

/// PageRank by power iteration from the uniform vector, with random jumps
/// following `teleport` when given and uniform otherwise.
pub fn iterate_rank(
    corpus: &Corpus,
    damping: f64,
    teleport: Option<&Distribution>,
) -> crate::Result<Distribution> {
    let config = Config {
        damping,
        ..Config::default()
    };
    let mut ipr = IteratedPageRank::new(corpus, &config)?;
    if let Some(t) = teleport {
        ipr = ipr.with_teleport(t)?;
    }
    Ok(ipr.calc(&uniform_distribution(corpus))?.page_rank)
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
            let d = self.result.delta.get(page).unwrap();
            writeln!(f, "{page}: {p:.6} (delta {d:+.1e})")?;
        }
        Ok(())
    }
}
