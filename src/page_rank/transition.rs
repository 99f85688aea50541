use crate::{common::*, error::check_damping, Corpus, RankError};

/// One step of the damped random surfer leaving `page`.
///
/// From a page with out-links, every page receives `(1 - damping) / N` and
/// each out-link additionally `damping / L`. A dangling page, or a page the
/// corpus has no links recorded for, leads anywhere with probability `1 / N`.
pub fn transition(corpus: &Corpus, page: &str, damping: f64) -> crate::Result<Distribution> {
    if corpus.is_empty() {
        return Err(RankError::EmptyCorpus);
    }
    check_damping(damping)?;
    let from = corpus.index_of(page);
    if from.is_none() {
        log::debug!("{page:?} is not in the corpus, jumping uniformly");
    }
    Ok(sparse(corpus, &transition_weights(corpus, from, damping)))
}

/// Dense form of [`transition`], in corpus order.
pub(crate) fn transition_weights(corpus: &Corpus, from: Option<usize>, damping: f64) -> Vec<f64> {
    let n = corpus.len();
    let Some(u) = from.filter(|u| corpus.out_degree(*u) > 0) else {
        return uniform(n);
    };
    let base = (1.0 - damping) / (n as f64);
    let mut weights = vec![base; n];
    let share = damping / (corpus.out_degree(u) as f64);
    for v in corpus.out_indices(u) {
        weights[v] += share;
    }
    weights
}
