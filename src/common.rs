use crate::corpus::{Corpus, Page};
use std::collections::HashMap;

/// Page-keyed probability mass. Every page of the corpus has an entry.
pub type Distribution = HashMap<Page, f64, ahash::RandomState>;

pub fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, |acc: f64, d| {
            // f64::max drops NaN; a NaN difference must not look converged.
            if acc.is_nan() || d.is_nan() {
                f64::NAN
            } else {
                acc.max(d)
            }
        })
}

pub fn uniform_distribution(corpus: &Corpus) -> Distribution {
    sparse(corpus, &uniform(corpus.len()))
}

pub(crate) fn uniform(n: usize) -> Vec<f64> {
    let w = 1.0 / (n as f64);
    vec![w; n]
}

/// Rescales `v` to sum to 1; `None` when its mass is not positive and
/// finite.
pub(crate) fn normalized(mut v: Vec<f64>) -> Option<Vec<f64>> {
    let total: f64 = v.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return None;
    }
    v.iter_mut().for_each(|x| *x /= total);
    Some(v)
}

/// Lays `dist` out in corpus order. Pages without an entry get 0 and
/// entries for unknown pages are ignored.
pub(crate) fn dense(corpus: &Corpus, dist: &Distribution) -> Vec<f64> {
    corpus
        .pages()
        .iter()
        .map(|p| dist.get(p).copied().unwrap_or(0.0))
        .collect()
}

pub(crate) fn sparse(corpus: &Corpus, v: &[f64]) -> Distribution {
    corpus.pages().iter().cloned().zip(v.iter().copied()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn normalize() {
        let v = normalized(vec![1.0, 3.0]).unwrap();
        assert_abs_diff_eq!(v[0], 0.25);
        assert_abs_diff_eq!(v[1], 0.75);
        assert!(normalized(vec![0.0, 0.0]).is_none());
        assert!(normalized(vec![-1.0, 0.5]).is_none());
        assert!(normalized(vec![f64::INFINITY, 1.0]).is_none());
        assert!(normalized(vec![f64::NAN, 1.0]).is_none());
    }

    #[test]
    fn diffs() {
        assert_abs_diff_eq!(max_abs_diff(&[0.1, 0.5], &[0.2, 0.3]), 0.2, epsilon = 1e-12);
        assert!(max_abs_diff(&[f64::NAN, 0.5], &[0.2, 0.3]).is_nan());
        assert!(max_abs_diff(&[0.1, 0.5], &[0.2, f64::NAN]).is_nan());
    }

    #[test]
    fn dense_and_back() {
        let corpus = Corpus::new([("a", vec!["b"]), ("b", vec![])]).unwrap();
        let mut dist = Distribution::default();
        dist.insert("b".to_string(), 1.0);
        dist.insert("zzz".to_string(), 5.0);
        let v = dense(&corpus, &dist);
        assert_eq!(v, vec![0.0, 1.0]);
        let back = sparse(&corpus, &v);
        assert_eq!(back.len(), 2);
        assert_eq!(back["a"], 0.0);
    }

    #[test]
    fn uniform_sums_to_one() {
        let corpus = Corpus::new([("a", Vec::<&str>::new()), ("b", vec![]), ("c", vec![])]).unwrap();
        let u = uniform_distribution(&corpus);
        assert_abs_diff_eq!(u.values().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(u["c"], 1.0 / 3.0);
    }
}
