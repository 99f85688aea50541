use thiserror::Error;

/// Errors raised by the ranking core and its collaborators.
#[derive(Error, Debug)]
pub enum RankError {
    #[error("corpus has no pages")]
    EmptyCorpus,
    #[error("damping factor must lie strictly between 0 and 1, got {0}")]
    InvalidDamping(f64),
    #[error("number of samples must be at least 1")]
    InvalidSampleCount,
    #[error("convergence tolerance must be positive, got {0}")]
    InvalidTolerance(f64),
    #[error("weights do not form a distribution: sum={sum}")]
    NotADistribution { sum: f64 },
    #[error("page {0:?} links to itself")]
    SelfLink(String),
    #[error("page {page:?} links to {target:?}, which is not in the corpus")]
    UnknownLink { page: String, target: String },
    #[error("no convergence after {iterations} iterations (delta={delta})")]
    NotConverged { iterations: usize, delta: f64 },
    #[error("rank vector became NaN after {iterations} iterations")]
    Diverged { iterations: usize },
    #[error("sampling failed: {0}")]
    Sampling(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, RankError>;

pub(crate) fn check_damping(damping: f64) -> Result<()> {
    // NaN fails both comparisons.
    if damping > 0.0 && damping < 1.0 {
        Ok(())
    } else {
        Err(RankError::InvalidDamping(damping))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damping_bounds() {
        assert!(check_damping(0.85).is_ok());
        assert!(check_damping(0.0).is_err());
        assert!(check_damping(1.0).is_err());
        assert!(check_damping(-0.5).is_err());
        assert!(check_damping(f64::NAN).is_err());
    }
}
