//! PageRank estimators over a [`Corpus`](crate::Corpus).
//!
//! [`sampled`] walks a single random-surfer Markov chain and counts visits;
//! [`iterated`] solves the PageRank recurrence by power iteration, optionally
//! with a personalized teleport vector. Both are driven by the damped
//! random-surfer model in [`transition`].

mod traits;
pub use self::traits::*;
pub mod iterated;
pub mod sampled;
pub mod transition;

pub use self::iterated::iterate_rank;
pub use self::sampled::{sample_rank, sample_rank_with_rng};
pub use self::transition::transition;

pub const DEFAULT_DAMPING: f64 = 0.85;
pub const DEFAULT_SAMPLES: usize = 10_000;
pub const DEFAULT_EPSILON: f64 = 0.001;
