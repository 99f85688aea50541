mod common;
pub use self::common::*;
mod corpus;
pub use self::corpus::{build_corpus, Corpus, Page};
mod error;
pub use self::error::{RankError, Result};

pub mod page_rank;
pub use self::page_rank::{iterate_rank, sample_rank, sample_rank_with_rng, transition};

pub mod crawl;
pub mod report;
pub mod topic;
