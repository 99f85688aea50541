//! Topic-biased teleport vectors for personalized PageRank.

use crate::{common::normalized, common::sparse, Corpus, Distribution};

/// Splits a comma-separated prefix list, trimming and lower-casing entries
/// and dropping empty ones.
pub fn parse_prefixes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Teleports uniformly onto the pages whose lower-cased name contains one of
/// `prefixes`. `None` when no page matches.
pub fn topic_teleport(corpus: &Corpus, prefixes: &[String]) -> Option<Distribution> {
    let weights: Vec<f64> = corpus
        .pages()
        .iter()
        .map(|page| {
            let page = page.to_lowercase();
            if prefixes.iter().any(|p| page.contains(p.as_str())) {
                1.0
            } else {
                0.0
            }
        })
        .collect();
    normalized(weights).map(|t| sparse(corpus, &t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn corpus() -> Corpus {
        Corpus::new([
            ("Python.html", vec!["ai.html"]),
            ("ai.html", vec!["logic.html"]),
            ("logic.html", vec!["Python.html"]),
        ])
        .unwrap()
    }

    #[test]
    fn prefixes() {
        assert_eq!(parse_prefixes(" Py, ,AI ,"), ["py", "ai"]);
        assert!(parse_prefixes(" , ").is_empty());
    }

    #[test]
    fn matches_case_insensitively() {
        let t = topic_teleport(&corpus(), &parse_prefixes("py,AI")).unwrap();
        assert_abs_diff_eq!(t["Python.html"], 0.5);
        assert_abs_diff_eq!(t["ai.html"], 0.5);
        assert_abs_diff_eq!(t["logic.html"], 0.0);
    }

    #[test]
    fn no_match() {
        assert!(topic_teleport(&corpus(), &parse_prefixes("rust")).is_none());
        assert!(topic_teleport(&corpus(), &[]).is_none());
    }
}
