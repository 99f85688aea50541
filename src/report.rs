//! Console and CSV rendering of rank vectors.
//!
//! Everything here consumes [`Distribution`]s only; nothing feeds back into
//! the estimators.

use crate::{Distribution, Page, Result};
use std::{fmt, io::Write};

fn rank_of(dist: &Distribution, page: &str) -> f64 {
    dist.get(page).copied().unwrap_or(0.0)
}

/// `title` followed by one `  page: rank` line per page, sorted by page.
pub fn format_ranks(title: &str, dist: &Distribution) -> String {
    let mut pages: Vec<_> = dist.keys().collect();
    pages.sort();
    let mut out = format!("{title}\n");
    for page in pages {
        out.push_str(&format!("  {page}: {:.4}\n", dist[page]));
    }
    out
}

/// Writes `page,sampling_rank,iterate_rank` rows for `pages`, sorted by page.
pub fn write_csv<W: Write>(
    writer: W,
    pages: &[Page],
    sampled: &Distribution,
    iterated: &Distribution,
) -> Result<()> {
    let mut pages: Vec<_> = pages.iter().collect();
    pages.sort();
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["page", "sampling_rank", "iterate_rank"])?;
    for page in pages {
        let s = format!("{:.6}", rank_of(sampled, page));
        let i = format!("{:.6}", rank_of(iterated, page));
        wtr.write_record([page.as_str(), s.as_str(), i.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub page: Page,
    pub sampled: f64,
    pub iterated: f64,
    pub diff: f64,
}

/// Side-by-side view of the two estimates, largest disagreement first.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub rows: Vec<ComparisonRow>,
    /// Number of pages before the threshold filter.
    pub total: usize,
    pub threshold: f64,
}

impl Comparison {
    /// Rows whose absolute difference is below a positive `threshold` are
    /// left out.
    pub fn new(
        pages: &[Page],
        sampled: &Distribution,
        iterated: &Distribution,
        threshold: f64,
    ) -> Self {
        let mut rows: Vec<_> = pages
            .iter()
            .map(|page| {
                let s = rank_of(sampled, page);
                let i = rank_of(iterated, page);
                ComparisonRow {
                    page: page.clone(),
                    sampled: s,
                    iterated: i,
                    diff: (s - i).abs(),
                }
            })
            .collect();
        let total = rows.len();
        if threshold > 0.0 {
            rows.retain(|r| r.diff >= threshold);
        }
        // Stable, so equal differences keep page order.
        rows.sort_by(|a, b| b.diff.total_cmp(&a.diff));
        Self {
            rows,
            total,
            threshold,
        }
    }

    /// `(max_diff, mean_diff)` over the shown rows; zeros when none is
    /// shown, `None` for an empty corpus.
    pub fn summary(&self) -> Option<(f64, f64)> {
        if self.total == 0 {
            return None;
        }
        if self.rows.is_empty() {
            return Some((0.0, 0.0));
        }
        let max = self.rows.iter().map(|r| r.diff).fold(0.0, f64::max);
        let mean = self.rows.iter().map(|r| r.diff).sum::<f64>() / (self.rows.len() as f64);
        Some((max, mean))
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let page_w = self
            .rows
            .iter()
            .map(|r| r.page.chars().count())
            .chain([4])
            .max()
            .unwrap_or(4);
        let note = if self.threshold > 0.0 {
            format!(
                " (threshold: {:.6}; shown {}/{})",
                self.threshold,
                self.rows.len(),
                self.total
            )
        } else {
            String::new()
        };
        let header = format!(
            "{:<page_w$}  {:>10}  {:>10}  {:>10}{note}",
            "page", "sampling", "iterate", "abs_diff"
        );
        writeln!(f, "{header}")?;
        writeln!(f, "{}", "-".repeat(header.chars().count()))?;
        if self.rows.is_empty() {
            writeln!(f, "(no pages meet the threshold)")?;
        }
        for r in self.rows.iter() {
            writeln!(
                f,
                "{:<page_w$}  {:>10.6}  {:>10.6}  {:>10.6}",
                r.page, r.sampled, r.iterated, r.diff
            )?;
        }
        if let Some((max, mean)) = self.summary() {
            write!(f, "\nSummary: max_diff = {max:.6}, mean_diff = {mean:.6}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dist(xs: &[(&str, f64)]) -> Distribution {
        xs.iter().map(|(p, r)| (p.to_string(), *r)).collect()
    }

    fn pages(xs: &[&str]) -> Vec<Page> {
        xs.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn ranks_sorted_by_page() {
        let out = format_ranks("Ranks", &dist(&[("b.html", 0.25), ("a.html", 0.75)]));
        assert_eq!(out, "Ranks\n  a.html: 0.7500\n  b.html: 0.2500\n");
    }

    #[test]
    fn csv_rows() {
        let mut buf = vec![];
        write_csv(
            &mut buf,
            &pages(&["b", "a"]),
            &dist(&[("a", 0.5), ("b", 0.5)]),
            &dist(&[("a", 0.4)]),
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "page,sampling_rank,iterate_rank\na,0.500000,0.400000\nb,0.500000,0.000000\n"
        );
    }

    #[test]
    fn csv_to_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        write_csv(file.reopen().unwrap(), &pages(&["x"]), &dist(&[("x", 1.0)]), &dist(&[("x", 1.0)]))
            .unwrap();
        let written = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(written.lines().nth(1), Some("x,1.000000,1.000000"));
    }

    #[test]
    fn comparison_orders_by_difference() {
        let cmp = Comparison::new(
            &pages(&["a", "b", "c"]),
            &dist(&[("a", 0.30), ("b", 0.50), ("c", 0.20)]),
            &dist(&[("a", 0.31), ("b", 0.40), ("c", 0.29)]),
            0.0,
        );
        let order: Vec<_> = cmp.rows.iter().map(|r| r.page.as_str()).collect();
        assert_eq!(order, ["b", "c", "a"]);
        let (max, mean) = cmp.summary().unwrap();
        assert!((max - 0.1).abs() < 1e-9);
        assert!((mean - 0.2 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn comparison_threshold() {
        let cmp = Comparison::new(
            &pages(&["a", "b"]),
            &dist(&[("a", 0.5), ("b", 0.5)]),
            &dist(&[("a", 0.45), ("b", 0.55)]),
            0.1,
        );
        assert!(cmp.rows.is_empty());
        assert_eq!(cmp.summary(), Some((0.0, 0.0)));
        let shown = cmp.to_string();
        assert!(shown.contains("(threshold: 0.100000; shown 0/2)"), "{shown}");
        assert!(shown.contains("(no pages meet the threshold)"), "{shown}");
    }

    #[test]
    fn comparison_table() {
        let cmp = Comparison::new(
            &pages(&["index.html"]),
            &dist(&[("index.html", 1.0)]),
            &dist(&[("index.html", 1.0)]),
            0.0,
        );
        let expected = "\
page          sampling     iterate    abs_diff
----------------------------------------------
index.html    1.000000    1.000000    0.000000

Summary: max_diff = 0.000000, mean_diff = 0.000000";
        assert_eq!(cmp.to_string(), expected);
    }
}
