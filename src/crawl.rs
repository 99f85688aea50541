//! Builds a [`Corpus`] from a directory of HTML pages.

use crate::{Corpus, Page, Result};
use regex::Regex;
use std::{collections::BTreeSet, fs, path::Path, sync::OnceLock};

fn anchor_href() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"<a\s+(?:[^>]*?)href="([^"]*)""#).unwrap())
}

/// Targets of every `<a href="...">` in `html`.
pub fn extract_links(html: &str) -> BTreeSet<Page> {
    anchor_href()
        .captures_iter(html)
        .map(|c| c[1].to_string())
        .collect()
}

/// Reads every `*.html` file directly inside `dir`. A page is named by its
/// file name; links to anything that is not another page of the directory
/// are dropped, as are links of a page to itself.
pub fn crawl(dir: &Path) -> Result<Corpus> {
    let mut pages = vec![];
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(".html") || !entry.path().is_file() {
            continue;
        }
        let contents = fs::read_to_string(entry.path())?;
        let links = extract_links(&contents);
        log::debug!("{name}: {} links", links.len());
        pages.push((name, links));
    }
    log::info!("crawled {} pages from {}", pages.len(), dir.display());
    Ok(Corpus::pruned(pages))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_anchor_targets() {
        let html = r#"
            <html><body>
            <a href="2.html">two</a>
            <a class="x" href="3.html">three</a>
            <a   target="_blank" href="2.html">again</a>
            <link href="style.css">
            <A HREF="upper.html">ignored</A>
            </body></html>
        "#;
        let links: Vec<_> = extract_links(html).into_iter().collect();
        assert_eq!(links, ["2.html", "3.html"]);
    }

    #[test]
    fn crawls_directory() {
        let dir = tempfile::tempdir().unwrap();
        let write = |name: &str, body: &str| fs::write(dir.path().join(name), body).unwrap();
        write("1.html", r#"<a href="2.html">2</a><a href="1.html">me</a>"#);
        write("2.html", r#"<a href="1.html">1</a><a href="https://example.com">out</a>"#);
        write("3.html", r#"<p>no links</p>"#);
        write("notes.txt", r#"<a href="1.html">not a page</a>"#);

        let corpus = crawl(dir.path()).unwrap();
        assert_eq!(corpus.pages(), ["1.html", "2.html", "3.html"]);
        let outs: Vec<_> = corpus.out_links("1.html").unwrap().collect();
        assert_eq!(outs, ["2.html"]);
        let outs: Vec<_> = corpus.out_links("2.html").unwrap().collect();
        assert_eq!(outs, ["1.html"]);
        assert!(corpus.is_dangling("3.html"));
    }

    #[test]
    fn missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(crawl(&dir.path().join("absent")).is_err());
    }
}
