//! The closed hyperlink graph that both estimators rank.
//!
//! A [`Corpus`] maps every page to the set of pages it links to. Every link
//! target is itself a page of the corpus and no page links to itself; these
//! invariants are checked once at construction so the estimators never have
//! to look at a link that leaves the graph.

use crate::error::{RankError, Result};
use algograph::graph::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Identifier of a page, unique within a corpus.
pub type Page = String;

#[derive(Debug, Clone)]
pub struct Corpus {
    graph: directed::TreeBackedGraph,
    pages: Vec<Page>,
    vertices: Vec<VertexId>,
    page_index: HashMap<Page, usize, ahash::RandomState>,
    vertex_index: HashMap<VertexId, usize, ahash::RandomState>,
}

/// Builds a corpus from raw links, rejecting self-links and links to pages
/// that are not keys of `raw`.
pub fn build_corpus<I, P, L, Q>(raw: I) -> Result<Corpus>
where
    I: IntoIterator<Item = (P, L)>,
    P: Into<Page>,
    L: IntoIterator<Item = Q>,
    Q: Into<Page>,
{
    Corpus::new(raw)
}

impl Corpus {
    /// Strict constructor. Duplicate links collapse into one.
    pub fn new<I, P, L, Q>(raw: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, L)>,
        P: Into<Page>,
        L: IntoIterator<Item = Q>,
        Q: Into<Page>,
    {
        let links = collect_links(raw);
        for (page, outs) in links.iter() {
            for target in outs.iter() {
                if target == page {
                    return Err(RankError::SelfLink(page.clone()));
                }
                if !links.contains_key(target) {
                    return Err(RankError::UnknownLink {
                        page: page.clone(),
                        target: target.clone(),
                    });
                }
            }
        }
        Ok(Self::from_links(links))
    }

    /// Forgiving constructor: self-links and links leaving the corpus are
    /// dropped instead of rejected.
    pub fn pruned<I, P, L, Q>(raw: I) -> Self
    where
        I: IntoIterator<Item = (P, L)>,
        P: Into<Page>,
        L: IntoIterator<Item = Q>,
        Q: Into<Page>,
    {
        let mut links = collect_links(raw);
        let known: BTreeSet<Page> = links.keys().cloned().collect();
        let mut dropped = 0;
        for (page, outs) in links.iter_mut() {
            let before = outs.len();
            outs.retain(|target| target != page && known.contains(target));
            dropped += before - outs.len();
        }
        if dropped > 0 {
            log::debug!("pruned {dropped} links pointing outside the corpus or back to their page");
        }
        Self::from_links(links)
    }

    fn from_links(links: BTreeMap<Page, BTreeSet<Page>>) -> Self {
        let mut graph = directed::TreeBackedGraph::new();
        let pages: Vec<Page> = links.keys().cloned().collect();
        let vertices: Vec<VertexId> = pages.iter().map(|_| graph.add_vertex()).collect();
        let page_index: HashMap<_, _, ahash::RandomState> = pages
            .iter()
            .enumerate()
            .map(|(i, page)| (page.clone(), i))
            .collect();
        let vertex_index: HashMap<_, _, ahash::RandomState> = vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (*v, i))
            .collect();
        for (u, outs) in vertices.iter().zip(links.values()) {
            for target in outs.iter() {
                let v = vertices[*page_index.get(target).unwrap()];
                graph.add_edge(*u, v);
            }
        }
        log::debug!(
            "corpus built: {} pages, {} links",
            graph.vertex_size(),
            graph.edge_size()
        );
        Self {
            graph,
            pages,
            vertices,
            page_index,
            vertex_index,
        }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// All pages, sorted.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn contains(&self, page: &str) -> bool {
        self.page_index.contains_key(page)
    }

    pub fn out_links<'a>(&'a self, page: &str) -> Option<impl Iterator<Item = &'a Page> + 'a> {
        let i = self.index_of(page)?;
        Some(self.out_indices(i).map(move |j| &self.pages[j]))
    }

    pub fn in_links<'a>(&'a self, page: &str) -> Option<impl Iterator<Item = &'a Page> + 'a> {
        let i = self.index_of(page)?;
        Some(self.in_indices(i).map(move |j| &self.pages[j]))
    }

    /// A page without out-links. Pages outside the corpus have no recorded
    /// links either, so they count as dangling.
    pub fn is_dangling(&self, page: &str) -> bool {
        self.index_of(page)
            .map_or(true, |i| self.out_degree(i) == 0)
    }

    pub fn dangling_pages(&self) -> impl Iterator<Item = &Page> + '_ {
        (0..self.len())
            .filter(move |i| self.out_degree(*i) == 0)
            .map(move |i| &self.pages[i])
    }

    pub(crate) fn page(&self, i: usize) -> &Page {
        &self.pages[i]
    }

    pub(crate) fn index_of(&self, page: &str) -> Option<usize> {
        self.page_index.get(page).copied()
    }

    pub(crate) fn out_indices(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .out_edges(&self.vertices[i])
            .map(move |e| *self.vertex_index.get(&e.sink).unwrap())
    }

    pub(crate) fn in_indices(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .in_edges(&self.vertices[i])
            .map(move |e| *self.vertex_index.get(&e.source).unwrap())
    }

    pub(crate) fn out_degree(&self, i: usize) -> usize {
        self.graph.out_edges(&self.vertices[i]).count()
    }
}

fn collect_links<I, P, L, Q>(raw: I) -> BTreeMap<Page, BTreeSet<Page>>
where
    I: IntoIterator<Item = (P, L)>,
    P: Into<Page>,
    L: IntoIterator<Item = Q>,
    Q: Into<Page>,
{
    let mut links: BTreeMap<Page, BTreeSet<Page>> = BTreeMap::new();
    for (page, outs) in raw {
        links
            .entry(page.into())
            .or_default()
            .extend(outs.into_iter().map(Into::into));
    }
    links
}
