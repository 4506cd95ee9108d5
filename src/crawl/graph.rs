// src/crawl/graph.rs
// =============================================================================
// The link graph built by a crawl: page URL -> outbound same-host links.
//
// A page becomes a key only after it was fetched successfully, and it is
// never replaced or removed afterwards.
// =============================================================================

use std::collections::{HashMap, HashSet};
use url::Url;

#[derive(Debug, Default, Clone)]
pub struct SiteGraph {
    pages: HashMap<Url, Vec<Url>>,
}

impl SiteGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // Records the outbound links of a freshly fetched page.
    // Returns false (and leaves the graph untouched) if the page is already known.
    pub(crate) fn insert(&mut self, page: Url, links: Vec<Url>) -> bool {
        if self.pages.contains_key(&page) {
            return false;
        }
        self.pages.insert(page, links);
        true
    }

    pub fn contains(&self, page: &Url) -> bool {
        self.pages.contains_key(page)
    }

    #[cfg(test)]
    pub fn links(&self, page: &Url) -> Option<&[Url]> {
        self.pages.get(page).map(Vec::as_slice)
    }

    /// Number of unique pages fetched
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Sum of all outbound list lengths, duplicates within a page included
    pub fn total_links(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }

    /// Number of distinct URLs referenced by any page
    pub fn unique_links(&self) -> usize {
        self.pages.values().flatten().collect::<HashSet<_>>().len()
    }

    /// Pages with their links, ordered by page URL
    pub fn sorted(&self) -> Vec<(&Url, &[Url])> {
        let mut pages: Vec<_> = self
            .pages
            .iter()
            .map(|(page, links)| (page, links.as_slice()))
            .collect();
        pages.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()));
        pages
    }
}
