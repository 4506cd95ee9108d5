// src/crawl/frontier.rs
// =============================================================================
// The crawl frontier: everything the crawl knows and is still waiting for.
//
// State:
// - graph: pages fetched successfully, with their outbound links
// - in_flight: pages dispatched for fetching whose result has not come back
// - broken: pages whose fetch failed (never retried)
//
// The frontier performs no I/O. It is fed one fetch result at a time and
// answers with the URLs that should be dispatched next. The crawl is finished
// when nothing is in flight: every new URL is discovered while processing a
// result, and every result belongs to exactly one in-flight URL.
// =============================================================================

use std::collections::HashSet;
use tracing::{debug, warn};
use url::Url;

use super::error::{CrawlError, Result};
use super::fetch::FetchResult;
use super::graph::SiteGraph;
use super::normalize::normalize;

#[derive(Debug, Default)]
pub struct Frontier {
    graph: SiteGraph,
    in_flight: HashSet<Url>,
    broken: Vec<Url>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts the seed in flight and returns it for dispatch.
    ///
    /// Must be called once, before any result is processed.
    pub fn seed(&mut self, base: &Url) -> Url {
        debug_assert!(
            self.in_flight.is_empty() && self.graph.is_empty(),
            "frontier seeded twice"
        );
        let base = normalize(base);
        self.in_flight.insert(base.clone());
        base
    }

    /// Consumes the result of fetching `from` and returns the newly
    /// discovered URLs, already marked in flight, in discovery order.
    ///
    /// A result for a URL that is not in flight means a fetch was reported
    /// twice (or never dispatched); the frontier is left unchanged.
    pub fn on_fetch_result(&mut self, from: Url, result: FetchResult) -> Result<Vec<Url>> {
        if !self.in_flight.remove(&from) {
            warn!(url = %from, "result for a page that is not in flight");
            return Err(CrawlError::UnexpectedResult(from));
        }

        let links = match result {
            Ok(links) => links,
            Err(e) => {
                debug!(url = %from, error = %e, "dropping broken page");
                self.broken.push(from);
                return Ok(Vec::new());
            }
        };

        let links: Vec<Url> = links.iter().map(normalize).collect();
        self.graph.insert(from.clone(), links.clone());

        // Dedup against both finished and pending work, otherwise a page
        // still being fetched would be dispatched a second time
        let mut dispatch = Vec::new();
        for link in links {
            if self.graph.contains(&link) || self.in_flight.contains(&link) {
                continue;
            }
            self.in_flight.insert(link.clone());
            dispatch.push(link);
        }

        debug!(
            url = %from,
            new = dispatch.len(),
            in_flight = self.in_flight.len(),
            "processed page"
        );
        Ok(dispatch)
    }

    /// True once no fetch is outstanding, i.e. no more work can appear
    pub fn is_done(&self) -> bool {
        self.in_flight.is_empty()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn graph(&self) -> &SiteGraph {
        &self.graph
    }

    /// Hands over the finished graph and the list of broken pages
    pub fn into_parts(self) -> (SiteGraph, Vec<Url>) {
        (self.graph, self.broken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::error::FetchError;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn urls(list: &[&str]) -> Vec<Url> {
        list.iter().map(|s| url(s)).collect()
    }

    fn broken() -> FetchResult {
        Err(FetchError::simulated())
    }

    #[test]
    fn test_seed_is_in_flight() {
        let mut frontier = Frontier::new();
        let seed = frontier.seed(&url("http://a.test/?utm=1#top"));
        assert_eq!(seed.as_str(), "http://a.test/");
        assert_eq!(frontier.in_flight(), 1);
        assert!(!frontier.is_done());
    }

    #[test]
    fn test_new_links_are_dispatched_once() {
        let mut frontier = Frontier::new();
        let seed = frontier.seed(&url("http://a.test/"));

        let next = frontier
            .on_fetch_result(
                seed,
                Ok(urls(&["http://a.test/x", "http://a.test/x?y=1", "http://a.test/y"])),
            )
            .unwrap();

        assert_eq!(next, urls(&["http://a.test/x", "http://a.test/y"]));
        assert_eq!(frontier.in_flight(), 2);

        // Stored list is normalized, duplicates kept
        assert_eq!(
            frontier.graph().links(&url("http://a.test/")).unwrap(),
            urls(&["http://a.test/x", "http://a.test/x", "http://a.test/y"]).as_slice()
        );
    }

    #[test]
    fn test_in_flight_links_are_not_redispatched() {
        let mut frontier = Frontier::new();
        let seed = frontier.seed(&url("http://a.test/"));
        frontier
            .on_fetch_result(seed, Ok(urls(&["http://a.test/x", "http://a.test/y"])))
            .unwrap();

        // /x links to /y while /y is still being fetched
        let next = frontier
            .on_fetch_result(url("http://a.test/x"), Ok(urls(&["http://a.test/y"])))
            .unwrap();
        assert!(next.is_empty());
        assert_eq!(frontier.in_flight(), 1);
    }

    #[test]
    fn test_fetched_links_are_not_redispatched() {
        let mut frontier = Frontier::new();
        let seed = frontier.seed(&url("http://a.test/"));
        frontier
            .on_fetch_result(seed, Ok(urls(&["http://a.test/", "http://a.test/x"])))
            .unwrap();

        // Self link on the seed was skipped, back link from /x is skipped too
        let next = frontier
            .on_fetch_result(url("http://a.test/x"), Ok(urls(&["http://a.test/#top"])))
            .unwrap();
        assert!(next.is_empty());
        assert!(frontier.is_done());
        assert_eq!(frontier.graph().len(), 2);
    }

    #[test]
    fn test_broken_page_is_dropped() {
        let mut frontier = Frontier::new();
        let seed = frontier.seed(&url("http://a.test/"));
        frontier
            .on_fetch_result(seed, Ok(urls(&["http://a.test/gone"])))
            .unwrap();

        let next = frontier
            .on_fetch_result(url("http://a.test/gone"), broken())
            .unwrap();
        assert!(next.is_empty());
        assert!(frontier.is_done());

        let (graph, broken) = frontier.into_parts();
        assert!(!graph.contains(&url("http://a.test/gone")));
        assert_eq!(broken, urls(&["http://a.test/gone"]));
    }

    #[test]
    fn test_broken_seed_terminates_with_empty_graph() {
        let mut frontier = Frontier::new();
        let seed = frontier.seed(&url("http://a.test/"));
        let next = frontier.on_fetch_result(seed, broken()).unwrap();

        assert!(next.is_empty());
        assert!(frontier.is_done());
        assert!(frontier.graph().is_empty());
    }

    #[test]
    fn test_page_without_links_terminates() {
        let mut frontier = Frontier::new();
        let seed = frontier.seed(&url("http://a.test/"));
        frontier.on_fetch_result(seed.clone(), Ok(Vec::new())).unwrap();

        assert!(frontier.is_done());
        assert_eq!(frontier.graph().len(), 1);
        assert_eq!(frontier.graph().links(&seed), Some(&[][..]));
    }

    #[test]
    fn test_stray_result_is_rejected() {
        let mut frontier = Frontier::new();
        let seed = frontier.seed(&url("http://a.test/"));

        let err = frontier
            .on_fetch_result(url("http://a.test/never"), Ok(Vec::new()))
            .unwrap_err();
        assert!(matches!(err, CrawlError::UnexpectedResult(_)));

        // Duplicate result for a page already processed
        frontier.on_fetch_result(seed.clone(), Ok(Vec::new())).unwrap();
        assert!(frontier.on_fetch_result(seed, Ok(Vec::new())).is_err());
        assert_eq!(frontier.graph().len(), 1);
    }

    #[test]
    fn test_page_never_in_both_graph_and_in_flight() {
        let mut frontier = Frontier::new();
        let seed = frontier.seed(&url("http://a.test/"));
        let next = frontier
            .on_fetch_result(seed, Ok(urls(&["http://a.test/a", "http://a.test/b"])))
            .unwrap();

        for page in next {
            assert!(!frontier.graph().contains(&page));
            frontier
                .on_fetch_result(page.clone(), Ok(urls(&["http://a.test/a"])))
                .unwrap();
            assert!(frontier.graph().contains(&page));
        }
        assert!(frontier.is_done());
        assert_eq!(frontier.graph().len(), 3);
        assert_eq!(frontier.graph().total_links(), 4);
    }
}
