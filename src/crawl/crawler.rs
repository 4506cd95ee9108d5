// src/crawl/crawler.rs
// =============================================================================
// This module runs a crawl end to end.
//
// How it works:
// 1. Seed the frontier with the start URL and dispatch it
// 2. Every dispatched URL gets its own tokio task in one JoinSet; the task
//    fetches the page and returns (url, result)
// 3. This function is the only consumer: it joins finished tasks, feeds
//    their results to the frontier one at a time and dispatches whatever new
//    URLs come back
// 4. When nothing is in flight any more, the crawl is complete
//
// Only the frontier mutates crawl state, and only from this loop, so the
// graph needs no locking. Fetches themselves run fully in parallel, optionally
// capped by a semaphore.
// =============================================================================

use futures::FutureExt;
use std::any::Any;
use std::num::NonZeroUsize;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use url::Url;

use super::error::{CrawlError, FetchError, Result};
use super::fetch::{Fetch, FetchResult, HttpFetcher};
use super::frontier::Frontier;
use super::graph::SiteGraph;

// Settings for one crawl, built from the command line
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub max_concurrency: Option<NonZeroUsize>,
    pub timeout: Option<Duration>,
    pub user_agent: String,
    // Print "Got N links from ..." / "Broken link ..." lines to stdout
    pub progress: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_concurrency: None,
            timeout: None,
            user_agent: concat!("site-graph/", env!("CARGO_PKG_VERSION")).to_string(),
            progress: true,
        }
    }
}

impl CrawlConfig {
    pub fn with_max_concurrency(mut self, limit: Option<NonZeroUsize>) -> Self {
        self.max_concurrency = limit;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }
}

/// What a finished crawl hands to the reporter
#[derive(Debug)]
pub struct CrawlOutcome {
    pub graph: SiteGraph,
    pub broken: Vec<Url>,
}

// Crawls a website over HTTP
//
// Parameters:
//   start_url: the seed URL as typed by the user
//   config: concurrency, timeout and output settings
//
// Returns: the link graph of every page reachable on the seed's host
pub async fn crawl_website(start_url: &str, config: &CrawlConfig) -> Result<CrawlOutcome> {
    let seed = parse_seed(start_url)?;
    let fetcher = HttpFetcher::new(&config.user_agent, config.timeout)?;
    crawl(&fetcher, seed, config).await
}

// Parses and validates the seed URL
pub fn parse_seed(start_url: &str) -> Result<Url> {
    let seed = Url::parse(start_url).map_err(|source| CrawlError::InvalidSeed {
        url: start_url.to_string(),
        source,
    })?;

    if seed.host_str().is_none() {
        return Err(CrawlError::MissingHost(start_url.to_string()));
    }
    Ok(seed)
}

// Runs the crawl loop with any fetcher
pub async fn crawl<F: Fetch>(fetcher: &F, seed: Url, config: &CrawlConfig) -> Result<CrawlOutcome> {
    info!(
        %seed,
        max_concurrency = ?config.max_concurrency.map(NonZeroUsize::get),
        "starting crawl"
    );

    let dispatcher = Dispatcher {
        limit: config
            .max_concurrency
            .map(|n| Arc::new(Semaphore::new(n.get()))),
    };
    let mut tasks = JoinSet::new();

    let mut frontier = Frontier::new();
    let start = frontier.seed(&seed);
    dispatcher.dispatch(&mut tasks, fetcher, start);

    // Every in-flight page owns exactly one task in the set, so the set only
    // runs dry early if that bookkeeping is broken
    while !frontier.is_done() {
        let joined = tasks
            .join_next()
            .await
            .ok_or(CrawlError::TasksExhausted(frontier.in_flight()))?;
        let (from, result) = joined?;

        if config.progress {
            println!("{}", progress_line(&from, &result));
        }

        for url in frontier.on_fetch_result(from, result)? {
            dispatcher.dispatch(&mut tasks, fetcher, url);
        }
        debug!(
            pages = frontier.graph().len(),
            in_flight = frontier.in_flight(),
            "frontier updated"
        );
    }

    let (graph, broken) = frontier.into_parts();
    info!(
        pages = graph.len(),
        links = graph.total_links(),
        broken = broken.len(),
        "crawl complete"
    );
    Ok(CrawlOutcome { graph, broken })
}

// One stdout line per processed page:
//   Got 3 links from https://example.com/
//   Broken link https://example.com/missing
pub fn progress_line(url: &Url, result: &FetchResult) -> String {
    match result {
        Ok(links) => format!("Got {} links from {}", links.len(), url),
        Err(_) => format!("Broken link {}", url),
    }
}

// Spawns fetch tasks into the crawl's JoinSet
struct Dispatcher {
    limit: Option<Arc<Semaphore>>,
}

impl Dispatcher {
    fn dispatch<F: Fetch>(&self, tasks: &mut JoinSet<(Url, FetchResult)>, fetcher: &F, url: Url) {
        debug!(%url, "dispatching fetch");

        // Futures are lazy: nothing happens until the task polls it
        let fetch = fetcher.fetch(url.clone());
        let limit = self.limit.clone();

        tasks.spawn(async move {
            // The semaphore is never closed, so acquiring cannot fail
            let _permit = match limit {
                Some(limit) => limit.acquire_owned().await.ok(),
                None => None,
            };

            // A panicking fetch still has to report back, or its page
            // would stay in flight forever
            let result = match AssertUnwindSafe(fetch).catch_unwind().await {
                Ok(result) => result,
                Err(panic) => Err(FetchError::Panicked(panic_message(&*panic))),
            };

            match &result {
                Ok(links) => debug!(%url, links = links.len(), "fetched page"),
                Err(e) => warn!(%url, error = %e, "fetch failed"),
            }
            (url, result)
        });
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
