// src/crawl/error.rs
// =============================================================================
// Error types for the crawl module.
//
// Two levels:
// - FetchError: one page could not be downloaded. Never fatal, the page is
//   simply left out of the graph.
// - CrawlError: the crawl as a whole could not start or lost its bookkeeping.
// =============================================================================

use thiserror::Error;
use url::Url;

/// Why a single page fetch failed
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The fetch task panicked before producing a result
    #[error("fetch panicked: {0}")]
    Panicked(String),
}

#[cfg(test)]
impl FetchError {
    // A transport error without touching the network: an invalid header
    // value makes reqwest fail while building the request
    pub(crate) fn simulated() -> Self {
        let err = reqwest::Client::new()
            .get("http://a.test/")
            .header("x-bad", "line\nbreak")
            .build()
            .unwrap_err();
        FetchError::Request(err)
    }
}

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("'{url}' is not a valid URL: {source}")]
    InvalidSeed {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("URL has no host: {0}")]
    MissingHost(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// A fetch result arrived for a URL that was not in flight
    #[error("received a result for {0}, which was not in flight")]
    UnexpectedResult(Url),

    #[error("fetch task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("no fetch tasks left but {0} page(s) still in flight")]
    TasksExhausted(usize),
}

pub type Result<T> = std::result::Result<T, CrawlError>;
