// src/crawl/fetch.rs
// =============================================================================
// This module downloads pages and turns them into link lists.
//
// The crawler only talks to the `Fetch` trait, so tests can swap the network
// for an in-memory site. `HttpFetcher` is the real implementation.
//
// Each call returns a boxed `'static` future: the crawler spawns it as its own
// tokio task, so it must not borrow from the fetcher.
// =============================================================================

use futures::future::BoxFuture;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::error::{CrawlError, FetchError};
use super::extract::extract_links;

/// Outcome of fetching one page: its extracted links, or why it failed
pub type FetchResult = std::result::Result<Vec<Url>, FetchError>;

/// Something that can fetch a page and return the links it contains
pub trait Fetch {
    fn fetch(&self, url: Url) -> BoxFuture<'static, FetchResult>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Builds a fetcher with a shared HTTP client
    //
    // The client is cloned into every request future. reqwest clients are
    // reference counted, so clones share one connection pool.
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> Result<Self, CrawlError> {
        let mut builder = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5));

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(CrawlError::Client)?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: Url) -> BoxFuture<'static, FetchResult> {
        let client = self.client.clone();
        Box::pin(async move { fetch_page(&client, &url).await })
    }
}

// Fetches a page and extracts its links
//
// The HTTP status is not checked: an error page is still HTML and may still
// link back into the site.
async fn fetch_page(client: &Client, url: &Url) -> FetchResult {
    let response = client.get(url.clone()).send().await?;
    debug!(%url, status = %response.status(), "response received");

    let html = response.text().await?;
    Ok(extract_links(&html, url))
}
