// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Submodules:
// - normalize: canonical URL form and excluded file types
// - extract: pulls same-host links out of an HTML page
// - fetch: downloads a page (behind the `Fetch` trait)
// - frontier: dedup and termination bookkeeping
// - crawler: runs fetches concurrently and drives the frontier
// - graph: the resulting page -> links map
// =============================================================================

mod crawler;
mod error;
mod extract;
mod fetch;
mod frontier;
mod graph;
mod normalize;

// Re-export what main.rs and the reporter need
pub use crawler::{crawl_website, CrawlConfig, CrawlOutcome};
pub use graph::SiteGraph;
