// src/report.rs
// =============================================================================
// Renders a finished crawl, either as plain text or as JSON.
//
// Text layout:
//
//   https://example.com/ links to:
//   	https://example.com/about
//   https://example.com/about links to:
//   Found 2 unique pages
//   Found 1 total links
//
// Pages are printed in URL order so two runs over the same site diff cleanly.
// =============================================================================

use serde::Serialize;
use std::io::Write;

use crate::crawl::{CrawlOutcome, SiteGraph};

#[derive(Debug, Serialize)]
struct PageReport<'a> {
    url: &'a str,
    links: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct GraphReport<'a> {
    pages: Vec<PageReport<'a>>,
    unique_pages: usize,
    total_links: usize,
    unique_links: usize,
    broken: Vec<&'a str>,
}

pub fn write_text<W: Write>(outcome: &CrawlOutcome, mut out: W) -> std::io::Result<()> {
    let graph: &SiteGraph = &outcome.graph;

    for (page, links) in graph.sorted() {
        writeln!(out, "{} links to:", page)?;
        for link in links {
            writeln!(out, "\t{}", link)?;
        }
    }

    writeln!(out, "Found {} unique pages", graph.len())?;
    writeln!(out, "Found {} total links", graph.total_links())?;

    if !outcome.broken.is_empty() {
        writeln!(out, "Found {} broken links", outcome.broken.len())?;
        for url in &outcome.broken {
            writeln!(out, "\t{}", url)?;
        }
    }
    Ok(())
}

pub fn write_json<W: Write>(outcome: &CrawlOutcome, mut out: W) -> anyhow::Result<()> {
    let graph = &outcome.graph;

    let report = GraphReport {
        pages: graph
            .sorted()
            .into_iter()
            .map(|(page, links)| PageReport {
                url: page.as_str(),
                links: links.iter().map(|l| l.as_str()).collect(),
            })
            .collect(),
        unique_pages: graph.len(),
        total_links: graph.total_links(),
        unique_links: graph.unique_links(),
        broken: outcome.broken.iter().map(|u| u.as_str()).collect(),
    };

    serde_json::to_writer_pretty(&mut out, &report)?;
    writeln!(out)?;
    Ok(())
}
