// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The interface is deliberately small: one positional seed URL plus a few
// optional flags that tune how the crawl runs and how results are printed.
// =============================================================================

use clap::Parser;
use std::num::{NonZeroU64, NonZeroUsize};

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to generate the parsing code for us
#[derive(Parser, Debug)]
#[command(
    name = "site-graph",
    version,
    about = "Crawl a single website and print its internal link graph",
    long_about = "site-graph starts at a seed URL, follows every link that stays on the \
                  same host and prints which page links to which. Broken pages are \
                  reported but never retried."
)]
pub struct Cli {
    /// Website URL to start crawling from (e.g., https://example.com/)
    ///
    /// This is a positional argument (required, no flag needed)
    pub url: String,

    /// Output the link graph as JSON instead of plain text
    #[arg(long)]
    pub json: bool,

    /// Maximum number of pages fetched at the same time
    ///
    /// Leave unset to fetch every discovered page as soon as it is found.
    #[arg(long, value_name = "N")]
    pub max_concurrency: Option<NonZeroUsize>,

    /// Per-request timeout in seconds (default: wait forever)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<NonZeroU64>,

    /// User-Agent header sent with every request
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,

    /// Increase log verbosity on stderr (-v = info, -vv = debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
