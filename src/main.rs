// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr, so stdout only carries the report)
// 3. Crawl the site starting at the given URL
// 4. Print the link graph and exit (0 = crawl finished, 2 = error)
// =============================================================================

mod cli;           // src/cli.rs - command-line parsing
mod crawl;         // src/crawl/ - crawling logic
mod report;        // src/report.rs - text and JSON output

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use crawl::CrawlConfig;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = CrawlConfig::default()
        .with_max_concurrency(cli.max_concurrency)
        .with_timeout(cli.timeout.map(|secs| Duration::from_secs(secs.get())))
        .with_progress(!cli.json);
    if let Some(user_agent) = cli.user_agent {
        config = config.with_user_agent(user_agent);
    }

    let outcome = crawl::crawl_website(&cli.url, &config).await?;

    let stdout = std::io::stdout().lock();
    if cli.json {
        report::write_json(&outcome, stdout)?;
    } else {
        report::write_text(&outcome, stdout)?;
    }
    Ok(())
}

// RUST_LOG wins when set; otherwise -v flags pick the level
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "site_graph=warn",
        1 => "site_graph=info",
        _ => "site_graph=debug",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
