//! # CNN Headlines
//!
//! Fetches the headline listing from one CNN section page, saves the
//! headlines as JSON or CSV, and prints the newest ones, optionally
//! filtered by keyword.
//!
//! ## Usage
//!
//! ```sh
//! cnn_headlines -c politics -l 10 -k senate court
//! ```
//!
//! ## Architecture
//!
//! 1. **Resolve**: map the category/subcategory to a section URL
//! 2. **Scrape**: download the page and extract `{title, link}` records
//!    using the site profile registered for that URL
//! 3. **Save**: write the records to the output file (JSON or CSV)
//! 4. **Present**: for JSON output, read the file back and print the
//!    first `--limit` headlines that match `--keywords`

use clap::Parser;
use std::error::Error;
use std::io::IsTerminal;
use std::time::Duration;
use tracing::{debug, error, info, warn};

mod categories;
mod cli;
mod models;
mod outputs;
mod query;
mod scrapers;
mod sites;
mod utils;
mod validate;

use categories::resolve_url;
use cli::Cli;
use outputs::{OutputFormat, write_records};
use query::{Palette, present};
use scrapers::fetch::default_user_agent;
use scrapers::{FetchConfig, HeadlineExtractor, HttpFetcher, fetch_headlines, with_cancellation};
use sites::SiteRegistry;
use utils::init_tracing;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();

    if args.supported_websites {
        let registry = SiteRegistry::load(args.sites.as_deref()).await?;
        print_supported_websites(&registry);
        return Ok(());
    }

    init_tracing(args.loglevel);
    let start_time = std::time::Instant::now();
    debug!(?args, "Parsed CLI arguments");

    let registry = SiteRegistry::load(args.sites.as_deref()).await?;

    let url = resolve_url(args.category, args.subcategory);
    let fetcher = HttpFetcher::new(&FetchConfig {
        timeout: Duration::from_secs(args.timeout_secs),
        user_agent: args.user_agent.clone().unwrap_or_else(default_user_agent),
    })?;
    let extractor = HeadlineExtractor::new(&registry);

    let outcome = with_cancellation(
        fetch_headlines(&fetcher, &extractor, url),
        tokio::signal::ctrl_c(),
        url,
    )
    .await;

    let headlines = match outcome {
        Ok(headlines) if !headlines.is_empty() => headlines,
        Ok(_) => {
            warn!(%url, "No headlines found");
            println!("No headlines found at {url}.");
            return Ok(());
        }
        Err(e) => {
            if e.is_unsupported() {
                warn!(error = %e, "Website not supported for scraping");
            } else {
                error!(error = %e, "Scrape failed");
            }
            println!("Failed to fetch headlines from {url}.");
            return Ok(());
        }
    };

    write_records(&headlines, &args.output, args.format).await?;

    if args.format == OutputFormat::Json {
        let palette = Palette {
            color: std::io::stdout().is_terminal(),
        };
        let mut stdout = std::io::stdout().lock();
        present(&args.output, args.limit, &args.keywords, &mut stdout, palette).await;
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        count = headlines.len(),
        path = %args.output.display(),
        "Execution complete"
    );

    Ok(())
}

fn print_supported_websites(registry: &SiteRegistry) {
    println!("\nSupported websites for news scraping:\n");
    for profile in registry.profiles() {
        println!("- {}", profile.match_key);
    }
    println!();
}
