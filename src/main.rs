//! # newsfreq
//!
//! A news crawler that aggregates per-article word-frequency statistics.
//! The front page of the configured site is indexed once, then a bounded
//! pool of concurrent workers fetches and parses the linked articles,
//! merging each article's word counts into one shared result table. The
//! finished table is exported as JSON and answered against a few built-in
//! queries.
//!
//! ## Usage
//!
//! ```sh
//! newsfreq -o ./out -w 4
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Discovery**: index the front page into article headers
//! 2. **Crawl**: fan the headers out across the worker pool, which merges
//!    word counts into the shared table and joins at a single point
//! 3. **Export**: write the table to JSON and report the query results
//!
//! Ctrl-C requests a cooperative stop: in-flight articles finish, nothing
//! new starts, and whatever was merged so far is still exported.

use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod models;
mod outputs;
mod pool;
mod scrapers;
mod text;
mod utils;

use cli::Cli;
use config::SiteConfig;
use outputs::{json, queries};
use pool::reporter;
use scrapers::article::HttpArticleProcessor;
use scrapers::frontpage;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("newsfreq starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.output_dir, args.workers, "Parsed CLI arguments");

    // Early check: ensure the output dir is writable before any network work
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let site = SiteConfig::load(args.config.as_deref()).await?;

    // ---- Reporting stream ----
    let (reporter, report_rx) = reporter::channel();
    let printer = reporter::spawn_printer(report_rx);

    // ---- Discovery ----
    let headers = frontpage::index_articles(&site).await?;
    info!(count = headers.len(), "Articles to crawl");
    // Locator for the unique-words query, picked before the pool consumes
    // the headers.
    let unique_article_url = args
        .unique_article
        .checked_sub(1)
        .and_then(|i| headers.get(i))
        .map(|h| h.url.clone());

    // ---- Crawl ----
    let processor = Arc::new(HttpArticleProcessor::new(&site));
    let handle = pool::start(headers, args.workers, processor, reporter.clone());

    // Ctrl-C requests a cooperative stop; workers drain their in-flight
    // articles and exit before the next dequeue.
    let stop = handle.stop_signal();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received; requesting stop");
            stop.request_stop();
        }
    });

    let summary = handle.wait().await;
    info!(
        processed = summary.processed,
        failed = summary.failed,
        stopped = summary.stopped,
        words = summary.stats.len(),
        "Crawl complete"
    );

    // ---- Export and queries ----
    match json::write_word_stats(&summary.stats, &args.output_dir).await {
        Ok(path) => info!(%path, "Exported word statistics"),
        Err(e) => error!(error = %e, "Failed to export word statistics"),
    }

    queries::report_queries(
        &summary.stats,
        &reporter,
        args.min_count,
        args.top_words,
        unique_article_url.as_deref(),
    );

    // Close the report stream and let the printer flush everything.
    drop(reporter);
    if let Err(e) = printer.await {
        error!(error = %e, "Report printer task failed");
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
