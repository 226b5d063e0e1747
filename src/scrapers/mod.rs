//! Front-page discovery and article fetching.
//!
//! The crawl has two phases, kept deliberately separate from the worker
//! pool that drives them:
//!
//! 1. **Discovery**: fetch the front page once and extract article headers
//!    (URL, title, byline, excerpt) before any worker starts
//! 2. **Fetching**: download and parse one article per work item, invoked
//!    concurrently by the pool workers through the
//!    [`ArticleProcessor`](crate::pool::worker::ArticleProcessor) seam
//!
//! Which markup counts as a title, byline, excerpt, or content container is
//! driven by the class signatures in [`SiteConfig`](crate::config::SiteConfig),
//! so a different news site is a config change, not a code change.
//!
//! Failed article fetches are reported and skipped; they never fail the run.

pub mod article;
pub mod frontpage;
