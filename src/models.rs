//! Data models for crawl work items and word-frequency statistics.
//!
//! This module defines the core data structures used throughout the application:
//! - [`ArticleHeader`]: One unit of crawl work, as discovered on the front page
//! - [`LocalFrequency`]: Per-article word→count result produced by one worker
//! - [`WordStats`]: Cumulative word statistics across all processed articles
//!
//! An `ArticleHeader` is immutable once created: it is enqueued exactly once,
//! dequeued by exactly one worker, and never re-enqueued.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Per-article word→count mapping, built privately by one worker.
///
/// A `LocalFrequency` is never shared between workers: it is produced while
/// parsing one article, consumed exactly once by the merge step, and then
/// discarded.
pub type LocalFrequency = HashMap<String, u64>;

/// An article header as discovered on the front page.
///
/// Carries the locator used to fetch the article plus descriptive metadata
/// used only for reporting.
///
/// # Fields
///
/// * `url` - The absolute article URL; unique locator for this work item
/// * `title` - The headline shown on the front page
/// * `byline` - Author attribution, if present
/// * `summary` - Front-page excerpt, if present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleHeader {
    /// The absolute article URL.
    pub url: String,
    /// The headline as shown on the front page.
    pub title: String,
    /// Author attribution, when the front page carries one.
    pub byline: Option<String>,
    /// Front-page excerpt, when the front page carries one.
    pub summary: Option<String>,
}

/// Cumulative statistics for one word across all processed articles.
///
/// # Invariant
///
/// `count` equals the sum of per-article occurrence counts over exactly the
/// articles merged so far, and `articles` contains exactly the distinct URLs
/// of articles in which the word appeared at least once.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WordStats {
    /// Total number of occurrences across all processed articles.
    pub count: u64,
    /// URLs of the articles that contained this word at least once.
    ///
    /// A `BTreeSet` keeps the exported JSON deterministic.
    pub articles: BTreeSet<String>,
}

/// The finished word→statistics table, as handed to the export step.
pub type WordStatsTable = HashMap<String, WordStats>;
