//! Shared word-statistics table and the per-article merge step.
//!
//! Every worker folds its article's [`LocalFrequency`] into one shared
//! table. The fold of one article is a single critical section: each
//! per-word update is a read-modify-write (bump or create the count, then
//! add the article URL to the entry's set), so the lock must span the whole
//! of one article's contribution or concurrent workers touching the same
//! word could lose updates.
//!
//! Merge order across workers is unspecified; counts and URL sets are
//! order-independent accumulations, so the final table is identical for any
//! interleaving.

use crate::models::{LocalFrequency, WordStats, WordStatsTable};
use std::sync::Mutex;

/// The shared aggregation table, mutated only through [`merge`](Self::merge).
///
/// Created empty before the workers start; once every worker has exited the
/// orchestrator takes it back out with [`into_table`](Self::into_table) and
/// it becomes plain immutable data.
#[derive(Debug, Default)]
pub struct SharedWordStats {
    table: Mutex<WordStatsTable>,
}

impl SharedWordStats {
    /// Create an empty table for a new run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one article's word counts into the table, atomically.
    ///
    /// Strictly serialized against other merges; no caller ever observes a
    /// partially-merged article.
    ///
    /// # Arguments
    ///
    /// * `local` - The article's private word→count result
    /// * `article_url` - Locator recorded against every word the article contained
    pub fn merge(&self, local: &LocalFrequency, article_url: &str) {
        let mut table = self.table.lock().expect("stats table mutex poisoned");
        for (word, count) in local {
            let entry = table.entry(word.clone()).or_insert_with(WordStats::default);
            entry.count += count;
            entry.articles.insert(article_url.to_string());
        }
    }

    /// Number of distinct words seen so far.
    pub fn word_count(&self) -> usize {
        self.table.lock().expect("stats table mutex poisoned").len()
    }

    /// Consume the shared wrapper and hand back the finished table.
    ///
    /// Called only after all workers have joined, so no merge can be in
    /// flight.
    pub fn into_table(self) -> WordStatsTable {
        self.table
            .into_inner()
            .expect("stats table mutex poisoned")
    }
}
