//! Built-in console queries over the finished statistics table.
//!
//! Three fixed queries, answered in memory and emitted as `Result` report
//! events: words whose total count reaches a threshold, words unique to a
//! single chosen article, and the top-N words overall.

use crate::models::WordStatsTable;
use crate::pool::reporter::Reporter;
use itertools::Itertools;
use tracing::instrument;

/// Words whose cumulative count is at least `min_count`, most frequent
/// first (ties broken alphabetically).
pub fn frequent_words(table: &WordStatsTable, min_count: u64) -> Vec<(&str, u64)> {
    table
        .iter()
        .filter(|(_, stats)| stats.count >= min_count)
        .map(|(word, stats)| (word.as_str(), stats.count))
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)))
        .collect()
}

/// Words that occurred exactly once overall, inside the given article.
pub fn unique_words_in<'a>(table: &'a WordStatsTable, article_url: &str) -> Vec<&'a str> {
    table
        .iter()
        .filter(|(_, stats)| stats.count == 1 && stats.articles.contains(article_url))
        .map(|(word, _)| word.as_str())
        .sorted()
        .collect()
}

/// The `limit` most frequent words, most frequent first (ties broken
/// alphabetically).
pub fn top_words(table: &WordStatsTable, limit: usize) -> Vec<(&str, u64)> {
    table
        .iter()
        .map(|(word, stats)| (word.as_str(), stats.count))
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)))
        .take(limit)
        .collect()
}

/// Run all three queries and emit their answers as `Result` reports.
///
/// `unique_in` names the article used for the uniqueness query; when the
/// crawl produced no such article the query is skipped.
#[instrument(level = "info", skip_all, fields(words = table.len()))]
pub fn report_queries(
    table: &WordStatsTable,
    reporter: &Reporter,
    min_count: u64,
    top_limit: usize,
    unique_in: Option<&str>,
) {
    let frequent = frequent_words(table, min_count);
    reporter.result(format!(
        "{} words with at least {} occurrences",
        frequent.len(),
        min_count
    ));

    if let Some(url) = unique_in {
        let unique = unique_words_in(table, url);
        reporter.result(format!("{} unique words within {}", unique.len(), url));
    }

    let top = top_words(table, top_limit);
    let listing = top
        .iter()
        .map(|(word, count)| format!("{word} ({count})"))
        .join(", ");
    reporter.result(format!("Top {} words: {}", top.len(), listing));
}
