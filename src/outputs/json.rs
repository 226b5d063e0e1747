//! JSON export of the finished word-statistics table.
//!
//! # Output Structure
//!
//! Files are organized by crawl date:
//! ```text
//! output_dir/
//! └── 2026-08-29/
//!     └── words.json
//! ```
//!
//! The table is re-keyed through a `BTreeMap` before serialization so the
//! file contents are stable across runs with identical statistics.

use crate::models::WordStatsTable;
use chrono::Local;
use std::collections::BTreeMap;
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write the word-statistics table as JSON under a date directory.
///
/// # Arguments
///
/// * `table` - The finished statistics table
/// * `output_dir` - Base directory for exports
///
/// # Returns
///
/// The path of the written file, or an error if directory creation or the
/// write fails.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir))]
pub async fn write_word_stats(
    table: &WordStatsTable,
    output_dir: &str,
) -> Result<String, Box<dyn Error>> {
    let ordered: BTreeMap<_, _> = table.iter().collect();
    let json = serde_json::to_string_pretty(&ordered)?;

    let date_dir = format!(
        "{}/{}",
        output_dir.trim_end_matches('/'),
        Local::now().date_naive()
    );
    if let Err(e) = fs::create_dir_all(&date_dir).await {
        error!(%date_dir, error = %e, "Failed to create export directory");
        return Err(e.into());
    }

    let path = format!("{date_dir}/words.json");
    fs::write(&path, json).await?;
    info!(%path, words = table.len(), "Wrote word statistics");
    Ok(path)
}
