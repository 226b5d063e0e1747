//! Command-line interface definitions for newsfreq.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Options cover the crawl target, the worker pool size, and the built-in
//! query knobs.

use clap::Parser;

/// Command-line arguments for the newsfreq crawler.
///
/// # Examples
///
/// ```sh
/// # Crawl the default site with 3 workers
/// newsfreq -o ./out
///
/// # Wider pool and a different site configuration
/// newsfreq -o ./out -w 8 --config site.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output directory for the exported word-statistics JSON
    #[arg(short, long)]
    pub output_dir: String,

    /// Number of concurrent workers in the pool
    #[arg(short, long, env = "NEWSFREQ_WORKERS", default_value_t = 3)]
    pub workers: usize,

    /// Optional path to a site configuration YAML file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Minimum total count for the "frequent words" query
    #[arg(long, default_value_t = 200)]
    pub min_count: u64,

    /// How many words the "top words" query reports
    #[arg(long, default_value_t = 50)]
    pub top_words: usize,

    /// Index (1-based) of the crawled article used for the unique-words query
    #[arg(long, default_value_t = 2)]
    pub unique_article: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(&["newsfreq", "--output-dir", "./out"]);
        assert_eq!(cli.output_dir, "./out");
        assert_eq!(cli.min_count, 200);
        assert_eq!(cli.top_words, 50);
        assert_eq!(cli.unique_article, 2);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(&["newsfreq", "-o", "/tmp/out", "-w", "8", "-c", "site.yaml"]);
        assert_eq!(cli.output_dir, "/tmp/out");
        assert_eq!(cli.workers, 8);
        assert_eq!(cli.config.as_deref(), Some("site.yaml"));
    }

    #[test]
    fn test_cli_workers_default_env_and_flag() {
        // All assertions touching NEWSFREQ_WORKERS live in this one test so
        // parallel tests never observe the variable mid-change.
        let cli = Cli::parse_from(&["newsfreq", "-o", "./out"]);
        assert_eq!(cli.workers, 3);

        // SAFETY: no other test reads or writes this variable.
        unsafe { std::env::set_var("NEWSFREQ_WORKERS", "6") };
        let cli = Cli::parse_from(&["newsfreq", "-o", "./out"]);
        assert_eq!(cli.workers, 6);

        // An explicit flag still wins over the environment.
        let cli = Cli::parse_from(&["newsfreq", "-o", "./out", "-w", "2"]);
        assert_eq!(cli.workers, 2);
        unsafe { std::env::remove_var("NEWSFREQ_WORKERS") };
    }

    #[test]
    fn test_cli_query_knobs() {
        let cli = Cli::parse_from(&[
            "newsfreq",
            "-o",
            "./out",
            "--min-count",
            "10",
            "--top-words",
            "5",
            "--unique-article",
            "1",
        ]);
        assert_eq!(cli.min_count, 10);
        assert_eq!(cli.top_words, 5);
        assert_eq!(cli.unique_article, 1);
    }
}
