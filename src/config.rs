//! Site configuration: which front page to crawl and how to recognize
//! article parts in its markup.
//!
//! Defaults target TechCrunch's classic markup. A YAML file passed via
//! `--config` overrides any subset of the fields:
//!
//! ```yaml
//! site_url: "https://techcrunch.com/"
//! max_articles: 20
//! signature_title: "post-title"
//! signature_byline: "byline"
//! signature_summary: "excerpt"
//! signature_content: "article-entry"
//! ```

use serde::Deserialize;
use std::error::Error;
use tracing::info;

/// Crawl target configuration.
///
/// The `signature_*` fields are CSS class fragments: an element whose
/// `class` attribute contains the fragment is treated as the corresponding
/// article part.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Front page URL where article headers are discovered.
    pub site_url: String,
    /// Cap on how many discovered articles are enqueued.
    pub max_articles: usize,
    /// Class fragment marking an article title link on the front page.
    pub signature_title: String,
    /// Class fragment marking the byline on the front page.
    pub signature_byline: String,
    /// Class fragment marking the excerpt on the front page.
    pub signature_summary: String,
    /// Class fragment marking the main content container on an article page.
    pub signature_content: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_url: "https://techcrunch.com/".to_string(),
            max_articles: 20,
            signature_title: "post-title".to_string(),
            signature_byline: "byline".to_string(),
            signature_summary: "excerpt".to_string(),
            signature_content: "article-entry".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a YAML file, or fall back to the defaults
    /// when no path is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid YAML.
    pub async fn load(path: Option<&str>) -> Result<Self, Box<dyn Error>> {
        match path {
            Some(p) => {
                let raw = tokio::fs::read_to_string(p).await?;
                let config: SiteConfig = serde_yaml::from_str(&raw)?;
                info!(path = %p, site_url = %config.site_url, "Loaded site configuration");
                Ok(config)
            }
            None => {
                let config = SiteConfig::default();
                info!(site_url = %config.site_url, "Using default site configuration");
                Ok(config)
            }
        }
    }
}
