//! Per-article fetch and parse: the processor invoked by pool workers.
//!
//! One article is one HTTP GET plus an HTML parse: find the content
//! container by class signature, gather the text of its `<p>` descendants,
//! and count words. Any failure along the way (network, HTTP status, missing
//! container) surfaces as an error the worker converts into a dropped
//! article.

use crate::config::SiteConfig;
use crate::models::{ArticleHeader, LocalFrequency};
use crate::pool::worker::ArticleProcessor;
use crate::text::word_frequency;
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::error::Error;
use tracing::debug;

/// Fetches articles over HTTP and computes their word frequencies.
///
/// Safe to share across workers: the inner `reqwest::Client` pools
/// connections and is designed for concurrent use, and nothing else here
/// is mutable.
#[derive(Debug)]
pub struct HttpArticleProcessor {
    client: reqwest::Client,
    signature_content: String,
}

impl HttpArticleProcessor {
    /// Build a processor for the configured site.
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            signature_content: config.signature_content.clone(),
        }
    }
}

#[async_trait]
impl ArticleProcessor for HttpArticleProcessor {
    async fn process(
        &self,
        article: &ArticleHeader,
    ) -> Result<LocalFrequency, Box<dyn Error + Send + Sync>> {
        let body = self
            .client
            .get(&article.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let freq = extract_frequency(&body, &self.signature_content)?;
        debug!(url = %article.url, words = freq.len(), "Parsed article");
        Ok(freq)
    }
}

/// Pull the article text out of the page and count its words.
///
/// Kept synchronous so the parsed document never lives inside the async
/// processor future.
fn extract_frequency(
    html: &str,
    signature_content: &str,
) -> Result<LocalFrequency, Box<dyn Error + Send + Sync>> {
    let content_selector = Selector::parse(&format!("[class*=\"{signature_content}\"]"))
        .map_err(|e| format!("invalid content signature {signature_content:?}: {e}"))?;
    let paragraph_selector = Selector::parse("p").unwrap();

    let document = Html::parse_document(html);
    let Some(content) = document.select(&content_selector).next() else {
        return Err(format!("no element with class containing {signature_content:?}").into());
    };

    let mut text = String::new();
    for paragraph in content.select(&paragraph_selector) {
        for fragment in paragraph.text() {
            text.push_str(fragment);
            text.push(' ');
        }
    }

    Ok(word_frequency(&text))
}
