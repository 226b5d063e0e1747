//! Front-page indexing: discover article headers before the pool starts.
//!
//! The front page is fetched once. Every element whose `class` contains the
//! configured title signature is treated as one article header; its anchor
//! supplies the URL (resolved against the front-page URL, so relative links
//! work) and the surrounding block is searched for a byline and an excerpt.

use crate::config::SiteConfig;
use crate::models::ArticleHeader;
use crate::utils::truncate_for_log;
use scraper::{ElementRef, Html, Selector};
use std::error::Error;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Index the configured front page and extract article headers.
///
/// Headers are returned in page order, capped at `config.max_articles`.
/// Entries without a usable link are skipped with a warning.
///
/// # Errors
///
/// Returns an error if the front page cannot be fetched or a configured
/// class signature does not form a valid selector.
#[instrument(level = "info", skip_all, fields(site = %config.site_url))]
pub async fn index_articles(config: &SiteConfig) -> Result<Vec<ArticleHeader>, Box<dyn Error>> {
    let base_url = Url::parse(&config.site_url)?;
    let html = reqwest::get(config.site_url.clone())
        .await?
        .error_for_status()?
        .text()
        .await?;
    debug!(preview = %truncate_for_log(&html, 200), "Fetched front page");

    let headers = parse_front_page(&html, &base_url, config)?;
    info!(
        count = headers.len(),
        source = %config.site_url,
        "Indexed article headers"
    );
    debug!(urls = ?headers.iter().map(|h| &h.url).collect::<Vec<_>>(), "Front page URLs");
    Ok(headers)
}

/// Extract article headers from front-page HTML.
fn parse_front_page(
    html: &str,
    base_url: &Url,
    config: &SiteConfig,
) -> Result<Vec<ArticleHeader>, Box<dyn Error>> {
    let title_selector = class_selector(&config.signature_title)?;
    let byline_selector = class_selector(&config.signature_byline)?;
    let summary_selector = class_selector(&config.signature_summary)?;
    let anchor_selector = Selector::parse("a[href]").unwrap();

    let document = Html::parse_document(html);
    let mut headers = Vec::new();

    for title_element in document.select(&title_selector) {
        if headers.len() >= config.max_articles {
            break;
        }

        // The anchor either is the title element or sits inside it.
        let anchor = if title_element.value().attr("href").is_some() {
            Some(title_element)
        } else {
            title_element.select(&anchor_selector).next()
        };
        let Some(anchor) = anchor else {
            warn!(title = %element_text(&title_element), "Title without a link; skipping entry");
            continue;
        };
        let href = anchor.value().attr("href").unwrap_or_default();
        let Ok(resolved) = base_url.join(href) else {
            warn!(%href, "Unresolvable article link; skipping entry");
            continue;
        };

        // Byline and excerpt live somewhere in the same block as the title.
        let block = title_element
            .parent()
            .and_then(ElementRef::wrap)
            .unwrap_or(title_element);
        let byline = block
            .select(&byline_selector)
            .next()
            .map(|e| element_text(&e))
            .filter(|t| !t.is_empty());
        let summary = block
            .select(&summary_selector)
            .next()
            .map(|e| element_text(&e))
            .filter(|t| !t.is_empty());

        headers.push(ArticleHeader {
            url: resolved.to_string(),
            title: element_text(&anchor),
            byline,
            summary,
        });
    }

    Ok(headers)
}

/// Build a selector matching any element whose `class` contains `signature`.
fn class_selector(signature: &str) -> Result<Selector, Box<dyn Error>> {
    Selector::parse(&format!("[class*=\"{signature}\"]"))
        .map_err(|e| format!("invalid class signature {signature:?}: {e}").into())
}

/// Collapse an element's text nodes into one trimmed string.
fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FRONT_PAGE: &str = r#"
        <html><body>
          <div class="post">
            <h2 class="post-title"><a href="/2026/01/first-story/">First story</a></h2>
            <div class="byline">By Alice</div>
            <p class="excerpt">Something happened.</p>
          </div>
          <div class="post">
            <h2 class="post-title"><a href="https://elsewhere.example/second">Second story</a></h2>
          </div>
          <div class="post">
            <h2 class="post-title">No link here</h2>
          </div>
        </body></html>
    "#;

    fn config(site_url: &str) -> SiteConfig {
        SiteConfig {
            site_url: site_url.to_string(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_parse_front_page_extracts_headers() {
        let base = Url::parse("https://news.example/").unwrap();
        let headers = parse_front_page(FRONT_PAGE, &base, &config("https://news.example/")).unwrap();

        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0].url, "https://news.example/2026/01/first-story/");
        assert_eq!(headers[0].title, "First story");
        assert_eq!(headers[0].byline.as_deref(), Some("By Alice"));
        assert_eq!(headers[0].summary.as_deref(), Some("Something happened."));
        // Absolute links pass through unchanged; missing byline/excerpt stay None.
        assert_eq!(headers[1].url, "https://elsewhere.example/second");
        assert!(headers[1].byline.is_none());
    }

    #[test]
    fn test_parse_front_page_honors_max_articles() {
        let base = Url::parse("https://news.example/").unwrap();
        let mut cfg = config("https://news.example/");
        cfg.max_articles = 1;
        let headers = parse_front_page(FRONT_PAGE, &base, &cfg).unwrap();
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_parse_front_page_empty_document() {
        let base = Url::parse("https://news.example/").unwrap();
        let headers =
            parse_front_page("<html></html>", &base, &config("https://news.example/")).unwrap();
        assert!(headers.is_empty());
    }

    #[tokio::test]
    async fn test_index_articles_against_mock_server() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FRONT_PAGE))
            .mount(&server)
            .await;

        let cfg = config(&format!("{}/", server.uri()));
        let headers = index_articles(&cfg).await.unwrap();
        assert_eq!(headers.len(), 2);
        assert!(headers[0].url.ends_with("/2026/01/first-story/"));
    }

    #[tokio::test]
    async fn test_index_articles_http_error_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let cfg = config(&format!("{}/", server.uri()));
        assert!(index_articles(&cfg).await.is_err());
    }
}
