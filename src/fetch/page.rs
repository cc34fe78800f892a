// src/fetch/page.rs
// =============================================================================
// This module fetches a single web page and returns its HTML.
//
// Key functionality:
// - One reqwest Client reused for every request (connection pooling)
// - Per-request timeout and User-Agent taken from CrawlConfig
// - Non-2xx statuses and non-HTML responses become typed errors
//
// The response body is owned by this function: it is either read to the
// end with .text() or dropped when we return early, so nothing leaks on
// error paths.
// =============================================================================

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use url::Url;

use crate::config::CrawlConfig;
use crate::error::CrawlError;

/// Thin wrapper around a configured reqwest client
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(config: &CrawlConfig) -> Result<Self, CrawlError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(CrawlError::Client)?;

        Ok(Self { client })
    }

    // Fetches a page and returns its HTML content
    //
    // Errors:
    //   Transport - DNS/connect/timeout, or the body could not be read
    //   Status    - anything outside 200-299
    //   NotHtml   - a Content-Type header is present and isn't HTML
    pub async fn fetch_page(&self, url: &Url) -> Result<String, CrawlError> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|source| CrawlError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::Status {
                url: url.to_string(),
                status,
            });
        }

        // No Content-Type at all: assume HTML and let the parser cope
        if let Some(value) = response.headers().get(CONTENT_TYPE) {
            let content_type = header_text(value);
            if !is_html(&content_type) {
                return Err(CrawlError::NotHtml {
                    url: url.to_string(),
                    content_type,
                });
            }
        }

        response.text().await.map_err(|source| CrawlError::Transport {
            url: url.to_string(),
            source,
        })
    }
}

// Header values may carry non-ASCII bytes; keep them readable in errors
fn header_text(value: &HeaderValue) -> String {
    String::from_utf8_lossy(value.as_bytes()).into_owned()
}

// "text/html; charset=utf-8" -> true, "application/pdf" -> false
fn is_html(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "text/html" || mime == "application/xhtml+xml"
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn fetcher() -> PageFetcher {
        PageFetcher::new(&CrawlConfig::default()).unwrap()
    }

    #[test]
    fn test_is_html() {
        assert!(is_html("text/html"));
        assert!(is_html("text/html; charset=utf-8"));
        assert!(is_html("Application/XHTML+XML"));
        assert!(!is_html("application/pdf"));
        assert!(!is_html("text/plain"));
        assert!(!is_html(""));
    }

    #[test]
    fn test_header_text_keeps_non_ascii_value() {
        let value = HeaderValue::from_bytes(b"t\xe9xt/plain").unwrap();
        let text = header_text(&value);

        assert_eq!(text, "t\u{fffd}xt/plain");
        assert!(!is_html(&text));
    }

    #[test]
    fn test_header_text_plain_ascii() {
        let value = HeaderValue::from_static("text/html; charset=utf-8");
        assert_eq!(header_text(&value), "text/html; charset=utf-8");
    }

    #[tokio::test]
    async fn test_fetch_page_ok() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/page");
                then.status(200)
                    .header("content-type", "text/html; charset=utf-8")
                    .body("<a href=\"/next\">next</a>");
            })
            .await;

        let url = Url::parse(&server.url("/page")).unwrap();
        let body = fetcher().fetch_page(&url).await.unwrap();

        assert_eq!(body, "<a href=\"/next\">next</a>");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_page_sends_user_agent() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/")
                    .header("user-agent", "custom-agent/1.0");
                then.status(200).body("<p>hi</p>");
            })
            .await;

        let config = CrawlConfig {
            user_agent: "custom-agent/1.0".to_string(),
            ..CrawlConfig::default()
        };
        let fetcher = PageFetcher::new(&config).unwrap();
        let url = Url::parse(&server.url("/")).unwrap();

        assert!(fetcher.fetch_page(&url).await.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_page_bad_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/missing");
                then.status(404);
            })
            .await;

        let url = Url::parse(&server.url("/missing")).unwrap();
        let err = fetcher().fetch_page(&url).await.unwrap_err();

        assert!(matches!(
            err,
            CrawlError::Status { status, .. } if status.as_u16() == 404
        ));
    }

    #[tokio::test]
    async fn test_fetch_page_not_html() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/file.pdf");
                then.status(200)
                    .header("content-type", "application/pdf")
                    .body("%PDF-1.4");
            })
            .await;

        let url = Url::parse(&server.url("/file.pdf")).unwrap();
        let err = fetcher().fetch_page(&url).await.unwrap_err();

        assert!(matches!(err, CrawlError::NotHtml { .. }));
    }

    #[tokio::test]
    async fn test_fetch_page_connection_refused() {
        // Nothing listens on port 1
        let url = Url::parse("http://127.0.0.1:1/").unwrap();
        let err = fetcher().fetch_page(&url).await.unwrap_err();

        assert!(matches!(err, CrawlError::Transport { .. }));
    }
}
