// src/error.rs
// =============================================================================
// Error types for fetching and crawling pages.
//
// The application glue in main.rs uses anyhow::Result, but the crawler needs
// to tell failures apart (bad URL vs. network vs. HTTP status vs. not HTML)
// so it can log them and keep going. thiserror generates the Display and
// Error impls from the #[error(...)] attributes.
// =============================================================================

use reqwest::StatusCode;

/// Everything that can go wrong while fetching a single page.
///
/// Malformed hrefs are not represented here: they are skipped during
/// extraction and never surface as errors.
#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    /// The URL could not be parsed as an absolute URL
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The HTTP client itself could not be built (bad TLS setup, etc.)
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// DNS, connect, timeout or body read failure
    #[error("Failed to fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status code
    #[error("Bad status for {url}: HTTP {status}")]
    Status { url: String, status: StatusCode },

    /// The response is not an HTML document, so there is nothing to parse
    #[error("Failed to parse {url}: content type '{content_type}' is not HTML")]
    NotHtml { url: String, content_type: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message() {
        let err = CrawlError::Status {
            url: "https://example.com/missing".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert_eq!(
            err.to_string(),
            "Bad status for https://example.com/missing: HTTP 500 Internal Server Error"
        );
    }

    #[test]
    fn test_invalid_url_keeps_source() {
        let source = url::Url::parse("not a url").unwrap_err();
        let err = CrawlError::InvalidUrl {
            url: "not a url".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("Invalid URL 'not a url'"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
