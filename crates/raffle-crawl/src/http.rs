//! HTTP client for the external crawl service.
//!
//! The crawl service exposes a single JSON endpoint: POST `{ "url": ... }`,
//! answered with `{ success, data, stats, error }`. This client speaks that
//! shape and nothing else.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::source::{Comment, CommentSource, CrawlError, CrawlPayload, CrawlStats};

/// `CommentSource` implementation backed by the crawl service's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpCommentSource {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct CrawlRequestBody<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct CrawlResponseBody {
    success: bool,
    #[serde(default)]
    data: Vec<Comment>,
    stats: Option<CrawlStats>,
    error: Option<String>,
}

impl HttpCommentSource {
    /// Creates a client for the crawl service at `endpoint`
    /// (e.g. `http://localhost:5000/api/crawl`).
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl CommentSource for HttpCommentSource {
    async fn fetch_comments(&self, url: &str) -> Result<CrawlPayload, CrawlError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(CrawlError::InvalidUrl("url must not be empty".to_owned()));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(CrawlError::InvalidUrl(format!(
                "not an absolute http(s) url: {url}"
            )));
        }

        tracing::info!(url, "requesting crawl");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&CrawlRequestBody { url })
            .send()
            .await
            .map_err(|e| CrawlError::Request(e.to_string()))?;

        let body: CrawlResponseBody = response
            .json()
            .await
            .map_err(|e| CrawlError::Request(format!("malformed crawl response: {e}")))?;

        if !body.success {
            let message = body
                .error
                .unwrap_or_else(|| "crawl service rejected the request".to_owned());
            tracing::warn!(url, %message, "crawl rejected");
            return Err(CrawlError::Rejected(message));
        }
        if body.data.is_empty() {
            return Err(CrawlError::NoComments);
        }

        let stats = body.stats.unwrap_or_else(|| {
            // Older service builds omit stats; recompute from the list.
            let unique = body
                .data
                .iter()
                .map(|c| c.author.as_str())
                .collect::<std::collections::HashSet<_>>()
                .len();
            CrawlStats {
                total_comments: body.data.len(),
                unique_authors: unique,
            }
        });

        tracing::info!(
            url,
            total_comments = stats.total_comments,
            unique_authors = stats.unique_authors,
            "crawl complete"
        );

        Ok(CrawlPayload {
            comments: body.data,
            stats,
        })
    }
}
