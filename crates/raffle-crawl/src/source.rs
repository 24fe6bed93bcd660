//! Comment source abstraction and payload types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One crawled comment. Only `author` matters to the draw; the rest is
/// carried for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Author name, the raw material of the participant universe.
    pub author: String,
    /// Comment body text.
    pub content: String,
    /// Posting time as reported by the crawled page (display-only, so the
    /// source's free-form string is kept as-is).
    #[serde(rename = "time")]
    pub posted_at: String,
}

/// Aggregate counts reported alongside the comment list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlStats {
    /// Total number of comments crawled.
    pub total_comments: usize,
    /// Number of distinct author names among them.
    pub unique_authors: usize,
}

/// Successful crawl result: the flat comment list plus its aggregate counts.
#[derive(Debug, Clone)]
pub struct CrawlPayload {
    /// Crawled comments in page order.
    pub comments: Vec<Comment>,
    /// Aggregate counts for the list.
    pub stats: CrawlStats,
}

/// Failures at the crawl boundary, surfaced to the caller as human-readable
/// messages. The draw engine never sees these; it only activates after a
/// successful crawl.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The supplied URL is empty or malformed.
    #[error("invalid crawl url: {0}")]
    InvalidUrl(String),

    /// The crawl service could not be reached or answered garbage.
    #[error("crawl request failed: {0}")]
    Request(String),

    /// The crawl service answered but refused the request, with its own
    /// message.
    #[error("{0}")]
    Rejected(String),

    /// The crawl succeeded but the page had no usable comments.
    #[error("no comments found at the given url")]
    NoComments,
}

/// Asynchronous crawl collaborator: URL in, comment payload out.
#[async_trait]
pub trait CommentSource: Send + Sync {
    /// Fetches the comments of the post at `url`.
    ///
    /// # Errors
    ///
    /// Returns a [`CrawlError`] when the URL is invalid, the service is
    /// unreachable or refuses, or the post has no comments.
    async fn fetch_comments(&self, url: &str) -> Result<CrawlPayload, CrawlError>;
}
