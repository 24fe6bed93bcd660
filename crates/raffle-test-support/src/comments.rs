//! Test comment sources — canned and failing `CommentSource` fakes.

use async_trait::async_trait;
use raffle_crawl::{Comment, CommentSource, CrawlError, CrawlPayload, CrawlStats};

/// A comment source that returns the same canned payload for every URL.
#[derive(Debug)]
pub struct StaticComments {
    comments: Vec<Comment>,
}

impl StaticComments {
    /// Create a source that yields one comment per author name, in order.
    #[must_use]
    pub fn with_authors(authors: &[&str]) -> Self {
        let comments = authors
            .iter()
            .map(|author| Comment {
                author: (*author).to_owned(),
                content: String::new(),
                posted_at: String::new(),
            })
            .collect();
        Self { comments }
    }
}

#[async_trait]
impl CommentSource for StaticComments {
    async fn fetch_comments(&self, _url: &str) -> Result<CrawlPayload, CrawlError> {
        let unique = self
            .comments
            .iter()
            .map(|c| c.author.as_str())
            .collect::<std::collections::HashSet<_>>()
            .len();
        Ok(CrawlPayload {
            comments: self.comments.clone(),
            stats: CrawlStats {
                total_comments: self.comments.len(),
                unique_authors: unique,
            },
        })
    }
}

/// A comment source that always fails with a `Rejected` error carrying the
/// configured message.
#[derive(Debug)]
pub struct FailingComments(pub &'static str);

#[async_trait]
impl CommentSource for FailingComments {
    async fn fetch_comments(&self, _url: &str) -> Result<CrawlPayload, CrawlError> {
        Err(CrawlError::Rejected(self.0.to_owned()))
    }
}
