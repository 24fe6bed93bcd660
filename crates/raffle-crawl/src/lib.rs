//! Raffle Crawl — the crawling-collaborator boundary.
//!
//! The raffle never scrapes pages itself; it consumes an external crawl
//! collaborator through the [`source::CommentSource`] trait and derives its
//! participant universe from the returned author values. The one production
//! implementation talks to the crawl service over HTTP.

pub mod http;
pub mod source;

pub use http::HttpCommentSource;
pub use source::{Comment, CommentSource, CrawlError, CrawlPayload, CrawlStats};
