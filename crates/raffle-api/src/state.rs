//! Shared application state.

use std::sync::{Arc, Mutex};

use raffle_core::participant::Participant;
use raffle_crawl::{CommentSource, CrawlStats};
use raffle_draw::DrawEngine;

/// The participant roster produced by the most recent successful crawl.
#[derive(Debug, Clone)]
pub struct Roster {
    /// URL the roster was crawled from.
    pub url: String,
    /// Deduplicated participant universe, in order of first appearance.
    pub universe: Vec<Participant>,
    /// Counts reported by the crawl collaborator.
    pub stats: CrawlStats,
}

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The draw engine; owns the single live session.
    pub engine: DrawEngine,
    /// The crawling collaborator.
    pub comment_source: Arc<dyn CommentSource>,
    /// Last crawled roster, if any.
    pub roster: Arc<Mutex<Option<Roster>>>,
}

impl AppState {
    /// Create new application state with an empty roster.
    #[must_use]
    pub fn new(engine: DrawEngine, comment_source: Arc<dyn CommentSource>) -> Self {
        Self {
            engine,
            comment_source,
            roster: Arc::new(Mutex::new(None)),
        }
    }
}
