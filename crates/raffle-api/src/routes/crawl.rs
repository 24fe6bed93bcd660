//! Crawl endpoint: turn a post URL into a participant roster.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use raffle_core::participant::dedup_universe;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::{AppState, Roster};

/// POST /api/v1/crawl request body.
#[derive(Debug, Deserialize)]
pub struct CrawlRequest {
    /// URL of the post whose comments should be crawled.
    pub url: String,
}

/// POST /api/v1/crawl response body.
#[derive(Debug, Serialize)]
pub struct CrawlResponse {
    /// Total comments found on the post.
    pub total_comments: usize,
    /// Distinct comment authors (the draw universe size).
    pub unique_authors: usize,
}

/// POST / — crawl the post and store the deduplicated roster.
async fn crawl(
    State(state): State<AppState>,
    Json(body): Json<CrawlRequest>,
) -> Result<Json<CrawlResponse>, ApiError> {
    let payload = state.comment_source.fetch_comments(&body.url).await?;
    let universe = dedup_universe(payload.comments.iter().map(|c| c.author.clone()));

    let response = CrawlResponse {
        total_comments: payload.stats.total_comments,
        unique_authors: universe.len(),
    };

    tracing::info!(
        url = %body.url,
        total_comments = response.total_comments,
        unique_authors = response.unique_authors,
        "roster updated"
    );

    *state.roster.lock().expect("roster lock poisoned") = Some(Roster {
        url: body.url,
        universe,
        stats: payload.stats,
    });

    Ok(Json(response))
}

/// Returns the crawl router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(crawl))
}
