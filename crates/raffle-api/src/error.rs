//! API error types and their HTTP mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use raffle_crawl::CrawlError;
use raffle_draw::SelectionError;
use serde::Serialize;
use thiserror::Error;

/// Failures a request handler can surface.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The draw request failed validation.
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// The crawl collaborator failed; its message is passed through.
    #[error(transparent)]
    Crawl(#[from] CrawlError),

    /// A draw was requested before any successful crawl.
    #[error("no participants yet — crawl a post before drawing")]
    NoRoster,

    /// A session endpoint was hit before any draw started.
    #[error("no draw session exists")]
    NoSession,

    /// The winner list was requested while the reveal is still running.
    #[error("the draw is still revealing winners")]
    DrawInProgress,
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Selection(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            Self::Crawl(CrawlError::InvalidUrl(_)) => (StatusCode::BAD_REQUEST, "invalid_url"),
            Self::Crawl(CrawlError::NoComments) => (StatusCode::NOT_FOUND, "no_comments"),
            Self::Crawl(CrawlError::Rejected(_) | CrawlError::Request(_)) => {
                (StatusCode::BAD_GATEWAY, "crawl_failed")
            }
            Self::NoRoster => (StatusCode::BAD_REQUEST, "no_participants"),
            Self::NoSession => (StatusCode::NOT_FOUND, "no_active_session"),
            Self::DrawInProgress => (StatusCode::CONFLICT, "draw_in_progress"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();
        let body = ErrorBody {
            error: error_code,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
