//! Draw endpoints: start a session, poll its snapshot, read the winners.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use raffle_core::participant::Participant;
use raffle_draw::{DrawRequest, SessionSnapshot};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/v1/draw request body.
#[derive(Debug, Deserialize)]
pub struct StartDrawRequest {
    /// Number of winners to reveal.
    pub winner_count: usize,
}

/// GET /api/v1/draw/winners response body.
#[derive(Debug, Serialize)]
pub struct WinnersResponse {
    /// The finalized winner list, in rank order.
    pub winners: Vec<Participant>,
}

/// POST / — start a draw (or redraw) over the stored roster.
async fn start_draw(
    State(state): State<AppState>,
    Json(body): Json<StartDrawRequest>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let universe = state
        .roster
        .lock()
        .expect("roster lock poisoned")
        .as_ref()
        .map(|roster| roster.universe.clone())
        .ok_or(ApiError::NoRoster)?;

    let snapshot = state.engine.start_session(DrawRequest {
        universe,
        winner_count: body.winner_count,
    })?;
    Ok(Json(snapshot))
}

/// GET /current — the latest session snapshot.
async fn current_snapshot(
    State(state): State<AppState>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    state.engine.snapshot().map(Json).ok_or(ApiError::NoSession)
}

/// GET /winners — the finalized winner list, only once the reveal is done.
async fn winners(State(state): State<AppState>) -> Result<Json<WinnersResponse>, ApiError> {
    let snapshot = state.engine.snapshot().ok_or(ApiError::NoSession)?;
    if !snapshot.done {
        return Err(ApiError::DrawInProgress);
    }
    let winners = state.engine.winners().ok_or(ApiError::DrawInProgress)?;
    Ok(Json(WinnersResponse { winners }))
}

/// Returns the draw router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(start_draw))
        .route("/current", get(current_snapshot))
        .route("/winners", get(winners))
}
