//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use raffle_core::clock::Clock;
use raffle_core::rng::DrawRng;
use raffle_crawl::CommentSource;
use raffle_draw::{DrawEngine, DrawTiming};
use raffle_test_support::{FixedClock, MockRng, StaticComments};
use tower::ServiceExt;

use raffle_api::routes;
use raffle_api::state::AppState;

/// Canned crawl authors used by most tests; deduplicates to
/// `[alice, bob, carol, dave]`.
pub const TEST_AUTHORS: &[&str] = &["alice", "bob", "alice", "carol", "dave"];

/// With `MockRng` every shuffle swap targets index 0, so two winners out of
/// the deduplicated test universe are always `bob` then `carol`.
pub const MOCK_WINNERS: [&str; 2] = ["bob", "carol"];

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 8, 1, 12, 0, 0).unwrap(),
    ))
}

/// Build the app router with the canned comment source, deterministic
/// clock/RNG, and near-instant reveal pacing. Uses the same route structure
/// as `main.rs`.
pub fn build_test_app() -> Router {
    build_test_app_with_source(Arc::new(StaticComments::with_authors(TEST_AUTHORS)))
}

/// Build the app router with a custom comment source (e.g. a failing one).
pub fn build_test_app_with_source(source: Arc<dyn CommentSource>) -> Router {
    build_app(source, DrawTiming::fast())
}

/// Build the app router with custom reveal pacing (e.g. the slow production
/// defaults, for in-progress assertions).
pub fn build_test_app_with_timing(timing: DrawTiming) -> Router {
    build_app(
        Arc::new(StaticComments::with_authors(TEST_AUTHORS)),
        timing,
    )
}

fn build_app(source: Arc<dyn CommentSource>, timing: DrawTiming) -> Router {
    let rng: Arc<Mutex<dyn DrawRng>> = Arc::new(Mutex::new(MockRng));
    let engine = DrawEngine::new(timing, fixed_clock(), rng);
    let app_state = AppState::new(engine, source);

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/crawl", routes::crawl::router())
        .nest("/api/v1/draw", routes::draw::router())
        .with_state(app_state)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Poll the current-snapshot endpoint until the session reports done.
///
/// # Panics
///
/// Panics if the draw does not finish within the polling budget.
pub async fn poll_until_done(app: &Router) -> serde_json::Value {
    for _ in 0..200 {
        let (status, json) = get_json(app.clone(), "/api/v1/draw/current").await;
        assert_eq!(status, StatusCode::OK);
        if json["done"] == serde_json::json!(true) {
            return json;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("draw did not finish within the polling budget");
}
