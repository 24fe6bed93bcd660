//! Raffle API server entry point.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use raffle_api::{routes, state::AppState};
use raffle_core::clock::SystemClock;
use raffle_core::rng::SystemRng;
use raffle_crawl::HttpCommentSource;
use raffle_draw::{DrawEngine, DrawTiming};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting raffle API server");

    // Read configuration from environment.
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .map_err(|e| format!("PORT must be a valid u16: {e}"))?;
    let crawler_url = std::env::var("CRAWLER_URL")
        .unwrap_or_else(|_| "http://localhost:5000/api/crawl".to_string());

    // Build application state.
    let engine = DrawEngine::new(
        DrawTiming::default(),
        Arc::new(SystemClock),
        Arc::new(Mutex::new(SystemRng)),
    );
    let comment_source = Arc::new(HttpCommentSource::new(crawler_url));
    let app_state = AppState::new(engine, comment_source);

    // Build router.
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/crawl", routes::crawl::router())
        .nest("/api/v1/draw", routes::draw::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server.
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| format!("invalid HOST:PORT combination: {e}"))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
