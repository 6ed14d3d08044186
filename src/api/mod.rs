//! Read-only HTTP API over the JSON artifacts.
//!
//! The API never scrapes. It serves whatever the `scrape` command last wrote
//! to the data directory:
//!
//! - `GET /api/articles` answers from an [`ArticleCache`] loaded once at
//!   startup and never invalidated; restart the server to pick up new runs.
//! - `GET /api/articles/{category}` re-reads that category's file on every
//!   request, so it can be newer than the aggregated route.

pub mod cache;
mod routes;

pub use cache::ArticleCache;

use crate::config::Settings;
use axum::Router;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub data_dir: Arc<PathBuf>,
    pub cache: Arc<ArticleCache>,
}

/// Build the router with CORS and request tracing.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::routes())
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
}

/// Load the cache and serve until Ctrl-C.
pub async fn serve(settings: &Settings) -> Result<(), Box<dyn Error>> {
    let cache = ArticleCache::load(&settings.data_dir).await;
    let state = AppState {
        data_dir: Arc::new(settings.data_dir.clone()),
        cache: Arc::new(cache),
    };

    let listener = tokio::net::TcpListener::bind(settings.bind).await?;
    info!(addr = %settings.bind, data_dir = %settings.data_dir.display(), "Server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
